//! Repository staging via `git clone`.
//!
//! The access token is embedded as the URL username. It only ever lives in
//! [`authenticated_url`]'s return value and the clone arguments, which are
//! marked sensitive; git diagnostics are scrubbed with [`redact`] before
//! they reach an error.

use std::path::Path;

use dockgen_core::GitConfig;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::command::CommandError;
use crate::executor::{CommandExecutor, Invocation, RealExecutor};

/// Replacement text for credentials in diagnostics.
pub const REDACTED: &str = "***";

/// Clones repositories into workspaces, parameterized over the executor for testability.
pub struct RepoStager<E: CommandExecutor = RealExecutor> {
    executor: E,
    program: String,
    default_credential: Option<SecretString>,
}

impl RepoStager<RealExecutor> {
    pub fn new(config: &GitConfig, default_credential: Option<SecretString>) -> Self {
        Self::with_executor(RealExecutor, config, default_credential)
    }
}

impl<E: CommandExecutor> RepoStager<E> {
    pub fn with_executor(
        executor: E,
        config: &GitConfig,
        default_credential: Option<SecretString>,
    ) -> Self {
        Self {
            executor,
            program: config.program.clone(),
            default_credential,
        }
    }

    /// Clone `location` into `destination`.
    ///
    /// The request credential wins over the process default; with neither,
    /// no clone is attempted.
    pub async fn stage(
        &self,
        location: &str,
        credential: Option<&SecretString>,
        destination: &Path,
    ) -> Result<(), StageError> {
        let credential = credential
            .filter(|c| !c.expose_secret().trim().is_empty())
            .or(self.default_credential.as_ref())
            .ok_or(StageError::CredentialMissing)?;

        let location = normalize_location(location);
        let url = authenticated_url(&location, credential)?;
        let shown = display_location(&location);

        tracing::info!(repository = %shown, destination = %destination.display(), "cloning repository");

        let invocation = Invocation::new(
            &self.program,
            vec![
                "clone".to_owned(),
                url.expose_secret().to_owned(),
                destination.display().to_string(),
            ],
        )
        .sensitive();

        let output = self
            .executor
            .run(&invocation)
            .await
            .map_err(StageError::Transport)?;

        if !output.success() {
            let diagnostic = redact(&output.diagnostic(), credential);
            tracing::warn!(
                repository = %shown,
                exit_code = ?output.exit_code,
                diagnostic = %diagnostic,
                "clone failed",
            );
            return Err(StageError::Failed { diagnostic });
        }

        tracing::info!(repository = %shown, "repository staged");
        Ok(())
    }
}

/// Prefix `https://` unless the location already names an http(s) scheme.
pub fn normalize_location(location: &str) -> String {
    let location = location.trim();
    if location.starts_with("https://") || location.starts_with("http://") {
        location.to_owned()
    } else {
        format!("https://{location}")
    }
}

/// Embed `credential` as the username of `location`, percent-encoded.
///
/// Any userinfo already in `location` is replaced.
pub fn authenticated_url(
    location: &str,
    credential: &SecretString,
) -> Result<SecretString, StageError> {
    let mut url = Url::parse(location).map_err(|e| StageError::InvalidLocation {
        location: display_location(location),
        reason: e.to_string(),
    })?;

    url.set_password(None)
        .and_then(|()| url.set_username(credential.expose_secret()))
        .map_err(|()| StageError::InvalidLocation {
            location: display_location(location),
            reason: "location cannot carry credentials".to_owned(),
        })?;

    Ok(SecretString::from(String::from(url)))
}

/// `location` without any userinfo, for logs and error messages.
pub fn display_location(location: &str) -> String {
    let location = location.trim();
    let mut url = match Url::parse(location) {
        Ok(url) if !url.cannot_be_a_base() => url,
        _ => return strip_userinfo(location),
    };
    if url.username().is_empty() && url.password().is_none() {
        return url.into();
    }
    let cleared = url.set_password(None).and_then(|()| url.set_username(""));
    match cleared {
        Ok(()) => url.into(),
        Err(()) => strip_userinfo(location),
    }
}

/// Textual fallback for locations `Url` rejects, such as `user:pass@host/repo`.
fn strip_userinfo(location: &str) -> String {
    let (scheme, rest) = match location.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, location),
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let rest = match rest[..authority_end].rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    };
    match scheme {
        Some(scheme) => format!("{scheme}://{rest}"),
        None => rest.to_owned(),
    }
}

/// Replace every occurrence of `credential`, raw or percent-encoded, with [`REDACTED`].
pub fn redact(text: &str, credential: &SecretString) -> String {
    let secret = credential.expose_secret();
    if secret.is_empty() {
        return text.to_owned();
    }

    let mut redacted = text.replace(secret, REDACTED);
    if let Some(encoded) = encoded_userinfo(secret) {
        redacted = redacted.replace(&encoded, REDACTED);
    }
    redacted
}

/// The credential as it appears in a URL's userinfo.
fn encoded_userinfo(secret: &str) -> Option<String> {
    // arch-lint: allow(no-silent-result-drop) reason="constant URL always parses"
    let mut probe = Url::parse("https://host.invalid").ok()?;
    // arch-lint: allow(no-silent-result-drop) reason="a secret that cannot be a username has no encoded form to scrub"
    probe.set_username(secret).ok()?;
    Some(probe.username().to_owned())
}

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("no repository credential supplied and GITHUB_PAT is not set")]
    CredentialMissing,

    #[error("invalid repository location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("failed to run git")]
    Transport(#[source] CommandError),

    #[error("failed to clone repository: {diagnostic}")]
    Failed { diagnostic: String },
}
