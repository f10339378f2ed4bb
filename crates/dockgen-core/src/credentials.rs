use std::fmt;

use secrecy::SecretString;

/// Environment variable holding the repository access token.
pub const GIT_TOKEN_VAR: &str = "GITHUB_PAT";

/// Environment variable holding the Gemini API key.
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Process-wide credentials loaded from the environment.
///
/// Locally reads from `.env` via dotenvy. Both values are optional:
/// a missing git token only matters when a request does not carry its own,
/// and a missing Gemini key disables assisted generation.
#[derive(Clone, Default)]
pub struct Credentials {
    pub git_token: Option<SecretString>,
    pub gemini_api_key: Option<SecretString>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("git_token", &self.git_token.as_ref().map(|_| "[REDACTED]"))
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Self {
        let dotenv_loaded = dotenvy::dotenv().is_ok();
        tracing::debug!(dotenv = dotenv_loaded, "loading credentials");

        let credentials = Self {
            git_token: optional_env(GIT_TOKEN_VAR),
            gemini_api_key: optional_env(GEMINI_KEY_VAR),
        };

        tracing::debug!(
            git_token_configured = credentials.git_token.is_some(),
            gemini_configured = credentials.gemini_api_key.is_some(),
            "credentials loaded",
        );
        credentials
    }
}

fn optional_env(key: &str) -> Option<SecretString> {
    std::env::var(key)
        // arch-lint: allow(no-silent-result-drop) reason="an unset variable means the credential is not configured"
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}
