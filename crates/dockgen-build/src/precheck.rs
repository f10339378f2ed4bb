use std::path::{Path, PathBuf};

use dockgen_core::Manifest;

/// Next.js config files, in lookup order.
const NEXT_CONFIG_FILES: &[&str] = &["next.config.js", "next.config.mjs", "next.config.ts"];

/// Verify a Next.js project matches what the runtime template assumes.
///
/// The manifest must declare `next` and a build script, and no Next.js
/// config may switch the build to standalone output.
pub fn check_nextjs_project(project_dir: &Path) -> Result<(), PrecheckError> {
    let manifest = Manifest::load(project_dir)
        .map_err(PrecheckError::Manifest)?
        .ok_or(PrecheckError::ManifestMissing)?;

    if !manifest.has_dependency("next") {
        return Err(PrecheckError::FrameworkMissing);
    }

    if manifest.build_script().is_none() {
        return Err(PrecheckError::BuildScriptMissing);
    }

    for name in NEXT_CONFIG_FILES {
        let path = project_dir.join(name);
        if !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|e| PrecheckError::ConfigRead {
            path: path.clone(),
            source: e,
        })?;
        if requests_standalone(&content) {
            return Err(PrecheckError::StandaloneOutput { path });
        }
    }

    Ok(())
}

/// Matches `output: "standalone"` with any quote style and spacing.
fn requests_standalone(config: &str) -> bool {
    let compact: String = config.chars().filter(|c| !c.is_whitespace()).collect();
    ["\"standalone\"", "'standalone'", "`standalone`"]
        .iter()
        .any(|value| compact.contains(&format!("output:{value}")))
}

#[derive(Debug, thiserror::Error)]
pub enum PrecheckError {
    #[error("package.json not found")]
    ManifestMissing,

    #[error(transparent)]
    Manifest(dockgen_core::Error),

    #[error("Next.js dependency not found in package.json")]
    FrameworkMissing,

    #[error("no build script found in package.json")]
    BuildScriptMissing,

    #[error("failed to read {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("standalone output mode is not supported (set in {path})")]
    StandaloneOutput { path: PathBuf },
}
