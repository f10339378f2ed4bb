use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Workspaces ──
    #[error("failed to create staging root {path}")]
    StagingRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create workspace {path}")]
    WorkspaceCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Detection ──
    #[error("failed to read manifest at {path}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to detect tech stack: malformed manifest at {path}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
