use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the optional configuration file.
pub const CONFIG_FILE: &str = "dockgen.toml";

/// dockgen.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockgenConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub assist: AssistConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory under which per-request workspaces are created
    #[serde(default = "default_staging_root")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Node.js image used by builder stages (and the Next.js runtime stage)
    #[serde(default = "default_node_image")]
    pub node_image: String,
    /// Static file server image for single-page apps
    #[serde(default = "default_nginx_image")]
    pub nginx_image: String,
    /// Tag applied to the built image
    #[serde(default = "default_image_tag")]
    pub image_tag: String,
    /// Container engine CLI
    #[serde(default = "default_engine")]
    pub engine: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// git executable used for staging repositories
    #[serde(default = "default_git_program")]
    pub program: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Set to false to always use the built-in templates
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Generative Language API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_staging_root(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            node_image: default_node_image(),
            nginx_image: default_nginx_image(),
            image_tag: default_image_tag(),
            engine: default_engine(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
        }
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

impl DockgenConfig {
    /// Load from dockgen.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_staging_root() -> PathBuf {
    PathBuf::from("tmp")
}

fn default_node_image() -> String {
    "node:18-alpine".to_owned()
}

fn default_nginx_image() -> String {
    "nginx:alpine".to_owned()
}

fn default_image_tag() -> String {
    "app:latest".to_owned()
}

fn default_engine() -> String {
    "docker".to_owned()
}

fn default_git_program() -> String {
    "git".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.5-flash".to_owned()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_owned()
}
