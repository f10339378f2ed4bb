//! Core types and configuration for dockgen.
//!
//! This crate defines the `dockgen.toml` schema ([`DockgenConfig`]),
//! per-request staging directories ([`WorkspaceManager`]), and project
//! inspection: stack detection ([`StackVariant`]) and package-manager
//! inference ([`PackageManager`]), combined in [`ProjectProfile`].

pub mod config;
pub mod credentials;
pub mod error;
pub mod manifest;
pub mod package_manager;
pub mod profile;
pub mod stack;
pub mod workspace;

pub use config::{AssistConfig, BuildConfig, DockgenConfig, GitConfig, WorkspaceConfig};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use manifest::{MANIFEST_FILE, Manifest};
pub use package_manager::PackageManager;
pub use profile::ProjectProfile;
pub use stack::{StackVariant, classify, detect};
pub use workspace::{Workspace, WorkspaceManager};
