//! Turn a Git repository into a production Dockerfile and a container image.
//!
//! This is the unified facade crate that re-exports all dockgen sub-crates.
//! Use feature flags to control which components are included.
//!
//! # Feature flags
//!
//! | Feature | Default | Crate | Description |
//! |---------|---------|-------|-------------|
//! | `core` | yes | `dockgen-core` | Configuration, workspaces, stack and package-manager detection |
//! | `build` | yes | `dockgen-build` | Dockerfile templates, validation and support files |
//! | `exec` | yes | `dockgen-exec` | git staging, Docker builds, Gemini and the pipeline |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dockgen::{DockgenConfig, ProjectProfile};
//! use dockgen::build::DockerfileGenerator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DockgenConfig::load(Path::new("."))?;
//! let profile = ProjectProfile::inspect(Path::new("."))?;
//! let dockerfile = DockerfileGenerator::new(&config.build, &profile).render()?;
//! # Ok(())
//! # }
//! ```

// Core types flattened into root namespace for convenience.
#[cfg(feature = "core")]
pub use dockgen_core::*;

/// Dockerfile generation, validation, and eject.
#[cfg(feature = "build")]
pub mod build {
    pub use dockgen_build::*;
}

/// Repository staging, container builds, and the end-to-end pipeline.
#[cfg(feature = "exec")]
pub mod exec {
    pub use dockgen_exec::*;
}
