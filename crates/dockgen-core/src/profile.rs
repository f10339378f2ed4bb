use std::path::Path;

use crate::manifest::Manifest;
use crate::package_manager::PackageManager;
use crate::stack::{StackVariant, classify};

/// Everything the generator, validator and build driver need to know about
/// a staged project, computed once per workspace.
#[derive(Debug, Clone)]
pub struct ProjectProfile {
    pub stack: StackVariant,
    pub package_manager: PackageManager,
    /// `package.json`, when present.
    pub manifest: Option<Manifest>,
}

impl ProjectProfile {
    /// Inspect a project directory: detect its stack and infer its package manager.
    pub fn inspect(project_dir: &Path) -> crate::Result<Self> {
        let manifest = Manifest::load(project_dir)?;
        let stack = manifest
            .as_ref()
            .map(|m| classify(&m.dependency_names()))
            .unwrap_or(StackVariant::Unknown);
        let package_manager = PackageManager::infer(project_dir);

        tracing::info!(
            stack = %stack,
            package_manager = %package_manager,
            "project inspected",
        );

        Ok(Self {
            stack,
            package_manager,
            manifest,
        })
    }

    pub fn build_script(&self) -> Option<&str> {
        self.manifest.as_ref().and_then(Manifest::build_script)
    }

    /// Directory a static build writes to: `dist` for Vite, `build` otherwise.
    pub fn build_output_dir(&self) -> &'static str {
        match self.build_script() {
            Some(script) if script.contains("vite") => "dist",
            _ => "build",
        }
    }
}
