use std::path::{Path, PathBuf};

use dockgen_build::eject::{self, DOCKERFILE};
use dockgen_build::instructions::has_from;
use dockgen_core::PackageManager;

pub fn validate(context_dir: &Path, dockerfile: Option<PathBuf>) -> anyhow::Result<()> {
    let dockerfile_path = dockerfile.unwrap_or_else(|| context_dir.join(DOCKERFILE));
    let content = eject::load_dockerfile(&dockerfile_path)?;

    if !has_from(&content) {
        anyhow::bail!("{} has no FROM instruction", dockerfile_path.display());
    }

    let package_manager = PackageManager::infer(context_dir);
    let result = dockgen_build::validate(&content, context_dir, package_manager);

    if !result.is_valid() {
        println!("Missing from {}:", context_dir.display());
        for path in &result.missing_paths {
            println!("  - {path}");
        }
        anyhow::bail!(
            "Dockerfile references {} missing file(s)",
            result.missing_paths.len()
        );
    }

    println!("{} is valid for {}", dockerfile_path.display(), context_dir.display());
    Ok(())
}
