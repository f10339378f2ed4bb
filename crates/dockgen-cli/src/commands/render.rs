use std::path::Path;

use dockgen_build::DockerfileGenerator;
use dockgen_build::{eject, support};
use dockgen_core::{DockgenConfig, ProjectProfile};

/// Render the built-in template for a local project.
pub fn render(project_dir: &Path, write: bool, force: bool) -> anyhow::Result<()> {
    let config = DockgenConfig::load(Path::new("."))?;
    let profile = ProjectProfile::inspect(project_dir)?;
    let dockerfile = DockerfileGenerator::new(&config.build, &profile).render()?;

    if !write {
        print!("{dockerfile}");
        return Ok(());
    }

    let path = eject::eject(project_dir, &dockerfile, force)?;
    println!("Wrote {}", path.display());
    for file in support::write_support_files(profile.stack, project_dir)? {
        println!("Wrote {}", file.display());
    }
    Ok(())
}
