use std::path::Path;

use dockgen_core::ProjectProfile;

pub fn detect(project_dir: &Path) -> anyhow::Result<()> {
    let profile = ProjectProfile::inspect(project_dir)?;

    println!("Stack:           {}", profile.stack);
    println!("Package manager: {}", profile.package_manager);
    if let Some(script) = profile.build_script() {
        println!("Build script:    {script}");
    }
    println!(
        "Supported:       {}",
        if profile.stack.is_generatable() { "yes" } else { "no" }
    );
    Ok(())
}
