use std::path::Path;

use dockgen_core::config::CONFIG_FILE;
use dockgen_core::{Credentials, DockgenConfig};
use dockgen_exec::{CheckResult, Doctor};

pub async fn doctor() -> anyhow::Result<()> {
    let loaded = DockgenConfig::load(Path::new("."));
    let config = loaded
        .as_ref()
        // arch-lint: allow(no-silent-result-drop) reason="doctor must report diagnostics even when dockgen.toml is invalid; the error is shown in the config check"
        .ok()
        .cloned()
        .unwrap_or_default();

    let credentials = Credentials::from_env();
    let mut report = Doctor::new(&config).check(&credentials).await;

    report.config_file = match &loaded {
        Ok(_) if Path::new(CONFIG_FILE).exists() => CheckResult::ok("Found"),
        Ok(_) => CheckResult::ok("Not found (using defaults)"),
        Err(e) => CheckResult::fail(&e.to_string()),
    };

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}
