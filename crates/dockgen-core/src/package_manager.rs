use std::fmt;
use std::path::Path;

/// Which dependency-installation tool governs a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

/// Lock-file probe order. npm is the fallback when none is present.
const PROBE_ORDER: [PackageManager; 2] = [PackageManager::Pnpm, PackageManager::Yarn];

impl PackageManager {
    pub const ALL: [PackageManager; 3] =
        [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

    /// Lock-file names of every supported manager.
    pub const LOCK_FILES: [&'static str; 3] = ["package-lock.json", "yarn.lock", "pnpm-lock.yaml"];

    /// Infer the manager from the lock file present in `project_dir`.
    pub fn infer(project_dir: &Path) -> Self {
        let pm = PROBE_ORDER
            .into_iter()
            .find(|pm| project_dir.join(pm.lock_file()).is_file())
            .unwrap_or(PackageManager::Npm);
        tracing::debug!(package_manager = %pm, lock_file = pm.lock_file(), "package manager inferred");
        pm
    }

    pub fn command(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    pub fn lock_file(self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Reproducible install from the lock file.
    pub fn install_command(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm ci",
            PackageManager::Yarn => "yarn install --frozen-lockfile",
            PackageManager::Pnpm => "pnpm install --frozen-lockfile",
        }
    }

    /// Setup needed before the manager is usable in a stock Node.js image.
    pub fn setup_command(self) -> Option<&'static str> {
        match self {
            PackageManager::Pnpm => Some("corepack enable"),
            PackageManager::Npm | PackageManager::Yarn => None,
        }
    }

    pub fn is_lock_file(name: &str) -> bool {
        Self::LOCK_FILES.contains(&name)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}
