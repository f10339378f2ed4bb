use std::path::{Path, PathBuf};

/// Name of the Dockerfile written into a build context.
pub const DOCKERFILE: &str = "Dockerfile";

/// Writes a generated Dockerfile into a project directory.
///
/// Refuses to replace an existing Dockerfile unless `force` is set.
pub fn eject(project_dir: &Path, dockerfile_content: &str, force: bool) -> Result<PathBuf, EjectError> {
    let dockerfile_path = project_dir.join(DOCKERFILE);
    if dockerfile_path.exists() && !force {
        return Err(EjectError::AlreadyExists(dockerfile_path));
    }

    write_dockerfile(project_dir, dockerfile_content)
}

/// Write the Dockerfile into a build context, replacing any existing one.
pub fn write_dockerfile(context_dir: &Path, dockerfile_content: &str) -> Result<PathBuf, EjectError> {
    let dockerfile_path = context_dir.join(DOCKERFILE);
    std::fs::write(&dockerfile_path, dockerfile_content).map_err(|e| EjectError::Write {
        path: dockerfile_path.clone(),
        source: e,
    })?;

    Ok(dockerfile_path)
}

/// Load a Dockerfile from disk.
pub fn load_dockerfile(path: &Path) -> Result<String, EjectError> {
    std::fs::read_to_string(path).map_err(|e| EjectError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum EjectError {
    #[error("Dockerfile already exists at {0} — pass --force to overwrite")]
    AlreadyExists(PathBuf),
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read Dockerfile at {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
