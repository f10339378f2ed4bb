//! Per-request staging directories.
//!
//! Every request gets its own directory under a shared staging root. The
//! [`Workspace`] handle owns that directory: it is removed by
//! [`Workspace::release`], or on drop if the handle is abandoned (early
//! return, panic, or a cancelled future). Removal failures are logged and
//! never surfaced, so cleanup cannot replace a request's own outcome.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Disambiguates workspaces created within the same millisecond.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Creates workspaces under a staging root.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a fresh, uniquely named workspace directory.
    ///
    /// The staging root is created on first use if it does not exist.
    pub fn acquire(&self) -> crate::Result<Workspace> {
        std::fs::create_dir_all(&self.root).map_err(|e| crate::Error::StagingRoot {
            path: self.root.clone(),
            source: e,
        })?;

        loop {
            let path = self.root.join(next_name());
            match std::fs::create_dir(&path) {
                Ok(()) => {
                    tracing::debug!(workspace = %path.display(), "workspace acquired");
                    return Ok(Workspace {
                        path,
                        armed: true,
                    });
                }
                // Another process picked the same name; draw the next sequence number.
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(crate::Error::WorkspaceCreate { path, source: e });
                }
            }
        }
    }

    /// Remove a workspace. Equivalent to [`Workspace::release`].
    pub fn release(&self, workspace: Workspace) {
        workspace.release();
    }
}

/// Timestamp-derived directory name: `<unix millis>-<pid>-<sequence>`.
fn next_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        // arch-lint: allow(no-silent-result-drop) reason="a clock before the epoch still yields a unique name via pid and sequence"
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{pid}-{seq}", pid = std::process::id())
}

/// An isolated staging directory owned by exactly one request.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    armed: bool,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recursively remove the directory. Failures are logged, not returned.
    pub fn release(mut self) {
        self.remove();
    }

    /// Keep the directory on disk and hand its path to the caller.
    pub fn persist(mut self) -> PathBuf {
        self.armed = false;
        tracing::info!(workspace = %self.path.display(), "workspace kept");
        std::mem::take(&mut self.path)
    }

    fn remove(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!(workspace = %self.path.display(), "workspace released"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(workspace = %self.path.display(), "workspace already removed")
            }
            Err(e) => tracing::warn!(
                workspace = %self.path.display(),
                error = %e,
                "failed to clean up workspace",
            ),
        }
    }
}

impl AsRef<Path> for Workspace {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.remove();
    }
}
