use std::path::{Component, Path};

use dockgen_core::PackageManager;

use crate::instructions;
use crate::support::NGINX_CONF_FILE;

/// Outcome of checking a Dockerfile's copy sources against a build context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Every missing source, in order of first reference.
    pub missing_paths: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.missing_paths.is_empty()
    }
}

/// Check that every local file a `COPY`/`ADD` references exists in `context_dir`.
///
/// Skipped: stage copies (`--from=`), wildcard sources, remote `ADD`
/// sources and the generated nginx config. Sources that climb out of the
/// context with `..` are always reported. A lock-file source is checked
/// only when it is the lock file of `package_manager`; lock files of other
/// managers are not errors.
pub fn validate(
    dockerfile: &str,
    context_dir: &Path,
    package_manager: PackageManager,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    let specs = instructions::parse(dockerfile)
        .into_iter()
        .filter_map(|i| i.copy_spec())
        .filter(|spec| !spec.from_stage);

    for spec in specs {
        for source in &spec.sources {
            if is_skipped(source) {
                continue;
            }

            let relative = normalize(source);
            if PackageManager::is_lock_file(relative) && relative != package_manager.lock_file() {
                continue;
            }

            let present = !escapes_context(relative) && context_dir.join(relative).exists();
            if !present && !result.missing_paths.contains(source) {
                result.missing_paths.push(source.clone());
            }
        }
    }

    if !result.is_valid() {
        tracing::debug!(missing = ?result.missing_paths, "dockerfile references missing files");
    }
    result
}

fn is_skipped(source: &str) -> bool {
    source.contains(['*', '?'])
        || source.starts_with("http://")
        || source.starts_with("https://")
        || source.starts_with("git@")
        || normalize(source) == NGINX_CONF_FILE
}

/// A `..` component can reach outside the build context, so such a source
/// never counts as present.
fn escapes_context(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

/// Context-relative form of a source: `./a` and `/a` both mean `a`.
fn normalize(source: &str) -> &str {
    let trimmed = source.trim_start_matches("./").trim_start_matches('/');
    if trimmed.is_empty() { "." } else { trimmed }
}
