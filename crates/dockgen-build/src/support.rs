use std::path::{Path, PathBuf};

use dockgen_core::StackVariant;

/// Static-server config written next to the Dockerfile for single-page apps.
pub const NGINX_CONF_FILE: &str = "nginx.conf";

const NGINX_CONF: &str = r#"server {
    listen 80;
    server_name _;

    location / {
        root /usr/share/nginx/html;
        try_files $uri $uri/ /index.html;
        index index.html;
    }
}
"#;

/// Write the auxiliary files a stack's Dockerfile expects in the build context.
///
/// Returns the paths written; server-hosted stacks need none.
pub fn write_support_files(
    stack: StackVariant,
    context_dir: &Path,
) -> Result<Vec<PathBuf>, SupportError> {
    let files: &[(&str, &str)] = match stack {
        StackVariant::React => &[(NGINX_CONF_FILE, NGINX_CONF)],
        _ => &[],
    };

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = context_dir.join(name);
        std::fs::write(&path, content).map_err(|e| SupportError::Write {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(file = %path.display(), "support file written");
        written.push(path);
    }

    Ok(written)
}

#[derive(Debug, thiserror::Error)]
pub enum SupportError {
    #[error("failed to write support file {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
