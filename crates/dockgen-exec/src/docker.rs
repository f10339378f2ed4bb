use std::path::Path;

use crate::executor::{CommandExecutor, Invocation, RealExecutor, args};

/// Container engine client, parameterized over the executor for testability.
pub struct DockerClient<E: CommandExecutor = RealExecutor> {
    executor: E,
    program: String,
}

impl DockerClient<RealExecutor> {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_executor(RealExecutor, program)
    }
}

impl<E: CommandExecutor> DockerClient<E> {
    pub fn with_executor(executor: E, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }

    /// Check that the engine daemon answers (`docker ps`).
    pub async fn probe(&self) -> Result<(), EngineError> {
        let invocation = Invocation::new(&self.program, args(["ps"]));
        let output = self
            .executor
            .run(&invocation)
            .await
            .map_err(|e| EngineError::Unavailable {
                detail: e.to_string(),
            })?;

        if output.success() {
            Ok(())
        } else {
            Err(EngineError::Unavailable {
                detail: output.diagnostic(),
            })
        }
    }

    /// Server version as reported by `docker version`.
    pub async fn server_version(&self) -> Result<String, EngineError> {
        let invocation = Invocation::new(
            &self.program,
            args(["version", "--format", "{{.Server.Version}}"]),
        );
        let output = self
            .executor
            .run(&invocation)
            .await
            .map_err(|e| EngineError::Unavailable {
                detail: e.to_string(),
            })?;

        if output.success() {
            Ok(output.stdout.trim().to_owned())
        } else {
            Err(EngineError::Unavailable {
                detail: output.diagnostic(),
            })
        }
    }

    /// Build `context_dir` with the Dockerfile at its root, tagging the image.
    ///
    /// Returns the engine's stdout on success.
    pub async fn build_image(&self, context_dir: &Path, tag: &str) -> Result<String, EngineError> {
        tracing::info!(tag, context = %context_dir.display(), "building image");

        let invocation =
            Invocation::new(&self.program, args(["build", "-t", tag, "."])).in_dir(context_dir);
        let output = self
            .executor
            .run(&invocation)
            .await
            .map_err(|e| EngineError::BuildFailed {
                output: e.to_string(),
            })?;

        if output.success() {
            tracing::info!(tag, "image built");
            Ok(output.stdout)
        } else {
            Err(EngineError::BuildFailed {
                output: output.diagnostic(),
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Docker is not running or not accessible: {detail}")]
    Unavailable { detail: String },

    #[error("Docker build failed: {output}")]
    BuildFailed { output: String },
}
