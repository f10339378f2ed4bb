use std::path::{Path, PathBuf};

use dockgen_build::eject::{self, EjectError};
use dockgen_build::instructions::has_from;
use dockgen_build::precheck::{self, PrecheckError};
use dockgen_build::support::{self, SupportError};
use dockgen_build::{DockerfileArtifact, validate};
use dockgen_core::{BuildConfig, ProjectProfile, StackVariant};

use crate::docker::{DockerClient, EngineError};
use crate::executor::{CommandExecutor, RealExecutor};

/// Result of a successful image build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub image_tag: String,
    pub dockerfile: PathBuf,
    pub output: String,
}

/// Turns a staged project and a Dockerfile into an image.
///
/// Every check runs before the engine is touched, and the engine is probed
/// before a build is attempted.
pub struct BuildDriver<E: CommandExecutor = RealExecutor> {
    engine: DockerClient<E>,
    image_tag: String,
}

impl BuildDriver<RealExecutor> {
    pub fn new(config: &BuildConfig) -> Self {
        Self::with_executor(RealExecutor, config)
    }
}

impl<E: CommandExecutor> BuildDriver<E> {
    pub fn with_executor(executor: E, config: &BuildConfig) -> Self {
        Self {
            engine: DockerClient::with_executor(executor, &config.engine),
            image_tag: config.image_tag.clone(),
        }
    }

    pub fn image_tag(&self) -> &str {
        &self.image_tag
    }

    /// Check the project and Dockerfile, then write the Dockerfile and its
    /// support files into `context_dir`.
    ///
    /// Returns the written Dockerfile path.
    pub fn prepare(
        &self,
        artifact: &DockerfileArtifact,
        profile: &ProjectProfile,
        context_dir: &Path,
    ) -> Result<PathBuf, BuildError> {
        if profile.stack == StackVariant::NextJs {
            precheck::check_nextjs_project(context_dir)?;
        }

        if !has_from(artifact.as_str()) {
            return Err(BuildError::FromInstructionMissing);
        }

        let dockerfile = eject::write_dockerfile(context_dir, artifact.as_str())?;
        support::write_support_files(profile.stack, context_dir)?;

        let validation = validate(artifact.as_str(), context_dir, profile.package_manager);
        if !validation.is_valid() {
            tracing::warn!(missing = ?validation.missing_paths, "Dockerfile references missing files");
            return Err(BuildError::MissingFiles {
                paths: validation.missing_paths,
            });
        }

        tracing::debug!(dockerfile = %dockerfile.display(), "build context prepared");
        Ok(dockerfile)
    }

    /// Prepare the context, probe the engine and build the image.
    pub async fn build(
        &self,
        artifact: &DockerfileArtifact,
        profile: &ProjectProfile,
        context_dir: &Path,
    ) -> Result<BuildReport, BuildError> {
        let dockerfile = self.prepare(artifact, profile, context_dir)?;

        self.engine.probe().await.map_err(|e| match e {
            EngineError::Unavailable { detail } => BuildError::EngineUnavailable { detail },
            EngineError::BuildFailed { output } => BuildError::EngineUnavailable { detail: output },
        })?;

        let output = self
            .engine
            .build_image(context_dir, &self.image_tag)
            .await
            .map_err(|e| match e {
                EngineError::BuildFailed { output } => BuildError::BuildFailed { output },
                EngineError::Unavailable { detail } => BuildError::BuildFailed { output: detail },
            })?;

        Ok(BuildReport {
            image_tag: self.image_tag.clone(),
            dockerfile,
            output,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid project configuration")]
    InvalidProjectConfiguration(#[from] PrecheckError),

    #[error("invalid Dockerfile generated: missing FROM instruction")]
    FromInstructionMissing,

    #[error(transparent)]
    Dockerfile(#[from] EjectError),

    #[error(transparent)]
    Support(#[from] SupportError),

    #[error("Dockerfile references missing files: {}", paths.join(", "))]
    MissingFiles { paths: Vec<String> },

    #[error("Docker is not running or not accessible: {detail}")]
    EngineUnavailable { detail: String },

    #[error("Docker build failed: {output}")]
    BuildFailed { output: String },
}
