//! End-to-end generation: stage, inspect, generate, build.
//!
//! ```text
//! acquire workspace
//!   -> stage repository (git clone)
//!   -> inspect (stack + package manager)
//!   -> generate Dockerfile (assisted, else template)
//!   -> build (pre-check, FROM check, support files, validate, probe, build)
//! release workspace (on every outcome)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dockgen_build::{ArtifactOrigin, DockerfileArtifact, GenerateError, TextGenerator, generate};
use dockgen_core::{
    BuildConfig, Credentials, DockgenConfig, PackageManager, ProjectProfile, StackVariant,
    WorkspaceManager,
};
use secrecy::SecretString;

use crate::driver::{BuildDriver, BuildError, BuildReport};
use crate::executor::{CommandExecutor, RealExecutor};
use crate::gemini::GeminiClient;
use crate::git::{RepoStager, StageError, display_location};

/// One generation request.
#[derive(Clone, Default)]
pub struct GenerationRequest {
    pub repository: String,
    /// Overrides the process-wide `GITHUB_PAT` when set.
    pub credential: Option<SecretString>,
    /// Stop after the build context has been validated.
    pub skip_build: bool,
    /// Leave the staging directory on disk instead of removing it.
    pub keep_workspace: bool,
}

impl GenerationRequest {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("repository", &display_location(&self.repository))
            .field("credential", &self.credential.as_ref().map(|_| "[REDACTED]"))
            .field("skip_build", &self.skip_build)
            .field("keep_workspace", &self.keep_workspace)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub stack: StackVariant,
    pub package_manager: PackageManager,
    pub dockerfile: DockerfileArtifact,
    /// `None` when the build was skipped.
    pub built: Option<BuildReport>,
    /// Set when the workspace was kept on disk.
    pub workspace: Option<PathBuf>,
}

impl GenerationReport {
    pub fn origin(&self) -> ArtifactOrigin {
        self.dockerfile.origin()
    }
}

pub struct Pipeline<E: CommandExecutor = RealExecutor, G: TextGenerator = GeminiClient> {
    workspaces: WorkspaceManager,
    stager: RepoStager<Arc<E>>,
    driver: BuildDriver<Arc<E>>,
    build_config: BuildConfig,
    assist: Option<G>,
}

impl Pipeline<RealExecutor, GeminiClient> {
    /// Production pipeline: real subprocesses, Gemini when a key is configured.
    pub fn from_config(config: &DockgenConfig, credentials: &Credentials) -> Self {
        let assist = match GeminiClient::from_config(&config.assist, credentials) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Gemini client unavailable, templates only");
                None
            }
        };
        Self::with_parts(config, credentials, RealExecutor, assist)
    }
}

impl<E: CommandExecutor, G: TextGenerator> Pipeline<E, G> {
    pub fn with_parts(
        config: &DockgenConfig,
        credentials: &Credentials,
        executor: E,
        assist: Option<G>,
    ) -> Self {
        let executor = Arc::new(executor);
        Self {
            workspaces: WorkspaceManager::new(config.workspace.root.clone()),
            stager: RepoStager::with_executor(
                Arc::clone(&executor),
                &config.git,
                credentials.git_token.clone(),
            ),
            driver: BuildDriver::with_executor(executor, &config.build),
            build_config: config.build.clone(),
            assist,
        }
    }

    pub fn workspaces(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    /// Run one request in its own workspace.
    ///
    /// The workspace is removed whatever the outcome, unless the request
    /// asks to keep it.
    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationReport, PipelineError> {
        let workspace = self.workspaces.acquire().map_err(PipelineError::Workspace)?;
        tracing::info!(
            repository = %display_location(&request.repository),
            workspace = %workspace.path().display(),
            "generation started",
        );

        let outcome = self.run_in(workspace.path(), request).await;

        if request.keep_workspace {
            let kept = workspace.persist();
            if let Err(e) = &outcome {
                tracing::warn!(
                    workspace = %kept.display(),
                    kind = %e.kind(),
                    "generation failed; workspace kept for inspection",
                );
            }
            outcome.map(|report| GenerationReport {
                workspace: Some(kept),
                ..report
            })
        } else {
            workspace.release();
            outcome
        }
    }

    async fn run_in(
        &self,
        dir: &Path,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, PipelineError> {
        self.stager
            .stage(&request.repository, request.credential.as_ref(), dir)
            .await?;

        let profile = ProjectProfile::inspect(dir).map_err(PipelineError::Detection)?;
        let dockerfile = generate(&self.build_config, &profile, self.assist.as_ref()).await?;

        let built = if request.skip_build {
            self.driver.prepare(&dockerfile, &profile, dir)?;
            tracing::info!("build skipped");
            None
        } else {
            Some(self.driver.build(&dockerfile, &profile, dir).await?)
        };

        Ok(GenerationReport {
            stack: profile.stack,
            package_manager: profile.package_manager,
            dockerfile,
            built,
            workspace: None,
        })
    }
}

/// Closed classification of pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Filesystem failure in the staging root or a workspace.
    Workspace,
    CredentialMissing,
    StagingFailed,
    DetectionFailed,
    UnsupportedStack,
    InvalidProjectConfiguration,
    FromInstructionMissing,
    MissingFiles,
    EngineUnavailable,
    BuildFailed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Workspace => "workspace",
            Self::CredentialMissing => "credential-missing",
            Self::StagingFailed => "staging-failed",
            Self::DetectionFailed => "detection-failed",
            Self::UnsupportedStack => "unsupported-stack",
            Self::InvalidProjectConfiguration => "invalid-project-configuration",
            Self::FromInstructionMissing => "from-instruction-missing",
            Self::MissingFiles => "missing-files",
            Self::EngineUnavailable => "engine-unavailable",
            Self::BuildFailed => "build-failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Workspace(dockgen_core::Error),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Detection(dockgen_core::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Workspace(_) => FailureKind::Workspace,
            Self::Stage(StageError::CredentialMissing) => FailureKind::CredentialMissing,
            Self::Stage(_) => FailureKind::StagingFailed,
            Self::Detection(_) => FailureKind::DetectionFailed,
            Self::Generate(GenerateError::UnsupportedStack(_)) => FailureKind::UnsupportedStack,
            Self::Build(e) => match e {
                BuildError::InvalidProjectConfiguration(_) => {
                    FailureKind::InvalidProjectConfiguration
                }
                BuildError::FromInstructionMissing => FailureKind::FromInstructionMissing,
                BuildError::MissingFiles { .. } => FailureKind::MissingFiles,
                BuildError::EngineUnavailable { .. } => FailureKind::EngineUnavailable,
                BuildError::BuildFailed { .. } => FailureKind::BuildFailed,
                BuildError::Dockerfile(_) | BuildError::Support(_) => FailureKind::Workspace,
            },
        }
    }
}
