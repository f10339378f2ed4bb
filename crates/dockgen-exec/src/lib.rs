//! External collaborators for dockgen: git, the container engine, Gemini,
//! and the pipeline that drives them.
//!
//! Every subprocess goes through [`CommandExecutor`] so the stager, build
//! driver and doctor can be exercised with mocks.

pub mod command;
pub mod docker;
pub mod doctor;
pub mod driver;
pub mod executor;
pub mod gemini;
pub mod git;
pub mod pipeline;

pub use command::CommandError;
pub use docker::{DockerClient, EngineError};
pub use doctor::{CheckResult, Doctor, DoctorReport};
pub use driver::{BuildDriver, BuildError, BuildReport};
pub use executor::{CommandExecutor, CommandOutput, Invocation, RealExecutor};
pub use gemini::GeminiClient;
pub use git::{RepoStager, StageError};
pub use pipeline::{FailureKind, GenerationReport, GenerationRequest, Pipeline, PipelineError};
