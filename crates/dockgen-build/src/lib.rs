//! Dockerfile generation and validation for dockgen.
//!
//! # Generation
//!
//! ```text
//! ProjectProfile (stack + package manager)
//!   1. Assisted  ── TextGenerator::complete(prompt), used verbatim if non-empty
//!   2. Template  ── DockerfileGenerator::render() for Next.js / React
//! ```
//!
//! # Build context checks
//!
//! - [`support::write_support_files`] drops files the Dockerfile expects
//!   (nginx config for React)
//! - [`validate::validate`] checks every local `COPY`/`ADD` source exists
//! - [`precheck::check_nextjs_project`] rejects Next.js layouts the
//!   runtime template cannot serve

pub mod assist;
pub mod dockerfile;
pub mod eject;
pub mod instructions;
pub mod precheck;
pub mod support;
pub mod validate;

pub use assist::{AssistError, TextGenerator};
pub use dockerfile::{ArtifactOrigin, DockerfileArtifact, DockerfileGenerator, GenerateError, generate};
pub use validate::{ValidationResult, validate};
