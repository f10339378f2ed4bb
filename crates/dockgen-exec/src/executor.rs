use std::fmt;
use std::path::{Path, PathBuf};

use crate::command::CommandError;

/// A single external program run.
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    /// Arguments carry secrets and must not be rendered.
    pub sensitive: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: None,
            sensitive: false,
        }
    }

    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Invocation");
        s.field("program", &self.program);
        if self.sensitive {
            s.field("args", &"[REDACTED]");
        } else {
            s.field("args", &self.args);
        }
        s.field("current_dir", &self.current_dir).finish()
    }
}

/// Captured result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Best available failure text: stderr, else stdout, else a placeholder.
    pub fn diagnostic(&self) -> String {
        [&self.stderr, &self.stdout]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("No error output")
            .to_owned()
    }
}

/// Abstraction over subprocess execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run a program to completion, capturing stdout and stderr.
    ///
    /// Returns `Err` only when the program could not be started.
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError>;
}

impl<E: CommandExecutor> CommandExecutor for std::sync::Arc<E> {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        (**self).run(invocation).await
    }
}

/// Real subprocess executor.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        use std::process::Stdio;

        let mut command = tokio::process::Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|e| CommandError::Spawn {
            program: invocation.program.clone(),
            source: e,
        })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

pub(crate) fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}
