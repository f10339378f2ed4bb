use std::fmt;
use std::sync::Arc;

use dockgen_core::credentials::{GEMINI_KEY_VAR, GIT_TOKEN_VAR};
use dockgen_core::{Credentials, DockgenConfig};

use crate::docker::DockerClient;
use crate::executor::{CommandExecutor, Invocation, RealExecutor, args};

/// Environment checks, parameterized over the executor for testability.
pub struct Doctor<E: CommandExecutor = RealExecutor> {
    executor: Arc<E>,
    git_program: String,
    engine: DockerClient<Arc<E>>,
}

impl Doctor<RealExecutor> {
    pub fn new(config: &DockgenConfig) -> Self {
        Self::with_executor(RealExecutor, config)
    }
}

impl<E: CommandExecutor> Doctor<E> {
    pub fn with_executor(executor: E, config: &DockgenConfig) -> Self {
        let executor = Arc::new(executor);
        Self {
            engine: DockerClient::with_executor(Arc::clone(&executor), &config.build.engine),
            executor,
            git_program: config.git.program.clone(),
        }
    }

    /// Run all diagnostic checks without early return.
    ///
    /// Credentials are reported by presence only. The config file check is
    /// left to the caller, which knows where it looked.
    pub async fn check(&self, credentials: &Credentials) -> DoctorReport {
        let mut report = DoctorReport::default();

        let git = Invocation::new(&self.git_program, args(["--version"]));
        report.git = match self.executor.run(&git).await {
            Ok(out) if out.success() => CheckResult::ok(out.stdout.trim()),
            Ok(out) => CheckResult::fail(&out.diagnostic()),
            Err(e) => CheckResult::fail(&e.to_string()),
        };

        report.engine = match self.engine.server_version().await {
            Ok(version) => CheckResult::ok(&format!("daemon {version}")),
            Err(e) => CheckResult::fail(&e.to_string()),
        };

        report.git_token = if credentials.git_token.is_some() {
            CheckResult::ok("Set")
        } else {
            CheckResult::fail("Not set (requests must supply --token)")
        };

        report.assist_key = if credentials.gemini_api_key.is_some() {
            CheckResult::ok("Set")
        } else {
            CheckResult::ok("Not set (built-in templates only)")
        };

        report
    }
}

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub git: CheckResult,
    pub engine: CheckResult,
    pub git_token: CheckResult,
    pub assist_key: CheckResult,
    pub config_file: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.rows().iter().all(|(_, check)| check.passed)
    }

    fn rows(&self) -> [(&'static str, &CheckResult); 5] {
        [
            ("git", &self.git),
            ("Docker", &self.engine),
            (GIT_TOKEN_VAR, &self.git_token),
            (GEMINI_KEY_VAR, &self.assist_key),
            ("Config file", &self.config_file),
        ]
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dockgen doctor")?;
        writeln!(f, "{}", "-".repeat(44))?;
        for (label, check) in self.rows() {
            writeln!(f, "{label:<16}{icon:<4}{detail}", icon = check.icon(), detail = check.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
