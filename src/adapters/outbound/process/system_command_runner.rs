use crate::ports::outbound::{CommandInvocation, CommandOutput, CommandRunner};
use crate::shared::error::OrchestratorError;
use crate::shared::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// SystemCommandRunner adapter spawning real processes with tokio
///
/// Output is captured in full. Commands without their own timeout use
/// the runner's default; a timed-out child is killed.
pub struct SystemCommandRunner {
    default_timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(1800))
    }
}

/// Install hint for the tools the orchestrator shells out to
pub fn install_hint(program: &str) -> String {
    let name = std::path::Path::new(program)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match name.as_str() {
        "git" => "Install git and make sure it is on PATH".to_string(),
        "mvn" => "Install Apache Maven (https://maven.apache.org) and make sure `mvn` is on PATH".to_string(),
        "gradlew" => "The repository has no Gradle wrapper; generate one with `gradle wrapper`".to_string(),
        "pnpm" => "Install pnpm with `npm install -g pnpm`".to_string(),
        "go" => "Install Go (https://go.dev/dl) and make sure `go` is on PATH".to_string(),
        "uv" => "Install uv with `pip install uv` or from https://docs.astral.sh/uv".to_string(),
        "cdxgen" | "npx" => "Install cdxgen with `npm install -g @cyclonedx/cdxgen`".to_string(),
        _ => format!("Make sure `{}` is installed and on PATH", program),
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput> {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        tracing::debug!(command = %invocation, cwd = ?invocation.working_dir(), "running command");

        let child = command.spawn().map_err(|e| -> anyhow::Error {
            if e.kind() == ErrorKind::NotFound {
                OrchestratorError::ToolNotFound {
                    tool: invocation.program().to_string(),
                    hint: install_hint(invocation.program()),
                }
                .into()
            } else {
                anyhow::anyhow!("Failed to start `{}`: {}", invocation, e)
            }
        })?;

        let limit = invocation.timeout_duration().unwrap_or(self.default_timeout);
        let output = match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| anyhow::anyhow!("Failed to run `{}`: {}", invocation, e))?,
            Err(_) => {
                return Err(OrchestratorError::CommandTimeout {
                    command: invocation.to_string(),
                    seconds: limit.as_secs(),
                }
                .into())
            }
        };

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(command = %invocation, status = %result.status_label(), "command finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_tool_not_found() {
        let runner = SystemCommandRunner::default();
        let err = runner
            .run(&CommandInvocation::new("definitely-not-a-real-tool-4821"))
            .await
            .unwrap_err();
        let err = err.downcast::<OrchestratorError>().unwrap();
        assert!(matches!(err, OrchestratorError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_output_and_status() {
        let runner = SystemCommandRunner::default();
        let output = runner
            .run(&CommandInvocation::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]))
            .await
            .unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_working_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let runner = SystemCommandRunner::default();
        let output = runner
            .run(&CommandInvocation::new("pwd").current_dir(dir.path()))
            .await
            .unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(std::path::PathBuf::from(output.stdout.trim()).canonicalize().unwrap(), expected);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let runner = SystemCommandRunner::default();
        let err = runner
            .run(&CommandInvocation::new("sleep").arg("5").timeout(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_install_hints() {
        assert!(install_hint("mvn.cmd").contains("Maven"));
        assert!(install_hint("./gradlew").contains("wrapper"));
        assert!(install_hint("custom").contains("custom"));
    }
}
