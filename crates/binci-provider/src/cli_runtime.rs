//! CLI-based container runtime for Docker and Podman
//!
//! Uses the runtime's command line directly, so the argument vectors built
//! by binci-core are passed through untouched.

use crate::{ContainerId, ContainerRuntime, ProviderError, Result, RuntimeInfo, RuntimeType};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// CLI-based runtime for Docker and Podman
pub struct CliRuntime {
    /// Command to use ("docker" or "podman")
    cmd: String,
    /// Runtime type
    runtime_type: RuntimeType,
}

impl CliRuntime {
    pub fn new(runtime_type: RuntimeType) -> Self {
        Self::with_command(runtime_type.command(), runtime_type)
    }

    /// Use a specific executable (e.g. a wrapper script or full path)
    pub fn with_command(cmd: impl Into<String>, runtime_type: RuntimeType) -> Self {
        Self {
            cmd: cmd.into(),
            runtime_type,
        }
    }

    /// Run a command and get output
    async fn run_cmd(&self, args: &[String]) -> Result<String> {
        let output = Command::new(&self.cmd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ProviderError::RuntimeError(format!("{}: {}", self.cmd, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::RuntimeError(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Exit code as a shell reports it: 128 + N when killed by signal N
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    128
}

#[async_trait]
impl ContainerRuntime for CliRuntime {
    async fn run_attached(&self, args: &[String]) -> Result<i32> {
        tracing::debug!("{} {:?}", self.cmd, args);

        let status = Command::new(&self.cmd)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(exit_code(status))
    }

    async fn run_detached(&self, args: &[String]) -> Result<ContainerId> {
        tracing::debug!("{} {:?}", self.cmd, args);
        let output = self.run_cmd(args).await?;
        Ok(ContainerId::new(output.trim()))
    }

    async fn is_running(&self, name: &str) -> Result<bool> {
        // `name=` filters match substrings unless anchored
        let args = vec![
            "ps".to_string(),
            "-q".to_string(),
            "-f".to_string(),
            format!("name=^{}$", name),
        ];
        let output = self.run_cmd(&args).await?;
        Ok(!output.trim().is_empty())
    }

    async fn stop(&self, name: &str, timeout: Option<u32>) -> Result<()> {
        let mut args = vec!["stop".to_string()];
        if let Some(t) = timeout {
            args.push("-t".to_string());
            args.push(t.to_string());
        }
        args.push(name.to_string());

        self.run_cmd(&args).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.run_cmd(&["--version".to_string()]).await?;
        Ok(())
    }

    fn info(&self) -> RuntimeInfo {
        RuntimeInfo {
            runtime_type: self.runtime_type,
            command: self.cmd.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_info() {
        let runtime = CliRuntime::new(RuntimeType::Podman);
        assert_eq!(
            runtime.info(),
            RuntimeInfo {
                runtime_type: RuntimeType::Podman,
                command: "podman".to_string(),
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_attached_returns_exit_code() {
        let runtime = CliRuntime::with_command("sh", RuntimeType::Docker);
        let code = runtime.run_attached(&strings(&["-c", "exit 3"])).await.unwrap();
        assert_eq!(code, 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_attached_signal_exit_code() {
        let runtime = CliRuntime::with_command("sh", RuntimeType::Docker);
        let code = runtime
            .run_attached(&strings(&["-c", "kill -TERM $$"]))
            .await
            .unwrap();
        assert_eq!(code, 128 + 15);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_detached_returns_trimmed_id() {
        let runtime = CliRuntime::with_command("sh", RuntimeType::Docker);
        let id = runtime
            .run_detached(&strings(&["-c", "echo 4f2a9c; echo"]))
            .await
            .unwrap();
        assert_eq!(id, ContainerId::new("4f2a9c"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_carries_stderr() {
        let runtime = CliRuntime::with_command("sh", RuntimeType::Docker);
        let err = runtime
            .run_detached(&strings(&["-c", "echo no such image >&2; exit 1"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RuntimeError(msg) if msg == "no such image"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_is_running_reads_ps_output() {
        // `echo` prints the filter back, standing in for a matching container
        let runtime = CliRuntime::with_command("echo", RuntimeType::Docker);
        assert!(runtime.is_running("db").await.unwrap());

        let runtime = CliRuntime::with_command("true", RuntimeType::Docker);
        assert!(!runtime.is_running("db").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_executable_fails_ping() {
        let runtime = CliRuntime::with_command("binci-no-such-runtime", RuntimeType::Docker);
        assert!(runtime.ping().await.is_err());
    }
}
