//! Container runtime abstraction for binci
//!
//! binci only needs a handful of runtime operations: run the primary
//! container attached to the terminal, start service containers detached,
//! and stop them afterwards. The [`CliRuntime`] implementation shells out
//! to `docker` or `podman`.

mod cli_runtime;
mod error;
mod types;

pub use cli_runtime::CliRuntime;
pub use error::*;
pub use types::*;

use async_trait::async_trait;

/// Trait for container runtimes (Docker, Podman)
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Run a container with inherited stdio and wait for it; returns the exit code
    async fn run_attached(&self, args: &[String]) -> Result<i32>;

    /// Run a detached container; returns its id
    async fn run_detached(&self, args: &[String]) -> Result<ContainerId>;

    /// Whether a running container has exactly this name
    async fn is_running(&self, name: &str) -> Result<bool>;

    /// Stop a container by name or id
    async fn stop(&self, name: &str, timeout: Option<u32>) -> Result<()>;

    /// Check that the runtime is installed and responding
    async fn ping(&self) -> Result<()>;

    /// Get runtime information
    fn info(&self) -> RuntimeInfo;
}

/// Create a runtime for the given type, verifying it responds
pub async fn create_runtime(runtime_type: RuntimeType) -> Result<Box<dyn ContainerRuntime>> {
    let runtime = CliRuntime::new(runtime_type);
    runtime.ping().await.map_err(|e| {
        ProviderError::NotAvailable(format!("{} ({})", runtime_type, e))
    })?;
    Ok(Box::new(runtime))
}
