//! Ambient inputs of one binci invocation

use crate::InstanceId;
use binci_config::{interpolate, EnvSource, ProcessEnv};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything command assembly reads from outside the config
#[derive(Clone)]
pub struct InvocationContext {
    /// Shared by all containers of this invocation
    pub instance_id: InstanceId,
    /// Host working directory
    pub cwd: PathBuf,
    /// Whether stdout is an interactive terminal
    pub interactive: bool,
    /// Variables used for `${VAR}` interpolation
    pub env: Arc<dyn EnvSource>,
}

impl InvocationContext {
    /// Context with explicit inputs, non-interactive
    pub fn new(
        instance_id: InstanceId,
        cwd: impl Into<PathBuf>,
        env: impl EnvSource + 'static,
    ) -> Self {
        Self {
            instance_id,
            cwd: cwd.into(),
            interactive: false,
            env: Arc::new(env),
        }
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Context for the running process
    pub fn detect(instance_id: InstanceId) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let interactive = std::io::stdout().is_terminal();
        Ok(Self::new(instance_id, cwd, ProcessEnv).with_interactive(interactive))
    }

    /// Interpolate `${VAR}` placeholders against this context's environment
    pub fn interpolate(&self, input: &str) -> String {
        interpolate(input, self.env.as_ref())
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("instance_id", &self.instance_id)
            .field("cwd", &self.cwd)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}
