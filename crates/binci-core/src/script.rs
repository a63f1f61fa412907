//! Execution script generation
//!
//! The primary container runs a generated `sh` script laid out as:
//!
//! ```text
//! #!/bin/sh
//! set -e;
//! <before>
//! <exec, or the commands of each task in `run`>
//! <after>
//! ```

use crate::{CoreError, Result};
use binci_config::Config;

/// Shebang and fail-fast header every script starts with
pub const SCRIPT_HEADER: &str = "#!/bin/sh\nset -e;\n";

/// Build the execution script for `config`
pub fn build_script(config: &Config) -> Result<String> {
    let mut script = String::from(SCRIPT_HEADER);

    if let Some(before) = non_empty(&config.before) {
        script.push_str(before);
        script.push('\n');
    }

    script.push_str(&command_body(config)?);

    if let Some(after) = non_empty(&config.after) {
        script.push('\n');
        script.push_str(after);
    }

    Ok(script)
}

/// An empty string counts as unset
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// `exec` verbatim, or the selected tasks joined by newlines
fn command_body(config: &Config) -> Result<String> {
    if let Some(exec) = non_empty(&config.exec) {
        return Ok(exec.to_string());
    }

    if config.tasks.is_none() {
        return Err(CoreError::MissingTasks);
    }

    let targets = config.run_targets();
    if targets.is_empty() {
        return Err(CoreError::MissingRunTarget);
    }

    let commands = targets
        .iter()
        .map(|name| {
            let task = config.task(name).ok_or_else(|| CoreError::UnknownTask {
                name: name.clone(),
            })?;
            task.command().ok_or_else(|| CoreError::TaskMissingCommand {
                name: name.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(commands.join("\n"))
}
