//! CLI command implementations

use anyhow::{Context, Result};
use binci_config::{Config, Settings};
use binci_core::{LaunchPlan, SCRIPT_FILE_NAME};
use binci_provider::{ContainerRuntime, RuntimeType};
use std::path::{Path, PathBuf};

/// Print the settings file location and effective values
pub fn show_settings(settings: &Settings) -> Result<()> {
    match Settings::config_path() {
        Ok(path) => println!("# {}", path.display()),
        Err(e) => println!("# {}", e),
    }
    let content = toml::to_string_pretty(settings).context("Failed to render settings")?;
    print!("{}", content);
    Ok(())
}

/// Print every task with its description or command, sorted by name
pub fn list_tasks(config: &Config) {
    let Some(ref tasks) = config.tasks else {
        println!("No tasks defined");
        return;
    };

    let width = tasks.keys().map(|name| name.len()).max().unwrap_or(0);
    for (name, entry) in tasks {
        let summary = entry.as_ref().map(|e| e.summary()).unwrap_or("");
        let first_line = summary.lines().next().unwrap_or("");
        println!("{:width$}  {}", name, first_line, width = width);
    }
}

/// Print the runtime invocations and script without running anything
pub fn print_plan(plan: &LaunchPlan, runtime: RuntimeType, json: bool) -> Result<()> {
    let cmd = runtime.command();

    if json {
        let services: Vec<_> = plan
            .services
            .iter()
            .map(|s| {
                serde_json::json!({
                    "alias": s.alias,
                    "name": s.assembled.container_name(),
                    "persist": s.persist,
                    "args": s.assembled.args(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "runtime": cmd,
            "services": services,
            "primary": {
                "name": plan.primary.container_name(),
                "args": plan.primary.args(),
                "script": plan.primary.script(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for service in &plan.services {
        println!("{}", command_line(cmd, service.assembled.args()));
    }
    println!("{}", command_line(cmd, plan.primary.args()));
    if let Some(script) = plan.primary.script() {
        println!();
        println!("{}", script);
    }
    Ok(())
}

fn command_line(cmd: &str, args: &[String]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push(cmd);
    words.extend(args.iter().map(String::as_str));
    shell_words::join(words)
}

/// Start services, run the primary container, then clean up
///
/// Returns the primary container's exit code. Services that are not
/// persisted are stopped whether or not the primary succeeded. A persisted
/// service that is already running from an earlier invocation is reused.
pub async fn launch(
    runtime: &dyn ContainerRuntime,
    plan: &LaunchPlan,
    tmp_dir: &Path,
    stop_timeout: u32,
) -> Result<i32> {
    let mut started: Vec<&str> = Vec::new();

    for service in &plan.services {
        let name = service.assembled.container_name();

        if service.persist {
            match runtime.is_running(name).await {
                Ok(true) => {
                    tracing::info!("Service '{}' already running as {}", service.alias, name);
                    continue;
                }
                Ok(false) => {}
                Err(e) => tracing::warn!("Could not check whether {} is running: {}", name, e),
            }
        }

        tracing::info!("Starting service '{}'", service.alias);
        match runtime.run_detached(service.assembled.args()).await {
            Ok(id) => {
                tracing::debug!("Service '{}' started as {}", service.alias, id.short());
                started.push(name);
            }
            Err(e) => {
                stop_services(runtime, plan, &started, stop_timeout).await;
                return Err(e).with_context(|| format!("Failed to start service '{}'", service.alias));
            }
        }
    }

    let outcome = run_primary(runtime, plan, tmp_dir).await;

    stop_services(runtime, plan, &started, stop_timeout).await;

    outcome
}

async fn run_primary(runtime: &dyn ContainerRuntime, plan: &LaunchPlan, tmp_dir: &Path) -> Result<i32> {
    let script = plan.primary.script().unwrap_or_default();
    let script_path = write_script(tmp_dir, script)?;

    tracing::info!("Running {}", plan.primary.container_name());
    let result = runtime.run_attached(plan.primary.args()).await;

    if let Err(e) = std::fs::remove_file(&script_path) {
        tracing::warn!("Could not remove {:?}: {}", script_path, e);
    }

    let code = result.context("Failed to run primary container")?;
    if code != 0 {
        tracing::debug!("Primary container exited with code {}", code);
    }
    Ok(code)
}

/// Stop the ephemeral services this invocation started
async fn stop_services(runtime: &dyn ContainerRuntime, plan: &LaunchPlan, started: &[&str], timeout: u32) {
    for service in plan.ephemeral_services() {
        let name = service.assembled.container_name();
        if !started.contains(&name) {
            continue;
        }
        tracing::info!("Stopping service '{}'", service.alias);
        if let Err(e) = runtime.stop(name, Some(timeout)).await {
            tracing::warn!("Failed to stop {}: {}", name, e);
        }
    }
}

/// Write the execution script to `<tmp_dir>/binci.sh`
pub fn write_script(tmp_dir: &Path, script: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(tmp_dir)
        .with_context(|| format!("Failed to create {}", tmp_dir.display()))?;

    let path = tmp_dir.join(SCRIPT_FILE_NAME);
    std::fs::write(&path, script).with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", path.display()))?;
    }

    tracing::debug!("Wrote execution script to {:?}", path);
    Ok(path)
}
