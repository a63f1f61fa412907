//! binci - run project tasks in throwaway containers

mod commands;

use anyhow::Context;
use binci_config::{Config, Settings, StringOrArray};
use binci_core::{InstanceId, InvocationContext, LaunchPlan};
use binci_provider::{create_runtime, RuntimeType};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "binci")]
#[command(author, version, about = "Containerized task runner", long_about = None)]
struct Cli {
    /// Tasks to run (overrides `run` in the config file)
    tasks: Vec<String>,

    /// Run a command instead of tasks
    #[arg(short, long)]
    exec: Option<String>,

    /// Path to the config file
    #[arg(short, long, default_value = "binci.yml")]
    file: PathBuf,

    /// Directory for the generated execution script
    #[arg(short, long, env = "BINCI_TMP")]
    tmp: Option<PathBuf>,

    /// Don't start linked services
    #[arg(short, long)]
    disable_services: bool,

    /// Container runtime to use
    #[arg(long, env = "BINCI_RUNTIME", value_parser = ["docker", "podman"])]
    runtime: Option<String>,

    /// Print the runtime commands and script instead of running them
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run, print JSON
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// List the tasks defined in the config file
    #[arg(long = "tasks")]
    list_tasks: bool,

    /// Show the user settings file and its values
    #[arg(long)]
    settings: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable settings: {}", e);
        Settings::default()
    });

    if cli.settings {
        commands::show_settings(&settings)?;
        return Ok(0);
    }

    let mut config = Config::load_from(&cli.file)?;

    if cli.list_tasks {
        commands::list_tasks(&config);
        return Ok(0);
    }

    if !cli.tasks.is_empty() {
        config.run = Some(StringOrArray::Array(cli.tasks));
    }
    if let Some(exec) = cli.exec {
        config.exec = Some(exec);
    }
    if cli.disable_services || settings.defaults.disable_services {
        config.services = None;
    }

    let tmp_dir = cli
        .tmp
        .unwrap_or_else(|| settings.defaults.effective_tmp_dir());
    let ctx = InvocationContext::detect(InstanceId::generate())
        .context("Failed to read the working directory")?;
    tracing::debug!("Invocation context: {:?}", ctx);

    let plan = LaunchPlan::build(&config, &ctx, tmp_dir.clone())?;

    let runtime_type: RuntimeType = cli
        .runtime
        .as_deref()
        .unwrap_or(&settings.defaults.runtime)
        .parse()?;

    if cli.dry_run {
        commands::print_plan(&plan, runtime_type, cli.json)?;
        return Ok(0);
    }

    let runtime = create_runtime(runtime_type).await?;
    let info = runtime.info();
    tracing::debug!("Using {} via `{}`", info.runtime_type, info.command);
    commands::launch(
        runtime.as_ref(),
        &plan,
        &tmp_dir,
        settings.defaults.stop_timeout,
    )
    .await
}
