//! Runtime `run` argument assembly

use crate::{
    build_script, container_name, container_path, links, map_all, CoreError, InvocationContext,
    Result,
};
use binci_config::Config;
use std::path::{Path, PathBuf};

/// Flag attaching the container to the host network
pub const NETWORK_HOST_FLAG: &str = "--net=host";

/// Flag allocating an interactive terminal
pub const INTERACTIVE_FLAG: &str = "-it";

/// File name of the generated script inside the temp directory
pub const SCRIPT_FILE_NAME: &str = "binci.sh";

/// Which kind of container is being assembled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// The project container; runs the script found in `tmp_dir`
    Primary { tmp_dir: PathBuf },
    /// A detached, linked service container
    Service,
}

/// Output of [`assemble`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    Primary {
        name: String,
        args: Vec<String>,
        script: String,
    },
    Service {
        name: String,
        args: Vec<String>,
    },
}

impl Assembled {
    /// Arguments following the runtime command (`docker`/`podman`)
    pub fn args(&self) -> &[String] {
        match self {
            Assembled::Primary { args, .. } | Assembled::Service { args, .. } => args,
        }
    }

    /// Generated script; only primary containers have one
    pub fn script(&self) -> Option<&str> {
        match self {
            Assembled::Primary { script, .. } => Some(script),
            Assembled::Service { .. } => None,
        }
    }

    pub fn container_name(&self) -> &str {
        match self {
            Assembled::Primary { name, .. } | Assembled::Service { name, .. } => name,
        }
    }
}

/// Path of the script as seen from inside the container
pub fn script_path(tmp_dir: &Path) -> String {
    let dir = tmp_dir.to_string_lossy();
    format!("{}/{}", dir.trim_end_matches('/'), SCRIPT_FILE_NAME)
}

/// Build the runtime arguments for one container
///
/// Flag order is fixed: role prefix, `--user`, field flags, links,
/// `--name`, image, then (primary only) the script invocation.
pub fn assemble(
    config: &Config,
    logical_name: &str,
    role: &Role,
    ctx: &InvocationContext,
) -> Result<Assembled> {
    let image = config
        .from
        .as_deref()
        .filter(|from| !from.is_empty())
        .ok_or(CoreError::MissingBaseImage)?;

    let work_dir = config
        .work_dir
        .clone()
        .unwrap_or_else(|| container_path(&ctx.cwd));

    let privileged = config.privileged != Some(false);
    let network_host = config.network_host == Some(true);

    let mut args = vec!["run".to_string()];
    match role {
        Role::Primary { tmp_dir } => {
            let tmp = tmp_dir.to_string_lossy();
            args.extend([
                "--rm".to_string(),
                "-v".to_string(),
                format!("{}:{}:cached", ctx.cwd.display(), work_dir),
                "-v".to_string(),
                format!("{}:{}", tmp, tmp),
                "-w".to_string(),
                work_dir.clone(),
            ]);
            if privileged {
                args.push("--privileged".to_string());
            }
            if network_host {
                args.push(NETWORK_HOST_FLAG.to_string());
            }
            if ctx.interactive {
                args.push(INTERACTIVE_FLAG.to_string());
            }
        }
        Role::Service => {
            args.push("-d".to_string());
            if privileged {
                args.push("--privileged".to_string());
            }
            if network_host {
                args.push(NETWORK_HOST_FLAG.to_string());
            }
            if config.rm_on_shutdown != Some(true) {
                args.push("--rm".to_string());
            }
        }
    }

    if let Some(ref user) = config.user {
        args.push(format!("--user={}", ctx.interpolate(user)));
    }

    args.extend(map_all(config, ctx)?);
    args.extend(links(config, &ctx.instance_id));

    let name = container_name(logical_name, config, &ctx.instance_id);
    args.push("--name".to_string());
    args.push(name.clone());
    args.push(image.to_lowercase());

    let assembled = match role {
        Role::Primary { tmp_dir } => {
            args.push("sh".to_string());
            args.push(script_path(tmp_dir));
            let script = build_script(config)?;
            Assembled::Primary { name, args, script }
        }
        Role::Service => Assembled::Service { name, args },
    };

    tracing::debug!(
        "Assembled {} container args: {:?}",
        logical_name,
        assembled.args()
    );

    Ok(assembled)
}
