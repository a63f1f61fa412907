//! Core logic for binci
//!
//! This crate turns one parsed `binci.yml` container config into:
//! - The argument vector for the container runtime's `run` subcommand
//! - The shell script the primary container executes on startup
//!
//! Everything here is synchronous and side-effect free. Ambient inputs
//! (environment, working directory, terminal detection, instance id) are
//! carried by [`InvocationContext`].

mod args;
mod command;
mod context;
mod error;
mod links;
mod naming;
mod paths;
mod plan;
mod script;

pub use args::*;
pub use command::*;
pub use context::*;
pub use error::*;
pub use links::*;
pub use naming::*;
pub use paths::*;
pub use plan::*;
pub use script::*;
