//! Configuration parsing for binci
//!
//! This crate handles parsing of:
//! - Project configuration (`binci.yml`)
//! - User settings (`~/.config/binci/config.toml`)
//! - `${VAR}` / `${VAR:-default}` interpolation against an environment

mod error;
mod interpolate;
mod project;
mod settings;

pub use error::*;
pub use interpolate::*;
pub use project::*;
pub use settings::*;
