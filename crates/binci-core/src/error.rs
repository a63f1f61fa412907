//! Error types for binci-core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Missing base image: 'from' must be set")]
    MissingBaseImage,

    #[error("Config key '{key}' must be a list")]
    ConfigShape { key: String },

    #[error("No tasks defined")]
    MissingTasks,

    #[error("No task selected to run")]
    MissingRunTarget,

    #[error("Task '{name}' does not exist or is empty")]
    UnknownTask { name: String },

    #[error("Task '{name}' is missing a 'cmd'")]
    TaskMissingCommand { name: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
