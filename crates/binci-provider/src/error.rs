//! Error types for container runtimes

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Container runtime not available: {0}")]
    NotAvailable(String),

    #[error("Container runtime error: {0}")]
    RuntimeError(String),

    #[error("Unknown runtime: {0}")]
    UnknownRuntime(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
