//! Error types for progress reporting

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, ProgressError>;
