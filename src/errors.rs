//! Error types for stepline

use thiserror::Error;

/// Main error type for stepline
#[derive(Error, Debug)]
pub enum SteplineError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Extension error: {0}")]
    Extension(String),

    #[error("Request factory error: {0}")]
    Factory(String),
}

pub type Result<T> = std::result::Result<T, SteplineError>;
