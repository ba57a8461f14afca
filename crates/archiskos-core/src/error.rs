use thiserror::Error;

/// Top-level error type for the shared archiskos types.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid term: {0}")]
    InvalidTerm(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
