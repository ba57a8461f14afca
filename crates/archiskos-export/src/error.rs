//! Error types for the archiskos-export crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Serialization to {format} failed: {reason}")]
    SerializationFailed { format: &'static str, reason: String },
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationFailed {
            format: "json",
            reason: e.to_string(),
        }
    }
}

impl From<std::fmt::Error> for ExportError {
    fn from(e: std::fmt::Error) -> Self {
        Self::SerializationFailed {
            format: "turtle",
            reason: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
