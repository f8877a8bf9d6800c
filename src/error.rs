//! Error types for trackersheet.
//!
//! Two tiers: fatal errors stop resolution immediately (the document could not
//! be read at all), while `Invalid` carries every problem recorded during one
//! full pass over the document.

use crate::config::Diagnostics;
use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for trackersheet operations.
#[derive(Error, Debug)]
pub enum TrackerSheetError {
    /// The config file could not be read.
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML.
    #[error("failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document or the invocation is unusable as a whole.
    #[error("{0}")]
    UserError(String),

    /// The document was walked completely and at least one error was recorded.
    #[error("{0}")]
    Invalid(Diagnostics),
}

impl TrackerSheetError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TrackerSheetError::Read { .. } => exit_codes::USER_ERROR,
            TrackerSheetError::Parse(_) => exit_codes::USER_ERROR,
            TrackerSheetError::UserError(_) => exit_codes::USER_ERROR,
            TrackerSheetError::Invalid(_) => exit_codes::VALIDATION_FAILURE,
        }
    }
}

/// Result type alias for trackersheet operations.
pub type Result<T> = std::result::Result<T, TrackerSheetError>;
