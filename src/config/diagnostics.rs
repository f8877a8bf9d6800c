//! Batched error collection for config resolution.
//!
//! Resolution walks the whole document once and records every structural
//! problem it finds, so a user fixing a config file sees all of them at once.
//! Only after the walk does [`Diagnostics::abort_if_any_error`] turn the
//! collected messages into a single [`TrackerSheetError::Invalid`].

use crate::error::{Result, TrackerSheetError};
use std::fmt;

/// Accumulates recorded (non-fatal) config errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and keep going.
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(error = %message, "recorded config error");
        self.errors.push(message);
    }

    /// Build a fatal error. Callers return it immediately.
    pub fn fatal(message: impl Into<String>) -> TrackerSheetError {
        let message = message.into();
        tracing::error!(error = %message, "fatal config error");
        TrackerSheetError::UserError(message)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded messages in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Fail with every recorded error, or succeed when none was recorded.
    pub fn abort_if_any_error(self) -> Result<()> {
        if self.has_errors() {
            return Err(TrackerSheetError::Invalid(self));
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config validation failed with {} error(s):",
            self.errors.len()
        )?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}
