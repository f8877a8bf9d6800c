//! Exit code constants for the trackersheet CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or unparseable config file)
//! - 2: Validation failure (one or more recorded config errors)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing file, or malformed YAML.
pub const USER_ERROR: i32 = 1;

/// Validation failure: the config was read but did not resolve cleanly.
pub const VALIDATION_FAILURE: i32 = 2;
