//! Configuration resolution for trackersheet.
//!
//! Turns a YAML document describing which tracker to query and how to lay the
//! results out in a spreadsheet into a fully resolved [`Config`]. Spreadsheet
//! level settings act as defaults for every sheet; each sheet may override
//! them and declare its own columns. Every structural problem is collected
//! during a single pass and reported together.

mod column;
mod diagnostics;
mod model;
mod node;
mod operations;
mod sheet;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use diagnostics::Diagnostics;
pub use model::{
    BugzillaParams, Column, ColumnKind, ColumnMap, Config, JiraParams, Sheet, TrackerParams,
};
pub use types::SourceKind;
