//! Document keys, defaults and error messages used during resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

// Tracker sections
pub const BUGZILLA: &str = "BUGZILLA";
pub const DOMAIN: &str = "DOMAIN";
pub const URL: &str = "URL";
pub const API_KEY: &str = "API_KEY";

pub const JIRA: &str = "JIRA";
pub const SERVER: &str = "SERVER";
pub const TOKEN: &str = "TOKEN";
pub const MAX_RESULTS: &str = "MAX_RESULTS";

// Spreadsheet and sheets
pub const SPREADSHEET_ID: &str = "SPREADSHEET_ID";
pub const SHEETS: &str = "SHEETS";
pub const NAME: &str = "NAME";
pub const QUERY: &str = "QUERY";

pub const HEADER_OFFSET: &str = "HEADER_OFFSET";
pub const DELIMITER: &str = "DELIMITER";
pub const DEFAULT_COLUMNS: &str = "DEFAULT_COLUMNS";
pub const INHERIT_FORMULAS: &str = "INHERIT_FORMULAS";
pub const SHEET_COLUMNS: &str = "SHEET_COLUMNS";

// Columns
pub const KEY: &str = "KEY";
pub const LINK: &str = "LINK";
pub const OPTIONAL: &str = "OPTIONAL";
pub const SOURCE: &str = "SOURCE";
pub const FROM: &str = "FROM";
pub const GET: &str = "GET";
pub const CONDITION: &str = "CONDITION";

pub const DEFAULT_MAX_RESULTS: i64 = 100;
pub const DEFAULT_HEADER_OFFSET: i64 = 0;
pub const DEFAULT_DELIMITER: &str = " ";

// Error messages
pub const MISSING_INPUT: &str = "input is missing in the config file";
pub const MORE_INPUTS: &str = "more than one input is set in the config file";
pub const MISSING_BUGZILLA_API_KEY: &str = "Bugzilla API key file is not set in the config file";
pub const MISSING_BUGZILLA_DOMAIN: &str = "Bugzilla domain is not set in the config file";
pub const MISSING_BUGZILLA_URL: &str = "Bugzilla URL is not set in the config file";
pub const MISSING_JIRA_TOKEN: &str = "Jira access token is not set in the config file";
pub const MISSING_JIRA_SERVER: &str = "Jira server url is not set in the config file";
pub const MISSING_KEY: &str = "missing key in the config file";
pub const MISSING_QUERY: &str = "query is not set in the config file for the sheet ";
pub const MISSING_SHEET: &str = "no sheet is set in the config file";
pub const MISSING_SHEET_NAME: &str = "sheet name is not set in the config file";
pub const MISSING_SPREADSHEET: &str = "spreadsheet_id is not set in the config file";
pub const MISSING_SOURCE: &str = "data source is not set in the config file for the column ";
pub const MORE_KEYS: &str = "more than one key is set in the config file";
pub const WRONG_SPREADSHEET: &str = "spreadsheet_id must be a string in the config file";

/// Issue tracker a config pulls its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Bugzilla,
    Jira,
}

impl SourceKind {
    /// Top-level document key that selects this tracker.
    pub fn key(&self) -> &'static str {
        match self {
            SourceKind::Bugzilla => BUGZILLA,
            SourceKind::Jira => JIRA,
        }
    }

    /// Parse a tracker from its document key.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            BUGZILLA => Some(Self::Bugzilla),
            JIRA => Some(Self::Jira),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Bugzilla => write!(f, "bugzilla"),
            SourceKind::Jira => write!(f, "jira"),
        }
    }
}
