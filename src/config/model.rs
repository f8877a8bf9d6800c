//! Resolved configuration model.
//!
//! Everything here is produced by the resolvers in this module's siblings and
//! is immutable afterwards. Downstream fetch and write code only reads it.

use super::types::{DEFAULT_DELIMITER, DEFAULT_HEADER_OFFSET, SourceKind};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;
use std::sync::Arc;

/// Columns of one sheet, in declaration order.
pub type ColumnMap = IndexMap<String, Column>;

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Tracker the issues come from.
    pub source: SourceKind,

    /// Connection parameters for `source`.
    pub tracker: TrackerParams,

    /// Identifier of the target spreadsheet.
    pub spreadsheet_id: String,

    /// Spreadsheet-wide settings every sheet starts from.
    pub defaults: Sheet,

    /// Sheet names in document order.
    pub sheet_names: Vec<String>,

    /// Resolved sheets keyed by name.
    pub sheets: IndexMap<String, Sheet>,

    /// Tracker query per sheet name.
    pub queries: IndexMap<String, String>,
}

impl Config {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.queries.get(name).map(String::as_str)
    }

    /// Sheets paired with their query, in document order.
    pub fn sheets_in_order(&self) -> impl Iterator<Item = (&str, &Sheet, &str)> {
        self.sheet_names.iter().filter_map(|name| {
            let sheet = self.sheets.get(name)?;
            let query = self.queries.get(name)?;
            Some((name.as_str(), sheet, query.as_str()))
        })
    }
}

/// Tracker-specific connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackerParams {
    Bugzilla(BugzillaParams),
    Jira(JiraParams),
}

impl TrackerParams {
    pub fn kind(&self) -> SourceKind {
        match self {
            TrackerParams::Bugzilla(_) => SourceKind::Bugzilla,
            TrackerParams::Jira(_) => SourceKind::Jira,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugzillaParams {
    pub domain: String,
    pub url: String,
    /// Path of the file holding the API key.
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JiraParams {
    pub server: String,
    pub token: String,
    pub max_results: i64,
}

/// One sheet's layout, after spreadsheet-wide defaults have been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    /// Rows above the header row.
    pub header_offset: i64,

    /// Joins multi-valued fields into one cell.
    pub delimiter: String,

    /// Whether the sheet asked for the spreadsheet-wide columns.
    pub default_columns: bool,

    /// Whether new rows copy formulas from the row above.
    pub inherit_formulas: bool,

    /// Shared with the spreadsheet defaults when the sheet declares none.
    pub columns: Arc<ColumnMap>,

    /// Column that identifies a row.
    pub key: Option<String>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            delimiter: DEFAULT_DELIMITER.to_string(),
            default_columns: false,
            inherit_formulas: false,
            columns: Arc::new(ColumnMap::new()),
            key: None,
        }
    }
}

impl Sheet {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn key_column(&self) -> Option<&Column> {
        self.key.as_deref().and_then(|key| self.columns.get(key))
    }

    /// True when the column map is the same allocation as `other`'s.
    pub fn shares_columns_with(&self, other: &Sheet) -> bool {
        Arc::ptr_eq(&self.columns, &other.columns)
    }
}

/// Shape of a column's specification in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// A bare scalar: the scalar is the column's data.
    Literal,
    /// A mapping with `KEY`/`LINK`/`SOURCE`/... sub-fields.
    #[default]
    Structured,
}

/// How to derive one cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub kind: ColumnKind,

    /// Literal cell value, or the field path to read from an issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Nested extraction applied to the `data` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gets: Option<Value>,

    /// Filter deciding which values count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    pub delimiter: String,
}

impl Column {
    /// Empty structured column using the given delimiter.
    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        Self {
            kind: ColumnKind::Structured,
            data: None,
            gets: None,
            condition: None,
            optional: None,
            link: None,
            delimiter: delimiter.into(),
        }
    }

    /// Literal column holding `data` verbatim.
    pub fn literal(data: Value, delimiter: impl Into<String>) -> Self {
        Self {
            kind: ColumnKind::Literal,
            data: Some(data),
            ..Self::with_delimiter(delimiter)
        }
    }

    pub fn is_literal(&self) -> bool {
        self.kind == ColumnKind::Literal
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }
}
