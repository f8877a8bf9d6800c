//! Config loading and root resolution.

use super::diagnostics::Diagnostics;
use super::model::{BugzillaParams, Config, JiraParams, Sheet, TrackerParams};
use super::node::{
    as_integer, as_text, determine_source, get_required, get_required_text, get_with_default,
};
use super::sheet::resolve_sheet;
use super::types::*;
use crate::error::{Result, TrackerSheetError};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use std::path::Path;

impl Config {
    /// Load and resolve a config file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - The document resolved without any recorded error
    /// * `Err(TrackerSheetError::Read | Parse | UserError)` - The document is unusable
    /// * `Err(TrackerSheetError::Invalid)` - Every problem found in the document
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "read config file");

        let content = std::fs::read_to_string(path).map_err(|source| TrackerSheetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and resolve a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&document)
    }

    /// Resolve an already parsed document.
    pub fn from_value(document: &Value) -> Result<Self> {
        let root = document
            .as_mapping()
            .ok_or_else(|| Diagnostics::fatal("config document must be a mapping"))?;
        resolve(root)
    }

    /// Serialize the resolved config to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TrackerSheetError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Serialize the resolved config to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TrackerSheetError::UserError(format!("failed to serialize config to JSON: {}", e))
        })
    }
}

/// Sheets declared under `SHEETS`, in document order.
#[derive(Debug, Default)]
struct DeclaredSheets {
    names: Vec<String>,
    sheets: IndexMap<String, Sheet>,
    queries: IndexMap<String, String>,
}

/// Walk the whole document once, then fail with everything recorded.
fn resolve(root: &Mapping) -> Result<Config> {
    let mut diag = Diagnostics::new();

    let source = determine_source(root, MISSING_INPUT, &mut diag);
    let tracker = source.and_then(|kind| tracker_params(root, kind, &mut diag));
    let spreadsheet_id = spreadsheet_id(root, &mut diag);

    let defaults = resolve_sheet(root, None, &mut diag);
    tracing::debug!("spreadsheet: {:?}", defaults);

    let declared = declared_sheets(root, &defaults, &mut diag);

    diag.abort_if_any_error()?;

    match (source, tracker, spreadsheet_id) {
        (Some(source), Some(tracker), Some(spreadsheet_id)) => Ok(Config {
            source,
            tracker,
            spreadsheet_id,
            defaults,
            sheet_names: declared.names,
            sheets: declared.sheets,
            queries: declared.queries,
        }),
        _ => Err(TrackerSheetError::UserError(
            "config resolution finished without a tracker or spreadsheet id".to_string(),
        )),
    }
}

fn tracker_params(
    root: &Mapping,
    kind: SourceKind,
    diag: &mut Diagnostics,
) -> Option<TrackerParams> {
    let section = match root.get(kind.key()).and_then(Value::as_mapping) {
        Some(section) => section,
        None => {
            diag.record_error(format!("{} must be a mapping in the config file", kind.key()));
            return None;
        }
    };

    match kind {
        SourceKind::Bugzilla => {
            // Evaluated separately so every missing field is reported.
            let domain = get_required_text(section, DOMAIN, MISSING_BUGZILLA_DOMAIN, diag);
            let url = get_required_text(section, URL, MISSING_BUGZILLA_URL, diag);
            let api_key = get_required_text(section, API_KEY, MISSING_BUGZILLA_API_KEY, diag);

            Some(TrackerParams::Bugzilla(BugzillaParams {
                domain: domain?,
                url: url?,
                api_key: api_key?,
            }))
        }
        SourceKind::Jira => {
            let server = get_required_text(section, SERVER, MISSING_JIRA_SERVER, diag);
            let token = get_required_text(section, TOKEN, MISSING_JIRA_TOKEN, diag);
            let max_results = as_integer(
                &get_with_default(section, MAX_RESULTS, Value::from(DEFAULT_MAX_RESULTS)),
                MAX_RESULTS,
                diag,
            );

            Some(TrackerParams::Jira(JiraParams {
                server: server?,
                token: token?,
                max_results: max_results?,
            }))
        }
    }
}

fn spreadsheet_id(root: &Mapping, diag: &mut Diagnostics) -> Option<String> {
    match get_required(root, SPREADSHEET_ID, MISSING_SPREADSHEET, diag)? {
        Value::String(id) => Some(id.clone()),
        _ => {
            diag.record_error(WRONG_SPREADSHEET);
            None
        }
    }
}

fn declared_sheets(root: &Mapping, defaults: &Sheet, diag: &mut Diagnostics) -> DeclaredSheets {
    let mut declared = DeclaredSheets::default();

    let Some(entries) = root.get(SHEETS) else {
        diag.record_error(MISSING_SHEET);
        return declared;
    };
    let Some(entries) = entries.as_sequence() else {
        diag.record_error(format!("{} must be a list in the config file", SHEETS));
        return declared;
    };
    if entries.is_empty() {
        diag.record_error(MISSING_SHEET);
        return declared;
    }

    for (index, entry) in entries.iter().enumerate() {
        let position = index + 1;
        let Some(node) = entry.as_mapping() else {
            diag.record_error(format!(
                "sheet #{} must be a mapping in the config file",
                position
            ));
            continue;
        };

        let name = get_required(
            node,
            NAME,
            &format!("{} (sheet #{})", MISSING_SHEET_NAME, position),
            diag,
        )
        .and_then(|value| as_text(value, NAME, diag));
        let duplicate = name
            .as_ref()
            .is_some_and(|name| declared.sheets.contains_key(name));
        if let Some(name) = name.as_ref().filter(|_| duplicate) {
            diag.record_error(format!(
                "sheet {} is set more than once in the config file",
                name
            ));
        }

        // Dropped entries are still resolved for diagnostics.
        let label = match &name {
            Some(name) if !duplicate => name.clone(),
            Some(name) => format!("{} (sheet #{})", name, position),
            None => format!("sheet #{}", position),
        };
        let query = get_required_text(node, QUERY, &format!("{}{}", MISSING_QUERY, label), diag);
        let sheet = resolve_sheet(node, Some(defaults), diag);
        tracing::debug!("sheet {}: {:?}", label, sheet);
        if sheet.key.is_none() {
            diag.record_error(format!("{} (sheet: {})", MISSING_KEY, label));
        }

        let Some(name) = name.filter(|_| !duplicate) else {
            continue;
        };
        if let Some(query) = query {
            declared.queries.insert(name.clone(), query);
        }
        declared.names.push(name.clone());
        declared.sheets.insert(name, sheet);
    }

    declared
}
