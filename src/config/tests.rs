//! Tests for whole-document config resolution.

use crate::config::types::*;
use crate::config::{Column, Config, Diagnostics, SourceKind, TrackerParams};
use crate::error::TrackerSheetError;
use serde_yaml::Value;

const JIRA_DOC: &str = r#"
JIRA:
  SERVER: https://jira.example.org
  TOKEN: secret
SPREADSHEET_ID: sheet-123
DELIMITER: ","
SHEET_COLUMNS:
  Id: {KEY: true, SOURCE: key}
  Summary: {SOURCE: {FROM: fields.summary}}
  Team: platform
SHEETS:
  - NAME: Open
    QUERY: status = Open
  - NAME: Done
    QUERY: status = Done
    HEADER_OFFSET: 1
    SHEET_COLUMNS:
      Ref: {KEY: true, SOURCE: key}
"#;

/// Resolve `yaml`, expecting a batch of recorded errors.
fn errors_of(yaml: &str) -> Diagnostics {
    match Config::from_yaml(yaml) {
        Err(TrackerSheetError::Invalid(diag)) => diag,
        Err(other) => panic!("expected recorded errors, got {:?}", other),
        Ok(config) => panic!("expected recorded errors, got {:?}", config),
    }
}

fn count(diag: &Diagnostics, message: &str) -> usize {
    diag.errors().iter().filter(|e| e.starts_with(message)).count()
}

#[test]
fn test_resolve_jira_document() {
    let config = Config::from_yaml(JIRA_DOC).unwrap();

    assert_eq!(config.source, SourceKind::Jira);
    assert_eq!(config.spreadsheet_id, "sheet-123");
    assert_eq!(config.sheet_names, vec!["Open", "Done"]);
    assert_eq!(config.query("Open"), Some("status = Open"));
    assert_eq!(config.query("Done"), Some("status = Done"));

    match &config.tracker {
        TrackerParams::Jira(jira) => {
            assert_eq!(jira.server, "https://jira.example.org");
            assert_eq!(jira.token, "secret");
            assert_eq!(jira.max_results, DEFAULT_MAX_RESULTS);
        }
        other => panic!("expected Jira params, got {:?}", other),
    }
}

#[test]
fn test_jira_max_results_defaults_to_100() {
    let yaml = r#"
JIRA: {SERVER: "s", TOKEN: "t"}
SPREADSHEET_ID: id
SHEETS:
  - {NAME: a, QUERY: q, SHEET_COLUMNS: {Id: {KEY: true, SOURCE: id}}}
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.tracker.kind(), SourceKind::Jira);
    match config.tracker {
        TrackerParams::Jira(jira) => assert_eq!(jira.max_results, 100),
        other => panic!("expected Jira params, got {:?}", other),
    }
}

#[test]
fn test_jira_max_results_from_document() {
    let yaml = JIRA_DOC.replace("TOKEN: secret", "TOKEN: secret\n  MAX_RESULTS: \"250\"");
    let config = Config::from_yaml(&yaml).unwrap();

    match config.tracker {
        TrackerParams::Jira(jira) => assert_eq!(jira.max_results, 250),
        other => panic!("expected Jira params, got {:?}", other),
    }
}

#[test]
fn test_resolve_bugzilla_document() {
    let yaml = r#"
BUGZILLA:
  DOMAIN: bugzilla.example.org
  URL: https://bugzilla.example.org/rest
  API_KEY: ~/.bugzilla_key
SPREADSHEET_ID: abc
SHEETS:
  - NAME: Bugs
    QUERY: product=Core
    SHEET_COLUMNS:
      Bug: {KEY: true, SOURCE: id, LINK: https://bugzilla.example.org/show_bug.cgi?id=}
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.source, SourceKind::Bugzilla);
    match &config.tracker {
        TrackerParams::Bugzilla(bz) => {
            assert_eq!(bz.domain, "bugzilla.example.org");
            assert_eq!(bz.url, "https://bugzilla.example.org/rest");
            assert_eq!(bz.api_key, "~/.bugzilla_key");
        }
        other => panic!("expected Bugzilla params, got {:?}", other),
    }
    let bug = config.sheet("Bugs").and_then(|s| s.key_column()).unwrap();
    assert_eq!(
        bug.link.as_deref(),
        Some("https://bugzilla.example.org/show_bug.cgi?id=")
    );
}

#[test]
fn test_missing_tracker_records_one_error() {
    let yaml = JIRA_DOC.replace("JIRA:", "OTHER:");
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), [MISSING_INPUT]);
}

#[test]
fn test_both_trackers_record_one_error() {
    let yaml = format!(
        "{}\nBUGZILLA: {{DOMAIN: d, URL: u, API_KEY: k}}\n",
        JIRA_DOC
    );
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), [MORE_INPUTS]);
}

#[test]
fn test_bugzilla_missing_fields_are_independent_errors() {
    let base = r#"
SPREADSHEET_ID: abc
SHEETS:
  - {NAME: a, QUERY: q, SHEET_COLUMNS: {Id: {KEY: true, SOURCE: id}}}
"#;

    let diag = errors_of(&format!("BUGZILLA: {{}}\n{}", base));
    assert_eq!(
        diag.errors(),
        [
            MISSING_BUGZILLA_DOMAIN,
            MISSING_BUGZILLA_URL,
            MISSING_BUGZILLA_API_KEY
        ]
    );

    let diag = errors_of(&format!("BUGZILLA: {{URL: u}}\n{}", base));
    assert_eq!(
        diag.errors(),
        [MISSING_BUGZILLA_DOMAIN, MISSING_BUGZILLA_API_KEY]
    );

    let diag = errors_of(&format!("BUGZILLA: {{DOMAIN: d, URL: u}}\n{}", base));
    assert_eq!(diag.errors(), [MISSING_BUGZILLA_API_KEY]);
}

#[test]
fn test_jira_missing_fields_are_independent_errors() {
    let yaml = JIRA_DOC.replace(
        "  SERVER: https://jira.example.org\n  TOKEN: secret\n",
        "  MAX_RESULTS: 10\n",
    );
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), [MISSING_JIRA_SERVER, MISSING_JIRA_TOKEN]);
}

#[test]
fn test_tracker_section_must_be_a_mapping() {
    let yaml = JIRA_DOC.replace(
        "JIRA:\n  SERVER: https://jira.example.org\n  TOKEN: secret\n",
        "JIRA: https://jira.example.org\n",
    );
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), ["JIRA must be a mapping in the config file"]);
}

#[test]
fn test_spreadsheet_id_missing() {
    let yaml = JIRA_DOC.replace("SPREADSHEET_ID: sheet-123\n", "");
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), [MISSING_SPREADSHEET]);
}

#[test]
fn test_spreadsheet_id_must_be_a_string() {
    let yaml = JIRA_DOC.replace("SPREADSHEET_ID: sheet-123", "SPREADSHEET_ID: 123");
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), [WRONG_SPREADSHEET]);
}

#[test]
fn test_missing_sheets_records_error() {
    let yaml = r#"
JIRA: {SERVER: s, TOKEN: t}
SPREADSHEET_ID: id
"#;
    let diag = errors_of(yaml);

    assert_eq!(diag.errors(), [MISSING_SHEET]);
}

#[test]
fn test_empty_sheets_records_error() {
    let yaml = r#"
JIRA: {SERVER: s, TOKEN: t}
SPREADSHEET_ID: id
SHEETS: []
"#;
    let diag = errors_of(yaml);

    assert_eq!(diag.errors(), [MISSING_SHEET]);
}

#[test]
fn test_sheets_must_be_a_list() {
    let yaml = r#"
JIRA: {SERVER: s, TOKEN: t}
SPREADSHEET_ID: id
SHEETS: {NAME: a}
"#;
    let diag = errors_of(yaml);

    assert_eq!(diag.errors(), ["SHEETS must be a list in the config file"]);
}

#[test]
fn test_missing_query_names_the_sheet() {
    let yaml = JIRA_DOC.replace("    QUERY: status = Done\n", "");
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), [format!("{}Done", MISSING_QUERY)]);
}

#[test]
fn test_missing_key_names_the_sheet() {
    let yaml = r#"
JIRA: {SERVER: s, TOKEN: t}
SPREADSHEET_ID: id
SHEETS:
  - NAME: Open
    QUERY: q
    SHEET_COLUMNS: {Summary: {SOURCE: summary}}
  - NAME: NoColumns
    QUERY: q
"#;
    let diag = errors_of(yaml);

    assert_eq!(
        diag.errors(),
        [
            format!("{} (sheet: Open)", MISSING_KEY),
            format!("{} (sheet: NoColumns)", MISSING_KEY),
        ]
    );
}

#[test]
fn test_missing_sheet_name_skips_entry() {
    let yaml = JIRA_DOC.replace("  - NAME: Open\n    QUERY", "  - QUERY");
    let diag = errors_of(&yaml);

    assert_eq!(diag.errors(), [format!("{} (sheet #1)", MISSING_SHEET_NAME)]);
}

#[test]
fn test_duplicate_sheet_name_is_an_error() {
    let yaml = JIRA_DOC.replace("NAME: Done", "NAME: Open");
    let diag = errors_of(&yaml);

    assert_eq!(
        diag.errors(),
        ["sheet Open is set more than once in the config file"]
    );
}

#[test]
fn test_dropped_sheet_entries_report_their_own_errors() {
    let yaml = r#"
JIRA: {SERVER: s, TOKEN: t}
SPREADSHEET_ID: id
SHEETS:
  - NAME: a
    QUERY: q
    SHEET_COLUMNS: {Id: {KEY: true, SOURCE: id}}
  - NAME: a
    HEADER_OFFSET: many
    SHEET_COLUMNS: {Link: {LINK: url}}
  - HEADER_OFFSET: many
    SHEET_COLUMNS: {Link: {LINK: url}}
"#;
    let diag = errors_of(yaml);

    assert_eq!(
        diag.errors(),
        [
            "sheet a is set more than once in the config file".to_string(),
            format!("{}a (sheet #2)", MISSING_QUERY),
            "HEADER_OFFSET must be an integer in the config file (found many)".to_string(),
            format!("{}Link", MISSING_SOURCE),
            format!("{} (sheet: a (sheet #2))", MISSING_KEY),
            format!("{} (sheet #3)", MISSING_SHEET_NAME),
            format!("{}sheet #3", MISSING_QUERY),
            "HEADER_OFFSET must be an integer in the config file (found many)".to_string(),
            format!("{}Link", MISSING_SOURCE),
            format!("{} (sheet: sheet #3)", MISSING_KEY),
        ]
    );
}

#[test]
fn test_dropped_valid_entries_add_no_other_errors() {
    let yaml = JIRA_DOC.replace("NAME: Done", "NAME: Open");
    let diag = errors_of(&yaml);
    assert_eq!(diag.len(), 1);

    let yaml = r#"
JIRA: {SERVER: s, TOKEN: t}
SPREADSHEET_ID: id
SHEET_COLUMNS: {Id: {KEY: true, SOURCE: id}}
SHEETS:
  - {NAME: a, QUERY: q}
  - {QUERY: q}
"#;
    let diag = errors_of(yaml);
    assert_eq!(diag.errors(), [format!("{} (sheet #2)", MISSING_SHEET_NAME)]);
}

#[test]
fn test_duplicate_key_records_one_error_and_keeps_first() {
    let yaml = JIRA_DOC.replace(
        "      Ref: {KEY: true, SOURCE: key}\n",
        "      Ref: {KEY: true, SOURCE: key}\n      Alt: {KEY: true, SOURCE: alt}\n",
    );
    let diag = errors_of(&yaml);

    assert_eq!(count(&diag, MORE_KEYS), 1);
    assert_eq!(diag.len(), 1);
}

#[test]
fn test_errors_from_every_level_are_batched() {
    let yaml = r#"
BUGZILLA: {URL: u}
SPREADSHEET_ID: 42
SHEET_COLUMNS:
  Id: {KEY: true, SOURCE: id}
  Ref: {KEY: true, SOURCE: ref}
SHEETS:
  - NAME: One
  - NAME: Two
    QUERY: q
    SHEET_COLUMNS: {Summary: {SOURCE: summary}}
"#;
    let diag = errors_of(yaml);

    assert_eq!(count(&diag, MISSING_BUGZILLA_DOMAIN), 1);
    assert_eq!(count(&diag, MISSING_BUGZILLA_API_KEY), 1);
    assert_eq!(count(&diag, WRONG_SPREADSHEET), 1);
    assert_eq!(count(&diag, MORE_KEYS), 1);
    assert_eq!(count(&diag, MISSING_QUERY), 1);
    assert_eq!(count(&diag, MISSING_KEY), 1);
    assert_eq!(diag.len(), 6);
}

#[test]
fn test_sheet_without_columns_inherits_spreadsheet_columns() {
    let config = Config::from_yaml(JIRA_DOC).unwrap();
    let open = config.sheet("Open").unwrap();

    assert_eq!(open.delimiter, ",");
    assert_eq!(open.columns, config.defaults.columns);
    assert_eq!(open.key, config.defaults.key);
    assert!(open.shares_columns_with(&config.defaults));
    assert_eq!(
        open.columns.keys().collect::<Vec<_>>(),
        ["Id", "Summary", "Team"]
    );
}

#[test]
fn test_sheet_with_columns_replaces_spreadsheet_columns() {
    let config = Config::from_yaml(JIRA_DOC).unwrap();
    let done = config.sheet("Done").unwrap();

    assert_eq!(done.header_offset, 1);
    assert_eq!(done.key.as_deref(), Some("Ref"));
    assert_eq!(done.columns.len(), 1);
    assert_eq!(done.column("Ref").map(|c| c.delimiter.as_str()), Some(","));
    assert!(!done.shares_columns_with(&config.defaults));
}

// DEFAULT_COLUMNS: false does not stop a sheet without columns from reusing
// the spreadsheet columns. The flag is carried through for the writer only.
#[test]
fn test_default_columns_false_still_inherits() {
    let yaml = JIRA_DOC.replace(
        "    QUERY: status = Open\n",
        "    QUERY: status = Open\n    DEFAULT_COLUMNS: false\n",
    );
    let config = Config::from_yaml(&yaml).unwrap();
    let open = config.sheet("Open").unwrap();

    assert!(!open.default_columns);
    assert!(open.shares_columns_with(&config.defaults));
    assert_eq!(open.key.as_deref(), Some("Id"));
}

#[test]
fn test_source_delimiter_overrides_column_delimiter() {
    let yaml = r#"
JIRA: {SERVER: s, TOKEN: t}
SPREADSHEET_ID: id
SHEETS:
  - NAME: a
    QUERY: q
    SHEET_COLUMNS:
      Id: {KEY: true, SOURCE: key}
      Labels: {DELIMITER: ",", SOURCE: {FROM: "x.y", DELIMITER: ";"}}
"#;
    let config = Config::from_yaml(yaml).unwrap();
    let labels = config.sheet("a").and_then(|s| s.column("Labels")).unwrap();

    assert_eq!(labels.delimiter, ";");
    assert_eq!(labels.data, Some(Value::from("x.y")));
}

#[test]
fn test_literal_column_keeps_scalar() {
    let config = Config::from_yaml(JIRA_DOC).unwrap();
    let team = config.sheet("Open").and_then(|s| s.column("Team")).unwrap();

    assert!(team.is_literal());
    assert_eq!(team, &Column::literal(Value::from("platform"), ","));
}

#[test]
fn test_resolution_is_idempotent() {
    let first = Config::from_yaml(JIRA_DOC).unwrap();
    let second = Config::from_yaml(JIRA_DOC).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sheets_in_order_pairs_queries() {
    let config = Config::from_yaml(JIRA_DOC).unwrap();
    let pairs: Vec<(&str, &str)> = config
        .sheets_in_order()
        .map(|(name, _, query)| (name, query))
        .collect();

    assert_eq!(
        pairs,
        vec![("Open", "status = Open"), ("Done", "status = Done")]
    );
}

#[test]
fn test_non_mapping_document_is_fatal() {
    let err = Config::from_yaml("- just\n- a list\n").unwrap_err();
    assert!(matches!(err, TrackerSheetError::UserError(_)));

    let err = Config::from_yaml("").unwrap_err();
    assert!(matches!(err, TrackerSheetError::UserError(_)));
}

#[test]
fn test_malformed_yaml_is_fatal() {
    let err = Config::from_yaml("JIRA: [unclosed").unwrap_err();
    assert!(matches!(err, TrackerSheetError::Parse(_)));
}

#[test]
fn test_to_yaml_and_json() {
    let config = Config::from_yaml(JIRA_DOC).unwrap();

    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("spreadsheet_id: sheet-123"));
    assert!(yaml.contains("kind: jira"));

    let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
    assert_eq!(json["sheet_names"], serde_json::json!(["Open", "Done"]));
    assert_eq!(json["sheets"]["Done"]["key"], "Ref");
    assert_eq!(json["tracker"]["max_results"], 100);
}

#[test]
fn test_config_load_from_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", JIRA_DOC).unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.sheet_names, vec!["Open", "Done"]);
}

#[test]
fn test_config_load_missing_file() {
    let result = Config::load("/nonexistent/path/config.yaml");
    let err = result.unwrap_err();

    assert!(matches!(err, TrackerSheetError::Read { .. }));
    assert!(err.to_string().contains("failed to read config file"));
}
