//! Sheet resolution.
//!
//! A sheet starts as a copy of its parent (the spreadsheet-wide defaults) or
//! of the built-in defaults, then applies its own overrides field by field.
//! Columns are never merged: a sheet either declares its whole column map or
//! shares the parent's.

use super::column::{KeyTracker, resolve_column};
use super::diagnostics::Diagnostics;
use super::model::{ColumnMap, Sheet};
use super::node::{as_flag, as_integer, as_text, describe, scalar_text};
use super::types::{DEFAULT_COLUMNS, DELIMITER, HEADER_OFFSET, INHERIT_FORMULAS, SHEET_COLUMNS};
use serde_yaml::Mapping;
use std::sync::Arc;

/// Resolve one sheet spec against an optional parent.
pub(crate) fn resolve_sheet(
    node: &Mapping,
    parent: Option<&Sheet>,
    diag: &mut Diagnostics,
) -> Sheet {
    let mut sheet = parent.cloned().unwrap_or_default();

    if let Some(offset) = node
        .get(HEADER_OFFSET)
        .and_then(|value| as_integer(value, HEADER_OFFSET, diag))
    {
        sheet.header_offset = offset;
    }
    if let Some(delimiter) = node
        .get(DELIMITER)
        .and_then(|value| as_text(value, DELIMITER, diag))
    {
        sheet.delimiter = delimiter;
    }
    if let Some(flag) = node
        .get(DEFAULT_COLUMNS)
        .and_then(|value| as_flag(value, DEFAULT_COLUMNS, diag))
    {
        sheet.default_columns = flag;
    }
    if let Some(flag) = node
        .get(INHERIT_FORMULAS)
        .and_then(|value| as_flag(value, INHERIT_FORMULAS, diag))
    {
        sheet.inherit_formulas = flag;
    }

    let mut keys = KeyTracker::new();
    let columns = match node.get(SHEET_COLUMNS) {
        Some(value) => match value.as_mapping() {
            Some(declared) => resolve_columns(declared, &sheet.delimiter, &mut keys, diag),
            None => {
                diag.record_error(format!(
                    "{} must be a mapping in the config file (found {})",
                    SHEET_COLUMNS,
                    describe(value)
                ));
                ColumnMap::new()
            }
        },
        None => ColumnMap::new(),
    };

    // An empty result keeps whatever was seeded: the parent's map and key when
    // there is a parent, DEFAULT_COLUMNS notwithstanding.
    let key = keys.finish(diag);
    if !columns.is_empty() {
        sheet.columns = Arc::new(columns);
        sheet.key = key;
    } else if let Some(parent) = parent {
        // Shared columns come with the parent's delimiter.
        sheet.delimiter = parent.delimiter.clone();
    }

    sheet
}

fn resolve_columns(
    declared: &Mapping,
    delimiter: &str,
    keys: &mut KeyTracker,
    diag: &mut Diagnostics,
) -> ColumnMap {
    let mut columns = ColumnMap::with_capacity(declared.len());
    for (name, spec) in declared {
        let Some(name) = scalar_text(name) else {
            diag.record_error(format!(
                "column name must be a string in the config file (found {})",
                describe(name)
            ));
            continue;
        };
        let column = resolve_column(keys, &name, spec, delimiter, diag);
        columns.insert(name, column);
    }
    columns
}
