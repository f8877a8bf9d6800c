//! Column resolution.
//!
//! A column spec is either a bare scalar (used verbatim as the column data)
//! or a mapping. Mappings may carry a nested `SOURCE` block whose fields are
//! applied last, so they win over the same fields at the column level.

use super::diagnostics::Diagnostics;
use super::model::Column;
use super::node::{Shape, as_text, describe};
use super::types::{
    CONDITION, DELIMITER, FROM, GET, KEY, LINK, MISSING_SOURCE, MORE_KEYS, OPTIONAL, SOURCE,
};
use serde_yaml::{Mapping, Value};

/// Key column bookkeeping across the columns of one sheet.
///
/// The first column that declares `KEY` claims it. Later claimants are
/// collected and reported as a single error by [`KeyTracker::finish`].
#[derive(Debug, Default)]
pub(crate) struct KeyTracker {
    key: Option<String>,
    extra: Vec<String>,
}

impl KeyTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn claim(&mut self, name: &str) {
        if self.key.is_some() {
            self.extra.push(name.to_string());
        } else {
            self.key = Some(name.to_string());
        }
    }

    /// The winning key column, recording one error if others also claimed it.
    pub(crate) fn finish(self, diag: &mut Diagnostics) -> Option<String> {
        if let Some(key) = &self.key
            && !self.extra.is_empty()
        {
            diag.record_error(format!(
                "{} (columns: {}, {})",
                MORE_KEYS,
                key,
                self.extra.join(", ")
            ));
        }
        self.key
    }
}

/// Resolve one column, registering it with `keys` if it declares `KEY`.
pub(crate) fn resolve_column(
    keys: &mut KeyTracker,
    name: &str,
    spec: &Value,
    delimiter: &str,
    diag: &mut Diagnostics,
) -> Column {
    let fields = match Shape::of(spec) {
        Shape::Literal(value) => return Column::literal(value.clone(), delimiter),
        Shape::Structured(fields) => fields,
    };

    if declares_key(fields) {
        keys.claim(name);
    }

    let mut column = Column::with_delimiter(
        text_field(fields, DELIMITER, diag).unwrap_or_else(|| delimiter.to_string()),
    );
    if let Some(link) = text_field(fields, LINK, diag) {
        column.link = Some(link);
    }
    if let Some(optional) = text_field(fields, OPTIONAL, diag) {
        column.optional = Some(optional);
    }

    match fields.get(SOURCE) {
        Some(source) => resolve_source(&mut column, source, diag),
        None => diag.record_error(format!("{}{}", MISSING_SOURCE, name)),
    }

    tracing::trace!(
        column = name,
        data = ?column.data.as_ref().map(describe),
        "resolved column"
    );
    column
}

/// Apply a `SOURCE` block on top of the column-level fields.
fn resolve_source(column: &mut Column, source: &Value, diag: &mut Diagnostics) {
    let fields = match Shape::of(source) {
        Shape::Literal(value) => {
            column.data = Some(value.clone());
            return;
        }
        Shape::Structured(fields) => fields,
    };

    if let Some(delimiter) = text_field(fields, DELIMITER, diag) {
        column.delimiter = delimiter;
    }
    if let Some(from) = fields.get(FROM) {
        column.data = Some(from.clone());
    }
    if let Some(gets) = fields.get(GET) {
        column.gets = Some(gets.clone());
    }
    if let Some(condition) = fields.get(CONDITION) {
        column.condition = Some(condition.clone());
    }
    if let Some(link) = text_field(fields, LINK, diag) {
        column.link = Some(link);
    }
    if let Some(optional) = text_field(fields, OPTIONAL, diag) {
        column.optional = Some(optional);
    }
}

/// `KEY` marks the column as the key unless it is explicitly `false`.
fn declares_key(fields: &Mapping) -> bool {
    match fields.get(KEY) {
        // Presence alone is not enough: `KEY: false` opts out.
        Some(Value::Bool(flag)) => *flag,
        Some(_) => true,
        None => false,
    }
}

fn text_field(fields: &Mapping, field: &str, diag: &mut Diagnostics) -> Option<String> {
    fields.get(field).and_then(|value| as_text(value, field, diag))
}
