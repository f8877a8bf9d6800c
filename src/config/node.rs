//! Accessors over raw YAML nodes.
//!
//! Every lookup that can fail records into [`Diagnostics`] and hands back an
//! `Option`, so resolution keeps walking the document after a problem.

use super::diagnostics::Diagnostics;
use super::types::{MORE_INPUTS, SourceKind};
use serde_yaml::{Mapping, Value};

/// Shape of a column or source specification, decided once per node.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Shape<'a> {
    /// Anything that is not a mapping is used verbatim.
    Literal(&'a Value),
    Structured(&'a Mapping),
}

impl<'a> Shape<'a> {
    pub(crate) fn of(value: &'a Value) -> Self {
        match value {
            Value::Mapping(mapping) => Shape::Structured(mapping),
            other => Shape::Literal(other),
        }
    }
}

/// Fetch a required field, recording `message` when it is absent.
pub(crate) fn get_required<'a>(
    node: &'a Mapping,
    field: &str,
    message: &str,
    diag: &mut Diagnostics,
) -> Option<&'a Value> {
    match node.get(field) {
        Some(value) => {
            tracing::debug!("{}: {}", field, describe(value));
            Some(value)
        }
        None => {
            diag.record_error(message);
            None
        }
    }
}

/// [`get_required`] followed by [`as_text`].
pub(crate) fn get_required_text(
    node: &Mapping,
    field: &str,
    message: &str,
    diag: &mut Diagnostics,
) -> Option<String> {
    get_required(node, field, message, diag).and_then(|value| as_text(value, field, diag))
}

/// Fetch an optional field, falling back to `default`.
pub(crate) fn get_with_default(node: &Mapping, field: &str, default: Value) -> Value {
    match node.get(field) {
        Some(value) => {
            tracing::debug!("{}: {}", field, describe(value));
            value.clone()
        }
        None => {
            tracing::debug!("{}: {} (default value)", field, describe(&default));
            default
        }
    }
}

/// Find which tracker the document targets.
///
/// Exactly one tracker key must be present. Neither records `message`; both
/// records a single "more than one input" error.
pub(crate) fn determine_source(
    root: &Mapping,
    message: &str,
    diag: &mut Diagnostics,
) -> Option<SourceKind> {
    let present: Vec<SourceKind> = [SourceKind::Bugzilla, SourceKind::Jira]
        .into_iter()
        .filter(|kind| root.contains_key(kind.key()))
        .collect();

    match present.as_slice() {
        [] => {
            diag.record_error(message);
            None
        }
        [kind] => {
            tracing::debug!("input: {}", kind.key());
            Some(*kind)
        }
        _ => {
            diag.record_error(MORE_INPUTS);
            None
        }
    }
}

/// Plain-text form of a scalar, `None` for null, sequences and mappings.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Coerce a scalar to text, recording a type error otherwise.
pub(crate) fn as_text(value: &Value, field: &str, diag: &mut Diagnostics) -> Option<String> {
    let text = scalar_text(value);
    if text.is_none() {
        diag.record_error(format!("{} must be a string in the config file", field));
    }
    text
}

/// Coerce an integer or an integer-looking string, recording a type error otherwise.
pub(crate) fn as_integer(value: &Value, field: &str, diag: &mut Diagnostics) -> Option<i64> {
    let parsed = match value {
        // Floats such as 50.0 are rejected rather than truncated.
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        diag.record_error(format!(
            "{} must be an integer in the config file (found {})",
            field,
            describe(value)
        ));
    }
    parsed
}

/// Coerce a boolean, recording a type error otherwise.
pub(crate) fn as_flag(value: &Value, field: &str, diag: &mut Diagnostics) -> Option<bool> {
    let flag = value.as_bool();
    if flag.is_none() {
        diag.record_error(format!(
            "{} must be true or false in the config file (found {})",
            field,
            describe(value)
        ));
    }
    flag
}

/// Single-line rendering of a node for log and error messages.
pub(crate) fn describe(value: &Value) -> String {
    if let Some(text) = scalar_text(value) {
        return text;
    }
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}
