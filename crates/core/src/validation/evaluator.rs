//! Rule evaluator. Pure logic, no I/O.

use indexmap::IndexMap;
use serde_json::Value;

use super::primitives::{length_error, validate_required};
use super::rules::{FieldRule, ValidationResult};

/// Evaluate one rule against one value. The first failing check wins.
///
/// Order: required, then (for non-empty values) length, pattern, custom.
/// An optional field left empty passes without running the other checks.
pub fn validate_field(value: Option<&Value>, rule: &FieldRule, field_name: &str) -> Option<String> {
    if rule.required {
        if let Some(err) = validate_required(&value, field_name) {
            return Some(err);
        }
    } else if is_empty(value) {
        return None;
    }

    if let Some(Value::String(s)) = value {
        if let Some(err) = length_error(s, rule.min_length, rule.max_length, field_name) {
            return Some(err);
        }
        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(s) {
                return Some(format!("{field_name} format is invalid"));
            }
        }
    }

    rule.custom.as_ref().and_then(|check| check(value))
}

/// Evaluate every rule against a record, collecting all failures.
///
/// Fields are visited in the rule map's order; fields present in `data`
/// but without a rule are ignored.
pub fn validate_form(
    data: &serde_json::Map<String, Value>,
    rules: &IndexMap<String, FieldRule>,
) -> ValidationResult {
    rules
        .iter()
        .filter_map(|(field, rule)| validate_field(data.get(field), rule, field))
        .collect()
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}
