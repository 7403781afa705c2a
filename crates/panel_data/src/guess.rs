use std::sync::LazyLock;

use panel_data_core::{FieldType, Value};
use regex::Regex;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(-?(\d+\.?\d*|\.\d+)(e[+-]?\d+)?|NAN)\s*$").expect("valid number pattern")
});

/// A field called `time` or `date` is a time field whatever its values look like.
pub fn guess_field_type_from_name_and_value(name: &str, value: &Value) -> FieldType {
    if name.eq_ignore_ascii_case("time") || name.eq_ignore_ascii_case("date") {
        return FieldType::Time;
    }
    guess_field_type_from_value(value)
}

pub fn guess_field_type_from_value(value: &Value) -> FieldType {
    match value {
        Value::Number(_) => FieldType::Number,
        Value::String(s) => {
            if NUMBER.is_match(s) {
                FieldType::Number
            } else if matches!(s.as_str(), "true" | "TRUE" | "True" | "false" | "FALSE" | "False") {
                FieldType::Boolean
            } else {
                FieldType::String
            }
        }
        Value::Bool(_) => FieldType::Boolean,
        _ => FieldType::Other,
    }
}

/// Classifies a column by its first non-null value; all-null columns are `Other`.
pub fn guess_field_type(name: &str, values: &[Value]) -> FieldType {
    values
        .iter()
        .find(|v| !v.is_nullish())
        .map_or(FieldType::Other, |v| guess_field_type_from_name_and_value(name, v))
}
