mod field_type;
mod value;

pub use field_type::FieldType;
pub use value::{MAX_SAFE_INTEGER, Value};

/// Opaque display/formatting options attached to a field.
pub type FieldConfig = serde_json::Map<String, serde_json::Value>;

/// Free-form key/value labels attached to a field.
pub type Labels = std::collections::BTreeMap<String, String>;
