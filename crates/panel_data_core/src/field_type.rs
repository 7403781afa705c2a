use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum FieldType {
    Time,
    Number,
    String,
    Boolean,
    Trace,
    #[default]
    Other,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Time => "time",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Trace => "trace",
            FieldType::Other => "other",
        }
    }

    /// Unknown names map to `Other` so newer producers don't break decoding.
    pub fn from_name(name: &str) -> Self {
        match name {
            "time" => FieldType::Time,
            "number" => FieldType::Number,
            "string" => FieldType::String,
            "boolean" => FieldType::Boolean,
            "trace" => FieldType::Trace,
            _ => FieldType::Other,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from_name(&name)
    }
}

impl From<FieldType> for &'static str {
    fn from(t: FieldType) -> Self {
        t.as_str()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
