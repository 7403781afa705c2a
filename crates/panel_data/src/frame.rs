use panel_data_core::{FieldConfig, FieldType, Labels, Value};
use panel_data_proto::EntityLookup;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub config: FieldConfig,
    pub values: Vec<Value>,
    pub labels: Option<Labels>,
    /// Sentinel positions restored at decode time. Empty when none were
    /// decoded, so consumers can skip scanning for NaN and friends.
    pub entities: EntityLookup,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<Value>) -> Self {
        Field {
            name: name.into(),
            field_type,
            values,
            ..Default::default()
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A table of named, typed columns sharing a row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub name: Option<String>,
    pub ref_id: Option<String>,
    pub meta: Option<serde_json::Value>,
    pub fields: Vec<Field>,
    pub length: usize,
}

impl Frame {
    /// Builds a frame whose length is its longest field.
    pub fn new(fields: Vec<Field>) -> Self {
        let length = fields.iter().map(Field::len).max().unwrap_or(0);
        Frame {
            fields,
            length,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Row `idx` across all fields.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.length {
            return None;
        }
        Some(
            self.fields
                .iter()
                .map(|f| f.values.get(idx).unwrap_or(&Value::Undefined))
                .collect(),
        )
    }
}
