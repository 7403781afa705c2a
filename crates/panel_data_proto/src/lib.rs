//! JSON transfer objects for data frames.
//!
//! A frame travels as a `schema` (field names, types, config) plus a columnar
//! `data` block aligned with the schema by field index.

mod entity;

pub use entity::{EntityKind, EntityLookup, decode_field_value_entities, encode_field_value_entities};

use panel_data_core::{FieldConfig, FieldType, Labels, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<FrameSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FrameData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSchema {
    /// Matches the query target refId.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Required on decode; `None` only so that its absence can be reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldSchema>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    /// One column per schema field.
    pub values: Vec<Vec<Value>>,

    /// JSON cannot carry NaN, +/-Inf or undefined; their row positions are
    /// listed here per field and restored after parsing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Option<EntityLookup>>>,

    /// Per-field offsets for fixed-point numbers, e.g. `1612900958 + [0, 1, 2]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bases: Option<Vec<f64>>,

    /// Per-field multipliers, e.g. `1e9 * [4.9, 35]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<f64>>,

    /// Per-field dictionaries for recurring values, e.g. `["foo", "baz"] + [0, 0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enums: Option<Vec<Vec<Value>>>,
}

impl FrameData {
    pub fn has_compaction(&self) -> bool {
        self.bases.is_some() || self.factors.is_some() || self.enums.is_some()
    }
}
