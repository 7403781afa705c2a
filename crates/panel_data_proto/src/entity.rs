use panel_data_core::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    NaN,
    /// Missing because of absence or join.
    Undef,
    Inf,
    NegInf,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::NaN,
        EntityKind::Undef,
        EntityKind::Inf,
        EntityKind::NegInf,
    ];

    /// The sentinel written back into the column.
    pub fn replacement(self) -> Value {
        match self {
            EntityKind::NaN => Value::Number(f64::NAN),
            EntityKind::Undef => Value::Undefined,
            EntityKind::Inf => Value::Number(f64::INFINITY),
            EntityKind::NegInf => Value::Number(f64::NEG_INFINITY),
        }
    }

    /// Which kind, if any, a value has to travel as.
    pub fn of(value: &Value) -> Option<EntityKind> {
        match value {
            Value::Undefined => Some(EntityKind::Undef),
            Value::Number(n) if n.is_nan() => Some(EntityKind::NaN),
            Value::Number(n) if *n == f64::INFINITY => Some(EntityKind::Inf),
            Value::Number(n) if *n == f64::NEG_INFINITY => Some(EntityKind::NegInf),
            _ => None,
        }
    }
}

/// Row positions of the values JSON can't represent, per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLookup {
    #[serde(rename = "NaN", default, skip_serializing_if = "Vec::is_empty")]
    pub nan: Vec<usize>,
    #[serde(rename = "Undef", default, skip_serializing_if = "Vec::is_empty")]
    pub undef: Vec<usize>,
    #[serde(rename = "Inf", default, skip_serializing_if = "Vec::is_empty")]
    pub inf: Vec<usize>,
    #[serde(rename = "NegInf", default, skip_serializing_if = "Vec::is_empty")]
    pub neg_inf: Vec<usize>,
}

impl EntityLookup {
    pub fn indices(&self, kind: EntityKind) -> &[usize] {
        match kind {
            EntityKind::NaN => &self.nan,
            EntityKind::Undef => &self.undef,
            EntityKind::Inf => &self.inf,
            EntityKind::NegInf => &self.neg_inf,
        }
    }

    pub fn push(&mut self, kind: EntityKind, idx: usize) {
        match kind {
            EntityKind::NaN => self.nan.push(idx),
            EntityKind::Undef => self.undef.push(idx),
            EntityKind::Inf => self.inf.push(idx),
            EntityKind::NegInf => self.neg_inf.push(idx),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|&k| self.indices(k).is_empty())
    }

    /// All `(kind, row)` pairs, grouped by kind.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, usize)> + '_ {
        EntityKind::ALL
            .into_iter()
            .flat_map(move |k| self.indices(k).iter().map(move |&idx| (k, idx)))
    }
}

/// Writes the sentinel for every listed row back into `values`.
///
/// Kinds are applied in [`EntityKind::ALL`] order, so when two kinds list
/// the same row the later one wins (NegInf over Inf over Undef over NaN).
/// Indices past the end of the column are skipped. Returns the number of
/// values replaced.
pub fn decode_field_value_entities(lookup: &EntityLookup, values: &mut [Value]) -> usize {
    let mut replaced = 0;
    for (kind, idx) in lookup.iter() {
        match values.get_mut(idx) {
            Some(slot) => {
                *slot = kind.replacement();
                replaced += 1;
            }
            None => {
                tracing::debug!(?kind, idx, len = values.len(), "entity index out of range");
            }
        }
    }
    replaced
}

/// Inverse of [`decode_field_value_entities`]: records every sentinel in the
/// column and nulls its slot so the column is plain JSON.
pub fn encode_field_value_entities(values: &mut [Value]) -> Option<EntityLookup> {
    let mut lookup = EntityLookup::default();
    for (idx, slot) in values.iter_mut().enumerate() {
        if let Some(kind) = EntityKind::of(slot) {
            lookup.push(kind, idx);
            *slot = Value::Null;
        }
    }
    (!lookup.is_empty()).then_some(lookup)
}
