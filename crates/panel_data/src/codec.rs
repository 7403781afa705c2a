use panel_data_core::Value;
use panel_data_proto::{
    FieldSchema, FrameData, FrameJson, FrameSchema, decode_field_value_entities,
    encode_field_value_entities,
};

use crate::error::{FrameError, Result};
use crate::frame::{Field, Frame};
use crate::guess::guess_field_type;

/// Decodes a wire frame, taking ownership of its column buffers.
///
/// Short columns are padded with `Undefined` up to the longest column, and
/// entity lookups are applied in place. Only a missing schema or field list
/// is an error; everything else is normalized.
pub fn frame_from_json(dto: FrameJson) -> Result<Frame> {
    let FrameJson { schema, data } = dto;
    let FrameSchema {
        ref_id,
        meta,
        name,
        fields,
    } = schema.ok_or(FrameError::MissingSchema)?;
    let fields = fields.ok_or(FrameError::MissingFields)?;

    let (columns, entities) = match data {
        Some(data) => {
            if data.has_compaction() {
                tracing::debug!("ignoring bases/factors/enums compaction hints");
            }
            (data.values, data.entities.unwrap_or_default())
        }
        None => (Vec::new(), Vec::new()),
    };

    // Find the longest field length
    let length = columns.iter().map(Vec::len).max().unwrap_or(0);
    if columns.len() > fields.len() {
        tracing::debug!(
            columns = columns.len(),
            fields = fields.len(),
            "dropping columns without a schema field"
        );
    }

    let mut columns = columns.into_iter();
    let mut entities = entities.into_iter();

    let fields = fields
        .into_iter()
        .map(|schema_field| {
            let mut values = columns.next().unwrap_or_default();
            if values.len() != length {
                values.resize(length, Value::Undefined);
            }

            let lookup = entities.next().flatten().unwrap_or_default();
            if !lookup.is_empty() {
                let replaced = decode_field_value_entities(&lookup, &mut values);
                tracing::trace!(field = %schema_field.name, replaced, "decoded entities");
            }

            let FieldSchema {
                name,
                field_type,
                config,
                labels,
            } = schema_field;
            let field_type = field_type.unwrap_or_else(|| guess_field_type(&name, &values));

            Field {
                name,
                field_type,
                config: config.unwrap_or_default(),
                values,
                labels,
                entities: lookup,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(fields = fields.len(), length, "decoded frame");

    Ok(Frame {
        name,
        ref_id,
        meta,
        fields,
        length,
    })
}

/// Splits a frame into schema and columnar data.
///
/// Values JSON can't hold (NaN, +/-Inf, undefined) are written as `null` and
/// listed in `entities`, which is left out entirely when no column needs it.
pub fn frame_to_json(frame: &Frame) -> FrameJson {
    let mut values = Vec::with_capacity(frame.fields.len());
    let mut entities = Vec::with_capacity(frame.fields.len());

    let fields = frame
        .fields
        .iter()
        .map(|f| {
            let mut column = f.values.clone();
            entities.push(encode_field_value_entities(&mut column));
            values.push(column);
            FieldSchema {
                name: f.name.clone(),
                field_type: Some(f.field_type),
                config: Some(f.config.clone()),
                labels: f.labels.clone(),
            }
        })
        .collect();

    let entities = entities.iter().any(Option::is_some).then_some(entities);

    FrameJson {
        schema: Some(FrameSchema {
            ref_id: frame.ref_id.clone(),
            meta: frame.meta.clone(),
            name: frame.name.clone(),
            fields: Some(fields),
        }),
        data: Some(FrameData {
            values,
            entities,
            ..Default::default()
        }),
    }
}

impl Frame {
    pub fn from_json(dto: FrameJson) -> Result<Frame> {
        frame_from_json(dto)
    }

    pub fn from_json_str(s: &str) -> Result<Frame> {
        frame_from_json(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> FrameJson {
        frame_to_json(self)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&frame_to_json(self))?)
    }
}
