use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("JSON needs a schema definition")]
    MissingSchema,
    #[error("JSON needs a fields definition")]
    MissingFields,
    #[error("invalid frame JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("result {ref_id}: {source}")]
    Result {
        ref_id: String,
        source: Box<FrameError>,
    },
}

impl FrameError {
    pub fn in_result(ref_id: impl Into<String>, source: FrameError) -> Self {
        FrameError::Result {
            ref_id: ref_id.into(),
            source: Box::new(source),
        }
    }

    /// True when the wire object lacked its mandatory schema or fields.
    pub fn is_schema_error(&self) -> bool {
        match self {
            FrameError::MissingSchema | FrameError::MissingFields => true,
            FrameError::Result { source, .. } => source.is_schema_error(),
            FrameError::Json(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
