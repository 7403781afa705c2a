use std::collections::BTreeMap;

use panel_data_proto::FrameJson;
use serde::Deserialize;

use crate::codec::frame_from_json;
use crate::error::{FrameError, Result};
use crate::frame::Frame;

/// One entry of a backend query response, keyed by refId.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub frames: Option<Vec<FrameJson>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub results: BTreeMap<String, DataResponse>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub ref_id: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct QueryResponse {
    pub frames: Vec<Frame>,
    pub error: Option<QueryError>,
    pub state: LoadingState,
}

/// Flattens backend results into frames.
///
/// Results are visited in `ref_ids` order when given (unknown ids are
/// skipped), otherwise in key order. Frames without a refId take the one of
/// the result they came in. Only the first error is reported.
pub fn to_query_response(res: BackendResponse, ref_ids: Option<&[&str]>) -> Result<QueryResponse> {
    let mut results = res.results;
    let ordered: Vec<(String, DataResponse)> = match ref_ids {
        Some(ids) if !ids.is_empty() => ids
            .iter()
            .filter_map(|id| results.remove_entry(*id))
            .collect(),
        _ => results.into_iter().collect(),
    };

    let mut rsp = QueryResponse::default();
    for (ref_id, dr) in ordered {
        if let Some(message) = dr.error {
            if rsp.error.is_none() {
                tracing::debug!(%ref_id, %message, "query result carries an error");
                rsp.error = Some(QueryError {
                    ref_id: ref_id.clone(),
                    message,
                });
                rsp.state = LoadingState::Error;
            }
        }

        for js in dr.frames.unwrap_or_default() {
            let mut frame =
                frame_from_json(js).map_err(|e| FrameError::in_result(ref_id.as_str(), e))?;
            if frame.ref_id.is_none() {
                frame.ref_id = Some(ref_id.clone());
            }
            rsp.frames.push(frame);
        }
    }

    Ok(rsp)
}

impl QueryResponse {
    pub fn from_json_str(s: &str, ref_ids: Option<&[&str]>) -> Result<QueryResponse> {
        to_query_response(serde_json::from_str(s)?, ref_ids)
    }
}
