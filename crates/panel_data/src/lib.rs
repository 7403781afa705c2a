mod codec;
mod compare;
mod error;
mod frame;
mod guess;
mod response;

pub use codec::{frame_from_json, frame_to_json};
pub use compare::{compare_array_values, compare_frame_structures, shallow_compare};
pub use error::{FrameError, Result};
pub use frame::{Field, Frame};
pub use guess::{guess_field_type, guess_field_type_from_name_and_value, guess_field_type_from_value};
pub use response::{
    BackendResponse, DataResponse, LoadingState, QueryError, QueryResponse, to_query_response,
};

pub use panel_data_core::{FieldConfig, FieldType, Labels, Value};
pub use panel_data_proto::{
    EntityKind, EntityLookup, FieldSchema, FrameData, FrameJson, FrameSchema,
};
