//! Relative time expressions (`now-5m`, `now/d`, `2021-01-01||+1M/M`) for
//! dashboard time ranges.

mod datemath;
mod error;
mod fiscal;
mod range;
mod unit;
mod zone;

pub use datemath::{
    DateMathOptions, is_math_string, is_valid, parse, parse_date_math, parse_with, try_parse,
    try_parse_date_math,
};
pub use error::{DateMathError, Result};
pub use fiscal::round_to_fiscal;
pub use range::{RawTimeRange, TimeRange};
pub use unit::{DurationUnit, WeekStart};
pub use zone::resolve_time_zone;
