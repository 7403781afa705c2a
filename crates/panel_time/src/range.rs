use jiff::{Timestamp, Zoned};
use serde::{Deserialize, Serialize};

use crate::datemath::{DateMathOptions, try_parse};
use crate::error::Result;

/// A time range as typed by the user, e.g. `now-6h` to `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimeRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeRange {
    pub from: Zoned,
    pub to: Zoned,
    pub raw: RawTimeRange,
}

impl RawTimeRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        RawTimeRange {
            from: from.into(),
            to: to.into(),
        }
    }

    /// `from` rounds down and `to` rounds up, so `now/d` to `now/d` covers
    /// the whole day. `options.round_up` is ignored.
    pub fn try_resolve(&self, options: &DateMathOptions, now: Timestamp) -> Result<TimeRange> {
        let from = try_parse(&self.from, &options.clone().round_up(false), now)?;
        let to = try_parse(&self.to, &options.clone().round_up(true), now)?;
        Ok(TimeRange {
            from,
            to,
            raw: self.clone(),
        })
    }

    pub fn resolve(&self, options: &DateMathOptions) -> Option<TimeRange> {
        self.try_resolve(options, Timestamp::now())
            .inspect_err(|e| {
                tracing::debug!(from = %self.from, to = %self.to, error = %e, "rejected time range")
            })
            .ok()
    }
}

impl TimeRange {
    pub fn is_relative(&self) -> bool {
        crate::datemath::is_math_string(&self.raw.from) || crate::datemath::is_math_string(&self.raw.to)
    }

    pub fn duration(&self) -> jiff::SignedDuration {
        self.to.timestamp().duration_since(self.from.timestamp())
    }
}
