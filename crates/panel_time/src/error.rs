use thiserror::Error;

use crate::unit::DurationUnit;

#[derive(Debug, Error)]
pub enum DateMathError {
    #[error("empty expression")]
    Empty,
    #[error("cannot parse {0:?} as a date")]
    InvalidAnchor(String),
    #[error("unknown time zone {name:?}: {source}")]
    UnknownTimeZone { name: String, source: jiff::Error },
    #[error("unexpected operator {found:?} at {position}")]
    UnexpectedOperator { found: char, position: usize },
    #[error("missing amount at {position}")]
    MissingAmount { position: usize },
    #[error("amount must be positive at {position}")]
    ZeroAmount { position: usize },
    #[error("amount too large at {position}")]
    AmountTooLarge { position: usize },
    #[error("rounding only works on a single unit, got {0}")]
    InvalidRoundingAmount(String),
    #[error("unknown unit {0:?}")]
    UnknownUnit(Option<char>),
    #[error("fiscal rounding needs y or Q, got {0}")]
    FiscalUnit(DurationUnit),
    #[error("fiscal year start month must be 0-11, got {0}")]
    FiscalMonthOutOfRange(u8),
    #[error("date arithmetic failed: {0}")]
    Arithmetic(#[from] jiff::Error),
}

pub type Result<T> = std::result::Result<T, DateMathError>;
