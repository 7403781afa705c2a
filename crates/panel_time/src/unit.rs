use std::fmt;

use jiff::{Span, Zoned};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 8] = [
        DurationUnit::Second,
        DurationUnit::Minute,
        DurationUnit::Hour,
        DurationUnit::Day,
        DurationUnit::Week,
        DurationUnit::Month,
        DurationUnit::Quarter,
        DurationUnit::Year,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(DurationUnit::Second),
            'm' => Some(DurationUnit::Minute),
            'h' => Some(DurationUnit::Hour),
            'd' => Some(DurationUnit::Day),
            'w' => Some(DurationUnit::Week),
            'M' => Some(DurationUnit::Month),
            'Q' => Some(DurationUnit::Quarter),
            'y' => Some(DurationUnit::Year),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            DurationUnit::Second => 's',
            DurationUnit::Minute => 'm',
            DurationUnit::Hour => 'h',
            DurationUnit::Day => 'd',
            DurationUnit::Week => 'w',
            DurationUnit::Month => 'M',
            DurationUnit::Quarter => 'Q',
            DurationUnit::Year => 'y',
        }
    }

    /// `amount` of this unit as a calendar span.
    pub fn span(self, amount: i64) -> Result<Span> {
        let span = Span::new();
        let span = match self {
            DurationUnit::Second => span.try_seconds(amount)?,
            DurationUnit::Minute => span.try_minutes(amount)?,
            DurationUnit::Hour => span.try_hours(amount)?,
            DurationUnit::Day => span.try_days(amount)?,
            DurationUnit::Week => span.try_weeks(amount)?,
            DurationUnit::Month => span.try_months(amount)?,
            DurationUnit::Quarter => span.try_months(amount.saturating_mul(3))?,
            DurationUnit::Year => span.try_years(amount)?,
        };
        Ok(span)
    }

    /// First instant of the unit containing `time`.
    pub fn start_of(self, time: &Zoned, week_start: WeekStart) -> Result<Zoned> {
        let start = match self {
            DurationUnit::Second => time.with().subsec_nanosecond(0).build()?,
            DurationUnit::Minute => time.with().second(0).subsec_nanosecond(0).build()?,
            DurationUnit::Hour => time
                .with()
                .minute(0)
                .second(0)
                .subsec_nanosecond(0)
                .build()?,
            DurationUnit::Day => time.start_of_day()?,
            DurationUnit::Week => {
                let back = (time.weekday().to_sunday_zero_offset()
                    - week_start.to_weekday().to_sunday_zero_offset())
                .rem_euclid(7);
                time.checked_sub(Span::new().days(back))?.start_of_day()?
            }
            DurationUnit::Month => time.with().day(1).build()?.start_of_day()?,
            DurationUnit::Quarter => {
                let month = (time.month() - 1) / 3 * 3 + 1;
                time.with().month(month).day(1).build()?.start_of_day()?
            }
            DurationUnit::Year => time.with().month(1).day(1).build()?.start_of_day()?,
        };
        Ok(start)
    }

    /// Last millisecond of the unit containing `time`.
    pub fn end_of(self, time: &Zoned, week_start: WeekStart) -> Result<Zoned> {
        let next = self.start_of(time, week_start)?.checked_add(self.span(1)?)?;
        Ok(next.checked_sub(Span::new().milliseconds(1))?)
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// First day of the week used when rounding to `w`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Saturday,
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn to_weekday(self) -> jiff::civil::Weekday {
        match self {
            WeekStart::Saturday => jiff::civil::Weekday::Saturday,
            WeekStart::Sunday => jiff::civil::Weekday::Sunday,
            WeekStart::Monday => jiff::civil::Weekday::Monday,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "saturday" => Some(WeekStart::Saturday),
            "sunday" => Some(WeekStart::Sunday),
            "monday" => Some(WeekStart::Monday),
            _ => None,
        }
    }
}
