use jiff::{Span, Zoned};

use crate::error::{DateMathError, Result};
use crate::unit::DurationUnit;

/// Rounds `time` to the start (or, with `round_up`, the last millisecond) of
/// its fiscal year or fiscal quarter.
///
/// `fiscal_year_start_month` is 0-based (0 = January). Months at or after the
/// start month belong to the fiscal year beginning this calendar year, earlier
/// months to the one that began the year before. Quarters are 3-month blocks
/// counted from the start month and wrap across the calendar year.
pub fn round_to_fiscal(
    fiscal_year_start_month: u8,
    time: &Zoned,
    unit: DurationUnit,
    round_up: bool,
) -> Result<Zoned> {
    if fiscal_year_start_month > 11 {
        return Err(DateMathError::FiscalMonthOutOfRange(fiscal_year_start_month));
    }
    let period_months: i32 = match unit {
        DurationUnit::Year => 12,
        DurationUnit::Quarter => 3,
        other => return Err(DateMathError::FiscalUnit(other)),
    };

    let month0 = i32::from(time.month()) - 1;
    let back = (month0 - i32::from(fiscal_year_start_month)).rem_euclid(period_months);
    let start = time
        .with()
        .day(1)
        .build()?
        .checked_sub(Span::new().months(back))?
        .start_of_day()?;

    if !round_up {
        return Ok(start);
    }
    let next = start.checked_add(Span::new().months(period_months))?;
    Ok(next.checked_sub(Span::new().milliseconds(1))?)
}
