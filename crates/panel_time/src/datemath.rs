use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use serde::{Deserialize, Serialize};

use crate::error::{DateMathError, Result};
use crate::fiscal::round_to_fiscal;
use crate::unit::{DurationUnit, WeekStart};
use crate::zone::resolve_time_zone;

const NOW: &str = "now";
const ANCHOR_SEPARATOR: &str = "||";
const MAX_AMOUNT_DIGITS: usize = 10;

/// Settings that shape how an expression resolves, as stored with a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateMathOptions {
    /// Round `/unit` steps up to the end of the unit instead of its start.
    pub round_up: bool,
    #[serde(rename = "timezone")]
    pub time_zone: Option<String>,
    /// 0-based, 0 = January.
    pub fiscal_year_start_month: u8,
    pub week_start: WeekStart,
}

impl DateMathOptions {
    pub fn round_up(mut self, round_up: bool) -> Self {
        self.round_up = round_up;
        self
    }

    pub fn time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = Some(tz.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Round,
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MathStep {
    op: Op,
    amount: i64,
    unit: DurationUnit,
    fiscal: bool,
}

/// Resolves `text` against the current time; `None` for anything malformed.
pub fn parse(text: &str, round_up: bool, time_zone: Option<&str>) -> Option<Zoned> {
    let mut options = DateMathOptions::default().round_up(round_up);
    options.time_zone = time_zone.map(str::to_string);
    parse_with(text, &options)
}

pub fn parse_with(text: &str, options: &DateMathOptions) -> Option<Zoned> {
    try_parse(text, options, Timestamp::now())
        .inspect_err(|e| tracing::debug!(text, error = %e, "rejected date math expression"))
        .ok()
}

/// Resolves `text` with `now` as the reference instant.
pub fn try_parse(text: &str, options: &DateMathOptions, now: Timestamp) -> Result<Zoned> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateMathError::Empty);
    }
    let tz = resolve_time_zone(options.time_zone.as_deref())?;

    let (anchor, math) = if let Some(rest) = text.strip_prefix(NOW) {
        (now.to_zoned(tz), rest)
    } else {
        let (anchor, math) = text.split_once(ANCHOR_SEPARATOR).unwrap_or((text, ""));
        (parse_anchor(anchor.trim(), tz)?, math)
    };

    try_parse_date_math(math, anchor, options)
}

/// Applies just the math part (`-1d/d` and so on) to `time`.
pub fn parse_date_math(
    math: &str,
    time: Zoned,
    round_up: bool,
    fiscal_year_start_month: u8,
) -> Option<Zoned> {
    let options = DateMathOptions {
        round_up,
        fiscal_year_start_month,
        ..Default::default()
    };
    try_parse_date_math(math, time, &options)
        .inspect_err(|e| tracing::debug!(math, error = %e, "rejected date math"))
        .ok()
}

pub fn try_parse_date_math(math: &str, time: Zoned, options: &DateMathOptions) -> Result<Zoned> {
    let steps = parse_steps(math)?;
    let mut time = time;
    for step in steps {
        time = apply_step(step, &time, options)?;
        tracing::trace!(?step, %time, "applied date math step");
    }
    Ok(time)
}

/// True when `text` is relative (`now...`) or anchored math (`...||...`).
pub fn is_math_string(text: &str) -> bool {
    text.starts_with(NOW) || text.contains(ANCHOR_SEPARATOR)
}

pub fn is_valid(text: &str) -> bool {
    try_parse(text, &DateMathOptions::default(), Timestamp::now()).is_ok()
}

fn parse_steps(math: &str) -> Result<Vec<MathStep>> {
    let chars: Vec<char> = math.chars().filter(|c| !c.is_whitespace()).collect();
    let mut steps = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let op = match chars[i] {
            '/' => Op::Round,
            '+' => Op::Add,
            '-' => Op::Subtract,
            found => {
                return Err(DateMathError::UnexpectedOperator { found, position: i });
            }
        };
        i += 1;

        let digits_from = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            if i - digits_from > MAX_AMOUNT_DIGITS {
                return Err(DateMathError::AmountTooLarge { position: digits_from });
            }
        }
        let digits: String = chars[digits_from..i].iter().collect();

        let amount = if digits.is_empty() {
            match op {
                Op::Round => 1,
                Op::Add | Op::Subtract => {
                    return Err(DateMathError::MissingAmount { position: digits_from });
                }
            }
        } else {
            digits
                .parse::<i64>()
                .map_err(|_| DateMathError::AmountTooLarge { position: digits_from })?
        };

        match op {
            // rounding only works on whole, single units (M or 1M, not 2M or 0.5M)
            Op::Round if amount != 1 => return Err(DateMathError::InvalidRoundingAmount(digits)),
            Op::Add | Op::Subtract if amount == 0 => {
                return Err(DateMathError::ZeroAmount { position: digits_from });
            }
            _ => {}
        }

        let mut unit_char = chars.get(i).copied();
        i += 1;
        let fiscal = unit_char == Some('f');
        if fiscal {
            unit_char = chars.get(i).copied();
            i += 1;
        }
        let unit = unit_char
            .and_then(DurationUnit::from_char)
            .ok_or(DateMathError::UnknownUnit(unit_char))?;
        if fiscal && op == Op::Round && !matches!(unit, DurationUnit::Year | DurationUnit::Quarter) {
            return Err(DateMathError::FiscalUnit(unit));
        }

        steps.push(MathStep {
            op,
            amount,
            unit,
            fiscal,
        });
    }

    Ok(steps)
}

fn apply_step(step: MathStep, time: &Zoned, options: &DateMathOptions) -> Result<Zoned> {
    let MathStep {
        op,
        amount,
        unit,
        fiscal,
    } = step;
    match op {
        Op::Add => Ok(time.checked_add(unit.span(amount)?)?),
        Op::Subtract => Ok(time.checked_sub(unit.span(amount)?)?),
        Op::Round if fiscal => {
            round_to_fiscal(options.fiscal_year_start_month, time, unit, options.round_up)
        }
        Op::Round if options.round_up => unit.end_of(time, options.week_start),
        Op::Round => unit.start_of(time, options.week_start),
    }
}

/// Absolute anchors: a basic `YYYYMMDD` date, epoch milliseconds, an RFC 3339
/// timestamp, or a civil date/datetime read in `tz`.
fn parse_anchor(anchor: &str, tz: TimeZone) -> Result<Zoned> {
    let invalid = || DateMathError::InvalidAnchor(anchor.to_string());
    if anchor.is_empty() {
        return Err(invalid());
    }

    if anchor.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(d) = compact_date(anchor) {
            return Ok(d.to_zoned(tz)?);
        }
        let ms: i64 = anchor.parse().map_err(|_| invalid())?;
        let ts = Timestamp::from_millisecond(ms).map_err(|_| invalid())?;
        return Ok(ts.to_zoned(tz));
    }
    if let Ok(ts) = anchor.parse::<Timestamp>() {
        return Ok(ts.to_zoned(tz));
    }
    if let Ok(dt) = anchor.parse::<DateTime>() {
        return Ok(dt.to_zoned(tz)?);
    }
    if let Ok(d) = anchor.parse::<Date>() {
        return Ok(d.to_zoned(tz)?);
    }
    Err(invalid())
}

/// ISO 8601 basic date, `YYYYMMDD`. Other digit strings are epoch millis.
fn compact_date(digits: &str) -> Option<Date> {
    if digits.len() != 8 {
        return None;
    }
    let year: i16 = digits[..4].parse().ok()?;
    let month: i8 = digits[4..6].parse().ok()?;
    let day: i8 = digits[6..].parse().ok()?;
    Date::new(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Span;
    use jiff::civil::date;

    const SPANS: [char; 7] = ['s', 'm', 'h', 'd', 'w', 'M', 'y'];

    fn anchor_ts() -> Timestamp {
        "2014-01-01T06:06:06.666Z".parse().unwrap()
    }

    fn utc() -> DateMathOptions {
        DateMathOptions::default().time_zone("utc")
    }

    fn at(text: &str, options: &DateMathOptions) -> Result<Zoned> {
        try_parse(text, options, anchor_ts())
    }

    fn now_utc() -> Zoned {
        anchor_ts().to_zoned(TimeZone::UTC)
    }

    fn unit(c: char) -> DurationUnit {
        DurationUnit::from_char(c).unwrap()
    }

    // ---- Errors ----

    #[test]
    fn test_empty_string() {
        assert!(parse("", false, None).is_none());
        assert!(matches!(at("  ", &utc()), Err(DateMathError::Empty)));
    }

    #[test]
    fn test_unknown_operator() {
        assert!(parse("now&1d", false, None).is_none());
        assert!(matches!(
            at("now&1d", &utc()),
            Err(DateMathError::UnexpectedOperator { found: '&', position: 0 })
        ));
    }

    #[test]
    fn test_unknown_unit() {
        assert!(parse("now+5f", false, None).is_none());
        assert!(matches!(at("now+5x", &utc()), Err(DateMathError::UnknownUnit(Some('x')))));
    }

    #[test]
    fn test_rounding_amount_must_be_one() {
        assert!(parse("now/2y", false, None).is_none());
        assert!(parse("now/0.5y", false, None).is_none());
        assert!(matches!(
            at("now/2y", &utc()),
            Err(DateMathError::InvalidRoundingAmount(ref d)) if d == "2"
        ));
        assert!(at("now/1y", &utc()).is_ok());
    }

    #[test]
    fn test_zero_amount_does_not_loop() {
        assert!(parse("now-0", false, None).is_none());
        assert!(parse("now-00", false, None).is_none());
        assert!(matches!(at("now-0d", &utc()), Err(DateMathError::ZeroAmount { .. })));
    }

    #[test]
    fn test_missing_amount_or_unit() {
        assert!(matches!(at("now-d", &utc()), Err(DateMathError::MissingAmount { .. })));
        assert!(matches!(at("now-5", &utc()), Err(DateMathError::UnknownUnit(None))));
        assert!(matches!(at("now-", &utc()), Err(DateMathError::MissingAmount { .. })));
    }

    #[test]
    fn test_huge_amount() {
        assert!(matches!(
            at("now-12345678901d", &utc()),
            Err(DateMathError::AmountTooLarge { .. })
        ));
        assert!(matches!(at("now+9999999999y", &utc()), Err(DateMathError::Arithmetic(_))));
    }

    #[test]
    fn test_bad_anchor() {
        assert!(matches!(at("asd", &utc()), Err(DateMathError::InvalidAnchor(_))));
        assert!(matches!(at("||-1d", &utc()), Err(DateMathError::InvalidAnchor(_))));
        assert!(matches!(at("yesterday||-1d", &utc()), Err(DateMathError::InvalidAnchor(_))));
        assert!(!is_valid("asd"));
    }

    #[test]
    fn test_unknown_zone() {
        let options = DateMathOptions::default().time_zone("Nowhere/Special");
        assert!(matches!(at("now", &options), Err(DateMathError::UnknownTimeZone { .. })));
    }

    // ---- Subtraction ----

    #[test]
    fn test_subtract_from_now() {
        for c in SPANS {
            let got = at(&format!("now-5{c}"), &utc()).unwrap();
            let want = now_utc().checked_sub(unit(c).span(5).unwrap()).unwrap();
            assert_eq!(got.timestamp(), want.timestamp(), "now-5{c}");
        }
    }

    #[test]
    fn test_subtract_from_anchor() {
        let options = DateMathOptions::default().time_zone("Europe/Berlin");
        let anchored = anchor_ts().to_zoned(TimeZone::get("Europe/Berlin").unwrap());
        for c in SPANS {
            let got = at(&format!("2014-01-01T06:06:06.666Z||-5{c}"), &options).unwrap();
            let want = anchored.checked_sub(unit(c).span(5).unwrap()).unwrap();
            assert_eq!(got.timestamp(), want.timestamp(), "||-5{c}");
        }
    }

    // ---- Rounding ----

    #[test]
    fn test_round_down_and_up() {
        for c in SPANS {
            let start = at(&format!("now/{c}"), &utc()).unwrap();
            let end = at(&format!("now/{c}"), &utc().round_up(true)).unwrap();
            let u = unit(c);
            assert_eq!(start, u.start_of(&now_utc(), WeekStart::Sunday).unwrap(), "now/{c}");
            assert_eq!(end, u.end_of(&now_utc(), WeekStart::Sunday).unwrap(), "now/{c} up");
        }
    }

    #[test]
    fn test_round_day_fixed_clock() {
        let start = at("now/d", &utc()).unwrap();
        assert_eq!(start.timestamp(), "2014-01-01T00:00:00Z".parse::<Timestamp>().unwrap());
        let end = at("now/d", &utc().round_up(true)).unwrap();
        assert_eq!(end.timestamp(), "2014-01-01T23:59:59.999Z".parse::<Timestamp>().unwrap());
    }

    #[test]
    fn test_round_day_respects_zone() {
        // 06:06 UTC is still Dec 31 in Los Angeles
        let options = DateMathOptions::default().time_zone("America/Los_Angeles");
        let start = at("now/d", &options).unwrap();
        assert_eq!(start.timestamp(), "2013-12-31T08:00:00Z".parse::<Timestamp>().unwrap());
    }

    #[test]
    fn test_now_day_utc_real_clock() {
        let start = parse("now/d", false, Some("utc")).unwrap();
        let today = Timestamp::now().to_zoned(TimeZone::UTC).date();
        let want = today.to_zoned(TimeZone::UTC).unwrap();
        // tolerate a midnight rollover between the two clock reads
        assert!(start == want || start == want.checked_sub(Span::new().days(1)).unwrap());
        assert_eq!(start.time_zone().iana_name(), Some("UTC"));
    }

    #[test]
    fn test_now_day_host_zone() {
        let start = parse("now/d", false, None).unwrap();
        let want = Zoned::now().start_of_day().unwrap();
        // tolerate a midnight rollover between the two clock reads
        assert!(start == want || start == want.checked_sub(Span::new().days(1)).unwrap());
        assert_eq!(start.time_zone().iana_name(), TimeZone::system().iana_name());
    }

    #[test]
    fn test_fiscal_rounding_in_expression() {
        let options = DateMathOptions {
            fiscal_year_start_month: 1,
            ..utc()
        };
        let start = at("now/fy", &options).unwrap();
        assert_eq!(start.timestamp(), "2013-02-01T00:00:00Z".parse::<Timestamp>().unwrap());

        let end = at("now/fQ", &options.clone().round_up(true)).unwrap();
        assert_eq!(end.timestamp(), "2014-01-31T23:59:59.999Z".parse::<Timestamp>().unwrap());

        assert!(matches!(at("now/fd", &options), Err(DateMathError::FiscalUnit(_))));
        // +/- ignore the fiscal marker
        assert_eq!(at("now-1fy", &options).unwrap(), at("now-1y", &options).unwrap());
    }

    // ---- Anchors and chains ----

    #[test]
    fn test_plain_now_and_anchor() {
        assert_eq!(at("now", &utc()).unwrap(), now_utc());
        assert_eq!(at("2014-01-01T06:06:06.666Z", &utc()).unwrap(), now_utc());
        assert_eq!(at("1388556366666", &utc()).unwrap(), now_utc());
        assert_eq!(at("1388556366666||", &utc()).unwrap(), now_utc());
    }

    #[test]
    fn test_civil_anchor_uses_zone() {
        let options = DateMathOptions::default().time_zone("Europe/Berlin");
        let got = at("2014-01-01 06:00:00||+1h", &options).unwrap();
        assert_eq!(got.timestamp(), "2014-01-01T06:00:00Z".parse::<Timestamp>().unwrap());

        let got = at("2014-01-01||/M", &options.round_up(true)).unwrap();
        assert_eq!(got.timestamp(), "2014-01-31T22:59:59.999Z".parse::<Timestamp>().unwrap());
    }

    #[test]
    fn test_compact_date_anchor() {
        let got = at("20140101||-1d", &utc()).unwrap();
        assert_eq!(got.timestamp(), "2013-12-31T00:00:00Z".parse::<Timestamp>().unwrap());
        // not a calendar date, so still epoch millis
        let got = at("20141301", &utc()).unwrap();
        assert_eq!(got.timestamp(), Timestamp::from_millisecond(20_141_301).unwrap());
    }

    #[test]
    fn test_chained_math() {
        let got = at("now-1d/d+6h", &utc()).unwrap();
        assert_eq!(got.timestamp(), "2013-12-31T06:00:00Z".parse::<Timestamp>().unwrap());
        let got = at(" now - 1M / M ", &utc()).unwrap();
        assert_eq!(got.timestamp(), "2013-12-01T00:00:00Z".parse::<Timestamp>().unwrap());
    }

    #[test]
    fn test_parse_date_math() {
        let base = date(2014, 2, 5).to_zoned(TimeZone::UTC).unwrap();
        let want = |d: i8, h: i8| date(2014, 2, d).at(h, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();

        assert_eq!(parse_date_math("-2d", base.clone(), false, 0), Some(want(3, 0)));
        assert_eq!(parse_date_math("-2d-6h", base.clone(), false, 0), Some(want(2, 18)));
        assert_eq!(parse_date_math(" - 2d", base.clone(), false, 0), Some(want(3, 0)));
        assert_eq!(parse_date_math("2", base.clone(), false, 0), None);
        assert_eq!(parse_date_math("", base.clone(), false, 0), Some(base));
    }

    #[test]
    fn test_math_string_and_valid() {
        assert!(is_math_string("now-1h"));
        assert!(is_math_string("2014-01-01||+1d"));
        assert!(!is_math_string("2014-01-01"));
        assert!(is_valid("now-1h"));
        assert!(is_valid("2014-01-01"));
    }

    #[test]
    fn test_options_from_dashboard_json() {
        let options: DateMathOptions = serde_json::from_str(
            r#"{"timezone": "utc", "fiscalYearStartMonth": 3, "weekStart": "monday"}"#,
        )
        .unwrap();
        assert_eq!(options.time_zone.as_deref(), Some("utc"));
        assert_eq!(options.fiscal_year_start_month, 3);
        assert_eq!(options.week_start, WeekStart::Monday);
        assert!(!options.round_up);
    }
}
