use jiff::tz::TimeZone;

use crate::error::{DateMathError, Result};

/// Maps a dashboard time-zone setting to a zone.
///
/// Empty or `browser` means the system zone, `utc` is UTC in any case, and
/// anything else must be an IANA name.
pub fn resolve_time_zone(name: Option<&str>) -> Result<TimeZone> {
    match name.map(str::trim) {
        None | Some("") | Some("browser") => Ok(TimeZone::system()),
        Some(n) if n.eq_ignore_ascii_case("utc") => Ok(TimeZone::UTC),
        Some(n) => TimeZone::get(n).map_err(|source| DateMathError::UnknownTimeZone {
            name: n.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_zones() {
        assert_eq!(resolve_time_zone(Some("UTC")).unwrap().iana_name(), Some("UTC"));
        assert_eq!(resolve_time_zone(Some("utc")).unwrap().iana_name(), Some("UTC"));
        let tz = resolve_time_zone(Some("Europe/Berlin")).unwrap();
        assert_eq!(tz.iana_name(), Some("Europe/Berlin"));
    }

    #[test]
    fn test_system_fallbacks() {
        assert!(resolve_time_zone(None).is_ok());
        assert!(resolve_time_zone(Some("browser")).is_ok());
        assert!(resolve_time_zone(Some(" ")).is_ok());
    }

    #[test]
    fn test_unknown_zone() {
        let err = resolve_time_zone(Some("Mars/Olympus_Mons")).unwrap_err();
        assert!(matches!(err, DateMathError::UnknownTimeZone { .. }));
    }
}
