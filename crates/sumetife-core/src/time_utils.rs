use chrono::{DateTime, FixedOffset, Utc};

// ── RFC 3339 parsing ──────────────────────────────────────────────────────────

/// Parse an RFC 3339 timestamp (offset required) into a UTC [`DateTime`].
///
/// Both the `Z` suffix and numeric offsets are accepted. Naive date-times
/// without an offset are rejected.
pub fn parse_rfc3339_utc(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// `clap` value parser for `--start-time` / `--end-time`.
///
/// Keeps the caller's offset so it can be echoed back in logs; range checks
/// convert to UTC before comparing.
pub fn parse_timestamp_arg(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s)
        .map_err(|e| format!("expected an RFC 3339 timestamp such as 2022-01-01T00:00:00Z ({})", e))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_utc_z_suffix() {
        let dt = parse_rfc3339_utc("2022-01-01T00:23:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 1, 1, 0, 23, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_utc_converts_offset() {
        let dt = parse_rfc3339_utc("2022-01-01T07:20:00+07:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 1, 1, 0, 20, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_utc_fractional_seconds() {
        let dt = parse_rfc3339_utc("2022-01-01T00:00:00.500Z").unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_rfc3339_utc_rejects_naive() {
        assert!(parse_rfc3339_utc("2022-01-01T00:23:00").is_err());
    }

    #[test]
    fn test_parse_rfc3339_utc_rejects_date_only() {
        assert!(parse_rfc3339_utc("2022-01-01").is_err());
    }

    #[test]
    fn test_parse_timestamp_arg_keeps_offset() {
        let dt = parse_timestamp_arg("2022-01-02T00:00:00+07:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_parse_timestamp_arg_error_message() {
        let err = parse_timestamp_arg("tomorrow").unwrap_err();
        assert!(err.contains("RFC 3339"));
    }
}
