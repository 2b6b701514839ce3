//! Shared utility functions.

use crate::{ClaimError, ClockZone, Result, Timestamp};
use chrono::Local;
use std::time::Duration;

/// Formats a timestamp as a wall-clock `HH:MM:SS` in the given zone.
pub fn format_clock_time(timestamp: &Timestamp, zone: ClockZone) -> String {
    match zone {
        ClockZone::Local => timestamp.with_timezone(&Local).format("%H:%M:%S").to_string(),
        ClockZone::Named(tz) => timestamp.with_timezone(&tz).format("%H:%M:%S").to_string(),
    }
}

/// Keeps the first `max_chars` characters of `input`.
///
/// This is a plain prefix cut on character boundaries, no ellipsis and no
/// word awareness.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &input[..byte_index],
        None => input,
    }
}

/// Converts a configured number of seconds to a [`Duration`].
///
/// Negative and non-finite values mean "disabled" and map to zero.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::from_secs_f64(seconds)
    } else {
        Duration::ZERO
    }
}

/// Parses an optional IANA timezone name into a [`ClockZone`].
pub fn parse_clock_zone(name: Option<&str>) -> Result<ClockZone> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(ClockZone::Local),
        Some(name) => name
            .parse::<chrono_tz::Tz>()
            .map(ClockZone::Named)
            .map_err(|e| ClaimError::validation_field(format!("unknown timezone '{name}': {e}"), "display_timezone")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_clock_time() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 9, 5, 7).unwrap();
        let formatted = format_clock_time(&timestamp, ClockZone::Named(chrono_tz::UTC));
        assert_eq!(formatted, "09:05:07");

        let berlin = format_clock_time(&timestamp, ClockZone::Named(chrono_tz::Europe::Berlin));
        assert_eq!(berlin, "10:05:07");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("BravoTeamRocks", 10), "BravoTeamR");
        assert_eq!(truncate_chars("Alpha", 10), "Alpha");
        assert_eq!(truncate_chars("", 10), "");
        // multi-byte characters are never split
        assert_eq!(truncate_chars("ÄÖÜäöüßÄÖÜäöü", 10), "ÄÖÜäöüßÄÖÜ");
    }

    #[test]
    fn test_seconds_to_duration() {
        assert_eq!(seconds_to_duration(5.0), Duration::from_secs(5));
        assert_eq!(seconds_to_duration(0.5), Duration::from_millis(500));
        assert_eq!(seconds_to_duration(0.0), Duration::ZERO);
        assert_eq!(seconds_to_duration(-3.0), Duration::ZERO);
        assert_eq!(seconds_to_duration(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_parse_clock_zone() {
        assert_eq!(parse_clock_zone(None).unwrap(), ClockZone::Local);
        assert_eq!(parse_clock_zone(Some("  ")).unwrap(), ClockZone::Local);
        assert_eq!(
            parse_clock_zone(Some("Europe/Berlin")).unwrap(),
            ClockZone::Named(chrono_tz::Europe::Berlin)
        );
        assert!(parse_clock_zone(Some("Invalid/Timezone")).is_err());
    }
}
