#![forbid(unsafe_code)]

//! ISO-8601 video duration handling.
//!
//! The Data API encodes durations as `PT#H#M#S` with any subset of the three
//! units present, always in that order. Days and larger units never show up
//! for regular uploads, so anything outside `PT` is rejected.

use crate::error::YouTubeError;

const UNITS: [(char, u64); 3] = [('H', 3600), ('M', 60), ('S', 1)];

/// Parses a `PT#H#M#S` duration into total whole seconds.
///
/// Absent units contribute zero; a bare `PT` is zero seconds. Any non-numeric
/// component or leftover text after the unit markers is a hard error rather
/// than a silent zero.
pub fn parse_duration(raw: &str) -> Result<u64, YouTubeError> {
    let mut rest = raw
        .strip_prefix("PT")
        .ok_or_else(|| YouTubeError::MalformedDuration(raw.to_string()))?;

    let mut total = 0u64;
    for (marker, seconds_per_unit) in UNITS {
        if let Some((value, tail)) = rest.split_once(marker) {
            let count: u64 = value
                .parse()
                .map_err(|_| YouTubeError::MalformedDuration(raw.to_string()))?;
            total += count * seconds_per_unit;
            rest = tail;
        }
    }

    // Out-of-order units ("PT30S1H") or trailing junk leave text behind.
    if !rest.is_empty() {
        return Err(YouTubeError::MalformedDuration(raw.to_string()));
    }
    Ok(total)
}

/// Renders seconds as `M:SS` or `H:MM:SS` for display next to titles.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_partial_unit_sets() {
        assert_eq!(parse_duration("PT1H2M30S").unwrap(), 3750);
        assert_eq!(parse_duration("PT1H1M2S").unwrap(), 3662);
        assert_eq!(parse_duration("PT45S").unwrap(), 45);
        assert_eq!(parse_duration("PT2H").unwrap(), 7200);
        assert_eq!(parse_duration("PT10M").unwrap(), 600);
        assert_eq!(parse_duration("PT1H30S").unwrap(), 3630);
        assert_eq!(parse_duration("PT").unwrap(), 0);
    }

    #[test]
    fn totals_match_manual_component_sums() {
        for (hours, minutes, seconds) in [(0, 0, 7), (0, 59, 59), (3, 0, 1), (12, 34, 56)] {
            let encoded = format!("PT{hours}H{minutes}M{seconds}S");
            let expected = hours * 3600 + minutes * 60 + seconds;
            assert_eq!(parse_duration(&encoded).unwrap(), expected);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["1H2M", "PT1HM", "PTxS", "PT4X", "PT30S1H", "P1D", ""] {
            let err = parse_duration(bad).unwrap_err();
            assert!(
                matches!(err, YouTubeError::MalformedDuration(_)),
                "expected MalformedDuration for {bad:?}"
            );
        }
    }

    #[test]
    fn formats_for_display() {
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3725), "1:02:05");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(3600), "1:00:00");
    }
}
