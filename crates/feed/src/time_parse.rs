// ABOUTME: Date normalization for RSS <pubDate>/<lastBuildDate> values.
// ABOUTME: Tries the RFC 1123 named-zone layout, then the RFC 1123 numeric-offset layout.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc, Weekday};

use crate::error::DateParseError;

/// Layout of everything between the weekday and the zone: "02 Jan 2006 15:04:05".
const STAMP_LAYOUT: &str = "%d %b %Y %H:%M:%S";

/// Zone abbreviations with a well-known fixed offset (seconds east of UTC).
/// First match wins, so ambiguous names (CST, IST) resolve to the North American / Irish meaning.
const NAMED_ZONES: &[(&str, i32)] = &[
    ("UT", 0),
    ("UTC", 0),
    ("GMT", 0),
    ("Z", 0),
    ("EST", -5 * 3600),
    ("EDT", -4 * 3600),
    ("CST", -6 * 3600),
    ("CDT", -5 * 3600),
    ("MST", -7 * 3600),
    ("MDT", -6 * 3600),
    ("PST", -8 * 3600),
    ("PDT", -7 * 3600),
    ("AKST", -9 * 3600),
    ("AKDT", -8 * 3600),
    ("HST", -10 * 3600),
    ("AST", -4 * 3600),
    ("ADT", -3 * 3600),
    ("NST", -(3 * 3600 + 30 * 60)),
    ("NDT", -(2 * 3600 + 30 * 60)),
    ("WET", 0),
    ("WEST", 3600),
    ("BST", 3600),
    ("IST", 3600),
    ("CET", 3600),
    ("CEST", 2 * 3600),
    ("EET", 2 * 3600),
    ("EEST", 3 * 3600),
    ("MSK", 3 * 3600),
    ("JST", 9 * 3600),
    ("KST", 9 * 3600),
    ("AWST", 8 * 3600),
    ("AEST", 10 * 3600),
    ("AEDT", 11 * 3600),
    ("NZST", 12 * 3600),
    ("NZDT", 13 * 3600),
];

/// Parses a feed date into a UTC instant.
///
/// The input is trimmed first. "Mon, 02 Jan 2006 15:04:05 MST" is tried before
/// "Mon, 02 Jan 2006 15:04:05 -0700"; when neither layout fits, the untrimmed
/// input is returned inside the error.
pub fn parse_feed_date(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let s = raw.trim();

    parse_named_zone(s)
        .or_else(|| parse_numeric_zone(s))
        .ok_or_else(|| DateParseError {
            raw: raw.to_string(),
        })
}

/// RFC 1123: "Mon, 02 Jan 2006 15:04:05 MST".
///
/// Unrecognized alphabetic zones are taken as UTC.
fn parse_named_zone(s: &str) -> Option<DateTime<Utc>> {
    let (stamp, zone) = split_layout(s)?;
    if !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let offset_secs = NAMED_ZONES
        .iter()
        .find(|(name, _)| *name == zone)
        .map(|(_, secs)| *secs)
        .unwrap_or(0);

    localize(stamp, offset_secs)
}

/// RFC 1123Z: "Mon, 02 Jan 2006 15:04:05 -0700".
fn parse_numeric_zone(s: &str) -> Option<DateTime<Utc>> {
    let (stamp, zone) = split_layout(s)?;

    let (sign, digits) = if let Some(rest) = zone.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = zone.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    localize(stamp, sign * (hours * 3600 + minutes * 60))
}

/// Splits "Www, DD Mon YYYY HH:MM:SS ZONE" into the parsed local stamp and the raw zone.
fn split_layout(s: &str) -> Option<(NaiveDateTime, &str)> {
    let (weekday, rest) = s.split_once(',')?;
    // The weekday label is checked for shape only, never against the date.
    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return None;
    }

    let (stamp, zone) = rest.trim_start().rsplit_once(' ')?;
    if zone.is_empty() {
        return None;
    }

    let stamp = stamp.trim_end();
    if !has_fixed_widths(stamp) {
        return None;
    }

    let stamp = NaiveDateTime::parse_from_str(stamp, STAMP_LAYOUT).ok()?;
    Some((stamp, zone))
}

/// Two-digit day, three-letter month, four-digit year, and "HH:MM:SS" with seconds below 60.
/// chrono's numeric specifiers accept any width on their own.
fn has_fixed_widths(stamp: &str) -> bool {
    fn digits(s: &str, width: usize) -> bool {
        s.len() == width && s.bytes().all(|b| b.is_ascii_digit())
    }

    let fields: Vec<&str> = stamp.split(' ').collect();
    let [day, month, year, clock] = fields.as_slice() else {
        return false;
    };
    let clock: Vec<&str> = clock.split(':').collect();
    let [hour, minute, second] = clock.as_slice() else {
        return false;
    };

    digits(day, 2)
        && month.len() == 3
        && digits(year, 4)
        && digits(hour, 2)
        && digits(minute, 2)
        && digits(second, 2)
        && *second < "60"
}

fn localize(stamp: NaiveDateTime, offset_secs: i32) -> Option<DateTime<Utc>> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    let local = offset.from_local_datetime(&stamp).single()?;
    Some(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn named_and_numeric_zones_agree() {
        let named = parse_feed_date("Mon, 02 Jan 2006 15:04:05 MST").unwrap();
        let numeric = parse_feed_date("Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert_eq!(named, numeric);
        assert_eq!(named, utc(2006, 1, 2, 22, 4, 5));
    }

    #[test]
    fn gmt_is_utc() {
        let dt = parse_feed_date("Tue, 16 Jan 2024 11:00:00 GMT").unwrap();
        assert_eq!(dt, utc(2024, 1, 16, 11, 0, 0));
    }

    #[test]
    fn positive_offset() {
        let dt = parse_feed_date("Mon, 15 Jan 2024 10:00:00 +0530").unwrap();
        assert_eq!(dt, utc(2024, 1, 15, 4, 30, 0));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let dt = parse_feed_date("\n   Mon, 15 Jan 2024 10:00:00 +0000  \t").unwrap();
        assert_eq!(dt, utc(2024, 1, 15, 10, 0, 0));
    }

    #[test]
    fn unknown_zone_name_is_zero_offset() {
        let dt = parse_feed_date("Mon, 15 Jan 2024 10:00:00 XYZ").unwrap();
        assert_eq!(dt, utc(2024, 1, 15, 10, 0, 0));
    }

    #[test]
    fn weekday_is_not_cross_checked() {
        // 2 Jan 2006 was a Monday.
        let dt = parse_feed_date("Fri, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert_eq!(dt, utc(2006, 1, 2, 22, 4, 5));
    }

    #[test]
    fn rejects_other_layouts() {
        for raw in [
            "2023-06-15T14:30:00Z",
            "02 Jan 2006 15:04:05 -0700",
            "Mon, 02 Jan 2006 15:04:05",
            "Mon, 02 Jan 2006 15:04:05 -07:00",
            "Mon, 02 Jan 2006 15:04:05 -0760",
            "Xyz, 02 Jan 2006 15:04:05 GMT",
            "Mon, 32 Jan 2006 15:04:05 GMT",
            "Mon, 02 Jan 06 15:04:05 GMT",
            "Mon, 2 Jan 2006 15:04:05 MST",
            "Mon, 02 Jan 2006 15:04:60 GMT",
            "Mon, 02 Jan 2006 5:04:05 -0700",
            "Mon, 02 Jan 02006 15:04:05 GMT",
            "",
        ] {
            assert!(parse_feed_date(raw).is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn last_second_of_minute() {
        let dt = parse_feed_date("Mon, 02 Jan 2006 15:04:59 GMT").unwrap();
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 59));
    }

    #[test]
    fn error_carries_raw_text() {
        let err = parse_feed_date("  yesterday ").unwrap_err();
        assert_eq!(err.raw, "  yesterday ");
    }
}
