//! Conversions between weekday/time-of-day pairs, local wall-clock values
//! and absolute UTC instants.
//!
//! Every function is generic over [`chrono::TimeZone`]. The UTC offset is
//! always looked up for the date being converted, never for "now", so results
//! stay correct across daylight-saving transitions.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDateTime, NaiveTime, Offset,
    SecondsFormat, TimeZone, Timelike, Utc,
};

use crate::{
    errors::{BookingError, BookingResult},
    models::schedule::DayOfWeek,
};

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];
const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an `HH:MM` (or `HH:MM:SS`) time of day. Seconds are discarded.
pub fn parse_time_of_day(value: &str) -> BookingResult<NaiveTime> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .and_then(|time| NaiveTime::from_hms_opt(time.hour(), time.minute(), 0))
        .ok_or_else(|| BookingError::InvalidTimeFormat(value.to_string()))
}

/// Formats a time of day as `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Finds the first date on or after `reference`'s local date that falls on
/// `day`, and combines it with `time` (seconds and sub-seconds zeroed).
///
/// When `reference` already falls on `day` the reference date itself is used.
pub fn next_occurrence<Tz: TimeZone>(
    day: DayOfWeek,
    time: NaiveTime,
    reference: &DateTime<Tz>,
) -> NaiveDateTime {
    let today = reference.date_naive();
    let current = today.weekday().num_days_from_monday();
    let offset = (day.index() + 7 - current) % 7;
    let date = today + Duration::days(i64::from(offset));

    let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
    date.and_time(time)
}

/// Converts a wall-clock value in `zone` to the UTC instant it denotes.
///
/// Ambiguous values (clocks turned back) resolve to the earlier instant.
/// Values skipped by a forward transition are interpreted with the offset in
/// effect just before the transition, which lands them after the gap.
pub fn to_absolute_instant<Tz: TimeZone>(
    local: NaiveDateTime,
    zone: &Tz,
) -> BookingResult<DateTime<Utc>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(instant) => Ok(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = local - Duration::days(1);
            let offset = zone
                .from_local_datetime(&before)
                .earliest()
                .map(|instant| instant.offset().fix())
                .ok_or_else(|| {
                    BookingError::Validation(format!(
                        "Local time {} does not exist in the clinic time zone",
                        local
                    ))
                })?;

            let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
            Ok(Utc.from_utc_datetime(&utc))
        }
    }
}

/// Inverse of [`to_absolute_instant`]: the wall-clock value of `instant` in `zone`.
pub fn to_local_datetime<Tz: TimeZone>(instant: &DateTime<Utc>, zone: &Tz) -> NaiveDateTime {
    instant.with_timezone(zone).naive_local()
}

/// Milliseconds since the Unix epoch, truncated to whole seconds.
///
/// Booking timestamps can pick up sub-second noise when they round-trip
/// through serialization, so instants are compared on this value.
pub fn normalize_to_millisecond_epoch(instant: &DateTime<Utc>) -> i64 {
    instant.timestamp() * 1000
}

/// Parses a booking timestamp from the backend.
///
/// RFC 3339 values carry their own offset. Offset-less ISO local date-times
/// are read as wall-clock time in `zone`.
pub fn parse_booked_instant<Tz: TimeZone>(value: &str, zone: &Tz) -> BookingResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    let local = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| BookingError::InvalidTimestamp(value.to_string()))?;

    to_absolute_instant(local, zone)
}

/// ISO-8601 UTC representation with millisecond precision and a `Z` suffix.
pub fn to_iso_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for `HH:MM` times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time_of_day(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter writing instants in the [`to_iso_instant`] form.
pub mod iso_instant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso_instant(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_booked_instant(&raw, &Utc).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::{America::New_York, Australia::Sydney};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn t(value: &str) -> NaiveTime {
        parse_time_of_day(value).unwrap()
    }

    fn local(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[rstest]
    #[case("09:00", 9, 0)]
    #[case("17:45", 17, 45)]
    #[case(" 08:30 ", 8, 30)]
    #[case("09:15:42", 9, 15)]
    fn test_parse_time_of_day(#[case] input: &str, #[case] hour: u32, #[case] minute: u32) {
        let parsed = parse_time_of_day(input).unwrap();
        assert_eq!(parsed, NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("9am")]
    #[case("25:00")]
    #[case("12:60")]
    #[case("noon")]
    fn test_parse_time_of_day_rejects_malformed(#[case] input: &str) {
        let err = parse_time_of_day(input).unwrap_err();
        assert!(matches!(err, BookingError::InvalidTimeFormat(ref raw) if raw == input));
    }

    #[test]
    fn test_format_time_of_day_pads() {
        assert_eq!(format_time_of_day(t("07:05")), "07:05");
    }

    #[test]
    fn test_next_occurrence_same_weekday_uses_reference_date() {
        // 2026-10-19 is a Monday.
        let reference = Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap();
        let occurrence = next_occurrence(DayOfWeek::Monday, t("09:30"), &reference);
        assert_eq!(occurrence, local("2026-10-19T09:30"));
    }

    #[test]
    fn test_next_occurrence_same_weekday_even_after_slot_time() {
        let reference = Utc.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap();
        let occurrence = next_occurrence(DayOfWeek::Monday, t("09:30"), &reference);
        assert_eq!(occurrence, local("2026-10-19T09:30"));
    }

    #[rstest]
    #[case(DayOfWeek::Tuesday, "2026-10-20T10:00")]
    #[case(DayOfWeek::Sunday, "2026-10-25T10:00")]
    #[case(DayOfWeek::Friday, "2026-10-23T10:00")]
    fn test_next_occurrence_later_weekday(#[case] day: DayOfWeek, #[case] expected: &str) {
        let reference = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(next_occurrence(day, t("10:00"), &reference), local(expected));
    }

    #[test]
    fn test_next_occurrence_wraps_into_next_week() {
        // Saturday reference, Monday target.
        let reference = Utc.with_ymd_and_hms(2026, 10, 24, 12, 0, 0).unwrap();
        let occurrence = next_occurrence(DayOfWeek::Monday, t("09:00"), &reference);
        assert_eq!(occurrence, local("2026-10-26T09:00"));
    }

    #[test]
    fn test_next_occurrence_uses_reference_local_date() {
        // 2026-10-19T23:30 UTC is already Tuesday in Sydney.
        let reference = Utc
            .with_ymd_and_hms(2026, 10, 19, 23, 30, 0)
            .unwrap()
            .with_timezone(&Sydney);
        let occurrence = next_occurrence(DayOfWeek::Tuesday, t("09:00"), &reference);
        assert_eq!(occurrence, local("2026-10-20T09:00"));
    }

    #[test]
    fn test_to_absolute_instant_fixed_offset() {
        let zone = FixedOffset::east_opt(10 * 3600).unwrap();
        let instant = to_absolute_instant(local("2026-10-19T09:30"), &zone).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap());
    }

    #[test]
    fn test_to_absolute_instant_uses_offset_of_target_date() {
        // New York is UTC-4 before 2026-11-01 and UTC-5 after.
        let before = to_absolute_instant(local("2026-10-30T09:00"), &New_York).unwrap();
        let after = to_absolute_instant(local("2026-11-02T09:00"), &New_York).unwrap();

        assert_eq!(before, Utc.with_ymd_and_hms(2026, 10, 30, 13, 0, 0).unwrap());
        assert_eq!(after, Utc.with_ymd_and_hms(2026, 11, 2, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_to_absolute_instant_ambiguous_picks_earliest() {
        // 01:30 happens twice in New York on 2026-11-01.
        let instant = to_absolute_instant(local("2026-11-01T01:30"), &New_York).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_to_absolute_instant_skipped_time_moves_forward() {
        // 02:30 does not exist in New York on 2026-03-08; read with the EST offset.
        let instant = to_absolute_instant(local("2026-03-08T02:30"), &New_York).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap());
        assert_eq!(to_local_datetime(&instant, &New_York), local("2026-03-08T03:30"));
    }

    #[rstest]
    #[case("2026-10-19T09:30", 0)]
    #[case("2026-10-19T09:30", 5 * 3600 + 30 * 60)]
    #[case("2026-12-31T23:45", -8 * 3600)]
    #[case("2026-02-28T00:00", 14 * 3600)]
    fn test_round_trip_fixed_offsets(#[case] value: &str, #[case] offset_seconds: i32) {
        let zone = FixedOffset::east_opt(offset_seconds).unwrap();
        let original = local(value);
        let instant = to_absolute_instant(original, &zone).unwrap();
        assert_eq!(to_local_datetime(&instant, &zone), original);
    }

    #[rstest]
    #[case("2026-07-01T09:00")]
    #[case("2026-01-15T16:30")]
    #[case("2026-11-01T03:00")]
    fn test_round_trip_named_zone(#[case] value: &str) {
        let original = local(value);
        let instant = to_absolute_instant(original, &New_York).unwrap();
        assert_eq!(to_local_datetime(&instant, &New_York), original);
    }

    #[test]
    fn test_normalize_drops_sub_second_noise() {
        let clean = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let noisy = clean + Duration::milliseconds(437);

        assert_eq!(normalize_to_millisecond_epoch(&noisy), normalize_to_millisecond_epoch(&clean));
        assert_eq!(normalize_to_millisecond_epoch(&clean) % 1000, 0);
    }

    #[test]
    fn test_parse_booked_instant_rfc3339() {
        let instant = parse_booked_instant("2026-10-19T09:30:00.123+02:00", &Utc).unwrap();
        assert_eq!(
            normalize_to_millisecond_epoch(&instant),
            normalize_to_millisecond_epoch(&Utc.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_booked_instant_local_is_read_in_zone() {
        let instant = parse_booked_instant("2026-10-19T09:30:00", &New_York).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 10, 19, 13, 30, 0).unwrap());

        let minutes_only = parse_booked_instant("2026-10-19T09:30", &New_York).unwrap();
        assert_eq!(minutes_only, instant);
    }

    #[test]
    fn test_parse_booked_instant_rejects_garbage() {
        let err = parse_booked_instant("next monday", &Utc).unwrap_err();
        assert!(matches!(err, BookingError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_to_iso_instant() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        assert_eq!(to_iso_instant(&instant), "2026-10-19T09:30:00.000Z");
    }
}
