use chrono::{Days, NaiveDate, NaiveDateTime, ParseResult, Timelike};

const ISO_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// This is the standard way of converting a date to a string in i-did.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO-8601 representation of a local timestamp, as stored in day records. The fraction is either
/// absent or exactly six digits. Anything below a microsecond is truncated.
pub fn to_iso_timestamp(time: NaiveDateTime) -> String {
    // Leap seconds carry their extra second in the nanoseconds.
    let micros = time.nanosecond() % 1_000_000_000 / 1_000;
    let seconds = time.format(ISO_SECONDS_FORMAT);
    if micros == 0 {
        seconds.to_string()
    } else {
        format!("{seconds}.{micros:06}")
    }
}

/// Parses an ISO-8601 timestamp with any number of fraction digits, or none.
pub fn parse_iso_timestamp(value: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
}

/// Returns `count` days ending with `today`, newest first.
pub fn trailing_days(today: NaiveDate, count: u32) -> impl Iterator<Item = NaiveDate> {
    (0..count).map_while(move |n| today.checked_sub_days(Days::new(n as u64)))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{date_to_record_name, parse_iso_timestamp, to_iso_timestamp, trailing_days};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    #[test]
    fn test_record_name() {
        assert_eq!(date_to_record_name(TEST_DATE), "2024-03-01");
    }

    #[test]
    fn test_iso_timestamp() {
        let whole = TEST_DATE.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(to_iso_timestamp(whole), "2024-03-01T09:00:00");

        let micro = TEST_DATE.and_time(NaiveTime::from_hms_micro_opt(17, 5, 9, 120).unwrap());
        assert_eq!(to_iso_timestamp(micro), "2024-03-01T17:05:09.000120");
    }

    #[test]
    fn test_iso_timestamp_keeps_six_digits() {
        let millis = TEST_DATE.and_time(NaiveTime::from_hms_micro_opt(9, 0, 0, 123000).unwrap());
        assert_eq!(to_iso_timestamp(millis), "2024-03-01T09:00:00.123000");

        let nanos = TEST_DATE.and_time(NaiveTime::from_hms_nano_opt(9, 0, 0, 123456789).unwrap());
        assert_eq!(to_iso_timestamp(nanos), "2024-03-01T09:00:00.123456");

        let below_micro = TEST_DATE.and_time(NaiveTime::from_hms_nano_opt(9, 0, 0, 999).unwrap());
        assert_eq!(to_iso_timestamp(below_micro), "2024-03-01T09:00:00");
    }

    #[test]
    fn test_parse_iso_timestamp() {
        let expected = TEST_DATE.and_time(NaiveTime::from_hms_micro_opt(9, 0, 0, 123000).unwrap());
        assert_eq!(parse_iso_timestamp("2024-03-01T09:00:00.123").unwrap(), expected);
        assert_eq!(parse_iso_timestamp("2024-03-01T09:00:00.123000").unwrap(), expected);
        assert_eq!(
            parse_iso_timestamp("2024-03-01T09:00:00").unwrap(),
            TEST_DATE.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        );
        assert!(parse_iso_timestamp("2024-03-01 09:00").is_err());
    }

    #[test]
    fn test_trailing_days_cross_month() {
        let days = trailing_days(TEST_DATE, 3).collect::<Vec<_>>();
        assert_eq!(
            days,
            vec![
                TEST_DATE,
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            ]
        );
        assert_eq!(trailing_days(TEST_DATE, 0).count(), 0);
    }
}
