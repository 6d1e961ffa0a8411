use crate::error::{Result, ServiceError};
use crate::utils::constants::{DATE_FORMAT, ROLLING_WINDOW_DAYS};
use chrono::{Duration, NaiveDate};

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || ServiceError::InvalidDate {
        input: input.to_string(),
    };

    // chrono is lenient about field shape, so check it byte by byte
    let well_formed = input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// First day of the rolling window ending at `anchor`: exactly 365 days
/// earlier, so a window spanning 29 February starts one day later in the
/// calendar than "one year back" would.
pub fn rolling_window_start(anchor: NaiveDate) -> NaiveDate {
    anchor
        .checked_sub_signed(Duration::days(ROLLING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}

/// A validated, inclusive date range with an optional upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self> {
        if let Some(end) = end {
            if end < start {
                return Err(ServiceError::InvalidRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub fn open(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Build a range from raw path parameters.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_date(start)?;
        let end = end.map(parse_date).transpose()?;
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2016-08-23").unwrap(), date(2016, 8, 23));
        assert_eq!(parse_date("2016-02-29").unwrap(), date(2016, 2, 29));
    }

    #[test]
    fn test_parse_date_rejects_malformed_input() {
        for input in [
            "not-a-date",
            "",
            "2016-8-23",
            "2016/08/23",
            "20160823",
            "2017-02-29",
            "2016-13-01",
            "2016-08-23T00:00",
            "2016-08- 3",
            " 2016-8-23",
            "+016-08-23",
            "2016-08-2a",
        ] {
            assert!(
                matches!(parse_date(input), Err(ServiceError::InvalidDate { .. })),
                "expected InvalidDate for {input:?}"
            );
        }
    }

    #[test]
    fn test_rolling_window_counts_days_not_years() {
        // The leap day pushes the start forward by one calendar day.
        assert_eq!(rolling_window_start(date(2016, 8, 23)), date(2015, 8, 24));
        assert_eq!(rolling_window_start(date(2017, 8, 23)), date(2016, 8, 23));
        assert_eq!(
            date(2016, 8, 23) - rolling_window_start(date(2016, 8, 23)),
            Duration::days(365)
        );
    }

    #[test]
    fn test_date_range_validation() {
        let range = DateRange::parse("2016-08-23", Some("2017-08-23")).unwrap();
        assert_eq!(range.start, date(2016, 8, 23));
        assert_eq!(range.end, Some(date(2017, 8, 23)));

        let same_day = DateRange::parse("2017-01-01", Some("2017-01-01")).unwrap();
        assert_eq!(same_day.end, Some(same_day.start));

        assert!(matches!(
            DateRange::parse("2017-08-23", Some("2016-08-23")),
            Err(ServiceError::InvalidRange { .. })
        ));
        assert!(matches!(
            DateRange::parse("2017-08-23", Some("yesterday")),
            Err(ServiceError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_open_range_has_no_end() {
        let range = DateRange::open(date(2017, 1, 1));
        assert_eq!(range.start, date(2017, 1, 1));
        assert_eq!(range.end, None);
        assert_eq!(DateRange::parse("2017-01-01", None).unwrap(), range);
    }
}
