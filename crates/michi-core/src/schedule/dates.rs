//! Calendar-day enumeration and lenient ISO parsing.

use jiff::{
    civil::{Date, DateTime, Time},
    tz::TimeZone,
    Timestamp, ToSpan,
};

use crate::error::{PlannerError, Result};

/// Every calendar day from `start` to `end`, inclusive and ascending.
///
/// Returns an empty sequence when `start` is after `end`.
pub fn days_between(start: Date, end: Date) -> Vec<Date> {
    if start > end {
        return Vec::new();
    }
    start
        .series(1.day())
        .take_while(|day| *day <= end)
        .collect()
}

/// Parse an ISO calendar date (`YYYY-MM-DD`), naming `field` on failure.
pub fn parse_date(field: &str, raw: &str) -> Result<Date> {
    raw.trim().parse::<Date>().map_err(|e| {
        PlannerError::invalid_input(field).with_reason(format!("'{raw}' is not an ISO date: {e}"))
    })
}

/// Parse a list of ISO dates, sorted ascending with duplicates removed.
pub fn parse_dates(field: &str, raw: &[String]) -> Result<Vec<Date>> {
    let mut dates = raw
        .iter()
        .map(|value| parse_date(field, value))
        .collect::<Result<Vec<_>>>()?;
    dates.sort();
    dates.dedup();
    Ok(dates)
}

/// How a model-supplied start time was expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartTime {
    /// A full date-time; its date component is authoritative
    At(DateTime),
    /// Only a time of day; the date comes from the plan day
    TimeOfDay(Time),
}

/// Parse a start time the way models actually write them.
///
/// Civil date-times (`2024-01-01T09:00`, offsets ignored) keep their wall
/// clock; `Z`-suffixed instants are read in UTC; a bare date means midnight;
/// a bare `HH:MM` is a time of day.
pub fn parse_start_time(raw: &str) -> Option<StartTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(datetime) = raw.parse::<DateTime>() {
        return Some(StartTime::At(datetime));
    }
    if let Ok(instant) = raw.parse::<Timestamp>() {
        return Some(StartTime::At(instant.to_zoned(TimeZone::UTC).datetime()));
    }
    if let Ok(date) = raw.parse::<Date>() {
        return Some(StartTime::At(date.at(0, 0, 0, 0)));
    }
    raw.parse::<Time>().ok().map(StartTime::TimeOfDay)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_days_between_is_inclusive() {
        let days = days_between(date(2024, 1, 1), date(2024, 1, 3));
        assert_eq!(days, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
    }

    #[test]
    fn test_days_between_single_day() {
        assert_eq!(
            days_between(date(2024, 2, 29), date(2024, 2, 29)),
            vec![date(2024, 2, 29)]
        );
    }

    #[test]
    fn test_days_between_crosses_month_and_year() {
        let days = days_between(date(2023, 12, 30), date(2024, 1, 2));
        assert_eq!(days.len(), 4);
        assert_eq!(days[2], date(2024, 1, 1));
    }

    #[test]
    fn test_days_between_reversed_range_is_empty() {
        assert!(days_between(date(2024, 1, 3), date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_days_between_is_deterministic() {
        let first = days_between(date(2024, 3, 30), date(2024, 4, 2));
        let second = days_between(date(2024, 3, 30), date(2024, 4, 2));
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_date_reports_field() {
        let err = parse_date("startDate", "01/02/2024").unwrap_err();
        assert!(err.to_string().contains("startDate"));
    }

    #[test]
    fn test_parse_dates_sorts_and_dedups() {
        let raw = vec![
            "2024-01-03".to_string(),
            "2024-01-01".to_string(),
            "2024-01-03".to_string(),
        ];
        let dates = parse_dates("dates", &raw).unwrap();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 3)]);
    }

    #[test]
    fn test_parse_start_time_variants() {
        assert_eq!(
            parse_start_time("2024-01-01T09:30:00"),
            Some(StartTime::At(date(2024, 1, 1).at(9, 30, 0, 0)))
        );
        assert_eq!(
            parse_start_time("2024-01-01T23:30:00Z"),
            Some(StartTime::At(date(2024, 1, 1).at(23, 30, 0, 0)))
        );
        assert_eq!(
            parse_start_time("2024-01-01"),
            Some(StartTime::At(date(2024, 1, 1).at(0, 0, 0, 0)))
        );
        assert_eq!(
            parse_start_time("14:00"),
            Some(StartTime::TimeOfDay(Time::constant(14, 0, 0, 0)))
        );
        assert_eq!(parse_start_time("after lunch"), None);
        assert_eq!(parse_start_time("  "), None);
    }
}
