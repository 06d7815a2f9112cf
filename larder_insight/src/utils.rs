//! Date label helpers

use crate::error::{InsightError, Result};
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Parse an ISO-8601 date (`2024-03-01`) or RFC 3339 date-time
/// (`2024-03-01T12:00:00Z`) and return its calendar date.
pub fn parse_date_label(label: &str) -> Result<NaiveDate> {
    let trimmed = label.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let date_time = DateTime::parse_from_rfc3339(trimmed)?;
    Ok(date_time.with_timezone(&Utc).date_naive())
}

/// Label for a point `days_back` days before `now`, RFC 3339 with
/// millisecond precision.
pub fn backdated_label(now: DateTime<Utc>, days_back: usize) -> String {
    let shifted = i64::try_from(days_back)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|offset| now.checked_sub_signed(offset))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    shifted.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `horizon` consecutive dates following `last`
pub fn future_dates(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(horizon);
    let mut current = last;

    for _ in 0..horizon {
        current = current.succ_opt().ok_or_else(|| {
            InsightError::ValidationError(format!("Date overflow after {}", current))
        })?;
        dates.push(current);
    }

    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_date() {
        let date = parse_date_label("2024-02-29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_rfc3339() {
        let date = parse_date_label("2024-03-01T23:30:00-03:00").unwrap();
        // 23:30 at UTC-3 is already the next day in UTC
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date_label("yesterday").is_err());
        assert!(parse_date_label("2024-13-01").is_err());
    }

    #[test]
    fn test_backdated_label() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        assert_eq!(backdated_label(now, 3), "2024-05-07T08:00:00.000Z");
        assert_eq!(backdated_label(now, 0), "2024-05-10T08:00:00.000Z");
    }

    #[test]
    fn test_future_dates() {
        let start = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();
        let dates = future_dates(start, 3).unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ]
        );
    }
}
