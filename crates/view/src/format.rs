//! Value formatting for headers and form inputs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use heck::ToTitleCase;

/// Turn a record key into a column header (`date_posted` → `Date Posted`)
pub fn humanize(key: &str) -> String {
    key.to_title_case()
}

/// Normalize a backend date value to the `YYYY-MM-DD` form a date input takes
///
/// RFC 3339 timestamps are converted to UTC before the date is taken. Values
/// that do not parse are returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc).date_naive().to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.date().to_string();
    }
    raw.to_string()
}

/// Truncate a backend time value to the `HH:MM` form a time input takes
pub fn truncate_time(raw: &str) -> String {
    raw.chars().take(5).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("caregiver_user_id"), "Caregiver User Id");
        assert_eq!(humanize("photo"), "Photo");
        assert_eq!(humanize("date_posted"), "Date Posted");
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024-03-15T00:00:00Z"), "2024-03-15");
        assert_eq!(normalize_date("2024-03-15"), "2024-03-15");
        assert_eq!(normalize_date("2024-03-15T23:30:00-02:00"), "2024-03-16");
        assert_eq!(normalize_date("2024-03-15T08:00:00"), "2024-03-15");
        assert_eq!(normalize_date("soon"), "soon");
    }

    #[test]
    fn test_truncate_time() {
        assert_eq!(truncate_time("14:30:00"), "14:30");
        assert_eq!(truncate_time("09:05"), "09:05");
        assert_eq!(truncate_time("9"), "9");
    }
}
