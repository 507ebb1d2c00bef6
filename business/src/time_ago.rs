//! "3 days ago" style rendering of timestamps.

use chrono::{DateTime, NaiveDate, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.44 * DAY;
const YEAR: f64 = 365.25 * DAY;

/// Thresholds are upper bounds (exclusive) in seconds for each unit.
const BUCKETS: [(f64, f64, &str); 5] = [
    (45.0 * MINUTE, MINUTE, "minute"),
    (22.0 * HOUR, HOUR, "hour"),
    (6.5 * DAY, DAY, "day"),
    (3.5 * WEEK, WEEK, "week"),
    (11.5 * MONTH, MONTH, "month"),
];

pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = (now - then).num_seconds();
    let future = delta < 0;
    let secs = delta.unsigned_abs() as f64;

    if secs < 45.0 {
        return "just now".to_owned();
    }

    let (amount, unit) = BUCKETS
        .iter()
        .find(|(limit, _, _)| secs < *limit)
        .map(|(_, size, unit)| (secs / size, *unit))
        .unwrap_or((secs / YEAR, "year"));

    let count = (amount.round() as u64).max(1);
    let plural = if count == 1 { "" } else { "s" };
    if future {
        format!("in {count} {unit}{plural}")
    } else {
        format!("{count} {unit}{plural} ago")
    }
}

/// Renders a raw `CreatedAt` value relative to `now`.
///
/// Accepts RFC 3339 and bare `YYYY-MM-DD`; anything else is shown verbatim.
pub fn format_created_at(raw: &str, now: DateTime<Utc>) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return format_relative(parsed.with_timezone(&Utc), now);
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return format_relative(midnight.and_utc(), now);
    }
    raw.to_owned()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).single().expect("valid date")
    }

    fn ago(delta: Duration) -> String {
        format_relative(now() - delta, now())
    }

    #[test]
    fn recent_is_just_now() {
        assert_eq!(ago(Duration::seconds(0)), "just now");
        assert_eq!(ago(Duration::seconds(44)), "just now");
    }

    #[test]
    fn buckets_round_to_nearest_unit() {
        assert_eq!(ago(Duration::seconds(45)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(10)), "10 minutes ago");
        assert_eq!(ago(Duration::minutes(45)), "1 hour ago");
        assert_eq!(ago(Duration::hours(5)), "5 hours ago");
        assert_eq!(ago(Duration::hours(22)), "1 day ago");
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(7)), "1 week ago");
        assert_eq!(ago(Duration::days(21)), "3 weeks ago");
        assert_eq!(ago(Duration::days(60)), "2 months ago");
        assert_eq!(ago(Duration::days(365)), "1 year ago");
        assert_eq!(ago(Duration::days(365 * 3)), "3 years ago");
    }

    #[test]
    fn future_timestamps_use_in() {
        assert_eq!(ago(Duration::hours(-2)), "in 2 hours");
    }

    #[test]
    fn created_at_parses_rfc3339_and_dates() {
        assert_eq!(format_created_at("2024-06-12T12:00:00Z", now()), "3 days ago");
        assert_eq!(format_created_at("2024-06-12T14:00:00+02:00", now()), "3 days ago");
        assert_eq!(format_created_at("2024-06-01", now()), "2 weeks ago");
    }

    #[test]
    fn unparseable_created_at_is_verbatim() {
        assert_eq!(format_created_at("yesterday-ish", now()), "yesterday-ish");
        assert_eq!(format_created_at("", now()), "");
    }
}
