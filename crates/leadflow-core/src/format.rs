//! Display formatting for table cells.

use chrono::{DateTime, Utc};

/// Human relative time of `ts` as seen at `now`.
///
/// Under a minute (or in the future) is "just now"; anything 30 days or
/// older falls back to the calendar date.
#[must_use]
pub fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);
    let minutes = elapsed.num_minutes();

    if minutes < 1 {
        return "just now".to_owned();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 30 {
        return plural(days, "day");
    }

    ts.format("%b %-d, %Y").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Compact dollar amount: `$950`, `$12.5k`, `$1.2M`.
#[must_use]
pub fn compact_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_owned();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    // Units are chosen after rounding so 999.6 reads "$1k", not "$1000".
    if abs.round() < 1_000.0 {
        return format!("{sign}${abs:.0}");
    }
    let thousands = abs / 1_000.0;
    if round_tenth(thousands) < 1_000.0 {
        return format!("{sign}${}k", one_decimal(thousands));
    }
    format!("{sign}${}M", one_decimal(abs / 1_000_000.0))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn one_decimal(value: f64) -> String {
    let text = format!("{value:.1}");
    text.strip_suffix(".0").map_or(text.clone(), str::to_owned)
}

/// A percentage with one decimal, trailing `.0` dropped: `97.3%`, `100%`.
#[must_use]
pub fn percent(value: f64) -> String {
    if !value.is_finite() {
        return "0%".to_owned();
    }
    format!("{}%", one_decimal(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        let now = now();
        assert_eq!(relative_time(now - Duration::seconds(20), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(2), now), "2 min ago");
        assert_eq!(relative_time(now - Duration::minutes(59), now), "59 min ago");
        assert_eq!(relative_time(now - Duration::minutes(60), now), "1 hour ago");
        assert_eq!(relative_time(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(relative_time(now - Duration::hours(24), now), "1 day ago");
        assert_eq!(relative_time(now - Duration::days(29), now), "29 days ago");
    }

    #[test]
    fn relative_time_falls_back_to_date() {
        let now = now();
        assert_eq!(relative_time(now - Duration::days(30), now), "May 16, 2024");
    }

    #[test]
    fn future_is_just_now() {
        let now = now();
        assert_eq!(relative_time(now + Duration::hours(3), now), "just now");
    }

    #[test]
    fn compact_currency_scales() {
        assert_eq!(compact_currency(950.0), "$950");
        assert_eq!(compact_currency(12_500.0), "$12.5k");
        assert_eq!(compact_currency(12_000.0), "$12k");
        assert_eq!(compact_currency(1_234_567.0), "$1.2M");
        assert_eq!(compact_currency(-4_200.0), "-$4.2k");
        assert_eq!(compact_currency(f64::NAN), "$0");
    }

    #[test]
    fn compact_currency_promotes_after_rounding() {
        assert_eq!(compact_currency(999.4), "$999");
        assert_eq!(compact_currency(999.6), "$1k");
        assert_eq!(compact_currency(999_940.0), "$999.9k");
        assert_eq!(compact_currency(999_950.0), "$1M");
        assert_eq!(compact_currency(-999_950.0), "-$1M");
    }

    #[test]
    fn percent_drops_trailing_zero() {
        assert_eq!(percent(97.34), "97.3%");
        assert_eq!(percent(100.0), "100%");
        assert_eq!(percent(f64::INFINITY), "0%");
    }
}
