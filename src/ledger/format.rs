//! Display helpers. Nothing here feeds back into any calculation.

use chrono::{DateTime, Utc};

/// English long weekday name for a Unix timestamp, empty string for
/// timestamps chrono cannot represent.
pub fn weekday_label(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%A").to_string(),
        None => String::new(),
    }
}

/// Date label honoring the entry's time_specified flag: date-only entries
/// never leak the midnight placeholder time.
pub fn date_label(timestamp: i64, time_specified: bool) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) if time_specified => dt.format("%Y-%m-%d %H:%M").to_string(),
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// "1,234.56 USD" style: two decimals, thousands separators, currency code
/// suffix.
pub fn format_amount(value: f64, currency: &str) -> String {
    format!("{} {}", group_thousands(value), currency)
}

/// Signed percentage with two decimals, e.g. "+6.00%" / "-1.25%".
pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{}.{}", int_grouped, frac_part)
    } else {
        format!("{}.{}", int_grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_label() {
        // 2023-11-14 is a Tuesday
        assert_eq!(weekday_label(1_699_968_000), "Tuesday");
        assert_eq!(weekday_label(i64::MAX), "");
    }

    #[test]
    fn test_date_label_hides_placeholder_time() {
        let ts = 1_699_968_000; // 2023-11-14 13:20:00 UTC
        assert_eq!(date_label(ts, true), "2023-11-14 13:20");
        assert_eq!(date_label(ts, false), "2023-11-14");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(10_600.0, "USD"), "10,600.00 USD");
        assert_eq!(format_amount(-1_234_567.891, "EUR"), "-1,234,567.89 EUR");
        assert_eq!(format_amount(0.0, "USD"), "0.00 USD");
        assert_eq!(format_amount(999.999, "USD"), "1,000.00 USD");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(6.0), "+6.00%");
        assert_eq!(format_percent(-1.25), "-1.25%");
        assert_eq!(format_percent(0.0), "+0.00%");
    }
}
