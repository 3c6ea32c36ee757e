//! Reusable UI components and formatting helpers

use chrono::{Datelike, NaiveDate};

/// Server duration ticks are 100ns units
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Format a duration in server ticks as m:ss (or h:mm:ss)
pub fn format_duration(ticks: i64) -> String {
    let total_secs = (ticks / TICKS_PER_SECOND).max(0);
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Year of a premiere date, "N/A" when missing or malformed
pub fn format_premiere_year(date: Option<&str>) -> String {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year().to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats_minutes_and_hours() {
        assert_eq!(format_duration(243 * TICKS_PER_SECOND), "4:03");
        assert_eq!(format_duration(3723 * TICKS_PER_SECOND), "1:02:03");
        assert_eq!(format_duration(-5), "0:00");
    }

    #[test]
    fn premiere_year_handles_missing_and_malformed_dates() {
        assert_eq!(format_premiere_year(Some("1959-08-17")), "1959");
        assert_eq!(format_premiere_year(Some("not-a-date")), "N/A");
        assert_eq!(format_premiere_year(None), "N/A");
    }
}
