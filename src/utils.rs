use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Strict `YYYY-MM-DD`. Chrono alone accepts single-digit months and
/// days, so the shape is checked first.
pub fn parse_date_str(s: &str) -> anyhow::Result<NaiveDate> {
    if !DATE_RE.is_match(s) {
        bail!("Invalid date format. Use YYYY-MM-DD");
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").context("Invalid date format. Use YYYY-MM-DD")
}

pub fn parse_clock_str(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .context("Invalid time format. Use HH:MM")
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

pub fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Minutes from midnight; all overlap arithmetic runs on this.
pub fn minutes_of(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// `14:30` -> `2:30 PM`, for UI display labels.
pub fn display_time(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// `2025-06-01` -> `June 1, 2025`, for email bodies.
pub fn display_date(d: NaiveDate) -> String {
    d.format("%B %-d, %Y").to_string()
}

pub fn clock_str(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn date_str(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parsing_is_strict() {
        assert!(parse_date_str("2025-06-01").is_ok());
        assert!(parse_date_str("2025-6-1").is_err());
        assert!(parse_date_str("01-06-2025").is_err());
        assert!(parse_date_str("2025-13-01").is_err());
        assert!(parse_date_str("next tuesday").is_err());
    }

    #[test]
    fn clock_parsing_accepts_both_forms() {
        assert_eq!(
            parse_clock_str("14:30").unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
        assert_eq!(
            parse_clock_str("08:00:00").unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert!(parse_clock_str("25:00").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("client@example.com"));
        assert!(!is_valid_email("client@example"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn display_labels() {
        let t = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(display_time(t), "8:00 AM");
        let t = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
        assert_eq!(display_time(t), "5:30 PM");
        let d = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(display_date(d), "June 1, 2025");
    }
}
