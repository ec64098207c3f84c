//! Display formatting for jobs: dates, wages and card lines.

use chrono::DateTime;

use crate::config::MILLIS_THRESHOLD;
use crate::types::Job;

/// Placeholder shown for missing values.
pub const MISSING: &str = "—";

/// Currency label used for wages.
pub const CURRENCY: &str = "CHF";

/// Normalize a feed timestamp to epoch seconds.
///
/// The feed mixes seconds and milliseconds; anything above 1e12 is taken
/// to be milliseconds.
///
/// # Examples
/// ```
/// use jobboard::format::normalize_timestamp;
///
/// assert_eq!(normalize_timestamp(1_700_000_000), 1_700_000_000);
/// assert_eq!(normalize_timestamp(1_700_000_000_123), 1_700_000_000);
/// ```
#[must_use]
pub fn normalize_timestamp(ts: i64) -> i64 {
    if ts > MILLIS_THRESHOLD {
        ts / 1000
    } else {
        ts
    }
}

/// Format a feed timestamp as a calendar date, e.g. `Nov 14, 2023` (UTC).
#[must_use]
pub fn format_date(ts: i64) -> String {
    match DateTime::from_timestamp(normalize_timestamp(ts), 0) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => MISSING.to_string(),
    }
}

/// Format a validity period as `from — to`.
#[must_use]
pub fn format_period(from: i64, to: i64) -> String {
    format!("{} {MISSING} {}", format_date(from), format_date(to))
}

/// Format an amount without a trailing `.0` for whole numbers.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{amount:.2}")
    }
}

/// Wage line of a job card, e.g. `CHF 25 / hour`.
#[must_use]
pub fn format_wage(job: &Job) -> String {
    format!("{CURRENCY} {} / hour", format_amount(job.hourly_wage.amount))
}

/// Wage line of the detail view, e.g. `25 CHF/hour`.
#[must_use]
pub fn format_detail_wage(job: &Job) -> String {
    format!("{} {CURRENCY}/hour", format_amount(job.hourly_wage.amount))
}

/// City of a job, or the placeholder.
#[must_use]
pub fn format_city(job: &Job) -> &str {
    job.city().unwrap_or(MISSING)
}

/// Requirements of a job, or the placeholder.
#[must_use]
pub fn format_requirements(job: &Job) -> &str {
    job.requirements
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(MISSING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures;

    #[test]
    fn test_seconds_and_millis_format_identically() {
        assert_eq!(format_date(1_700_000_000), format_date(1_700_000_000_000));
        assert_eq!(format_date(1_700_000_000), "Nov 14, 2023");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly 1e12 is still read as seconds
        assert_eq!(normalize_timestamp(MILLIS_THRESHOLD), MILLIS_THRESHOLD);
        assert_eq!(normalize_timestamp(MILLIS_THRESHOLD + 1000), 1_000_000_001);
    }

    #[test]
    fn test_format_date_out_of_range() {
        assert_eq!(format_date(i64::MAX), MISSING);
    }

    #[test]
    fn test_format_period() {
        assert_eq!(
            format_period(1_700_000_000, 1_700_086_400_000),
            "Nov 14, 2023 — Nov 15, 2023"
        );
    }

    #[test]
    fn test_format_wage() {
        let mut job = fixtures::job("a", "A");
        assert_eq!(format_wage(&job), "CHF 25 / hour");
        job.hourly_wage.amount = 27.5;
        assert_eq!(format_wage(&job), "CHF 27.50 / hour");
    }

    #[test]
    fn test_format_detail_wage() {
        let mut job = fixtures::job("a", "A");
        assert_eq!(format_detail_wage(&job), "25 CHF/hour");
        job.hourly_wage.amount = 27.5;
        assert_eq!(format_detail_wage(&job), "27.50 CHF/hour");
    }

    #[test]
    fn test_placeholders() {
        let mut job = fixtures::job("a", "A");
        job.job_location.city = None;
        assert_eq!(format_city(&job), MISSING);
        assert_eq!(format_requirements(&job), MISSING);
        job.requirements = Some("Own bike".to_string());
        assert_eq!(format_requirements(&job), "Own bike");
    }
}
