use super::error::GatherError;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// `YYYYMMDD` or `YYYY-MM-DD` at the start of a name
static REGEX_LEADING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:(\d{2})(\d{2})|-(\d{2})-(\d{2}))").expect("Invalid regex")
});

/// Inclusive day range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// # Errors
    /// `GatherError::InvalidDateRange` when `from` is after `to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, GatherError> {
        if from > to {
            return Err(GatherError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Date encoded at the start of a file name, if it is a real calendar day
#[must_use]
pub fn date_from_filename(name: &str) -> Option<NaiveDate> {
    let caps = REGEX_LEADING_DATE.captures(name)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2).or_else(|| caps.get(4))?.as_str().parse().ok()?;
    let day: u32 = caps.get(3).or_else(|| caps.get(5))?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Capture date of a file: the date in its cleaned name, otherwise the local
/// modification date
pub fn capture_date(path: &Path, cleaned_name: &str) -> Result<NaiveDate> {
    if let Some(date) = date_from_filename(cleaned_name) {
        return Ok(date);
    }

    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("failed to read modification time of {}", path.display()))?;
    Ok(DateTime::<Local>::from(modified).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_from_filename_formats() {
        assert_eq!(date_from_filename("20240315_101500.jpg"), Some(date(2024, 3, 15)));
        assert_eq!(date_from_filename("20240315-WA0001.jpg"), Some(date(2024, 3, 15)));
        assert_eq!(date_from_filename("2024-03-15-WA0001.jpg"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_date_from_filename_rejects_invalid_dates() {
        assert_eq!(date_from_filename("20241345_101500.jpg"), None);
        assert_eq!(date_from_filename("Screenshot_20240315.jpg"), None);
        assert_eq!(date_from_filename("2024.jpg"), None);
    }

    #[test]
    fn test_capture_date_prefers_filename() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("20200101_000000.jpg");
        fs::write(&path, "x").unwrap();

        assert_eq!(capture_date(&path, "20200101_000000.jpg").unwrap(), date(2020, 1, 1));
    }

    #[test]
    fn test_capture_date_falls_back_to_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("holiday.jpg");
        fs::write(&path, "x").unwrap();

        let expected = DateTime::<Local>::from(SystemTime::now()).date_naive();
        let found = capture_date(&path, "holiday.jpg").unwrap();
        // the file was written a moment ago; allow for a midnight rollover
        assert!(found == expected || found.succ_opt() == Some(expected));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_date_range_rejects_reversed_bounds() {
        assert!(DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }
}
