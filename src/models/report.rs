use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::ApiError;

/// Calendar month in the `YYYY-MM` form the reports endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ApiError> {
        if !(1..=12).contains(&month) || !(1000..=9999).contains(&year) {
            return Err(ApiError::Validation(format!(
                "Invalid report month {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReportMonth {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiError::Validation(format!("Month must be in YYYY-MM form, got {s:?}"));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

/// Plain-text/markdown body generated by the backend for one month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub month: ReportMonth,
    pub body: String,
}

impl MonthlyReport {
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
