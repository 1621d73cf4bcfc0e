// ABOUTME: Inclusive calendar date range for activity queries
// ABOUTME: "Last N days" arithmetic and yyyy-mm-dd rendering for provider parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

use chrono::{Days, Local, NaiveDate};

use crate::constants::export::YMD_FORMAT;
use crate::errors::ConfigError;

/// Inclusive `[start, end]` range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range ending `today` and starting `days` days earlier
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for `days == 0` or a start date
    /// before the calendar's lower bound.
    pub fn last_days(days: u32, today: NaiveDate) -> Result<Self, ConfigError> {
        if days == 0 {
            return Err(ConfigError::InvalidValue {
                name: "range",
                reason: "must be at least one day".to_owned(),
            });
        }
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| ConfigError::InvalidValue {
                name: "range",
                reason: format!("{days} days before {today} is out of range"),
            })?;
        Ok(Self { start, end: today })
    }

    /// Last `days` days, ending on the local calendar day
    ///
    /// # Errors
    ///
    /// See [`DateRange::last_days`].
    pub fn last_days_from_today(days: u32) -> Result<Self, ConfigError> {
        Self::last_days(days, Local::now().date_naive())
    }

    /// First day
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start as `yyyy-mm-dd`
    #[must_use]
    pub fn start_ymd(&self) -> String {
        self.start.format(YMD_FORMAT).to_string()
    }

    /// End as `yyyy-mm-dd`
    #[must_use]
    pub fn end_ymd(&self) -> String {
        self.end.format(YMD_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_thirty_days_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let range = DateRange::last_days(30, today).unwrap();
        assert_eq!(range.start_ymd(), "2024-03-01");
        assert_eq!(range.end_ymd(), "2024-03-31");
    }

    #[test]
    fn zero_days_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert!(DateRange::last_days(0, today).is_err());
    }
}
