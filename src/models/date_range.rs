//! Reporting periods
//!
//! A `DateRange` is an inclusive pair of calendar dates. Trial balance
//! requests cap the span at one year.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::{api_date, format_api_date};
use crate::error::LedgerError;

/// Longest span, in days, a single report may cover
pub const MAX_RANGE_DAYS: i64 = 365;

/// An inclusive reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(with = "api_date")]
    pub start_date: NaiveDate,
    #[serde(with = "api_date")]
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Parse two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, LedgerError> {
        let parse = |label: &str, value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                LedgerError::Validation(format!(
                    "Invalid {} '{}', expected YYYY-MM-DD",
                    label, value
                ))
            })
        };
        Ok(Self::new(parse("start date", start)?, parse("end date", end)?))
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self::new(start, end)
    }

    /// The `count` calendar months ending with the month containing `date`, oldest first
    pub fn trailing_months(date: NaiveDate, count: u32) -> Vec<Self> {
        let current = Self::month_of(date).start_date;
        (0..count)
            .rev()
            .filter_map(|back| current.checked_sub_months(Months::new(back)))
            .map(Self::month_of)
            .collect()
    }

    /// Days between start and end (0 for a single-day range)
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn validation_error(&self) -> Option<DateRangeError> {
        if self.start_date > self.end_date {
            return Some(DateRangeError::StartAfterEnd);
        }
        let span = self.span_days();
        if span > MAX_RANGE_DAYS {
            return Some(DateRangeError::TooLong(span));
        }
        None
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error().is_none()
    }

    /// Validate the range, converting any problem into a `LedgerError::Validation`
    pub fn validate(&self) -> Result<(), LedgerError> {
        match self.validation_error() {
            Some(err) => Err(LedgerError::Validation(err.to_string())),
            None => Ok(()),
        }
    }

    /// Whether the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// `startDate` / `endDate` query parameters
    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("startDate".to_string(), format_api_date(self.start_date)),
            ("endDate".to_string(), format_api_date(self.end_date)),
        ]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            format_api_date(self.start_date),
            format_api_date(self.end_date)
        )
    }
}

/// Why a date range was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeError {
    StartAfterEnd,
    TooLong(i64),
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartAfterEnd => write!(f, "Start date must not be later than end date"),
            Self::TooLong(_) => write!(
                f,
                "Date range cannot exceed {} days for performance reasons",
                MAX_RANGE_DAYS
            ),
        }
    }
}

impl std::error::Error for DateRangeError {}
