use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Abbreviated English month name for a month number in `1..=12`.
pub fn month_abbr(month: u32) -> &'static str {
    MONTH_ABBR[(month.clamp(1, 12) - 1) as usize]
}

/// One edge of a phase, either as a fractional month-of-year or a real date.
///
/// `MonthFraction(10.5)` reads as "mid October"; values of 13 and above spill
/// into the following calendar year, so a season crossing New Year can be
/// written as `10.5..16.25`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhaseBoundary {
    MonthFraction(f64),
    CalendarDate(NaiveDate),
}

impl PhaseBoundary {
    /// Parse an ISO-8601 `YYYY-MM-DD` string.
    pub fn parse_date(value: &str) -> Result<Self> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(PhaseBoundary::CalendarDate)
            .map_err(|_| TimelineError::InvalidDate {
                value: value.to_string(),
            })
    }

    fn is_fraction(&self) -> bool {
        matches!(self, PhaseBoundary::MonthFraction(_))
    }
}

/// A named interval within a league's annual calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub start: PhaseBoundary,
    pub end: PhaseBoundary,
}

impl Phase {
    /// Build a phase, checking that both boundaries share a kind and are ordered.
    pub fn new(name: impl Into<String>, start: PhaseBoundary, end: PhaseBoundary) -> Result<Self> {
        let phase = Self {
            name: name.into(),
            start,
            end,
        };
        phase.validate()?;
        Ok(phase)
    }

    /// Phase expressed in fractional months. Used by the hardcoded league tables.
    pub fn months(name: impl Into<String>, start: f64, end: f64) -> Result<Self> {
        Self::new(
            name,
            PhaseBoundary::MonthFraction(start),
            PhaseBoundary::MonthFraction(end),
        )
    }

    /// Phase expressed as two `YYYY-MM-DD` strings, as returned by schedule APIs.
    pub fn from_iso_dates(name: impl Into<String>, start: &str, end: &str) -> Result<Self> {
        Self::new(
            name,
            PhaseBoundary::parse_date(start)?,
            PhaseBoundary::parse_date(end)?,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let ordered = match (self.start, self.end) {
            (PhaseBoundary::MonthFraction(s), PhaseBoundary::MonthFraction(e)) => s <= e,
            (PhaseBoundary::CalendarDate(s), PhaseBoundary::CalendarDate(e)) => s <= e,
            _ => {
                return Err(TimelineError::MixedBoundaries {
                    phase: self.name.clone(),
                })
            }
        };
        if !ordered {
            return Err(TimelineError::ReversedPhase {
                phase: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn is_fractional(&self) -> bool {
        self.start.is_fraction()
    }
}

/// Day, month and year of a rendered boundary, shown as `"16 Oct"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateLabel {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateLabel {
    /// `"16 Oct 2024"`.
    pub fn with_year(&self) -> String {
        format!("{} {}", self, self.year)
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, month_abbr(self.month))
    }
}

/// A phase projected onto the rolling 36-month axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInterval {
    pub start: f64,
    pub end: f64,
    pub start_label: DateLabel,
    pub end_label: DateLabel,
}

impl NormalizedInterval {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_parse_into_calendar_boundaries() {
        let phase = Phase::from_iso_dates("World Series", "2024-10-01", "2024-10-30").unwrap();
        assert!(!phase.is_fractional());
        assert_eq!(
            phase.start,
            PhaseBoundary::CalendarDate(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
        );
    }

    #[test]
    fn malformed_date_reports_offending_value() {
        let err = Phase::from_iso_dates("Spring Training", "2024-02-30", "2024-03-20").unwrap_err();
        match err {
            TimelineError::InvalidDate { value } => assert_eq!(value, "2024-02-30"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mixed_boundaries_are_rejected() {
        let date = PhaseBoundary::parse_date("2024-04-01").unwrap();
        let err = Phase::new("Odd", PhaseBoundary::MonthFraction(3.0), date).unwrap_err();
        assert!(matches!(err, TimelineError::MixedBoundaries { .. }));
    }

    #[test]
    fn reversed_phase_is_rejected() {
        let err = Phase::months("Backwards", 6.0, 4.0).unwrap_err();
        assert!(matches!(err, TimelineError::ReversedPhase { .. }));
    }

    #[test]
    fn label_formats_day_and_month() {
        let label = DateLabel {
            day: 16,
            month: 10,
            year: 2024,
        };
        assert_eq!(label.to_string(), "16 Oct");
        assert_eq!(label.with_year(), "16 Oct 2024");
    }
}
