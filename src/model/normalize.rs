//! Month-coordinate normalization.
//!
//! Every phase, whatever its representation, is projected onto one continuous
//! axis where the integer part is the month of the reference year (1 = January
//! of `reference_year`, 13 = January of the following year, ...) and the
//! fractional part is the day within that month divided by 30.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{Result, TimelineError};
use crate::model::phase::{DateLabel, NormalizedInterval, Phase, PhaseBoundary};

/// Offset (in months) at which calendar dates are drawn without a shift.
///
/// Date phases fetched for the current season land in the middle year of the
/// axis when requested with this offset.
pub const DATE_ANCHOR_OFFSET: i32 = 12;

/// Project `phase` onto the rolling axis, shifted by `season_offset` months.
pub fn normalize(phase: &Phase, season_offset: i32, reference_year: i32) -> Result<NormalizedInterval> {
    match (phase.start, phase.end) {
        (PhaseBoundary::MonthFraction(start), PhaseBoundary::MonthFraction(end)) => {
            let start = start + f64::from(season_offset);
            let end = end + f64::from(season_offset);
            Ok(NormalizedInterval {
                start,
                end,
                start_label: fraction_label(start, reference_year),
                end_label: fraction_label(end, reference_year),
            })
        }
        (PhaseBoundary::CalendarDate(start), PhaseBoundary::CalendarDate(end)) => {
            let shift = season_offset.checked_sub(DATE_ANCHOR_OFFSET).ok_or(
                TimelineError::DateOutOfRange {
                    date: start,
                    months: season_offset,
                },
            )?;
            let start = shift_date(start, shift)?;
            let end = shift_date(end, shift)?;
            Ok(NormalizedInterval {
                start: date_to_offset(start, reference_year),
                end: date_to_offset(end, reference_year),
                start_label: date_label(start),
                end_label: date_label(end),
            })
        }
        _ => Err(TimelineError::MixedBoundaries {
            phase: phase.name.clone(),
        }),
    }
}

/// Add (or subtract) whole months, clamping the day to the target month's length.
///
/// `2024-01-31 + 1` is `2024-02-29`; `2023-01-31 + 1` is `2023-02-28`.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Continuous axis coordinate of a calendar date.
pub fn date_to_offset(date: NaiveDate, reference_year: i32) -> f64 {
    f64::from(date.month())
        + f64::from(date.day() - 1) / 30.0
        + f64::from(date.year() - reference_year) * 12.0
}

/// Day, month and year addressed by an axis coordinate, with 30-day months.
pub fn fraction_label(adjusted: f64, reference_year: i32) -> DateLabel {
    let from_origin = adjusted - 1.0;
    // rem_euclid may round up to the divisor itself for tiny negative inputs.
    let day = ((from_origin.rem_euclid(1.0) * 30.0) as u32 + 1).min(30);
    let month = ((from_origin.rem_euclid(12.0)) as u32 + 1).clamp(1, 12);
    let year = reference_year + (from_origin / 12.0).floor() as i32;
    DateLabel { day, month, year }
}

fn shift_date(date: NaiveDate, months: i32) -> Result<NaiveDate> {
    add_months(date, months).ok_or(TimelineError::DateOutOfRange { date, months })
}

fn date_label(date: NaiveDate) -> DateLabel {
    DateLabel {
        day: date.day(),
        month: date.month(),
        year: date.year(),
    }
}
