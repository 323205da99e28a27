// tests/normalizer.rs
use chrono::NaiveDate;

use sports_timeline::model::normalize::{add_months, DATE_ANCHOR_OFFSET};
use sports_timeline::model::{normalize, League, Phase, PhaseBoundary};
use sports_timeline::TimelineError;

const REF_YEAR: i32 = 2023;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn fractional_phases_keep_their_width_at_any_offset() {
    for league in League::ALL {
        for phase in league.default_phases() {
            let base = normalize(&phase, 0, REF_YEAR).unwrap();
            for offset in [-36, -13, -1, 1, 12, 24, 37] {
                let shifted = normalize(&phase, offset, REF_YEAR).unwrap();
                assert!((shifted.width() - base.width()).abs() < 1e-9, "{league} {}", phase.name);
                assert!((shifted.start - (base.start + f64::from(offset))).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn labels_always_name_a_real_month() {
    let phase = Phase::months("Sweep", 0.5, 1.5).unwrap();
    for offset in -40..=40 {
        let n = normalize(&phase, offset, REF_YEAR).unwrap();
        for label in [n.start_label, n.end_label] {
            assert!((1..=12).contains(&label.month), "offset {offset}: {label:?}");
            assert!((1..=30).contains(&label.day), "offset {offset}: {label:?}");
        }
    }
}

#[test]
fn regular_season_example() {
    let phase = Phase::months("Regular Season", 10.5, 16.25).unwrap();
    let n = normalize(&phase, 12, REF_YEAR).unwrap();
    assert_eq!((n.start, n.end), (22.5, 28.25));
    assert_eq!(n.start_label.to_string(), "16 Oct");
    assert_eq!(n.start_label.year, 2024);
}

#[test]
fn calendar_phase_moves_by_whole_months() {
    let phase = Phase::from_iso_dates("World Series", "2024-10-01", "2024-10-30").unwrap();
    let n = normalize(&phase, 24, REF_YEAR).unwrap();
    assert!((n.start - 34.0).abs() < 1e-9);
    assert!((n.end - (34.0 + 29.0 / 30.0)).abs() < 1e-9);
    assert_eq!(n.end_label.with_year(), "30 Oct 2025");

    // The date anchor offset leaves the dates where they are.
    let anchored = normalize(&phase, DATE_ANCHOR_OFFSET, REF_YEAR).unwrap();
    assert_eq!(anchored.start_label.year, 2024);
}

#[test]
fn month_arithmetic_clamps_to_month_end() {
    assert_eq!(add_months(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
    assert_eq!(add_months(date(2023, 1, 31), 1), Some(date(2023, 2, 28)));
    assert_eq!(add_months(date(2024, 3, 31), -1), Some(date(2024, 2, 29)));
}

#[test]
fn mixed_boundaries_are_rejected() {
    let phase = Phase {
        name: "Odd".into(),
        start: PhaseBoundary::MonthFraction(3.0),
        end: PhaseBoundary::CalendarDate(date(2024, 4, 1)),
    };
    assert!(matches!(
        normalize(&phase, 12, REF_YEAR),
        Err(TimelineError::MixedBoundaries { .. })
    ));
}
