// tests/site_build.rs
use std::fs;

use chrono::NaiveDate;

use sports_timeline::chart::svg;
use sports_timeline::config::Settings;
use sports_timeline::model::{FixedClock, League, Phase, ScheduleOrigin, TimelineAxis};
use sports_timeline::pipeline::load_timeline;
use sports_timeline::schedule::{FetchError, OfflineSource, ScheduleSource};
use sports_timeline::{io, site, TimelineError};

/// Serves a short MLB season and nothing else.
struct LiveMlb;

impl ScheduleSource for LiveMlb {
    fn fetch_schedule(&self, league: League, year: i32) -> Result<Vec<Phase>, FetchError> {
        match league {
            League::Mlb => Ok(vec![
                Phase::from_iso_dates("Regular Season", &format!("{year}-03-27"), &format!("{year}-09-28"))?,
                Phase::from_iso_dates("World Series", &format!("{year}-10-24"), &format!("{year}-11-01"))?,
            ]),
            other => Err(FetchError::Unsupported(other)),
        }
    }
}

/// Answers MLB with a date the calendar does not have.
struct BrokenMlb;

impl ScheduleSource for BrokenMlb {
    fn fetch_schedule(&self, league: League, _year: i32) -> Result<Vec<Phase>, FetchError> {
        match league {
            League::Mlb => Ok(vec![Phase::from_iso_dates("Opening Day", "2024-02-30", "2024-03-01")?]),
            other => Err(FetchError::Unsupported(other)),
        }
    }
}

fn axis() -> TimelineAxis {
    TimelineAxis::from_clock(&FixedClock(NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()))
}

#[test]
fn offline_build_writes_the_whole_site() {
    let dir = tempfile::tempdir().unwrap();
    let timeline = load_timeline(&OfflineSource, &Settings::default(), &axis()).unwrap();

    let written = site::emit_site(dir.path(), &timeline.figure).unwrap();
    let image = dir.path().join("timeline.svg");
    svg::render_svg(&timeline.figure, &image, svg::DEFAULT_SIZE).unwrap();

    assert_eq!(written.len(), 4);
    assert!(image.is_file());

    let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(index.contains("&copy; 2024 Sports Analytics Hub"));
    assert!(index.contains("MLB Projects"));

    let data = fs::read_to_string(dir.path().join("timeline-data.js")).unwrap();
    assert!(data.contains("\"Today: October 19\""));
    assert!(data.contains("\"Start 2024\""));
    assert!(data.contains("Plotly.newPlot('timeline-plot'"));
}

#[test]
fn live_mlb_replaces_the_default_table() {
    let timeline = load_timeline(&LiveMlb, &Settings::default(), &axis()).unwrap();

    let mlb = timeline
        .schedules
        .iter()
        .find(|s| s.league == League::Mlb)
        .unwrap();
    assert_eq!(mlb.origin, ScheduleOrigin::Live);
    assert_eq!(mlb.phases.len(), 2);
    assert_eq!(timeline.figure.live, vec![League::Mlb]);

    // Dates of the current year land one year to the right on the axis.
    let ws = timeline
        .figure
        .bars_for(League::Mlb)
        .find(|b| b.phase == "World Series" && b.slot.offset() == 12)
        .unwrap();
    assert!((ws.interval.start - (10.0 + 23.0 / 30.0 + 12.0)).abs() < 1e-9);
    assert_eq!(ws.interval.start_label.to_string(), "24 Oct");
    assert_eq!(ws.interval.start_label.year, 2024);
}

#[test]
fn malformed_upstream_dates_are_reported() {
    let err = load_timeline(&BrokenMlb, &Settings::default(), &axis()).unwrap_err();
    assert!(matches!(err, TimelineError::InvalidDate { ref value } if value == "2024-02-30"));
}

#[test]
fn color_overrides_reach_the_site() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.league_colors.insert("NHL".into(), "#000000".into());

    let timeline = load_timeline(&OfflineSource, &settings, &axis()).unwrap();
    site::emit_site(dir.path(), &timeline.figure).unwrap();

    let css = fs::read_to_string(dir.path().join("styles.css")).unwrap();
    assert!(css.contains(".league-card.nhl {\n    border-top-color: #000000;"));
}

#[test]
fn csv_export_lists_every_bar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.csv");
    let timeline = load_timeline(&OfflineSource, &Settings::default(), &axis()).unwrap();

    let rows = io::export_csv(&timeline.figure, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert_eq!(rows, timeline.figure.bars.len());
    assert_eq!(text.lines().count(), rows + 1);
    assert!(text.starts_with("League;Season;Phase;Start;End;From;To"));
}
