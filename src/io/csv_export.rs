use std::io::Write;
use std::path::Path;

use crate::chart::TimelineFigure;
use crate::error::Result;

const HEADER: [&str; 7] = ["League", "Season", "Phase", "Start", "End", "From", "To"];

/// Export every bar of the figure to a semicolon-delimited CSV file.
///
/// Columns: League ; Season ; Phase ; Start ; End ; From ; To
/// `Start`/`End` are axis coordinates with four decimals; `From`/`To` are the
/// rendered dates including the year.
/// Returns the number of rows written.
pub fn export_csv(figure: &TimelineFigure, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(figure, file)
}

/// Same as [`export_csv`] but into any writer.
pub fn write_csv<W: Write>(figure: &TimelineFigure, writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;

    for bar in &figure.bars {
        wtr.write_record([
            bar.league.abbreviation(),
            bar.slot.label(),
            &bar.phase,
            &format!("{:.4}", bar.interval.start),
            &format!("{:.4}", bar.interval.end),
            &bar.interval.start_label.with_year(),
            &bar.interval.end_label.with_year(),
        ])?;
    }

    wtr.flush()?;
    Ok(figure.bars.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_figure;
    use crate::model::{League, LeagueSchedule, TimelineAxis};
    use chrono::NaiveDate;

    #[test]
    fn writes_header_and_one_row_per_bar() {
        let schedules = vec![LeagueSchedule::fallback(League::Nba)];
        let axis = TimelineAxis::new(NaiveDate::from_ymd_opt(2024, 10, 19).unwrap());
        let figure = build_figure(&schedules, &axis).unwrap();

        let mut out = Vec::new();
        let rows = write_csv(&figure, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(rows, 9);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "League;Season;Phase;Start;End;From;To");
        assert!(lines.contains(
            &"NBA;Current Season;Regular Season;22.5000;28.2500;16 Oct 2024;8 Apr 2025"
        ));
    }
}
