//! Static timeline image.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::chart::figure::TimelineFigure;
use crate::error::{Result, TimelineError};
use crate::model::phase::month_abbr;
use crate::model::timeline::{AXIS_END, AXIS_START};

pub const DEFAULT_SIZE: (u32, u32) = (1600, 550);

const BAR_HEIGHT: f64 = 0.8;
const YEAR_LINE: RGBColor = RGBColor(165, 42, 42);
const TODAY_LINE: RGBColor = RGBColor(220, 30, 30);

/// Render the figure as an SVG file at `path`.
pub fn render_svg(figure: &TimelineFigure, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_timeline(&root, figure)
        .and_then(|_| root.present())
        .map_err(|e| TimelineError::Render(e.to_string()))
}

/// Render the figure into an in-memory SVG document.
pub fn render_svg_string(figure: &TimelineFigure, size: (u32, u32)) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        draw_timeline(&root, figure)
            .and_then(|_| root.present())
            .map_err(|e| TimelineError::Render(e.to_string()))?;
    }
    Ok(buffer)
}

fn draw_timeline<DB>(
    root: &DrawingArea<DB, Shift>,
    figure: &TimelineFigure,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;

    let rows = figure.leagues.len().max(1) as f64;
    let axis = &figure.axis;

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(AXIS_START..AXIS_END, 0.0..rows + 0.6)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(36)
        .x_label_formatter(&|x| month_label(*x))
        .y_labels(0)
        .x_desc(axis.title())
        .draw()?;

    // Rows are numbered from the bottom in chart space.
    let row_center = |row: usize| rows - row as f64 - 0.5;

    for bar in &figure.bars {
        let Some(row) = figure.row_of(bar.league) else {
            continue;
        };
        let (r, g, b) = bar.rgb;
        let fill = RGBColor(r, g, b).mix(bar.opacity);
        let y = row_center(row);
        let corners = [
            (bar.interval.start, y - BAR_HEIGHT / 2.0),
            (bar.interval.end, y + BAR_HEIGHT / 2.0),
        ];
        chart.draw_series(std::iter::once(Rectangle::new(corners, fill.filled())))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            corners,
            BLACK.mix(0.6).stroke_width(1),
        )))?;

        if bar.interval.width() >= 0.6 {
            let style = ("sans-serif", 12)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let mid = (bar.interval.start + bar.interval.end) / 2.0;
            chart.draw_series(std::iter::once(Text::new(bar.phase.clone(), (mid, y), style)))?;
        }
    }

    let top = rows + 0.6;
    let label_style = ("sans-serif", 13).into_font().color(&RGBColor(110, 110, 110));
    for (x, year) in axis.year_boundaries() {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, 0.0), (x, top)],
            YEAR_LINE.stroke_width(2),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("Start of {year} →"),
            (x + 0.15, top - 0.1),
            label_style.clone(),
        )))?;
    }

    let today_x = axis.today_x();
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(today_x, 0.0), (today_x, top)],
        TODAY_LINE.stroke_width(2),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        axis.today().format("Today: %B %-d, %Y").to_string(),
        (today_x + 0.15, top - 0.35),
        ("sans-serif", 13).into_font().color(&BLACK),
    )))?;

    // League names beside their rows, in pixel space.
    let name_style = ("sans-serif", 18)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (row, league) in figure.leagues.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(AXIS_START, row_center(row)));
        root.draw(&Text::new(
            league.abbreviation().to_string(),
            (px - 10, py),
            name_style.clone(),
        ))?;
    }

    Ok(())
}

fn month_label(x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 {
        return String::new();
    }
    let month = ((nearest as i64 - 1).rem_euclid(12) + 1) as u32;
    month_abbr(month).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_figure;
    use crate::model::{League, LeagueSchedule, TimelineAxis};
    use chrono::NaiveDate;

    #[test]
    fn month_labels_wrap_every_twelve() {
        assert_eq!(month_label(1.0), "Jan");
        assert_eq!(month_label(13.0), "Jan");
        assert_eq!(month_label(36.0), "Dec");
        assert_eq!(month_label(2.5), "");
    }

    #[test]
    fn svg_contains_leagues_and_phases() {
        let schedules: Vec<_> = League::ALL.into_iter().map(LeagueSchedule::fallback).collect();
        let axis = TimelineAxis::new(NaiveDate::from_ymd_opt(2024, 10, 19).unwrap());
        let figure = build_figure(&schedules, &axis).unwrap();

        let svg = render_svg_string(&figure, DEFAULT_SIZE).unwrap();
        assert!(svg.contains("<svg"));
        for name in ["NBA", "NHL", "NFL", "MLB", "Stanley Cup", "Start of 2025"] {
            assert!(svg.contains(name), "missing {name}");
        }
    }
}
