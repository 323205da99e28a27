use crate::chart::{Bar, TimelineFigure};
use crate::model::league::League;
use crate::model::phase::month_abbr;
use crate::model::timeline::TimelineViewport;
use crate::ui::theme;
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::LABEL_WIDTH;

/// What the user did with the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A league row label was clicked.
    pub selected_league: Option<League>,
}

/// Render the timeline chart (central panel).
pub fn show_timeline_chart(
    figure: &TimelineFigure,
    viewport: &mut TimelineViewport,
    selected_league: Option<League>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let chart_height = HEADER_HEIGHT + figure.leagues.len() as f32 * (ROW_HEIGHT + ROW_PADDING) + 24.0;

    let (response, painter) = ui.allocate_painter(
        Vec2::new(available.x, chart_height.max(available.y)),
        Sense::click_and_drag(),
    );
    let canvas = response.rect;
    let plot_width = (canvas.width() - LABEL_WIDTH).max(1.0);
    viewport.fit_width(plot_width);

    // Ctrl+scroll zooms, plain or shift scroll pans.
    if response.hovered() {
        let (delta, ctrl) = ui.input(|i| (i.smooth_scroll_delta, i.modifiers.ctrl));
        if ctrl {
            if delta.y > 0.0 {
                viewport.zoom_in();
            } else if delta.y < 0.0 {
                viewport.zoom_out();
            }
            viewport.fit_width(plot_width);
        } else {
            let pan = if delta.x != 0.0 { delta.x } else { delta.y };
            if pan != 0.0 {
                viewport.scroll_months(-f64::from(pan / viewport.pixels_per_month));
            }
        }
    }
    if response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        let dx = response.drag_delta().x;
        viewport.scroll_months(-f64::from(dx / viewport.pixels_per_month));
    }

    painter.rect_filled(canvas, 0.0, theme::BG_DARK);

    let plot = Rect::from_min_max(Pos2::new(canvas.left() + LABEL_WIDTH, canvas.top()), canvas.max);
    let clipped = painter.with_clip_rect(plot);
    let month_x = |m: f64| plot.left() + viewport.month_to_x(m);

    draw_rows(&painter, figure, canvas, selected_league);
    draw_month_header(&clipped, plot, viewport);

    for bar in &figure.bars {
        if let Some(row) = figure.row_of(bar.league) {
            if bar.interval.end >= viewport.start && bar.interval.start <= viewport.end {
                draw_bar(&clipped, bar, row_top(canvas, row), month_x);
            }
        }
    }

    draw_year_lines(&clipped, figure, plot, month_x);
    draw_today_line(&clipped, figure, plot, month_x);

    // Hover tooltip with the phase dates.
    if let Some(pos) = response.hover_pos() {
        if plot.contains(pos) && !response.dragged() {
            if let Some(league) = row_at(figure, canvas, pos.y) {
                let month = viewport.x_to_month(pos.x - plot.left());
                let hits: Vec<&Bar> = figure.bars_at(league, month).collect();
                if !hits.is_empty() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("phase-tip", league)),
                        |ui| {
                            ui.strong(league.abbreviation());
                            for bar in hits {
                                ui.label(&bar.phase);
                                ui.label(
                                    egui::RichText::new(format!(
                                        "From: {}   To: {}",
                                        bar.interval.start_label.with_year(),
                                        bar.interval.end_label.with_year(),
                                    ))
                                    .color(theme::TEXT_SECONDARY),
                                );
                                ui.label(
                                    egui::RichText::new(bar.slot.label())
                                        .small()
                                        .color(theme::TEXT_DIM),
                                );
                            }
                        },
                    );
                }
            }
        }
    }

    // League labels pick a row for the side panel.
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if pos.x < plot.left() {
                interaction.selected_league = row_at(figure, canvas, pos.y);
            }
        }
    }

    interaction
}

fn row_top(canvas: Rect, row: usize) -> f32 {
    canvas.top() + HEADER_HEIGHT + row as f32 * (ROW_HEIGHT + ROW_PADDING)
}

fn row_at(figure: &TimelineFigure, canvas: Rect, y: f32) -> Option<League> {
    let offset = y - canvas.top() - HEADER_HEIGHT;
    if offset < 0.0 {
        return None;
    }
    let row = (offset / (ROW_HEIGHT + ROW_PADDING)) as usize;
    figure.leagues.get(row).copied()
}

fn draw_rows(
    painter: &egui::Painter,
    figure: &TimelineFigure,
    canvas: Rect,
    selected_league: Option<League>,
) {
    for (i, league) in figure.leagues.iter().enumerate() {
        let y = row_top(canvas, i);
        let row_rect = Rect::from_min_size(
            Pos2::new(canvas.left(), y),
            Vec2::new(canvas.width(), ROW_HEIGHT + ROW_PADDING),
        );
        let row_bg = if selected_league == Some(*league) {
            theme::BG_SELECTED
        } else if i % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        painter.rect_filled(row_rect, 0.0, row_bg);
        painter.line_segment(
            [
                Pos2::new(canvas.left(), row_rect.bottom()),
                Pos2::new(canvas.right(), row_rect.bottom()),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        painter.text(
            Pos2::new(canvas.left() + 10.0, row_rect.center().y),
            Align2::LEFT_CENTER,
            league.abbreviation(),
            theme::font_league(),
            figure
                .rgb_of(*league)
                .map_or(theme::TEXT_SECONDARY, |rgb| theme::league_color(rgb, 1.0)),
        );
    }
}

fn draw_month_header(painter: &egui::Painter, plot: Rect, viewport: &TimelineViewport) {
    painter.rect_filled(
        Rect::from_min_size(plot.min, Vec2::new(plot.width(), HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(plot.left(), plot.top() + HEADER_HEIGHT),
            Pos2::new(plot.right(), plot.top() + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let first = viewport.start.floor().max(1.0) as u32;
    let last = viewport.end.ceil() as u32;
    for m in first..=last {
        let x = plot.left() + viewport.month_to_x(f64::from(m));
        painter.line_segment(
            [
                Pos2::new(x, plot.top() + HEADER_HEIGHT),
                Pos2::new(x, plot.bottom()),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        if m > 36 {
            continue;
        }
        let month = (m - 1) % 12 + 1;
        if viewport.pixels_per_month >= 28.0 || month % 3 == 1 {
            painter.text(
                Pos2::new(x + 3.0, plot.top() + 28.0),
                Align2::LEFT_CENTER,
                month_abbr(month),
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
        }
    }
}

fn draw_bar(painter: &egui::Painter, bar: &Bar, y: f32, month_x: impl Fn(f64) -> f32) {
    let x_start = month_x(bar.interval.start);
    let x_end = month_x(bar.interval.end);
    let bar_width = (x_end - x_start).max(3.0);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect, rounding, theme::league_color(bar.rgb, bar.opacity));
    painter.rect_stroke(bar_rect, rounding, Stroke::new(0.5, Color32::from_black_alpha(120)));

    if bar_width > 40.0 {
        let galley = painter.layout_no_wrap(bar.phase.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect.intersect(painter.clip_rect()));
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_year_lines(
    painter: &egui::Painter,
    figure: &TimelineFigure,
    plot: Rect,
    month_x: impl Fn(f64) -> f32,
) {
    for (month, year) in figure.axis.year_boundaries() {
        let x = month_x(month);
        painter.line_segment(
            [Pos2::new(x, plot.top()), Pos2::new(x, plot.bottom())],
            Stroke::new(2.0, theme::YEAR_LINE),
        );
        painter.text(
            Pos2::new(x + 4.0, plot.top() + 10.0),
            Align2::LEFT_CENTER,
            format!("Start {year}"),
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    figure: &TimelineFigure,
    plot: Rect,
    month_x: impl Fn(f64) -> f32,
) {
    let x = month_x(figure.axis.today_x());

    painter.line_segment(
        [
            Pos2::new(x, plot.top() + HEADER_HEIGHT),
            Pos2::new(x, plot.bottom()),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let label = figure.axis.today_label();
    let galley = painter.layout_no_wrap(label, theme::font_small(), Color32::WHITE);
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - galley.size().x / 2.0 - 6.0, plot.top() + HEADER_HEIGHT - 1.0),
        Vec2::new(galley.size().x + 12.0, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.galley(
        Pos2::new(badge_rect.left() + 6.0, badge_rect.center().y - galley.size().y / 2.0),
        galley,
        Color32::TRANSPARENT,
    );
}
