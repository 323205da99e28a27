use crate::chart::TimelineFigure;
use crate::model::league::{League, LeagueSchedule, ScheduleOrigin};
use crate::model::timeline::SeasonSlot;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Actions the phase table can request.
pub enum PhaseTableAction {
    None,
    Select(League),
    JumpToToday,
}

/// Render the left-side league/phase panel.
pub fn show_phase_table(
    schedules: &[LeagueSchedule],
    figure: &TimelineFigure,
    selected_league: Option<League>,
    ui: &mut Ui,
) -> PhaseTableAction {
    let mut action = PhaseTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Leagues")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", schedules.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Jump to Today", egui_phosphor::regular::CALENDAR))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = PhaseTableAction::JumpToToday;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for schedule in schedules {
                let league = schedule.league;
                let is_selected = selected_league == Some(league);
                let color = figure
                    .rgb_of(league)
                    .map_or(theme::TEXT_DIM, |rgb| theme::league_color(rgb, 1.0));

                let frame = egui::Frame {
                    fill: if is_selected { theme::BG_SELECTED } else { theme::BG_PANEL },
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 4.0, color);
                        ui.label(
                            RichText::new(format!("{}  {}", league.card().icon, league.abbreviation()))
                                .strong()
                                .size(13.0),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let (text, fill) = match schedule.origin {
                                ScheduleOrigin::Live => ("LIVE", theme::LIVE_BADGE),
                                ScheduleOrigin::Fallback => ("DEFAULT", theme::TEXT_DIM),
                            };
                            ui.label(RichText::new(text).size(9.0).strong().color(fill));
                        });
                    });

                    if is_selected {
                        ui.add_space(2.0);
                        phase_rows(figure, league, ui);
                    } else {
                        for phase in &schedule.phases {
                            ui.label(
                                RichText::new(&phase.name)
                                    .size(11.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        }
                    }
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("league-row", league)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = PhaseTableAction::Select(league);
                }

                ui.add_space(3.0);
            }
        });

    action
}

/// Current-season dates of every phase of the selected league.
fn phase_rows(figure: &TimelineFigure, league: League, ui: &mut Ui) {
    egui::Grid::new(("phase-grid", league))
        .num_columns(2)
        .spacing([10.0, 2.0])
        .show(ui, |ui| {
            for bar in figure
                .bars_for(league)
                .filter(|b| b.slot == SeasonSlot::Current)
            {
                ui.label(RichText::new(&bar.phase).size(11.0).color(theme::TEXT_PRIMARY));
                ui.label(
                    RichText::new(format!(
                        "{} → {}",
                        bar.interval.start_label.with_year(),
                        bar.interval.end_label.with_year()
                    ))
                    .size(10.0)
                    .color(theme::TEXT_SECONDARY),
                );
                ui.end_row();
            }
        });
}
