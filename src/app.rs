use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

use crate::chart::{svg, TimelineFigure};
use crate::config::Settings;
use crate::model::{League, LeagueSchedule, TimelineAxis, TimelineViewport};
use crate::pipeline::load_timeline;
use crate::schedule::ScheduleSource;
use crate::ui;

/// Main application state.
pub struct TimelineApp {
    pub settings: Settings,
    pub settings_path: PathBuf,
    source: Box<dyn ScheduleSource>,

    pub axis: TimelineAxis,
    pub schedules: Vec<LeagueSchedule>,
    pub figure: Option<TimelineFigure>,
    pub viewport: TimelineViewport,
    pub selected_league: Option<League>,

    /// Folder of the last exported site.
    pub last_site: Option<PathBuf>,

    // Dialog state
    pub show_about: bool,
    pub show_date_dialog: bool,
    pub pending_today: NaiveDate,

    pub status_message: String,
}

impl TimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_path: PathBuf,
        source: Box<dyn ScheduleSource>,
        axis: TimelineAxis,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        Self::load(settings, settings_path, source, axis)
    }

    /// Build the state and load schedules without a window.
    pub fn load(
        settings: Settings,
        settings_path: PathBuf,
        source: Box<dyn ScheduleSource>,
        axis: TimelineAxis,
    ) -> Self {
        let mut app = Self {
            settings,
            settings_path,
            source,
            axis,
            schedules: Vec::new(),
            figure: None,
            viewport: TimelineViewport::default(),
            selected_league: None,
            last_site: None,
            show_about: false,
            show_date_dialog: false,
            pending_today: axis.today(),
            status_message: "Ready".to_string(),
        };
        app.reload();
        app.jump_to_today();
        app
    }

    // --- Data ---

    pub fn reload(&mut self) {
        self.load_axis(self.axis);
    }

    /// Load schedules for `axis`; the axis and figure only change on success.
    fn load_axis(&mut self, axis: TimelineAxis) -> bool {
        match load_timeline(self.source.as_ref(), &self.settings, &axis) {
            Ok(timeline) => {
                let live = timeline.figure.live.len();
                self.axis = axis;
                self.schedules = timeline.schedules;
                self.figure = Some(timeline.figure);
                self.status_message = format!(
                    "Loaded {} leagues ({} live) for {}",
                    self.schedules.len(),
                    live,
                    axis.current_year()
                );
                true
            }
            Err(e) => {
                self.status_message = format!("Error loading schedules: {}", e);
                false
            }
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        let axis = TimelineAxis::new(today);
        self.pending_today = today;
        let loaded = if today.year() != self.axis.current_year() || self.figure.is_none() {
            self.load_axis(axis)
        } else {
            match crate::chart::build_figure(&self.schedules, &axis) {
                Ok(figure) => {
                    self.axis = axis;
                    self.figure = Some(figure);
                    self.status_message = self.axis.today_label();
                    true
                }
                Err(e) => {
                    self.status_message = format!("Error: {}", e);
                    false
                }
            }
        };
        if loaded {
            self.jump_to_today();
        }
    }

    pub fn open_date_dialog(&mut self) {
        self.pending_today = self.axis.today();
        self.show_date_dialog = true;
    }

    pub fn jump_to_today(&mut self) {
        self.viewport.center_on(self.axis.today_x());
    }

    // --- Export ---

    pub fn export_site(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_title("Export Site")
            .set_directory(&self.settings.output_dir)
            .pick_folder()
        {
            self.export_site_to(&dir);
        }
    }

    /// Write the static site plus the SVG image into `dir`.
    pub fn export_site_to(&mut self, dir: &Path) {
        let Some(figure) = &self.figure else {
            self.status_message = "Nothing to export: no schedules loaded".to_string();
            return;
        };
        let result = crate::site::emit_site(dir, figure).and_then(|mut files| {
            let image = dir.join(&self.settings.image_file);
            svg::render_svg(figure, &image, svg::DEFAULT_SIZE)?;
            files.push(image);
            Ok(files)
        });
        match result {
            Ok(files) => {
                self.status_message = format!("Wrote {} files to {}", files.len(), dir.display());
                self.last_site = Some(dir.to_path_buf());
            }
            Err(e) => {
                self.status_message = format!("Site export failed: {}", e);
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.figure.is_none() {
            self.status_message = "Nothing to export: no schedules loaded".to_string();
            return;
        }

        let default_name = format!("sports_timeline_{}.csv", self.axis.current_year());
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            self.export_csv_to(&path);
        }
    }

    pub fn export_csv_to(&mut self, path: &Path) {
        let Some(figure) = &self.figure else {
            return;
        };
        match crate::io::export_csv(figure, path) {
            Ok(count) => {
                self.status_message = format!("Exported {} phases to CSV", count);
            }
            Err(e) => {
                self.status_message = format!("CSV export failed: {}", e);
            }
        }
    }

    pub fn open_site(&mut self) {
        let Some(dir) = &self.last_site else {
            self.status_message = "Export the site first".to_string();
            return;
        };
        let index = dir.join(crate::site::INDEX_FILE);
        if let Err(e) = open::that(&index) {
            self.status_message = format!("Could not open {}: {}", index.display(), e);
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = self
            .settings_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if let Err(e) = open::that(&dir) {
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let jump = ctx.input(|i| i.key_pressed(egui::Key::Home));
        let zoom_in = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Plus));
        let zoom_out = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Minus));
        if jump {
            self.jump_to_today();
        }
        if zoom_in {
            self.viewport.zoom_in();
        }
        if zoom_out {
            self.viewport.zoom_out();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let live = self.figure.as_ref().map_or(0, |f| f.live.len());
                        ui.label(
                            egui::RichText::new(format!("Live: {} / {}", live, self.schedules.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.viewport.pixels_per_month / TimelineViewport::default().pixels_per_month * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: leagues and phases
        let mut table_action = ui::phase_table::PhaseTableAction::None;
        if let Some(figure) = &self.figure {
            egui::SidePanel::left("league_panel")
                .default_width(ui::theme::SIDE_PANEL_WIDTH)
                .min_width(200.0)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    table_action = ui::phase_table::show_phase_table(
                        &self.schedules,
                        figure,
                        self.selected_league,
                        ui,
                    );
                });
        }

        match table_action {
            ui::phase_table::PhaseTableAction::Select(league) => {
                self.selected_league = if self.selected_league == Some(league) {
                    None
                } else {
                    Some(league)
                };
            }
            ui::phase_table::PhaseTableAction::JumpToToday => self.jump_to_today(),
            ui::phase_table::PhaseTableAction::None => {}
        }

        // Central panel: timeline chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            match &self.figure {
                Some(figure) => {
                    let interaction = ui::timeline_chart::show_timeline_chart(
                        figure,
                        &mut self.viewport,
                        self.selected_league,
                        ui,
                    );
                    if let Some(league) = interaction.selected_league {
                        self.selected_league = Some(league);
                    }
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("No schedules loaded")
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                }
            }
        });

        // Dialogs
        if self.show_date_dialog {
            ui::dialogs::show_date_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;
    use crate::schedule::{FetchError, OfflineSource};

    /// Serves a broken MLB table for 2025 and nothing live otherwise.
    struct Broken2025;

    impl ScheduleSource for Broken2025 {
        fn fetch_schedule(&self, league: League, year: i32) -> Result<Vec<Phase>, FetchError> {
            match (league, year) {
                (League::Mlb, 2025) => Ok(vec![Phase::from_iso_dates("Opening Day", "2025-02-30", "2025-03-01")?]),
                (other, _) => Err(FetchError::Unsupported(other)),
            }
        }
    }

    fn app(today: NaiveDate) -> TimelineApp {
        TimelineApp::load(
            Settings::default(),
            PathBuf::from("settings.json"),
            Box::new(OfflineSource),
            TimelineAxis::new(today),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loads_fallback_schedules_offline() {
        let app = app(date(2024, 10, 19));
        assert_eq!(app.schedules.len(), 4);
        assert_eq!(app.figure.as_ref().map(|f| f.live.len()), Some(0));
        assert!(app.status_message.starts_with("Loaded 4 leagues"));
    }

    #[test]
    fn jump_centres_the_window_on_today() {
        let mut app = app(date(2024, 10, 19));
        app.viewport.fit_width(600.0);
        app.jump_to_today();
        let mid = app.viewport.start + app.viewport.span() / 2.0;
        assert!((mid - 22.6).abs() < 1e-9);
    }

    #[test]
    fn changing_the_date_moves_the_axis() {
        let mut app = app(date(2024, 10, 19));
        app.set_today(date(2025, 3, 1));
        assert_eq!(app.axis.current_year(), 2025);
        let figure = app.figure.as_ref().unwrap();
        assert_eq!(figure.axis.title(), "Years 2024, 2025, 2026");
    }

    #[test]
    fn failed_reload_keeps_the_previous_axis() {
        let mut app = TimelineApp::load(
            Settings::default(),
            PathBuf::from("settings.json"),
            Box::new(Broken2025),
            TimelineAxis::new(date(2024, 10, 19)),
        );
        let before = app.viewport.start;

        app.set_today(date(2025, 3, 1));

        assert_eq!(app.axis.today(), date(2024, 10, 19));
        assert!(app.status_message.starts_with("Error loading schedules"));
        let figure = app.figure.as_ref().unwrap();
        assert_eq!(figure.axis.title(), "Years 2023, 2024, 2025");
        assert_eq!(app.viewport.start, before);
    }

    #[test]
    fn exports_site_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(date(2024, 10, 19));

        app.export_site_to(dir.path());
        assert_eq!(app.last_site.as_deref(), Some(dir.path()));
        assert!(dir.path().join("index.html").is_file());
        assert!(dir.path().join("sports_leagues_timeline.svg").is_file());

        let csv = dir.path().join("out").join("timeline.csv");
        app.export_csv_to(&csv);
        assert!(csv.is_file());
        assert_eq!(app.status_message, "Exported 36 phases to CSV");
    }
}
