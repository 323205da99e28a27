use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Export Site...", icons::GLOBE)).clicked() {
                app.export_site();
                ui.close_menu();
            }
            if ui.button(format!("{}  Export CSV...", icons::FILE_CSV)).clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Open Site in Browser", icons::BROWSER)).clicked() {
                app.open_site();
                ui.close_menu();
            }
            if ui.button(format!("{}  Open Settings Folder", icons::FOLDER_OPEN)).clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.viewport.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.viewport.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Jump to Today        Home").clicked() {
                app.jump_to_today();
                ui.close_menu();
            }
            if ui.button("  Set Date...").clicked() {
                app.open_date_dialog();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Reload Schedules", icons::ARROWS_CLOCKWISE)).clicked() {
                app.reload();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(app.axis.title())
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
