use eframe::egui::{self, Color32, Key, RichText, TextEdit, Ui};

use crate::config::MESSAGE_COLUMN;
use crate::data::filter::{LEVEL_COLUMN, NAME_COLUMN};
use crate::state::{AppState, FontChoice, MAX_FONT_SIZE, MIN_FONT_SIZE};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("View", |ui: &mut Ui| {
            if ui.button("Font…").clicked() {
                state.font_window_open = true;
                ui.close_menu();
            }
            ui.checkbox(&mut state.wrap_message, "Wrap message column");
        });

        ui.add_enabled_ui(state.base.is_some(), |ui: &mut Ui| {
            ui.menu_button("Columns", |ui: &mut Ui| column_menu(ui, state));
        });

        if let Some(path) = &state.source_path {
            ui.separator();
            ui.label(path.display().to_string());
        }
    });
}

/// One checkbox per column. Hiding a column only affects drawing.
fn column_menu(ui: &mut Ui, state: &mut AppState) {
    let names: Vec<String> = state.displayed.column_names().to_vec();
    for (idx, name) in names.iter().enumerate() {
        let mut visible = state.is_column_visible(idx);
        if ui.checkbox(&mut visible, name).changed() {
            state.set_column_visible(idx, visible);
        }
    }
    ui.separator();
    if ui.button("Show all").clicked() {
        state.show_all_columns();
        ui.close_menu();
    }
}

// ---------------------------------------------------------------------------
// Filter bar
// ---------------------------------------------------------------------------

/// Level / name filter fields with Apply and Clear.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let level = ui.add(
            TextEdit::singleline(&mut state.filter_input.level)
                .hint_text(format!("Filter by {LEVEL_COLUMN}"))
                .desired_width(160.0),
        );
        let name = ui.add(
            TextEdit::singleline(&mut state.filter_input.name)
                .hint_text(format!("Filter by {NAME_COLUMN}"))
                .desired_width(160.0),
        );
        let submitted = (level.lost_focus() || name.lost_focus())
            && ui.input(|i| i.key_pressed(Key::Enter));

        let enabled = state.base.is_some();
        let apply = ui.add_enabled(enabled, egui::Button::new("Apply filter"));
        let clear = ui.add_enabled(enabled, egui::Button::new("Clear"));

        if enabled && (apply.clicked() || submitted) {
            state.apply_filter();
        }
        if clear.clicked() {
            state.clear_filter();
        }
    });
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if state.base.is_some() {
            ui.label(format!(
                "{} records loaded, {} shown",
                state.loaded_count(),
                state.shown_count()
            ));
        } else {
            ui.label("No log loaded.");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Font chooser
// ---------------------------------------------------------------------------

pub fn font_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.font_window_open;
    let mut font = state.font;
    let default_font = state.config.default_font;

    egui::Window::new("Font")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                for choice in FontChoice::ALL {
                    ui.radio_value(&mut font.family, choice, choice.label());
                }
            });
            ui.add(egui::Slider::new(&mut font.size, MIN_FONT_SIZE..=MAX_FONT_SIZE).text("Size"));
            ui.separator();
            ui.label(RichText::new("2024-05-01 12:00:00 INFO core: started").font(font.font_id()));
            if ui.button("Reset").clicked() {
                font = default_font;
            }
        });

    state.font_window_open = open;
    if font != state.font {
        state.set_font(font);
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open log file")
        .add_filter("JSON Lines", &["jsonl", "json", "log"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        // Errors are already in the status bar.
        if state.open_path(&path).is_ok()
            && state.displayed.column_index(MESSAGE_COLUMN).is_none()
        {
            log::info!("No '{MESSAGE_COLUMN}' column found in the data");
        }
    }
}
