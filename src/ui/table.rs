use eframe::egui::{self, Align, Color32, Label, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder, TableRow};

use crate::color::LevelColors;
use crate::config::MESSAGE_COLUMN;
use crate::data::filter::LEVEL_COLUMN;
use crate::data::sort::SortDirection;
use crate::data::view::TableView;
use crate::state::{AppState, RowHeights};

// ---------------------------------------------------------------------------
// Log grid (central panel)
// ---------------------------------------------------------------------------

/// Everything a row needs to draw itself.
struct RowPainter<'a> {
    view: TableView<'a>,
    columns: &'a [usize],
    level_column: Option<usize>,
    message_column: Option<usize>,
    wrap_message: bool,
    level_colors: &'a LevelColors,
}

impl RowPainter<'_> {
    fn paint(&self, mut row: TableRow<'_, '_>) {
        let row_idx = row.index();
        for &col in self.columns {
            row.col(|ui: &mut Ui| {
                // Indices come from the same view, so lookups stay in range.
                let text = self.view.cell_value(row_idx, col).unwrap_or_default();
                let mut rich = RichText::new(text.as_str());
                if Some(col) == self.level_column {
                    if let Some(color) = self.level_colors.color_for(&text) {
                        rich = rich.color(color);
                    }
                }
                let label = Label::new(rich);
                if self.wrap_message && Some(col) == self.message_column {
                    ui.add(label.wrap());
                } else {
                    ui.add(label.truncate());
                }
            });
        }
    }
}

/// Render the log table in the central panel. Header clicks cycle sorting.
pub fn log_table(ui: &mut Ui, state: &mut AppState) {
    if state.base.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a log file to view it  (File → Open…)");
        });
        return;
    }

    if state.displayed.is_empty() {
        ui.label("No records match the filter.");
    }

    refresh_row_heights(ui, state);
    let clicked = draw_grid(ui, state);
    if let Some(column) = clicked {
        state.cycle_sort(&column);
    }
}

/// The message column, when it is visible and wrapped.
fn wrapped_message_column(state: &AppState) -> Option<usize> {
    let msg = state.displayed.column_index(MESSAGE_COLUMN)?;
    (state.wrap_message && state.is_column_visible(msg)).then_some(msg)
}

fn base_row_height(ui: &Ui, state: &AppState) -> f32 {
    let font_id = state.font.font_id();
    ui.fonts(|f| f.row_height(&font_id))
        .max(state.config.min_row_height)
}

/// Measure wrapped row heights unless the cache still fits.
fn refresh_row_heights(ui: &Ui, state: &mut AppState) {
    let Some(msg) = wrapped_message_column(state) else {
        return;
    };
    let width = state.config.message_column_width;
    if state.cached_row_heights(width).is_some() {
        return;
    }

    let font_id = state.font.font_id();
    let row_height = base_row_height(ui, state);
    let view = state.view();
    let heights: Vec<f32> = (0..view.row_count())
        .map(|r| {
            let text = view.cell_value(r, msg).unwrap_or_default();
            let galley =
                ui.fonts(|f| f.layout(text, font_id.clone(), Color32::PLACEHOLDER, width));
            galley.size().y.max(row_height)
        })
        .collect();
    log::debug!("Measured {} wrapped rows at {width} px", heights.len());
    state.row_heights = Some(RowHeights {
        font: state.font,
        width,
        heights,
    });
}

/// Draw the grid; returns the name of a clicked header, if any.
fn draw_grid(ui: &mut Ui, state: &AppState) -> Option<String> {
    let view = state.view();
    let columns = state.visible_columns();
    if columns.is_empty() {
        ui.label("All columns are hidden (Columns → Show all).");
        return None;
    }

    let table = view.table();
    let message_column = table.column_index(MESSAGE_COLUMN);
    let level_column = table.column_index(LEVEL_COLUMN);
    let wrap_message = wrapped_message_column(state).is_some();
    let font_id = state.font.font_id();
    let message_width = state.config.message_column_width;
    let row_height = base_row_height(ui, state);
    let heights = if wrap_message {
        state.cached_row_heights(message_width)
    } else {
        None
    };

    let mut clicked: Option<String> = None;

    // A new id per column layout so egui_extras does not reuse stale widths.
    ui.push_id((&columns, wrap_message), |ui: &mut Ui| {
        ui.style_mut().override_font_id = Some(font_id);

        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .min_scrolled_height(0.0)
            .max_scroll_height(f32::INFINITY);
        for &col in &columns {
            let column = if Some(col) == message_column {
                if wrap_message {
                    // Fixed so the cached row heights stay valid.
                    Column::exact(message_width)
                } else {
                    Column::initial(message_width).at_least(40.0).clip(true)
                }
            } else {
                Column::auto().at_least(40.0).clip(true)
            };
            builder = builder.column(column);
        }

        let painter = RowPainter {
            view,
            columns: &columns,
            level_column,
            message_column,
            wrap_message,
            level_colors: &state.level_colors,
        };

        builder
            .header(row_height + 4.0, |mut header| {
                for &col in &columns {
                    header.col(|ui: &mut Ui| {
                        let name = view.column_name(col).unwrap_or_default();
                        let arrow = match &state.sort {
                            Some(key) if key.column == name => match key.direction {
                                SortDirection::Ascending => " ⬆",
                                SortDirection::Descending => " ⬇",
                            },
                            _ => "",
                        };
                        let button = egui::Button::new(RichText::new(format!("{name}{arrow}")).strong())
                            .frame(false);
                        if ui.add(button).clicked() {
                            clicked = Some(name.to_string());
                        }
                    });
                }
            })
            .body(|body| match heights {
                Some(heights) => body.heterogeneous_rows(heights.iter().copied(), |row| painter.paint(row)),
                None => body.rows(row_height, view.row_count(), |row| painter.paint(row)),
            });
    });

    clicked
}
