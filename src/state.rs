use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{FontFamily, FontId};

use crate::color::LevelColors;
use crate::config::ViewerConfig;
use crate::data::filter::{filter_table, LogFilter, LEVEL_COLUMN};
use crate::data::loader::load_file;
use crate::data::model::LogTable;
use crate::data::sort::{sort_table, SortKey};
use crate::data::view::TableView;

// ---------------------------------------------------------------------------
// Display font
// ---------------------------------------------------------------------------

pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontChoice {
    Monospace,
    Proportional,
}

impl FontChoice {
    pub const ALL: [FontChoice; 2] = [FontChoice::Monospace, FontChoice::Proportional];

    pub fn label(self) -> &'static str {
        match self {
            FontChoice::Monospace => "Monospace",
            FontChoice::Proportional => "Proportional",
        }
    }
}

/// Font applied to every cell of the grid. Lives for the whole process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFont {
    pub family: FontChoice,
    pub size: f32,
}

impl DisplayFont {
    pub fn font_id(&self) -> FontId {
        let family = match self.family {
            FontChoice::Monospace => FontFamily::Monospace,
            FontChoice::Proportional => FontFamily::Proportional,
        };
        FontId::new(self.size, family)
    }
}

// ---------------------------------------------------------------------------
// Wrapped row heights
// ---------------------------------------------------------------------------

/// Measured heights of the rows of `displayed` with the message column
/// wrapped at `width` in `font`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowHeights {
    pub font: DisplayFont,
    pub width: f32,
    pub heights: Vec<f32>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Table as loaded from disk (None until user loads a file).
    pub base: Option<LogTable>,

    /// Where `base` came from.
    pub source_path: Option<PathBuf>,

    /// `sort(filter(base))`, what the grid shows.
    pub displayed: LogTable,

    /// Text currently typed into the filter fields.
    pub filter_input: LogFilter,

    /// Filter last applied with "Apply".
    pub applied_filter: LogFilter,

    pub sort: Option<SortKey>,

    /// One flag per column of `displayed`; reset on every load.
    pub column_visible: Vec<bool>,

    pub font: DisplayFont,
    pub font_window_open: bool,

    /// Word-wrap the message column.
    pub wrap_message: bool,

    pub level_colors: LevelColors,

    /// Dropped whenever `displayed` or the font changes.
    pub row_heights: Option<RowHeights>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let font = config.default_font;
        Self {
            config,
            base: None,
            source_path: None,
            displayed: LogTable::default(),
            filter_input: LogFilter::default(),
            applied_filter: LogFilter::default(),
            sort: None,
            column_visible: Vec::new(),
            font,
            font_window_open: false,
            wrap_message: true,
            level_colors: LevelColors::default(),
            row_heights: None,
            status_message: None,
        }
    }

    /// Load a file and show it. On failure the current table stays on
    /// screen and the error goes to the status bar.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let result = load_file(path).with_context(|| format!("Failed to load {}", path.display()));
        match result {
            Ok(table) => {
                self.set_table(table, Some(path.to_path_buf()));
                Ok(())
            }
            Err(e) => {
                log::error!("{e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded table: all columns visible, no filter, no sort.
    pub fn set_table(&mut self, table: LogTable, path: Option<PathBuf>) {
        self.level_colors = LevelColors::new(&table.distinct_values(LEVEL_COLUMN));
        log::debug!("{} distinct level names coloured", self.level_colors.len());
        self.column_visible = vec![true; table.column_names().len()];
        self.applied_filter = LogFilter::default();
        self.sort = None;
        self.row_heights = None;
        self.displayed = table.clone();
        self.base = Some(table);
        self.source_path = path;
        self.status_message = None;
    }

    /// Apply what is typed in the filter fields, always starting from the
    /// loaded table.
    pub fn apply_filter(&mut self) {
        self.applied_filter = self.filter_input.clone();
        self.rebuild_displayed();
    }

    /// Clear the filter fields and show the loaded table again.
    pub fn clear_filter(&mut self) {
        self.filter_input = LogFilter::default();
        self.applied_filter = LogFilter::default();
        self.rebuild_displayed();
    }

    /// Header click on `column`.
    pub fn cycle_sort(&mut self, column: &str) {
        self.sort = SortKey::cycle(self.sort.as_ref(), column);
        self.rebuild_displayed();
    }

    /// Recompute `displayed` from `base`.
    fn rebuild_displayed(&mut self) {
        let Some(base) = &self.base else {
            return;
        };
        let filtered = filter_table(base, &self.applied_filter);
        self.displayed = match &self.sort {
            Some(key) => sort_table(&filtered, key),
            None => filtered,
        };
        self.row_heights = None;
        // Columns are inherited from the base table, but keep the flags in
        // step in case that ever changes.
        self.column_visible
            .resize(self.displayed.column_names().len(), true);
    }

    pub fn view(&self) -> TableView<'_> {
        TableView::new(&self.displayed)
    }

    pub fn is_column_visible(&self, column: usize) -> bool {
        self.column_visible.get(column).copied().unwrap_or(true)
    }

    pub fn set_column_visible(&mut self, column: usize, visible: bool) {
        if let Some(flag) = self.column_visible.get_mut(column) {
            *flag = visible;
        }
    }

    pub fn show_all_columns(&mut self) {
        self.column_visible.iter_mut().for_each(|v| *v = true);
    }

    /// Indices (into the view's columns) of the columns to draw.
    pub fn visible_columns(&self) -> Vec<usize> {
        (0..self.view().column_count())
            .filter(|&c| self.is_column_visible(c))
            .collect()
    }

    pub fn set_font(&mut self, font: DisplayFont) {
        self.font = DisplayFont {
            family: font.family,
            size: font.size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        };
        self.row_heights = None;
    }

    /// Cached wrapped row heights, if they were measured for the current
    /// table, font and `width`.
    pub fn cached_row_heights(&self, width: f32) -> Option<&[f32]> {
        self.row_heights
            .as_ref()
            .filter(|c| {
                c.font == self.font && c.width == width && c.heights.len() == self.displayed.len()
            })
            .map(|c| c.heights.as_slice())
    }

    /// Records in the loaded table.
    pub fn loaded_count(&self) -> usize {
        self.base.as_ref().map_or(0, LogTable::len)
    }

    /// Records currently shown.
    pub fn shown_count(&self) -> usize {
        self.displayed.len()
    }
}
