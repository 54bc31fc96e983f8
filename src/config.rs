use crate::state::{DisplayFont, FontChoice};

/// Column that gets the wide, word-wrapped layout.
pub const MESSAGE_COLUMN: &str = "message";

/// Startup settings for the window and the log grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Initial width of the message column in points.
    pub message_column_width: f32,
    /// Rows never get shorter than this, even with tiny fonts.
    pub min_row_height: f32,
    pub default_font: DisplayFont,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            window_size: [1440.0, 900.0],
            min_window_size: [600.0, 400.0],
            message_column_width: 960.0,
            min_row_height: 18.0,
            default_font: DisplayFont {
                family: FontChoice::Monospace,
                size: 13.0,
            },
        }
    }
}
