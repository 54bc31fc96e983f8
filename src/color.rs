use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.6);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed colours for the standard level names.
fn well_known(level: &str) -> Option<Color32> {
    let color = match level {
        "DEBUG" | "TRACE" => Color32::GRAY,
        "INFO" => Color32::from_rgb(110, 190, 110),
        "WARNING" | "WARN" => Color32::from_rgb(230, 180, 40),
        "ERROR" => Color32::from_rgb(230, 80, 70),
        "CRITICAL" | "FATAL" => Color32::from_rgb(220, 60, 200),
        _ => return None,
    };
    Some(color)
}

// ---------------------------------------------------------------------------
// Level colouring: level name → Color32
// ---------------------------------------------------------------------------

/// Maps the level names of a table to text colours for the level column.
#[derive(Debug, Clone, Default)]
pub struct LevelColors {
    mapping: BTreeMap<String, Color32>,
}

impl LevelColors {
    /// Build from the distinct values of the level column. Standard levels
    /// get fixed colours; anything else gets an evenly spaced hue.
    pub fn new(levels: &BTreeSet<CellValue>) -> Self {
        let names: BTreeSet<String> = levels
            .iter()
            .map(|v| v.to_string().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        let unknown: Vec<&String> = names.iter().filter(|n| well_known(n).is_none()).collect();
        let palette = generate_palette(unknown.len());

        let mut mapping: BTreeMap<String, Color32> = names
            .iter()
            .filter_map(|n| well_known(n).map(|c| (n.clone(), c)))
            .collect();
        mapping.extend(
            unknown
                .into_iter()
                .zip(palette)
                .map(|(n, c): (&String, Color32)| (n.clone(), c)),
        );

        LevelColors { mapping }
    }

    /// Colour for a level cell's display text, if it has one.
    pub fn color_for(&self, level: &str) -> Option<Color32> {
        self.mapping.get(&level.trim().to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(names: &[&str]) -> BTreeSet<CellValue> {
        names.iter().map(|n| CellValue::Text(n.to_string())).collect()
    }

    #[test]
    fn test_palette_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[2]);
    }

    #[test]
    fn test_well_known_levels_are_case_insensitive() {
        let colors = LevelColors::new(&levels(&["info", "ERROR"]));
        assert_eq!(colors.color_for("INFO"), well_known("INFO"));
        assert_eq!(colors.color_for("error"), well_known("ERROR"));
        assert_eq!(colors.color_for("WARNING"), None);
    }

    #[test]
    fn test_custom_levels_get_distinct_colors() {
        let colors = LevelColors::new(&levels(&["AUDIT", "NOTICE", "INFO", ""]));
        assert_eq!(colors.len(), 3);
        let audit = colors.color_for("audit");
        let notice = colors.color_for("NOTICE");
        assert!(audit.is_some());
        assert!(notice.is_some());
        assert_ne!(audit, notice);
    }
}
