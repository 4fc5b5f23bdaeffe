use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::category_label;

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: third-dimension category → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of the chosen third-dimension column to distinct
/// colours. Built from the full table so colours stay stable while filters
/// change; the absent marker gets its own colour like any other value.
#[derive(Debug, Clone)]
pub struct ColorMap {
    /// Source column the map was built for.
    pub column: &'static str,
    mapping: BTreeMap<Option<String>, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given column from its distinct values.
    pub fn new(column: &'static str, categories: &BTreeSet<Option<String>>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<Option<String>, Color32> = categories
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        ColorMap {
            column,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category value.
    pub fn color_for(&self, value: Option<&str>) -> Color32 {
        self.mapping
            .get(&value.map(str::to_string))
            .copied()
            .unwrap_or(self.default_color)
    }

    /// The mapped categories, in sort order (absent marker first).
    pub fn categories(&self) -> impl Iterator<Item = &Option<String>> {
        self.mapping.keys()
    }

    /// Legend entries (value label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(value, color)| (category_label(value.as_deref()).to_string(), *color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_get_distinct_colors_and_unknowns_fall_back() {
        let categories: BTreeSet<Option<String>> =
            [None, Some("Male".to_string()), Some("Female".to_string())]
                .into_iter()
                .collect();
        let map = ColorMap::new("sex", &categories);

        assert_eq!(map.categories().count(), 3);
        assert_ne!(map.color_for(Some("Male")), map.color_for(Some("Female")));
        assert_eq!(map.color_for(Some("Other")), Color32::GRAY);
        assert_eq!(map.legend_entries().len(), 3);
    }
}
