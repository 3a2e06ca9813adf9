use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hue = (200.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Chart colours
// ---------------------------------------------------------------------------

/// Colours for the buckets of one chart. Large frequency tables cycle through
/// `max_distinct` hues so neighbouring slices stay distinguishable.
#[derive(Debug, Clone)]
pub struct ChartPalette {
    colors: Vec<Color32>,
}

impl ChartPalette {
    pub fn new(max_distinct: usize) -> Self {
        ChartPalette {
            colors: generate_palette(max_distinct.max(1)),
        }
    }

    /// Colour of bucket `i`.
    pub fn color_for(&self, i: usize) -> Color32 {
        self.colors[i % self.colors.len()]
    }

    /// Same hue with reduced opacity, used for bar fills.
    pub fn fill_for(&self, i: usize) -> Color32 {
        self.color_for(i).gamma_multiply(0.8)
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        assert_ne!(colors[0], colors[3]);
    }

    #[test]
    fn chart_palette_cycles() {
        let palette = ChartPalette::new(3);
        assert_eq!(palette.color_for(0), palette.color_for(3));
        assert_ne!(palette.color_for(0), palette.color_for(1));
        assert_eq!(ChartPalette::new(0).color_for(7), ChartPalette::new(1).color_for(0));
    }
}
