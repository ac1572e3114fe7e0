use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Brand colours
// ---------------------------------------------------------------------------

pub const BRAND_RED: Color32 = Color32::from_rgb(0xD9, 0x39, 0x1E);
pub const GOLD: Color32 = Color32::from_rgb(0xFD, 0xB9, 0x13);
pub const CHARCOAL: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

// ---------------------------------------------------------------------------
// Category colours
// ---------------------------------------------------------------------------

pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::Syntax => Color32::from_rgb(0xE0, 0x3C, 0x31),
        Category::Mandatory => Color32::from_rgb(0xF7, 0x69, 0x02),
        Category::Optional => Color32::from_rgb(0x00, 0xA8, 0x6B),
    }
}

/// Translucent background behind a category badge.
pub fn badge_background(category: Category) -> Color32 {
    let [r, g, b, _] = category_color(category).to_array();
    Color32::from_rgba_unmultiplied(r, g, b, 0x22)
}

// ---------------------------------------------------------------------------
// Progress gradient
// ---------------------------------------------------------------------------

fn to_linear(color: Color32) -> LinSrgb {
    Srgb::new(color.r(), color.g(), color.b())
        .into_format::<f32>()
        .into_linear()
}

/// Colour at `t` ∈ [0, 1] along the red → gold progress gradient.
pub fn progress_gradient(t: f32) -> Color32 {
    let mixed = to_linear(BRAND_RED).mix(to_linear(GOLD), t.clamp(0.0, 1.0));
    let srgb: Srgb<u8> = Srgb::from_linear(mixed);
    Color32::from_rgb(srgb.red, srgb.green, srgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color32, b: Color32) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array())
            .all(|(x, y)| x.abs_diff(y) <= 1)
    }

    #[test]
    fn gradient_endpoints_match_brand_colours() {
        assert!(close(progress_gradient(0.0), BRAND_RED));
        assert!(close(progress_gradient(1.0), GOLD));
        assert!(close(progress_gradient(7.0), GOLD));
    }

    #[test]
    fn badge_background_keeps_hue() {
        let bg = badge_background(Category::Optional);
        assert_eq!(bg.a(), 0x22);
        assert_ne!(bg, category_color(Category::Optional));
    }
}
