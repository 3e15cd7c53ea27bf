//! Minimap palette.
//!
//! Each minimap color is a hue; slots are shaded by brightness so the same
//! tint reads as a gradient from dark (low bytes) to bright (high bytes).

use eframe::egui::Color32;

use crate::minimap::MinimapColor;

/// Hue in degrees for a minimap color.
pub fn hue(color: MinimapColor) -> f32 {
    match color {
        MinimapColor::Green => 120.0,
        MinimapColor::Red => 0.0,
        MinimapColor::Blue => 220.0,
    }
}

/// Full-brightness tint for a minimap color.
pub fn tint(color: MinimapColor) -> Color32 {
    hsv_to_color32(hue(color), 0.85, 1.0)
}

/// Shade of `color` for one slot whose sampled byte is `value`.
pub fn slot_color(color: MinimapColor, value: u8) -> Color32 {
    let v = 0.15 + f32::from(value) / 255.0 * 0.85;
    hsv_to_color32(hue(color), 0.85, v)
}

/// Convert HSV (hue in degrees, saturation and value in 0.0-1.0) to Color32.
pub fn hsv_to_color32(hue: f32, saturation: f32, value: f32) -> Color32 {
    let (r, g, b) = hsv_to_rgb_f32(hue, saturation, value);
    Color32::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

#[inline]
fn hsv_to_rgb_f32(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}
