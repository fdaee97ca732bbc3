use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::presentation::Tier;

/// 8-bit sRGB colour used by chart specifications.
pub type Rgb8 = Srgb<u8>;

/// Shown when a palette entry fails to parse.
const FALLBACK: Rgb8 = Srgb::new(128, 128, 128);

// ---------------------------------------------------------------------------
// Chart palette
// ---------------------------------------------------------------------------

/// Series colours, cycled when there are more series than entries.
pub const CHART_PALETTE: [&str; 8] = [
    "#1FB8CD", "#FFC185", "#B4413C", "#ECEBD5", "#5D878F", "#DB4545", "#D2BA4C", "#964325",
];

/// Parse a `#RRGGBB` string, falling back to grey.
pub fn hex(code: &str) -> Rgb8 {
    code.parse::<Rgb8>().unwrap_or_else(|e| {
        log::warn!("invalid colour '{code}': {e}");
        FALLBACK
    })
}

/// Colour for the `i`-th series.
pub fn series_color(i: usize) -> Rgb8 {
    hex(CHART_PALETTE[i % CHART_PALETTE.len()])
}

pub fn to_color32(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Shift the HSL lightness of `c` by `amount` (clamped to `[0, 1]`).
pub fn lighten(c: Rgb8, amount: f32) -> Rgb8 {
    let mut hsl: Hsl = c.into_format::<f32>().into_color();
    hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
    let rgb: Srgb = hsl.into_color();
    rgb.into_format()
}

// ---------------------------------------------------------------------------
// Metric tiers and grid cells
// ---------------------------------------------------------------------------

pub fn tier_color(tier: Tier) -> Color32 {
    match tier {
        Tier::Good => Color32::from_rgb(86, 166, 96),
        Tier::Medium => Color32::from_rgb(230, 170, 50),
        Tier::Poor => Color32::from_rgb(217, 77, 77),
    }
}

pub const START_COLOR: &str = "#5D878F";
pub const GOAL_COLOR: &str = "#1FB8CD";
pub const OBSTACLE_COLOR: &str = "#B4413C";
pub const AGENT_COLOR: &str = "#FFC185";
