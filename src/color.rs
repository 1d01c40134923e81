use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::Region;

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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Categorical colours
// ---------------------------------------------------------------------------

/// Maps the position of a category in its dictionary to a distinct colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    palette: Vec<Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(categories: usize) -> Self {
        ColorMap {
            palette: generate_palette(categories),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, code: u32) -> Color32 {
        self.palette
            .get(code as usize)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Fixed violin colours: red, silver, blue in region order.
pub fn region_color(region: Region) -> Color32 {
    match region {
        Region::NorthAmerica => Color32::from_rgb(0xff, 0x00, 0x00),
        Region::Asia => Color32::from_rgb(0xc0, 0xc0, 0xc0),
        Region::Europe => Color32::from_rgb(0x00, 0x00, 0xff),
    }
}

// ---------------------------------------------------------------------------
// Sequential colour map (ColorBrewer BuPu)
// ---------------------------------------------------------------------------

const BUPU: [(u8, u8, u8); 9] = [
    (0xf7, 0xfc, 0xfd),
    (0xe0, 0xec, 0xf4),
    (0xbf, 0xd3, 0xe6),
    (0x9e, 0xbc, 0xda),
    (0x8c, 0x96, 0xc6),
    (0x8c, 0x6b, 0xb1),
    (0x88, 0x41, 0x9d),
    (0x81, 0x0f, 0x7c),
    (0x4d, 0x00, 0x4b),
];

/// Colour for `t ∈ [0, 1]`, interpolated in linear RGB between BuPu stops.
pub fn bupu(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32 * (BUPU.len() - 1) as f32;
    let i = (t.floor() as usize).min(BUPU.len() - 2);
    let frac = t - i as f32;
    let stop = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = stop(BUPU[i]).mix(stop(BUPU[i + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}
