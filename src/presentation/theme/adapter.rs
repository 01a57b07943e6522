//! HSL adjustments on terminal colors.

use coolor::{Hsl, Rgb};
use ratatui::style::Color;

/// Converts between ratatui colors and HSL for deriving tints.
pub struct ColorConverter;

impl ColorConverter {
    /// HSL form of `color`.
    #[must_use]
    pub fn to_hsl(color: Color) -> Hsl {
        let (r, g, b) = rgb_components(color);
        Rgb::new(r, g, b).to_hsl()
    }

    /// Back to an RGB ratatui color.
    #[must_use]
    pub fn to_ratatui(hsl: Hsl) -> Color {
        let rgb: Rgb = hsl.to_rgb();
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// `color` with its lightness and saturation replaced.
    #[must_use]
    pub fn tint(color: Color, lightness: f32, saturation: f32) -> Color {
        let mut hsl = Self::to_hsl(color);
        hsl.l = lightness;
        hsl.s = saturation;
        Self::to_ratatui(hsl)
    }

    /// Black or white, whichever reads better on `background`.
    #[must_use]
    pub fn contrast(background: Color) -> Color {
        if Self::to_hsl(background).l > 0.55 {
            Color::Black
        } else {
            Color::White
        }
    }
}

const ANSI_16: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (170, 0, 0),
    (0, 170, 0),
    (170, 85, 0),
    (0, 0, 170),
    (170, 0, 170),
    (0, 170, 170),
    (170, 170, 170),
    (85, 85, 85),
    (255, 85, 85),
    (85, 255, 85),
    (255, 255, 85),
    (85, 85, 255),
    (255, 85, 255),
    (85, 255, 255),
    (255, 255, 255),
];

fn rgb_components(color: Color) -> (u8, u8, u8) {
    let index = match color {
        Color::Rgb(r, g, b) => return (r, g, b),
        Color::Indexed(i) => return indexed_to_rgb(i),
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::Gray => 7,
        Color::DarkGray => 8,
        Color::LightRed => 9,
        Color::LightGreen => 10,
        Color::LightYellow => 11,
        Color::LightBlue => 12,
        Color::LightMagenta => 13,
        Color::LightCyan => 14,
        _ => 15,
    };
    ANSI_16[index]
}

fn indexed_to_rgb(i: u8) -> (u8, u8, u8) {
    match i {
        0..=15 => ANSI_16[usize::from(i)],
        16..=231 => {
            let i = i - 16;
            let level = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = (i - 232) * 10 + 8;
            (v, v, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_accent_survives_conversion() {
        let back = ColorConverter::to_ratatui(ColorConverter::to_hsl(Color::Rgb(31, 106, 165)));
        let Color::Rgb(r, g, b) = back else {
            panic!("Expected RGB color");
        };
        assert!((i16::from(r) - 31).abs() <= 1);
        assert!((i16::from(g) - 106).abs() <= 1);
        assert!((i16::from(b) - 165).abs() <= 1);
    }

    #[test]
    fn test_indexed_palette() {
        assert_eq!(indexed_to_rgb(1), (170, 0, 0));
        assert_eq!(indexed_to_rgb(208), (255, 135, 0));
        assert_eq!(indexed_to_rgb(232), (8, 8, 8));
    }

    #[test]
    fn test_contrast() {
        assert_eq!(ColorConverter::contrast(Color::Rgb(250, 250, 250)), Color::Black);
        assert_eq!(ColorConverter::contrast(Color::Rgb(20, 20, 30)), Color::White);
    }
}
