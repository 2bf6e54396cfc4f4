// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a CSS hex string, with linear interpolation between two colors

use wasm_bindgen::JsValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("expected 3 or 6 hex digits, found {0}")]
    BadLength(usize),
    #[error("invalid hex color '{0}'")]
    BadDigit(String),
}

impl From<ColorError> for JsValue {
    fn from(err: ColorError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    /// Parses `#RRGGBB`, `RRGGBB` or the `#RGB` shorthand. Alpha is always opaque.
    pub fn from_hex(hex: &str) -> Result<Color, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(hex.to_owned()));
        }
        let expanded: String = match digits.len() {
            6 => digits.to_owned(),
            3 => digits
                .chars()
                .flat_map(|c| std::iter::repeat(c).take(2))
                .collect(),
            len => return Err(ColorError::BadLength(len)),
        };
        let num = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ColorError::BadDigit(hex.to_owned()))?;
        Ok(Color::from_u32((num << 8) | 0xff))
    }

    /// HSL to RGB. `hue` in degrees, `saturation` and `lightness` in [0, 1].
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.max(0.0).min(1.0);
        let l = lightness.max(0.0).min(1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Color::rgb(
            to_channel((r + m) * 255.0),
            to_channel((g + m) * 255.0),
            to_channel((b + m) * 255.0),
        )
    }

    /// Component-wise linear interpolation. `t` is not clamped, values past the
    /// ends extrapolate and saturate at the byte range.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let mix = |from: u8, to: u8| to_channel(from as f64 + (to as f64 - from as f64) * t);
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_css(self) -> String {
        if self.a == 0xff {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

fn to_channel(value: f64) -> u8 {
    // `as` saturates out-of-range floats
    value.round() as u8
}
