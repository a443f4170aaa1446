use crate::foundation::core::Rgba8;
use serde::{Deserialize, Serialize};

/// Color as it appears in configuration files.
///
/// Accepts `"#RRGGBB"` / `"#RRGGBBAA"` strings, `{ "r": .., "g": .., "b": .., "a": .. }` objects
/// with normalized channels, or `[r, g, b]` / `[r, g, b, a]` arrays. Always serializes as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDef(pub Rgba8);

impl ColorDef {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba8::rgb(r, g, b))
    }

    /// The straight RGBA8 value.
    pub fn rgba8(self) -> Rgba8 {
        self.0
    }

    /// Render as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(self) -> String {
        let Rgba8 { r, g, b, a } = self.0;
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(from_unit(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(from_unit(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(from_unit(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn from_unit(r: f64, g: f64, b: f64, a: f64) -> ColorDef {
    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }
    ColorDef(Rgba8::rgba(to_u8(r), to_u8(g), to_u8(b), to_u8(a)))
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    let (r, g, b, a) = match s.len() {
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(ColorDef(Rgba8::rgba(r, g, b, a)))
}

impl std::str::FromStr for ColorDef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/color.rs"]
mod tests;
