use crate::foundation::error::{FieldError, FieldResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Point, Rect, Vec2};

/// Host viewport (and therefore surface) dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport from pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero; nothing can be drawn into such a viewport.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Geometric center of the viewport.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Full viewport rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Dimensions narrowed to the raster backend's `u16` limit.
    pub fn to_u16(self) -> FieldResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| FieldError::validation("viewport width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| FieldError::validation("viewport height exceeds u16"))?;
        Ok((w, h))
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Viewport {
    type Err = FieldError;

    /// Parses `WIDTHxHEIGHT`, e.g. `800x600`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| FieldError::validation(format!("viewport \"{s}\" is not WxH")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| FieldError::validation(format!("invalid viewport dimension \"{v}\"")))
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color's own alpha by an opacity in `[0,1]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
        Self {
            a: mul_div255_u8(u16::from(self.a), o),
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
