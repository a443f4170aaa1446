use crate::foundation::core::{Point, Rect, Rgba8, Viewport};
use crate::foundation::error::FieldResult;
use crate::foundation::math::{Fnv1a64, unpremul_u8};

/// Stroke end cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    /// Flat end at the endpoint.
    Butt,
    /// Semicircular end centered on the endpoint.
    Round,
}

/// One straight stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeLine {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Straight color.
    pub color: Rgba8,
    /// Opacity multiplied into `color`.
    pub alpha: f32,
    /// Width in pixels.
    pub width: f64,
    /// End cap.
    pub cap: LineCap,
}

/// One axis-aligned rectangle fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectFill {
    /// Filled area in surface pixels.
    pub rect: Rect,
    /// Straight color.
    pub color: Rgba8,
    /// Opacity multiplied into `color`.
    pub alpha: f32,
}

/// Stacking layer requested for the injected surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceLayer {
    /// Behind all foreground content.
    Background,
}

/// How the host must attach a surface: viewport-filling, stacked behind content,
/// transparent to pointer input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceAttachment {
    /// Element id the host should give the surface.
    pub element_id: String,
    /// Initial size.
    pub viewport: Viewport,
    /// Stacking layer.
    pub layer: SurfaceLayer,
    /// Whether the surface tracks the viewport size.
    pub fills_viewport: bool,
    /// Whether the surface may receive pointer events.
    pub intercepts_pointer: bool,
}

impl SurfaceAttachment {
    /// Default element id of the background surface.
    pub const ELEMENT_ID: &'static str = "bg-canvas";

    /// Attachment for a background surface of the given size.
    pub fn background(viewport: Viewport) -> Self {
        Self {
            element_id: Self::ELEMENT_ID.to_owned(),
            viewport,
            layer: SurfaceLayer::Background,
            fills_viewport: true,
            intercepts_pointer: false,
        }
    }
}

/// A 2D drawing target sized to the host viewport.
///
/// Owned exclusively by the orchestrator. A pass is `clear`, any number of strokes and fills,
/// then `finish`.
pub trait Surface {
    /// Current size.
    fn size(&self) -> Viewport;

    /// Resize to `viewport`. Contents after a resize are unspecified until the next `clear`.
    fn resize(&mut self, viewport: Viewport) -> FieldResult<()>;

    /// Reset every pixel to the surface's clear color.
    fn clear(&mut self) -> FieldResult<()>;

    /// Stroke a straight line.
    fn stroke_line(&mut self, line: &StrokeLine) -> FieldResult<()>;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, fill: &RectFill) -> FieldResult<()>;

    /// Commit everything drawn since `clear`.
    fn finish(&mut self) -> FieldResult<()> {
        Ok(())
    }
}

/// A frame read back from a surface as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = unpremul_u8(px[0], a);
            px[1] = unpremul_u8(px[1], a);
            px[2] = unpremul_u8(px[2], a);
        }
        out
    }

    /// RGBA8 of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Stable 64-bit digest of size and pixel bytes.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(&self.width.to_le_bytes());
        h.write_bytes(&self.height.to_le_bytes());
        h.write_bytes(&self.data);
        h.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
