use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::foundation::error::{FieldError, FieldResult};
use crate::render::surface::{FrameRGBA, LineCap, RectFill, StrokeLine, Surface};

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls are recorded into a render context and rasterized into the pixmap by
/// [`Surface::finish`]. Pixels are premultiplied RGBA8.
///
/// A zero-area surface holds no raster. Draw calls on it are accepted and dropped, and
/// the raster is allocated by the first resize to a non-empty size.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Option<Rgba8>,
    raster: Option<Raster>,
}

struct Raster {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl Raster {
    fn new(width: u16, height: u16) -> Option<Self> {
        (width > 0 && height > 0).then(|| Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .field("allocated", &self.raster.is_some())
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Surface of the given size, cleared to `background` (transparent when `None`).
    ///
    /// Fails when a dimension exceeds the `u16` raster limit.
    pub fn new(viewport: Viewport, background: Option<Rgba8>) -> FieldResult<Self> {
        let (width, height) = viewport.to_u16()?;
        let mut surface = Self {
            width,
            height,
            background,
            raster: Raster::new(width, height),
        };
        surface.clear()?;
        Ok(surface)
    }

    /// Read back the pixels committed by the last [`Surface::finish`].
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self
                .raster
                .as_ref()
                .map(|r| r.pixmap.data_as_u8_slice().to_vec())
                .unwrap_or_default(),
            premultiplied: true,
        }
    }
}

fn paint(color: Rgba8, alpha: f32) -> vello_cpu::peniko::Color {
    let c = color.with_opacity(alpha);
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn cap_to_cpu(cap: LineCap) -> vello_cpu::kurbo::Cap {
    match cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> Viewport {
        Viewport::new(u32::from(self.width), u32::from(self.height))
    }

    fn resize(&mut self, viewport: Viewport) -> FieldResult<()> {
        let (width, height) = viewport.to_u16()?;
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.raster = Raster::new(width, height);
        Ok(())
    }

    fn clear(&mut self) -> FieldResult<()> {
        let (width, height) = (self.width, self.height);
        let background = self.background;
        let Some(Raster { ctx, pixmap }) = self.raster.as_mut() else {
            return Ok(());
        };
        ctx.reset();
        pixmap.data_as_u8_slice_mut().fill(0);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if let Some(bg) = background {
            ctx.set_paint(paint(bg, 1.0));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }
        Ok(())
    }

    fn stroke_line(&mut self, line: &StrokeLine) -> FieldResult<()> {
        if !line.width.is_finite() || line.width <= 0.0 {
            return Err(FieldError::render(format!(
                "stroke width must be positive, got {}",
                line.width
            )));
        }
        let Some(Raster { ctx, .. }) = self.raster.as_mut() else {
            return Ok(());
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(line.from));
        path.line_to(point_to_cpu(line.to));

        ctx.set_paint(paint(line.color, line.alpha));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line.width).with_caps(cap_to_cpu(line.cap)));
        ctx.stroke_path(&path);
        Ok(())
    }

    fn fill_rect(&mut self, fill: &RectFill) -> FieldResult<()> {
        let Some(Raster { ctx, .. }) = self.raster.as_mut() else {
            return Ok(());
        };
        let r = fill.rect;
        ctx.set_paint(paint(fill.color, fill.alpha));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1));
        Ok(())
    }

    fn finish(&mut self) -> FieldResult<()> {
        if let Some(Raster { ctx, pixmap }) = self.raster.as_mut() {
            ctx.flush();
            ctx.render_to_pixmap(pixmap);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
