use crate::config::field::FieldConfig;
use crate::field::registry::{Hub, HubRegistry};
use crate::field::rng::RandomSource;
use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};

/// Which layer produced a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentLayer {
    /// Spoke `spoke` of the hub at registry position `hub`.
    Hub {
        /// Registry index of the owning hub (oldest first).
        hub: usize,
        /// Position within the hub's fan, starting at 0.
        spoke: usize,
    },
    /// Free-standing segment number `index`.
    Scatter {
        /// Scatter index within the pass.
        index: usize,
    },
}

/// One line segment of a draw pass. Produced fresh every pass and never retained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub origin: Point,
    /// Direction in radians.
    pub angle: f64,
    /// Length in pixels.
    pub length: f64,
    /// Palette color.
    pub color: Rgba8,
    /// Layer opacity before the legibility rule is applied.
    pub base_alpha: f32,
    /// Primary stroke width in pixels.
    pub width: f64,
    /// Producing layer.
    pub layer: SegmentLayer,
}

impl Segment {
    /// End point: `origin + length * (cos angle, sin angle)`.
    pub fn endpoint(&self) -> Point {
        self.origin + Vec2::from_angle(self.angle) * self.length
    }
}

fn palette_color(cfg: &FieldConfig, index: usize) -> Rgba8 {
    // `validate` guarantees a non-empty palette.
    cfg.palette
        .get(index % cfg.palette.len().max(1))
        .map(|c| c.rgba8())
        .unwrap_or(Rgba8::rgb(0, 0, 0))
}

/// Emit the fan of one hub into `out`.
///
/// Draws one base angle, then `length` and `width` for each spoke. Spoke `j` points at
/// `base + j * fan_angle_step` and takes palette entry `j`.
pub fn hub_fan<R: RandomSource + ?Sized>(
    hub_index: usize,
    hub: &Hub,
    cfg: &FieldConfig,
    rng: &mut R,
    out: &mut Vec<Segment>,
) {
    let base = rng.angle();
    let step = cfg.fan_angle_step();
    for spoke in 0..cfg.spokes_per_hub {
        let length = cfg.hub_length.lerp(rng.next_f64());
        let width = cfg.stroke_width.lerp(rng.next_f64());
        out.push(Segment {
            origin: hub.position,
            angle: base + (spoke as f64) * step,
            length,
            color: palette_color(cfg, spoke),
            base_alpha: cfg.hub_alpha,
            width,
            layer: SegmentLayer::Hub {
                hub: hub_index,
                spoke,
            },
        });
    }
}

/// Emit the free-standing segments of a pass into `out`.
///
/// Per segment draws `x`, `y`, `angle`, `length`, `width`.
pub fn scatter<R: RandomSource + ?Sized>(
    viewport: Viewport,
    cfg: &FieldConfig,
    rng: &mut R,
    out: &mut Vec<Segment>,
) {
    let (w, h) = (f64::from(viewport.width), f64::from(viewport.height));
    for index in 0..cfg.scatter_count {
        let x = rng.next_f64() * w;
        let y = rng.next_f64() * h;
        let angle = rng.angle();
        let length = cfg.scatter_length.lerp(rng.next_f64());
        let width = cfg.stroke_width.lerp(rng.next_f64());
        out.push(Segment {
            origin: Point::new(x, y),
            angle,
            length,
            color: palette_color(cfg, index),
            base_alpha: cfg.scatter_alpha,
            width,
            layer: SegmentLayer::Scatter { index },
        });
    }
}

/// All segments of a pass: every hub's fan in registry order, then the scatter layer.
pub fn generate_segments<R: RandomSource + ?Sized>(
    registry: &HubRegistry,
    viewport: Viewport,
    cfg: &FieldConfig,
    rng: &mut R,
) -> Vec<Segment> {
    let mut out = Vec::with_capacity(registry.len() * cfg.spokes_per_hub + cfg.scatter_count);
    for (i, hub) in registry.iter().enumerate() {
        hub_fan(i, hub, cfg, rng, &mut out);
    }
    scatter(viewport, cfg, rng, &mut out);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/field/generator.rs"]
mod tests;
