use crate::config::field::FieldConfig;
use crate::field::generator::Segment;
use crate::foundation::core::Point;
use crate::foundation::error::FieldResult;
use crate::render::surface::{LineCap, StrokeLine, Surface};

/// True when `origin` lies strictly within `legibility_radius` of `center`.
pub fn within_legibility_radius(origin: Point, center: Point, cfg: &FieldConfig) -> bool {
    origin.distance(center) < cfg.legibility_radius
}

/// Opacity a segment is drawn with.
///
/// Segments whose *origin* is within the legibility radius take `legibility_alpha`, whatever
/// their layer; all others keep their base opacity. The endpoint is not considered.
pub fn resolved_alpha(segment: &Segment, center: Point, cfg: &FieldConfig) -> f32 {
    if within_legibility_radius(segment.origin, center, cfg) {
        cfg.legibility_alpha
    } else {
        segment.base_alpha
    }
}

/// The primary stroke and the paired boundary stroke for one segment.
pub fn segment_strokes(segment: &Segment, center: Point, cfg: &FieldConfig) -> [StrokeLine; 2] {
    let from = segment.origin;
    let to = segment.endpoint();
    let shift = cfg.boundary.offset;

    let primary = StrokeLine {
        from,
        to,
        color: segment.color,
        alpha: resolved_alpha(segment, center, cfg),
        width: segment.width,
        cap: LineCap::Round,
    };
    let boundary = StrokeLine {
        from: from + shift,
        to: to + shift,
        color: cfg.boundary.color.rgba8(),
        alpha: cfg.boundary.alpha,
        width: cfg.boundary.width,
        cap: LineCap::Round,
    };
    [primary, boundary]
}

/// Per-pass compositing counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Segments stroked.
    pub segments: usize,
    /// Segments whose opacity was forced down by the legibility rule.
    pub legibility_overrides: usize,
}

/// Stroke every segment in order, each followed immediately by its boundary stroke.
pub fn composite_segments<S: Surface + ?Sized>(
    surface: &mut S,
    segments: &[Segment],
    cfg: &FieldConfig,
) -> FieldResult<CompositeStats> {
    let center = surface.size().center();
    let mut stats = CompositeStats::default();
    for segment in segments {
        let [primary, boundary] = segment_strokes(segment, center, cfg);
        if within_legibility_radius(segment.origin, center, cfg) {
            stats.legibility_overrides += 1;
        }
        surface.stroke_line(&primary)?;
        surface.stroke_line(&boundary)?;
        stats.segments += 1;
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
