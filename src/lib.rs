//! linefield renders a decorative, full-viewport procedural line field.
//!
//! A draw pass places a batch of *hubs*, radiates a fixed fan of spokes from every hub,
//! scatters a handful of free-standing lines, and finally lays a translucent mosaic wash over
//! the result so foreground text stays readable.
//!
//! # Pipeline overview
//!
//! 1. **Place**: [`HubRegistry::begin_pass`] appends hubs (clearing first, or ring-evicting,
//!    per [`Retention`]).
//! 2. **Generate**: [`generate_segments`] turns hubs plus a [`RandomSource`] into [`Segment`]s.
//! 3. **Composite**: [`composite_segments`] strokes every segment, forcing a low opacity near the
//!    surface center, each followed by a shifted boundary stroke.
//! 4. **Overlay**: [`apply_mosaic`] washes the surface and shades a checkerboard of tiles.
//!
//! [`Orchestrator`] runs the whole pass on mount and on every resize. [`CpuSurface`] is the
//! bundled raster target; anything implementing [`Surface`] can stand in for it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod field;
mod foundation;
mod orchestrator;
mod pipeline;
mod render;

pub use config::color::ColorDef;
pub use config::field::{
    BoundaryConfig, FieldConfig, OverlayConfig, RangeDef, ResizePolicy, Retention,
};
pub use field::generator::{Segment, SegmentLayer, generate_segments, hub_fan, scatter};
pub use field::registry::{Hub, HubRegistry};
pub use field::rng::{RandomSource, Rng64, ScriptedRandom};
pub use foundation::core::{Point, Rect, Rgba8, Vec2, Viewport};
pub use foundation::error::{FieldError, FieldResult};
pub use orchestrator::events::{ViewportEvent, coalesce};
pub use orchestrator::session::{Orchestrator, OrchestratorState, PassReport};
pub use pipeline::{render_frame, replay};
pub use render::compositor::{
    CompositeStats, composite_segments, resolved_alpha, segment_strokes, within_legibility_radius,
};
pub use render::cpu::CpuSurface;
pub use render::mosaic::{MosaicStats, apply_mosaic, tile_grid, tile_is_shaded, tile_rect};
pub use render::surface::{
    FrameRGBA, LineCap, RectFill, StrokeLine, Surface, SurfaceAttachment, SurfaceLayer,
};
