use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::color::ColorDef;
use crate::foundation::core::Vec2;
use crate::foundation::error::{FieldError, FieldResult};

/// Half-open `[min, max)` range sampled uniformly by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDef {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

impl RangeDef {
    /// Build a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in `[0,1)` into the range.
    pub fn lerp(self, t: f64) -> f64 {
        self.min + (self.max - self.min) * t
    }

    fn validate(self, name: &str) -> FieldResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FieldError::validation(format!("{name} bounds must be finite")));
        }
        if self.min > self.max {
            return Err(FieldError::validation(format!("{name} min must be <= max")));
        }
        Ok(())
    }
}

/// The gray edge stroked parallel to every primary stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Diagonal translation applied to both endpoints.
    pub offset: Vec2,
    /// Stroke color.
    pub color: ColorDef,
    /// Fixed stroke opacity.
    pub alpha: f32,
    /// Stroke width in pixels.
    pub width: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::new(5.0, 5.0),
            color: ColorDef::rgb(0x80, 0x80, 0x80),
            alpha: 0.3,
            width: 1.0,
        }
    }
}

/// The translucent wash and parity-shaded tiles applied after the line field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Layer opacity multiplied into both the wash and the tile fills.
    pub opacity: f32,
    /// Wash color.
    pub wash_color: ColorDef,
    /// Wash alpha before the layer opacity is applied.
    pub wash_alpha: f32,
    /// Shaded tile color.
    pub tile_color: ColorDef,
    /// Shaded tile alpha before the layer opacity is applied.
    pub tile_alpha: f32,
    /// Edge length of a square tile in pixels.
    pub tile_size: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: 0.6,
            wash_color: ColorDef::rgb(255, 255, 255),
            wash_alpha: 0.4,
            tile_color: ColorDef::rgb(200, 200, 200),
            tile_alpha: 0.05,
            tile_size: 40,
        }
    }
}

impl OverlayConfig {
    /// Effective wash opacity once the layer opacity is applied.
    pub fn effective_wash_alpha(&self) -> f32 {
        self.opacity * self.wash_alpha
    }

    /// Effective tile opacity once the layer opacity is applied.
    pub fn effective_tile_alpha(&self) -> f32 {
        self.opacity * self.tile_alpha
    }
}

/// How the hub registry treats hubs from earlier passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Retention {
    /// Clear the registry at the start of every pass.
    #[default]
    Fresh,
    /// Keep hubs across passes, evicting the oldest once `capacity` is reached.
    Ring {
        /// Maximum number of retained hubs.
        capacity: usize,
    },
}

/// How the orchestrator treats a batch of viewport events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Every resize event triggers its own full pass.
    #[default]
    EveryEvent,
    /// Consecutive resize events within one batch collapse to the last one.
    CoalesceBursts,
}

/// Every constant of the line field, loadable from JSON.
///
/// All fields are optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Hubs generated per draw pass.
    pub hubs_per_pass: usize,
    /// Segments radiating from each hub. Never fewer than 3.
    pub spokes_per_hub: usize,
    /// Angular step between consecutive spokes of one hub, in degrees.
    pub fan_angle_step_deg: f64,
    /// Spoke length range.
    pub hub_length: RangeDef,
    /// Base opacity of hub segments.
    pub hub_alpha: f32,
    /// Free-standing segments per pass.
    pub scatter_count: usize,
    /// Scatter segment length range.
    pub scatter_length: RangeDef,
    /// Base opacity of scatter segments.
    pub scatter_alpha: f32,
    /// Primary stroke width range.
    pub stroke_width: RangeDef,
    /// Segment colors, indexed by spoke position or scatter index.
    pub palette: Vec<ColorDef>,
    /// Distance from the surface center within which opacity is forced down.
    pub legibility_radius: f64,
    /// Opacity used for segments whose origin is inside the legibility radius.
    pub legibility_alpha: f32,
    /// Paired boundary stroke.
    pub boundary: BoundaryConfig,
    /// Mosaic overlay.
    pub overlay: OverlayConfig,
    /// Hub registry policy.
    pub retention: Retention,
    /// Orchestrator event policy.
    pub resize_policy: ResizePolicy,
    /// Clear color for the surface; `None` clears to transparent.
    pub background: Option<ColorDef>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            hubs_per_pass: 5,
            spokes_per_hub: 3,
            fan_angle_step_deg: 45.0,
            hub_length: RangeDef::new(200.0, 700.0),
            hub_alpha: 0.6,
            scatter_count: 15,
            scatter_length: RangeDef::new(0.0, 400.0),
            scatter_alpha: 0.5,
            stroke_width: RangeDef::new(8.0, 16.0),
            palette: vec![
                ColorDef::rgb(0xFF, 0x00, 0x00),
                ColorDef::rgb(0xFF, 0xFF, 0xFF),
                ColorDef::rgb(0x00, 0x00, 0xFF),
            ],
            legibility_radius: 400.0,
            legibility_alpha: 0.2,
            boundary: BoundaryConfig::default(),
            overlay: OverlayConfig::default(),
            retention: Retention::Fresh,
            resize_policy: ResizePolicy::EveryEvent,
            background: None,
        }
    }
}

impl FieldConfig {
    /// Minimum spokes per hub.
    pub const MIN_SPOKES: usize = 3;

    /// Fan step in radians.
    pub fn fan_angle_step(&self) -> f64 {
        self.fan_angle_step_deg.to_radians()
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> FieldResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| FieldError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> FieldResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read field config '{}'", path.display()))
            .map_err(FieldError::Other)?;
        Self::from_json_str(&s)
    }

    /// Pretty JSON, as accepted by [`FieldConfig::from_json_str`].
    pub fn to_json_pretty(&self) -> FieldResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FieldError::serde(e.to_string()))
    }

    /// Check every invariant the generator and compositors rely on.
    pub fn validate(&self) -> FieldResult<()> {
        if self.spokes_per_hub < Self::MIN_SPOKES {
            return Err(FieldError::validation(format!(
                "spokes_per_hub must be >= {}",
                Self::MIN_SPOKES
            )));
        }
        if !self.fan_angle_step_deg.is_finite() {
            return Err(FieldError::validation("fan_angle_step_deg must be finite"));
        }
        if self.palette.is_empty() {
            return Err(FieldError::validation("palette must not be empty"));
        }

        self.hub_length.validate("hub_length")?;
        self.scatter_length.validate("scatter_length")?;
        self.stroke_width.validate("stroke_width")?;
        if self.stroke_width.min <= 0.0 {
            return Err(FieldError::validation("stroke_width must be > 0"));
        }
        if self.hub_length.min < 0.0 || self.scatter_length.min < 0.0 {
            return Err(FieldError::validation("segment lengths must be >= 0"));
        }

        if !self.legibility_radius.is_finite() || self.legibility_radius < 0.0 {
            return Err(FieldError::validation(
                "legibility_radius must be finite and >= 0",
            ));
        }

        for (name, alpha) in [
            ("hub_alpha", self.hub_alpha),
            ("scatter_alpha", self.scatter_alpha),
            ("legibility_alpha", self.legibility_alpha),
            ("boundary.alpha", self.boundary.alpha),
            ("overlay.opacity", self.overlay.opacity),
            ("overlay.wash_alpha", self.overlay.wash_alpha),
            ("overlay.tile_alpha", self.overlay.tile_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(FieldError::validation(format!("{name} must be in [0,1]")));
            }
        }

        if !self.boundary.width.is_finite() || self.boundary.width <= 0.0 {
            return Err(FieldError::validation("boundary.width must be > 0"));
        }
        if !self.boundary.offset.is_finite() {
            return Err(FieldError::validation("boundary.offset must be finite"));
        }
        if self.overlay.tile_size == 0 {
            return Err(FieldError::validation("overlay.tile_size must be > 0"));
        }
        if let Retention::Ring { capacity: 0 } = self.retention {
            return Err(FieldError::validation("ring retention capacity must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/field.rs"]
mod tests;
