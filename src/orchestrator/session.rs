use crate::config::field::FieldConfig;
use crate::field::generator::{SegmentLayer, generate_segments};
use crate::field::registry::HubRegistry;
use crate::field::rng::RandomSource;
use crate::foundation::core::Viewport;
use crate::foundation::error::{FieldError, FieldResult};
use crate::orchestrator::events::{ViewportEvent, coalesce};
use crate::render::compositor::composite_segments;
use crate::render::mosaic::apply_mosaic;
use crate::render::surface::{Surface, SurfaceAttachment};

/// Lifecycle of an [`Orchestrator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrchestratorState {
    /// No surface yet, or the surface was released by an unmount.
    Unmounted,
    /// A surface is attached; resizes trigger passes.
    Ready,
    /// Surface acquisition failed. Every later event is ignored.
    Disabled,
}

/// Summary of one completed draw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassReport {
    /// 1-based pass number.
    pub pass: u64,
    /// Surface size the pass was drawn at.
    pub viewport: Viewport,
    /// Hubs in the registry after this pass appended its batch.
    pub hubs: usize,
    /// Segments radiating from hubs.
    pub hub_segments: usize,
    /// Free-standing segments.
    pub scatter_segments: usize,
    /// Segments drawn at the legibility opacity.
    pub legibility_overrides: usize,
    /// Tiles in the mosaic grid.
    pub tiles: usize,
    /// Tiles that received the shaded fill.
    pub shaded_tiles: usize,
}

impl std::fmt::Display for PassReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pass {} @ {}: hubs={} segments={}+{} legibility_overrides={} shaded_tiles={}/{}",
            self.pass,
            self.viewport,
            self.hubs,
            self.hub_segments,
            self.scatter_segments,
            self.legibility_overrides,
            self.shaded_tiles,
            self.tiles,
        )
    }
}

/// Owns the surface, the hub registry and the random source, and turns mount and resize
/// events into full, synchronous draw passes.
///
/// A pass is: resize the surface, clear it, append a batch of hubs, generate every fan and
/// the scatter layer, stroke them, lay the mosaic overlay, commit. There is no partial redraw.
pub struct Orchestrator<S, R> {
    cfg: FieldConfig,
    rng: R,
    registry: HubRegistry,
    surface: Option<S>,
    disabled: bool,
    passes: u64,
}

impl<S, R> Orchestrator<S, R>
where
    S: Surface,
    R: RandomSource,
{
    /// Validate `cfg` and build an unmounted orchestrator.
    pub fn new(cfg: FieldConfig, rng: R) -> FieldResult<Self> {
        cfg.validate()?;
        let registry = HubRegistry::new(cfg.retention);
        Ok(Self {
            cfg,
            rng,
            registry,
            surface: None,
            disabled: false,
            passes: 0,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OrchestratorState {
        if self.disabled {
            OrchestratorState::Disabled
        } else if self.surface.is_some() {
            OrchestratorState::Ready
        } else {
            OrchestratorState::Unmounted
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    /// The hub registry.
    pub fn registry(&self) -> &HubRegistry {
        &self.registry
    }

    /// The attached surface, if mounted.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Completed passes since construction.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Attach a surface obtained from `acquire` and draw the first pass.
    ///
    /// Acquisition failure is fatal: it is logged once, the orchestrator becomes
    /// [`OrchestratorState::Disabled`] and the error is returned as
    /// [`FieldError::SurfaceUnavailable`]. Mounting while already mounted redraws at the new
    /// size; mounting while disabled does nothing.
    pub fn mount<F>(&mut self, viewport: Viewport, acquire: F) -> FieldResult<Option<PassReport>>
    where
        F: FnOnce(&SurfaceAttachment) -> FieldResult<S>,
    {
        if self.disabled {
            tracing::debug!(%viewport, "mount ignored: orchestrator disabled");
            return Ok(None);
        }
        if self.surface.is_none() {
            let attachment = SurfaceAttachment::background(viewport);
            match acquire(&attachment) {
                Ok(surface) => self.surface = Some(surface),
                Err(err) => {
                    self.disabled = true;
                    tracing::error!(error = %err, "surface unavailable; line field disabled");
                    return Err(match err {
                        FieldError::SurfaceUnavailable(msg) => FieldError::SurfaceUnavailable(msg),
                        other => FieldError::surface_unavailable(other.to_string()),
                    });
                }
            }
        }
        self.redraw(viewport)
    }

    /// Redraw at the new viewport size. Ignored unless mounted.
    pub fn resize(&mut self, viewport: Viewport) -> FieldResult<Option<PassReport>> {
        match self.state() {
            OrchestratorState::Ready => self.redraw(viewport),
            state => {
                tracing::debug!(%viewport, ?state, "resize ignored");
                Ok(None)
            }
        }
    }

    /// Release the surface. The registry is kept until the orchestrator is dropped.
    pub fn unmount(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Process a batch of events in order, one full pass per mount or resize, after applying
    /// the configured [`ResizePolicy`](crate::ResizePolicy).
    ///
    /// A failed mount has already been reported by [`Orchestrator::mount`]; the batch carries
    /// on with the orchestrator disabled. Render errors abort the batch.
    pub fn dispatch<F>(
        &mut self,
        events: impl IntoIterator<Item = ViewportEvent>,
        mut acquire: F,
    ) -> FieldResult<Vec<PassReport>>
    where
        F: FnMut(&SurfaceAttachment) -> FieldResult<S>,
    {
        let mut reports = Vec::new();
        for ev in coalesce(events, self.cfg.resize_policy) {
            let report = match ev {
                ViewportEvent::Mount(v) => match self.mount(v, &mut acquire) {
                    Err(FieldError::SurfaceUnavailable(_)) => None,
                    other => other?,
                },
                ViewportEvent::Resize(v) => self.resize(v)?,
                ViewportEvent::Unmount => {
                    self.unmount();
                    None
                }
            };
            reports.extend(report);
        }
        Ok(reports)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn redraw(&mut self, viewport: Viewport) -> FieldResult<Option<PassReport>> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(None);
        };
        if viewport.is_empty() {
            tracing::debug!(%viewport, "skipping pass for empty viewport");
            return Ok(None);
        }

        surface.resize(viewport)?;
        surface.clear()?;

        self.registry.begin_pass(viewport, self.cfg.hubs_per_pass, &mut self.rng);
        let segments = generate_segments(&self.registry, viewport, &self.cfg, &mut self.rng);
        let stroked = composite_segments(surface, &segments, &self.cfg)?;
        let mosaic = apply_mosaic(surface, &self.cfg.overlay)?;
        surface.finish()?;

        self.passes += 1;
        let hub_segments = segments
            .iter()
            .filter(|s| matches!(s.layer, SegmentLayer::Hub { .. }))
            .count();
        let report = PassReport {
            pass: self.passes,
            viewport,
            hubs: self.registry.len(),
            hub_segments,
            scatter_segments: stroked.segments - hub_segments,
            legibility_overrides: stroked.legibility_overrides,
            tiles: mosaic.tiles,
            shaded_tiles: mosaic.shaded,
        };
        tracing::debug!(%report, "draw pass complete");
        Ok(Some(report))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/session.rs"]
mod tests;
