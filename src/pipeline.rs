use crate::config::field::FieldConfig;
use crate::field::rng::RandomSource;
use crate::foundation::core::{Rgba8, Viewport};
use crate::foundation::error::{FieldError, FieldResult};
use crate::orchestrator::events::ViewportEvent;
use crate::orchestrator::session::{Orchestrator, PassReport};
use crate::render::cpu::CpuSurface;
use crate::render::surface::{FrameRGBA, SurfaceAttachment};

fn cpu_orchestrator<R: RandomSource>(
    cfg: FieldConfig,
    rng: R,
) -> FieldResult<Orchestrator<CpuSurface, R>> {
    Orchestrator::new(cfg, rng)
}

fn acquire_cpu(
    background: Option<Rgba8>,
) -> impl FnMut(&SurfaceAttachment) -> FieldResult<CpuSurface> {
    move |att: &SurfaceAttachment| CpuSurface::new(att.viewport, background)
}

/// Mount a CPU surface at `viewport`, draw one pass and read the frame back.
pub fn render_frame<R: RandomSource>(
    viewport: Viewport,
    cfg: FieldConfig,
    rng: R,
) -> FieldResult<(FrameRGBA, PassReport)> {
    let background = cfg.background.map(|c| c.rgba8());
    let mut orch = cpu_orchestrator(cfg, rng)?;
    let report = orch
        .mount(viewport, acquire_cpu(background))?
        .ok_or_else(|| FieldError::validation(format!("nothing to draw at {viewport}")))?;
    let surface = orch
        .surface()
        .ok_or_else(|| FieldError::render("surface released before readback"))?;
    Ok((surface.frame(), report))
}

/// Mount at the first size, then resize through the rest, one pass per size.
///
/// Returns the final frame and every pass report, in order.
pub fn replay<R: RandomSource>(
    sizes: &[Viewport],
    cfg: FieldConfig,
    rng: R,
) -> FieldResult<(FrameRGBA, Vec<PassReport>)> {
    let (first, rest) = sizes
        .split_first()
        .ok_or_else(|| FieldError::validation("replay needs at least one viewport"))?;

    let background = cfg.background.map(|c| c.rgba8());
    let mut orch = cpu_orchestrator(cfg, rng)?;
    let events = std::iter::once(ViewportEvent::Mount(*first))
        .chain(rest.iter().copied().map(ViewportEvent::Resize));
    let reports = orch.dispatch(events, acquire_cpu(background))?;

    let surface = orch
        .surface()
        .ok_or_else(|| FieldError::render("surface released before readback"))?;
    Ok((surface.frame(), reports))
}
