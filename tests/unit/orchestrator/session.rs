use super::*;
use crate::config::field::{ResizePolicy, Retention};
use crate::field::rng::{Rng64, ScriptedRandom};
use crate::render::recording::{Call, RecordingSurface};

type TestOrchestrator<R> = Orchestrator<RecordingSurface, R>;

fn vp(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h)
}

fn acquire(att: &SurfaceAttachment) -> FieldResult<RecordingSurface> {
    Ok(RecordingSurface::new(att.viewport))
}

fn mounted(cfg: FieldConfig, seed: u64) -> TestOrchestrator<Rng64> {
    let mut o: TestOrchestrator<Rng64> = Orchestrator::new(cfg, Rng64::new(seed)).unwrap();
    o.mount(vp(800, 600), acquire).unwrap();
    o
}

#[test]
fn new_rejects_invalid_config() {
    let cfg = FieldConfig {
        spokes_per_hub: 1,
        ..FieldConfig::default()
    };
    assert!(TestOrchestrator::new(cfg, Rng64::new(0)).is_err());
}

#[test]
fn mount_draws_one_full_pass() {
    let mut o = TestOrchestrator::new(FieldConfig::default(), Rng64::new(1)).unwrap();
    assert_eq!(o.state(), OrchestratorState::Unmounted);

    let report = o.mount(vp(800, 600), acquire).unwrap().unwrap();
    assert_eq!(o.state(), OrchestratorState::Ready);
    assert_eq!(report.pass, 1);
    assert_eq!(report.viewport, vp(800, 600));
    assert_eq!(report.hubs, 5);
    assert_eq!(report.hub_segments, 15);
    assert_eq!(report.scatter_segments, 15);
    assert_eq!(report.tiles, 300);
    assert_eq!(report.shaded_tiles, 150);

    let s = o.surface().unwrap();
    assert_eq!(s.calls.first(), Some(&Call::Resize(vp(800, 600))));
    assert_eq!(s.calls.get(1), Some(&Call::Clear));
    assert_eq!(s.calls.last(), Some(&Call::Finish));
    assert_eq!(s.strokes().len(), 2 * 30);
    assert_eq!(s.fills().len(), 1 + 150);
}

#[test]
fn each_resize_is_exactly_one_clear_and_redraw() {
    let mut o = mounted(FieldConfig::default(), 2);
    for (i, w) in [640u32, 1024, 1280].into_iter().enumerate() {
        let report = o.resize(vp(w, 480)).unwrap().unwrap();
        assert_eq!(report.pass, i as u64 + 2);
        assert_eq!(o.surface().unwrap().size, vp(w, 480));
    }
    let s = o.surface().unwrap();
    assert_eq!(s.count(|c| matches!(c, Call::Clear)), 4);
    assert_eq!(s.count(|c| matches!(c, Call::Finish)), 4);
    assert_eq!(s.count(|c| matches!(c, Call::Resize(_))), 4);
}

#[test]
fn fresh_retention_starts_every_pass_from_scratch() {
    let mut o = mounted(FieldConfig::default(), 3);
    for _ in 0..5 {
        let report = o.resize(vp(800, 600)).unwrap().unwrap();
        assert_eq!(report.hubs, 5);
        assert_eq!(report.hub_segments, 15);
    }
}

#[test]
fn ring_retention_accumulates_five_hubs_per_pass() {
    let cfg = FieldConfig {
        retention: Retention::Ring { capacity: 10_000 },
        ..FieldConfig::default()
    };
    let mut o = mounted(cfg, 4);
    for k in 2..=8u64 {
        let report = o.resize(vp(800, 600)).unwrap().unwrap();
        assert_eq!(report.hubs as u64, 5 * k);
        assert_eq!(report.hub_segments as u64, 15 * k);
    }
    assert_eq!(o.registry().len(), 40);
}

#[test]
fn ring_retention_is_capped() {
    let cfg = FieldConfig {
        retention: Retention::Ring { capacity: 12 },
        ..FieldConfig::default()
    };
    let mut o = mounted(cfg, 5);
    for _ in 0..10 {
        o.resize(vp(800, 600)).unwrap();
    }
    assert_eq!(o.registry().len(), 12);
    assert_eq!(o.registry().evicted(), 5 * 11 - 12);
}

#[test]
fn scripted_hubs_near_and_far_from_center() {
    let cfg = FieldConfig {
        hubs_per_pass: 2,
        scatter_count: 0,
        ..FieldConfig::default()
    };
    // Hub A at (390, 300): 10px from center. Hub B at (50, 50): ~457px away.
    let rng = ScriptedRandom::new([390.0 / 800.0, 0.5, 50.0 / 800.0, 50.0 / 600.0, 0.3]);
    let mut o: TestOrchestrator<ScriptedRandom> = Orchestrator::new(cfg, rng).unwrap();
    let report = o.mount(vp(800, 600), acquire).unwrap().unwrap();
    assert_eq!(report.legibility_overrides, 3);

    let strokes = o.surface().unwrap().strokes();
    assert_eq!(strokes.len(), 12);
    let primary: Vec<_> = strokes.iter().step_by(2).collect();
    for s in &primary[..3] {
        assert!((s.from.x - 390.0).abs() < 1e-9);
        assert_eq!(s.alpha, 0.2);
    }
    for s in &primary[3..] {
        assert!((s.from.x - 50.0).abs() < 1e-9);
        assert_eq!(s.alpha, 0.6);
    }
    for s in strokes.iter().skip(1).step_by(2) {
        assert_eq!(s.alpha, 0.3);
    }
}

#[test]
fn failed_acquisition_disables_without_retry() {
    let mut o = TestOrchestrator::new(FieldConfig::default(), Rng64::new(6)).unwrap();
    let err = o
        .mount(vp(800, 600), |_| Err(FieldError::render("no 2d context")))
        .unwrap_err();
    assert!(matches!(err, FieldError::SurfaceUnavailable(_)));
    assert_eq!(o.state(), OrchestratorState::Disabled);

    let mut attempts = 0;
    let again = o
        .mount(vp(800, 600), |att| {
            attempts += 1;
            acquire(att)
        })
        .unwrap();
    assert!(again.is_none());
    assert_eq!(attempts, 0);
    assert!(o.resize(vp(1024, 768)).unwrap().is_none());
    assert_eq!(o.passes(), 0);
}

#[test]
fn resize_before_mount_is_ignored() {
    let mut o = TestOrchestrator::new(FieldConfig::default(), Rng64::new(7)).unwrap();
    assert!(o.resize(vp(800, 600)).unwrap().is_none());
    assert_eq!(o.registry().len(), 0);
}

#[test]
fn empty_viewport_skips_the_pass() {
    let mut o = mounted(FieldConfig::default(), 8);
    assert!(o.resize(vp(0, 600)).unwrap().is_none());
    assert_eq!(o.passes(), 1);
    assert_eq!(o.surface().unwrap().size, vp(800, 600));
}

#[test]
fn mount_at_empty_viewport_stays_ready_for_resize() {
    let mut o = TestOrchestrator::new(FieldConfig::default(), Rng64::new(8)).unwrap();
    assert!(o.mount(vp(0, 600), acquire).unwrap().is_none());
    assert_eq!(o.state(), OrchestratorState::Ready);
    assert_eq!(o.passes(), 0);
    assert!(o.registry().is_empty());

    let report = o.resize(vp(800, 600)).unwrap().unwrap();
    assert_eq!(report.pass, 1);
    assert_eq!(report.hubs, 5);
    assert_eq!(o.surface().unwrap().size, vp(800, 600));
}

#[test]
fn mount_passes_a_background_attachment() {
    let mut o = TestOrchestrator::new(FieldConfig::default(), Rng64::new(9)).unwrap();
    let mut seen = None;
    o.mount(vp(320, 200), |att| {
        seen = Some(att.clone());
        acquire(att)
    })
    .unwrap();
    let att = seen.unwrap();
    assert_eq!(att.viewport, vp(320, 200));
    assert!(!att.intercepts_pointer);
    assert!(att.fills_viewport);
}

#[test]
fn dispatch_runs_one_pass_per_event() {
    let mut o = TestOrchestrator::new(FieldConfig::default(), Rng64::new(10)).unwrap();
    let reports = o
        .dispatch(
            [
                ViewportEvent::Mount(vp(800, 600)),
                ViewportEvent::Resize(vp(810, 600)),
                ViewportEvent::Resize(vp(820, 600)),
                ViewportEvent::Resize(vp(830, 600)),
            ],
            acquire,
        )
        .unwrap();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports.last().unwrap().viewport, vp(830, 600));
}

#[test]
fn dispatch_coalesces_resize_bursts_when_configured() {
    let cfg = FieldConfig {
        resize_policy: ResizePolicy::CoalesceBursts,
        ..FieldConfig::default()
    };
    let mut o = TestOrchestrator::new(cfg, Rng64::new(11)).unwrap();
    let reports = o
        .dispatch(
            [
                ViewportEvent::Mount(vp(800, 600)),
                ViewportEvent::Resize(vp(810, 600)),
                ViewportEvent::Resize(vp(820, 600)),
                ViewportEvent::Resize(vp(830, 600)),
            ],
            acquire,
        )
        .unwrap();
    let sizes: Vec<Viewport> = reports.iter().map(|r| r.viewport).collect();
    assert_eq!(sizes, vec![vp(800, 600), vp(830, 600)]);
}

#[test]
fn dispatch_continues_disabled_after_failed_mount() {
    let mut o = TestOrchestrator::new(FieldConfig::default(), Rng64::new(12)).unwrap();
    let reports = o
        .dispatch(
            [
                ViewportEvent::Mount(vp(800, 600)),
                ViewportEvent::Resize(vp(900, 600)),
            ],
            |_| Err(FieldError::surface_unavailable("headless")),
        )
        .unwrap();
    assert!(reports.is_empty());
    assert_eq!(o.state(), OrchestratorState::Disabled);
}

#[test]
fn unmount_releases_the_surface_and_stops_redraws() {
    let mut o = mounted(FieldConfig::default(), 13);
    let surface = o.unmount();
    assert!(surface.is_some());
    assert_eq!(o.state(), OrchestratorState::Unmounted);
    assert!(o.resize(vp(800, 600)).unwrap().is_none());
}

#[test]
fn same_seed_gives_same_strokes() {
    let a = mounted(FieldConfig::default(), 42);
    let b = mounted(FieldConfig::default(), 42);
    assert_eq!(a.surface().unwrap().calls, b.surface().unwrap().calls);
}

#[test]
fn report_display_is_one_line() {
    let report = PassReport {
        pass: 3,
        viewport: vp(800, 600),
        hubs: 5,
        hub_segments: 15,
        scatter_segments: 15,
        legibility_overrides: 4,
        tiles: 300,
        shaded_tiles: 150,
    };
    assert_eq!(
        report.to_string(),
        "pass 3 @ 800x600: hubs=5 segments=15+15 legibility_overrides=4 shaded_tiles=150/300"
    );
}
