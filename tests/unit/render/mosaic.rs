use super::*;
use crate::foundation::core::Rgba8;
use crate::render::recording::RecordingSurface;

#[test]
fn parity_matches_reference_tiles() {
    assert!(tile_is_shaded(0, 0, 40));
    assert!(tile_is_shaded(2, 2, 40));
    assert!(!tile_is_shaded(1, 0, 40));
    assert!(!tile_is_shaded(0, 1, 40));
    assert!(tile_is_shaded(1, 1, 40));
}

#[test]
fn parity_is_a_pure_function_of_coordinates() {
    for size in [1u32, 7, 40, 64] {
        for col in 0..12 {
            for row in 0..12 {
                let a = tile_is_shaded(col, row, size);
                assert_eq!(a, tile_is_shaded(col, row, size));
                assert_eq!(a, (col + row) % 2 == 0);
            }
        }
    }
    assert!(!tile_is_shaded(0, 0, 0));
}

#[test]
fn grid_covers_partial_edge_tiles() {
    assert_eq!(tile_grid(Viewport::new(800, 600), 40), (20, 15));
    assert_eq!(tile_grid(Viewport::new(810, 601), 40), (21, 16));
    assert_eq!(
        tile_rect(20, 15, 40, Viewport::new(810, 601)),
        Rect::new(800.0, 600.0, 810.0, 601.0)
    );
}

#[test]
fn wash_is_drawn_first_over_the_whole_surface() {
    let overlay = OverlayConfig::default();
    let mut surface = RecordingSurface::new(Viewport::new(800, 600));
    apply_mosaic(&mut surface, &overlay).unwrap();

    let fills = surface.fills();
    let wash = fills[0];
    assert_eq!(wash.rect, Rect::new(0.0, 0.0, 800.0, 600.0));
    assert_eq!(wash.color, Rgba8::rgb(255, 255, 255));
    assert!((wash.alpha - 0.24).abs() < 1e-6);
}

#[test]
fn shaded_tiles_form_a_checkerboard() {
    let overlay = OverlayConfig::default();
    let mut surface = RecordingSurface::new(Viewport::new(800, 600));
    let stats = apply_mosaic(&mut surface, &overlay).unwrap();

    assert_eq!(stats.tiles, 20 * 15);
    assert_eq!(stats.shaded, 150);

    let tiles = &surface.fills()[1..];
    assert_eq!(tiles.len(), 150);
    for t in tiles {
        let col = (t.rect.x0 / 40.0) as u32;
        let row = (t.rect.y0 / 40.0) as u32;
        assert!(tile_is_shaded(col, row, 40));
        assert_eq!(t.color, Rgba8::rgb(200, 200, 200));
        assert!((t.alpha - 0.03).abs() < 1e-6);
    }
    assert!(tiles.iter().any(|t| t.rect == Rect::new(80.0, 80.0, 120.0, 120.0)));
    assert!(!tiles.iter().any(|t| t.rect == Rect::new(40.0, 0.0, 80.0, 40.0)));
}
