use crate::config::field::OverlayConfig;
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::FieldResult;
use crate::render::surface::{RectFill, Surface};

/// Parity test for the tile at grid position `(col, row)`.
///
/// A tile is shaded when `(col + row) * tile_size` is a multiple of `2 * tile_size`. Pure in its
/// inputs; `tile_size == 0` shades nothing.
pub fn tile_is_shaded(col: u32, row: u32, tile_size: u32) -> bool {
    if tile_size == 0 {
        return false;
    }
    let size = u64::from(tile_size);
    let offset = (u64::from(col) + u64::from(row)) * size;
    offset % (2 * size) == 0
}

/// Number of tile columns and rows covering `viewport`. Edge tiles may be partial.
pub fn tile_grid(viewport: Viewport, tile_size: u32) -> (u32, u32) {
    if tile_size == 0 {
        return (0, 0);
    }
    (
        viewport.width.div_ceil(tile_size),
        viewport.height.div_ceil(tile_size),
    )
}

/// Surface area of tile `(col, row)`, clipped to the viewport.
pub fn tile_rect(col: u32, row: u32, tile_size: u32, viewport: Viewport) -> Rect {
    let size = f64::from(tile_size);
    let x0 = f64::from(col) * size;
    let y0 = f64::from(row) * size;
    Rect::new(x0, y0, x0 + size, y0 + size).intersect(viewport.rect())
}

/// Overlay counters for one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MosaicStats {
    /// Tiles in the grid.
    pub tiles: usize,
    /// Tiles that received the shaded fill.
    pub shaded: usize,
}

/// Wash the whole surface, then fill every shaded tile. Geometry below is untouched.
pub fn apply_mosaic<S: Surface + ?Sized>(
    surface: &mut S,
    overlay: &OverlayConfig,
) -> FieldResult<MosaicStats> {
    let viewport = surface.size();
    surface.fill_rect(&RectFill {
        rect: viewport.rect(),
        color: overlay.wash_color.rgba8(),
        alpha: overlay.effective_wash_alpha(),
    })?;

    let (cols, rows) = tile_grid(viewport, overlay.tile_size);
    let tile_fill = |rect| RectFill {
        rect,
        color: overlay.tile_color.rgba8(),
        alpha: overlay.effective_tile_alpha(),
    };

    let mut stats = MosaicStats::default();
    for col in 0..cols {
        for row in 0..rows {
            stats.tiles += 1;
            if !tile_is_shaded(col, row, overlay.tile_size) {
                continue;
            }
            surface.fill_rect(&tile_fill(tile_rect(col, row, overlay.tile_size, viewport)))?;
            stats.shaded += 1;
        }
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/mosaic.rs"]
mod tests;
