//! Draw list for the map view
//!
//! The UI walks the list and draws each entry; this module only decides
//! what is visible and in what order.

use crate::atlas::TileAtlas;
use crate::grid::LayeredGrid;
use crate::palette::Tile;
use crate::symbol::Symbol;

/// Flat overlay drawn over collision cells (magenta, mostly transparent)
pub const COLLISION_OVERLAY: [u8; 4] = [255, 0, 255, 48];

/// What to draw in one cell for one layer
#[derive(Debug, Clone, Copy)]
pub enum CellVisual<'a> {
    Overlay([u8; 4]),
    Image(&'a Tile),
}

#[derive(Debug, Clone, Copy)]
pub struct CellDraw<'a> {
    pub layer: usize,
    pub row: usize,
    pub col: usize,
    pub visual: CellVisual<'a>,
}

/// Build the draw list: cells row by row, layers bottom to top within a cell.
///
/// `e0` cells, symbols the atlas does not know and fully transparent tiles
/// produce nothing.
pub fn render_cells<'a>(grid: &LayeredGrid, atlas: &'a TileAtlas) -> Vec<CellDraw<'a>> {
    let mut draws = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            for layer in 0..grid.layer_count() {
                let Ok(symbol) = grid.get(layer, row, col) else {
                    continue;
                };
                let visual = match symbol {
                    Symbol::Empty => continue,
                    Symbol::Collision => CellVisual::Overlay(COLLISION_OVERLAY),
                    Symbol::Tile(_) => match atlas.resolve(symbol) {
                        Some(tile) if !tile.is_empty() => CellVisual::Image(tile),
                        _ => continue,
                    },
                };
                draws.push(CellDraw {
                    layer,
                    row,
                    col,
                    visual,
                });
            }
        }
    }
    draws
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_render_order_and_skips() {
        let mut atlas = TileAtlas::new(2);
        atlas
            .import_sheet(&RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])), "one")
            .unwrap();

        let mut grid = LayeredGrid::new(1, 2, 4).unwrap();
        grid.place(0, 0, 0, Symbol::Tile(0)).unwrap();
        grid.place(2, 0, 0, Symbol::Collision).unwrap();
        // Dangling symbol, e.g. from a map saved with more sheets imported
        grid.place(1, 0, 1, Symbol::Tile(99)).unwrap();

        let draws = render_cells(&grid, &atlas);
        assert_eq!(draws.len(), 2);
        assert_eq!((draws[0].layer, draws[0].col), (0, 0));
        assert!(matches!(draws[0].visual, CellVisual::Image(_)));
        assert_eq!(draws[1].layer, 2);
        assert!(matches!(
            draws[1].visual,
            CellVisual::Overlay(COLLISION_OVERLAY)
        ));
    }

    #[test]
    fn test_transparent_tiles_not_drawn() {
        let mut atlas = TileAtlas::new(2);
        atlas.import_sheet(&RgbaImage::new(2, 2), "clear").unwrap();
        let mut grid = LayeredGrid::new(1, 1, 4).unwrap();
        grid.place(0, 0, 0, Symbol::Tile(0)).unwrap();
        assert!(render_cells(&grid, &atlas).is_empty());
    }
}
