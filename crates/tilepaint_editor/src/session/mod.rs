//! The editing session
//!
//! One [`EditorSession`] owns everything the editor mutates: the map grid,
//! the tile atlas and the current tool selection. UI handlers receive it by
//! reference and call the operations below.

use std::path::Path;

use tilepaint_core::{
    codec, render_cells, CellDraw, ImportReport, LayeredGrid, MapError, PaletteGroup, Symbol,
    TileAtlas,
};
use tracing::info;

use crate::preferences::EditorSettings;

/// Editor state for one open map
#[derive(Debug, Clone)]
pub struct EditorSession {
    settings: EditorSettings,
    atlas: TileAtlas,
    grid: LayeredGrid,
    current_tile: Symbol,
    current_layer: usize,
    dirty: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        let settings = EditorSettings::default();
        Self {
            atlas: TileAtlas::new(settings.tile_size),
            grid: LayeredGrid::default(),
            settings,
            current_tile: Symbol::Empty,
            current_layer: 0,
            dirty: false,
        }
    }
}

impl EditorSession {
    /// Start a session with an empty atlas and an empty map sized from `settings`
    pub fn new(settings: EditorSettings) -> Result<Self, MapError> {
        let grid = LayeredGrid::new(settings.rows, settings.cols, settings.layer_count)?;
        Ok(Self {
            atlas: TileAtlas::new(settings.tile_size),
            grid,
            settings,
            current_tile: Symbol::Empty,
            current_layer: 0,
            dirty: false,
        })
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn grid(&self) -> &LayeredGrid {
        &self.grid
    }

    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    pub fn current_tile(&self) -> Symbol {
        self.current_tile
    }

    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    /// Check if the map has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // Tool selection

    /// Select the symbol painted by subsequent clicks.
    ///
    /// Palette tiles must have been imported; the markers are always allowed.
    pub fn set_current_tile(&mut self, symbol: Symbol) -> Result<(), MapError> {
        if !symbol.is_reserved() && self.atlas.resolve(symbol).is_none() {
            return Err(MapError::UnknownSymbol(symbol));
        }
        self.current_tile = symbol;
        Ok(())
    }

    pub fn select_eraser(&mut self) {
        self.current_tile = Symbol::Empty;
    }

    pub fn select_collision(&mut self) {
        self.current_tile = Symbol::Collision;
    }

    pub fn set_current_layer(&mut self, layer: usize) -> Result<(), MapError> {
        if layer >= self.grid.layer_count() {
            return Err(MapError::NoSuchLayer(layer));
        }
        self.current_layer = layer;
        Ok(())
    }

    /// Label of each layer, for the layer selector
    pub fn layer_labels(&self) -> Vec<String> {
        (0..self.grid.layer_count())
            .map(|layer| self.grid.layer_label(layer))
            .collect()
    }

    // Map editing

    /// Paint the current tile into one cell
    pub fn paint_cell(&mut self, layer: usize, row: usize, col: usize) -> Result<(), MapError> {
        self.grid.place(layer, row, col, self.current_tile)?;
        self.dirty = true;
        Ok(())
    }

    /// Paint the current tile on the current layer
    pub fn paint_at(&mut self, row: usize, col: usize) -> Result<(), MapError> {
        self.paint_cell(self.current_layer, row, col)
    }

    pub fn resize_map(&mut self, rows: usize, cols: usize) -> Result<(), MapError> {
        self.grid.resize(rows, cols)?;
        self.dirty = true;
        info!("Resized map to {}x{}", rows, cols);
        Ok(())
    }

    /// Erase every layer above the ground layer
    pub fn clear_top_layers(&mut self) {
        self.grid.clear_layers_from(1);
        self.dirty = true;
    }

    // Palette

    /// Import sprite sheets; failures are returned per file in the report
    pub fn import_sheets<P: AsRef<Path>>(&mut self, paths: &[P]) -> ImportReport {
        self.atlas.import_sheets(paths)
    }

    /// Tile picker contents grouped by sheet
    pub fn palette(&self) -> Vec<PaletteGroup<'_>> {
        self.atlas.palette()
    }

    /// Draw list for the map view
    pub fn render_cells(&self) -> Vec<CellDraw<'_>> {
        render_cells(&self.grid, &self.atlas)
    }

    // Files

    pub fn save_to(&mut self, dir: &Path) -> Result<(), MapError> {
        codec::save_grid(&self.grid, dir)?;
        self.dirty = false;
        Ok(())
    }

    /// Load a saved map into the current grid. On any error the grid is unchanged.
    pub fn load_from(&mut self, dir: &Path) -> Result<(), MapError> {
        self.grid = codec::load_grid(dir, &self.grid)?;
        self.dirty = false;
        Ok(())
    }

    /// Write layer files and tile images for the game runtime
    pub fn export_to(&self, dir: &Path) -> Result<(), MapError> {
        codec::export_map(&self.grid, &self.atlas, dir)
    }
}
