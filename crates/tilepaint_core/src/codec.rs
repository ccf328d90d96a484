//! Plain-text map format and tile export
//!
//! A map is stored as one text file per layer. Each file has one line per
//! row, and each line holds the row's symbols separated by single spaces:
//!
//! ```text
//! t3 e0
//! e0 c0
//! ```
//!
//! Saved maps name every layer `map_layer_<L>.txt`. Exported maps rename
//! the collision layer (layer 2) to `COLLISION.txt` and ship every visible
//! tile next to the layer files as `<symbol>.png`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::atlas::TileAtlas;
use crate::error::MapError;
use crate::grid::{LayerKind, LayeredGrid};
use crate::symbol::Symbol;

/// File name of the exported collision layer
pub const COLLISION_FILE: &str = "COLLISION.txt";

/// How layer files are named on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerNaming {
    /// `map_layer_<L>.txt` for every layer (save/load)
    #[default]
    Generic,
    /// Like `Generic`, but the collision layer is written as `COLLISION.txt`
    Export,
}

impl LayerNaming {
    pub fn file_name(&self, layer: usize) -> String {
        match self {
            LayerNaming::Export if layer == LayerKind::COLLISION_LAYER => COLLISION_FILE.to_string(),
            _ => format!("map_layer_{layer}.txt"),
        }
    }

    pub fn path(&self, dir: &Path, layer: usize) -> PathBuf {
        dir.join(self.file_name(layer))
    }
}

/// Serialize one layer: `rows` lines of `cols` space-separated symbols
pub fn encode_layer(grid: &LayeredGrid, layer: usize) -> Result<String, MapError> {
    let mut out = String::with_capacity(grid.rows() * grid.cols() * 4);
    for row in grid.layer_rows(layer)? {
        let tokens: Vec<String> = row.iter().map(Symbol::to_string).collect();
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }
    Ok(out)
}

/// Parse a layer file into `grid`.
///
/// At most `grid.rows()` lines are read; lines past that are ignored. When
/// the text has fewer lines, the remaining rows are left exactly as they
/// were in `grid`. `path` is only used for error messages.
pub fn decode_layer(
    text: &str,
    path: &Path,
    grid: &mut LayeredGrid,
    layer: usize,
) -> Result<(), MapError> {
    let cols = grid.cols();
    let mut row_buf = Vec::with_capacity(cols);
    for (row, line) in text.lines().take(grid.rows()).enumerate() {
        row_buf.clear();
        for token in line.split_whitespace() {
            let symbol = token.parse::<Symbol>().map_err(|_| MapError::Parse {
                path: path.to_path_buf(),
                line: row + 1,
                message: format!("invalid symbol '{token}'"),
            })?;
            row_buf.push(symbol);
        }
        if row_buf.len() != cols {
            return Err(MapError::Parse {
                path: path.to_path_buf(),
                line: row + 1,
                message: format!("expected {cols} symbols, found {}", row_buf.len()),
            });
        }
        grid.set_row(layer, row, &row_buf)?;
    }
    Ok(())
}

/// Write every layer of `grid` into `dir` using `naming`.
///
/// Stops at the first file that cannot be written; files already written
/// are left in place.
pub fn save_layers(grid: &LayeredGrid, dir: &Path, naming: LayerNaming) -> Result<(), MapError> {
    for layer in 0..grid.layer_count() {
        let path = naming.path(dir, layer);
        let text = encode_layer(grid, layer)?;
        std::fs::write(&path, text).map_err(|e| MapError::io(&path, e))?;
        debug!("Wrote layer {} to {:?}", layer, path);
    }
    Ok(())
}

/// Save a map as `map_layer_<L>.txt` files
pub fn save_grid(grid: &LayeredGrid, dir: &Path) -> Result<(), MapError> {
    save_layers(grid, dir, LayerNaming::Generic)?;
    info!("Map layers saved to {:?}", dir);
    Ok(())
}

/// Load a saved map on top of `base`.
///
/// All layer files must exist; the check runs before anything is read.
/// The result starts as a copy of `base`, so rows missing from a short file
/// keep `base`'s content. `base` itself is never modified, so a failed load
/// leaves the caller's grid untouched.
pub fn load_grid(dir: &Path, base: &LayeredGrid) -> Result<LayeredGrid, MapError> {
    let naming = LayerNaming::Generic;
    let paths: Vec<PathBuf> = (0..base.layer_count())
        .map(|layer| naming.path(dir, layer))
        .collect();

    if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
        return Err(MapError::MissingFile {
            path: missing.clone(),
        });
    }

    let mut grid = base.clone();
    for (layer, path) in paths.iter().enumerate() {
        let text = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
        decode_layer(&text, path, &mut grid, layer)?;
    }
    info!("Map layers loaded from {:?}", dir);
    Ok(grid)
}

/// Write every non-empty palette tile to `dir` as `<symbol>.png`.
///
/// Fully transparent tiles are skipped. The first failure aborts the export.
/// Returns the number of files written.
pub fn export_tiles(atlas: &TileAtlas, dir: &Path) -> Result<usize, MapError> {
    let mut written = 0;
    for (symbol, tile) in atlas.visible_tiles() {
        let path = dir.join(TileAtlas::tile_file_name(symbol));
        tile.image()
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| MapError::ImageWrite {
                path: path.clone(),
                source,
            })?;
        written += 1;
    }
    Ok(written)
}

/// Write the export layout: layer files (collision layer as `COLLISION.txt`)
/// followed by the tile images
pub fn export_map(grid: &LayeredGrid, atlas: &TileAtlas, dir: &Path) -> Result<(), MapError> {
    save_layers(grid, dir, LayerNaming::Export)?;
    let tiles = export_tiles(atlas, dir)?;
    info!(
        "Export complete: {} layer file(s) and {} tile(s) written to {:?}",
        grid.layer_count(),
        tiles,
        dir
    );
    Ok(())
}
