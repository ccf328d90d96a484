//! Core data structures for tilepaint
//!
//! This crate provides the tile palette and layered map model:
//! - `Symbol` - Cell code (`e0` empty, `c0` collision, `t<N>` palette tile)
//! - `SymbolTable` / `Tile` - Ordered palette with O(1) symbol lookup
//! - `TileAtlas` - Slices sprite sheets into tiles and groups them per sheet
//! - `LayeredGrid` - Fixed stack of rectangular layers with resize and placement
//! - `codec` - Per-layer text files and tile image export
//! - `render` - Visible draw list for a grid and atlas

mod atlas;
pub mod codec;
mod error;
mod grid;
mod palette;
pub mod render;
mod symbol;

pub use atlas::{ImportReport, PaletteGroup, SpritesheetGroup, TileAtlas, DEFAULT_TILE_SIZE};
pub use codec::{export_map, export_tiles, load_grid, save_grid, LayerNaming, COLLISION_FILE};
pub use error::MapError;
pub use grid::{LayerKind, LayeredGrid, DEFAULT_COLS, DEFAULT_LAYER_COUNT, DEFAULT_ROWS};
pub use palette::{SymbolTable, Tile};
pub use render::{render_cells, CellDraw, CellVisual, COLLISION_OVERLAY};
pub use symbol::Symbol;
