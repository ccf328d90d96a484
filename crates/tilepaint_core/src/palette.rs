//! Tile images and the symbol table that indexes them

use std::collections::HashMap;

use image::RgbaImage;

use crate::error::MapError;
use crate::symbol::Symbol;

/// A single square tile cut out of a sprite sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    image: RgbaImage,
}

impl Tile {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Edge length in pixels
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// True when every pixel is fully transparent.
    ///
    /// Empty tiles stay in the palette (their symbols remain valid) but are
    /// hidden from the tile picker and skipped on export.
    pub fn is_empty(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }
}

/// Ordered palette of `(Symbol, Tile)` pairs with O(1) symbol lookup.
///
/// Indices are positional and append-only: once registered, a symbol keeps
/// its index for the lifetime of the table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<(Symbol, Tile)>,
    index: HashMap<Symbol, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new palette entry and return its index
    pub fn register(&mut self, symbol: Symbol, tile: Tile) -> Result<usize, MapError> {
        if symbol.is_reserved() {
            return Err(MapError::ReservedSymbol(symbol));
        }
        if self.index.contains_key(&symbol) {
            return Err(MapError::DuplicateSymbol(symbol));
        }
        let idx = self.entries.len();
        self.entries.push((symbol, tile));
        self.index.insert(symbol, idx);
        Ok(idx)
    }

    pub fn index_of(&self, symbol: Symbol) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    pub fn symbol_at(&self, index: usize) -> Option<Symbol> {
        self.entries.get(index).map(|(symbol, _)| *symbol)
    }

    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.entries.get(index).map(|(_, tile)| tile)
    }

    /// Tile for a symbol, or `None` for markers and unregistered symbols
    pub fn tile_for(&self, symbol: Symbol) -> Option<&Tile> {
        self.index_of(symbol).and_then(|idx| self.tile_at(idx))
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.index.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in palette order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Tile)> {
        self.entries.iter().map(|(symbol, tile)| (*symbol, tile))
    }
}
