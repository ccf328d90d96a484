//! Sprite sheet slicing and palette ownership
//!
//! A [`TileAtlas`] cuts every imported sheet into square tiles, numbers them
//! with globally increasing `t<N>` symbols and remembers which contiguous
//! palette range each sheet contributed.

use std::ops::Range;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::MapError;
use crate::palette::{SymbolTable, Tile};
use crate::symbol::Symbol;

/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// The palette range contributed by one imported sprite sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpritesheetGroup {
    pub name: String,
    /// First palette index of this sheet
    pub start: usize,
    /// One past the last palette index of this sheet
    pub end: usize,
}

impl SpritesheetGroup {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of tiles cut from the sheet
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One group of the tile picker: the sheet plus its visible (non-empty) tiles
#[derive(Debug)]
pub struct PaletteGroup<'a> {
    pub group: &'a SpritesheetGroup,
    pub tiles: Vec<(Symbol, &'a Tile)>,
}

/// Outcome of a batch import
#[derive(Debug, Default)]
pub struct ImportReport {
    pub groups: Vec<SpritesheetGroup>,
    /// Files that could not be imported; the rest of the batch still went in
    pub failures: Vec<MapError>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Imported tiles, their symbols and the per-sheet grouping
#[derive(Debug, Clone)]
pub struct TileAtlas {
    tile_size: u32,
    table: SymbolTable,
    groups: Vec<SpritesheetGroup>,
}

impl Default for TileAtlas {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl TileAtlas {
    /// Create an empty atlas. A tile size of zero is treated as one.
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size: tile_size.max(1),
            table: SymbolTable::new(),
            groups: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }

    /// Sheets in import order
    pub fn groups(&self) -> &[SpritesheetGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Slice a decoded sheet into tiles and append them to the palette.
    ///
    /// Tiles are taken row by row, left to right. Pixels beyond the last
    /// whole tile in either direction are cropped.
    pub fn import_sheet(
        &mut self,
        sheet: &RgbaImage,
        sheet_name: impl Into<String>,
    ) -> Result<SpritesheetGroup, MapError> {
        let sheet_name = sheet_name.into();
        let size = self.tile_size;
        let sheet_cols = sheet.width() / size;
        let sheet_rows = sheet.height() / size;
        let start = self.table.len();
        let count = (sheet_cols * sheet_rows) as usize;

        // Check the whole range up front so a failure never leaves half a sheet behind
        for n in start..start + count {
            let symbol = Symbol::Tile(n as u32);
            if self.table.contains(symbol) {
                return Err(MapError::DuplicateSymbol(symbol));
            }
        }

        for y in 0..sheet_rows {
            for x in 0..sheet_cols {
                let sub = image::imageops::crop_imm(sheet, x * size, y * size, size, size).to_image();
                let symbol = Symbol::Tile(self.table.len() as u32);
                self.table.register(symbol, Tile::new(sub))?;
            }
        }

        let group = SpritesheetGroup {
            name: sheet_name,
            start,
            end: self.table.len(),
        };
        debug!(
            "Imported sheet '{}' ({}x{} tiles) as palette {}..{}",
            group.name, sheet_cols, sheet_rows, group.start, group.end
        );
        self.groups.push(group.clone());
        Ok(group)
    }

    /// Decode an image file and import it, using the file name as sheet name
    pub fn import_sheet_file(&mut self, path: &Path) -> Result<SpritesheetGroup, MapError> {
        let sheet = image::open(path)
            .map_err(|source| MapError::ImageDecode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.import_sheet(&sheet, name)
    }

    /// Import several files. A file that fails is reported in the result and
    /// does not stop the others.
    pub fn import_sheets<P: AsRef<Path>>(&mut self, paths: &[P]) -> ImportReport {
        let mut report = ImportReport::default();
        for path in paths {
            let path = path.as_ref();
            match self.import_sheet_file(path) {
                Ok(group) => report.groups.push(group),
                Err(e) => {
                    warn!("Failed to import {}: {}", path.display(), e);
                    report.failures.push(e);
                }
            }
        }
        info!(
            "Imported {} sheet(s), {} failed; palette now holds {} tiles",
            report.groups.len(),
            report.failures.len(),
            self.table.len()
        );
        report
    }

    /// Tile image behind a symbol; `None` for markers and symbols that were
    /// never imported
    pub fn resolve(&self, symbol: Symbol) -> Option<&Tile> {
        self.table.tile_for(symbol)
    }

    /// Tile picker contents: every sheet with its non-empty tiles
    pub fn palette(&self) -> Vec<PaletteGroup<'_>> {
        self.groups
            .iter()
            .map(|group| PaletteGroup {
                group,
                tiles: group
                    .range()
                    .filter_map(|i| Some((self.table.symbol_at(i)?, self.table.tile_at(i)?)))
                    .filter(|(_, tile)| !tile.is_empty())
                    .collect(),
            })
            .collect()
    }

    /// All non-empty tiles in palette order
    pub fn visible_tiles(&self) -> impl Iterator<Item = (Symbol, &Tile)> {
        self.table.iter().filter(|(_, tile)| !tile.is_empty())
    }

    /// Name of the file a tile is exported to
    pub fn tile_file_name(symbol: Symbol) -> PathBuf {
        PathBuf::from(format!("{symbol}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sheet(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]))
    }

    #[test]
    fn test_import_two_tile_sheet() {
        let mut atlas = TileAtlas::new(16);
        let group = atlas.import_sheet(&sheet(32, 16), "grass.png").unwrap();

        assert_eq!(group.start, 0);
        assert_eq!(group.end, 2);
        assert_eq!(atlas.len(), 2);
        assert_eq!(atlas.symbols().symbol_at(0), Some(Symbol::Tile(0)));
        assert_eq!(atlas.symbols().symbol_at(1), Some(Symbol::Tile(1)));
    }

    #[test]
    fn test_import_offsets_by_existing_palette() {
        let mut atlas = TileAtlas::new(16);
        atlas.import_sheet(&sheet(48, 16), "a.png").unwrap();
        let k = atlas.len();

        let group = atlas.import_sheet(&sheet(32, 16), "b.png").unwrap();
        assert_eq!(group.start, k);
        assert_eq!(atlas.symbols().symbol_at(k), Some(Symbol::Tile(k as u32)));
        assert_eq!(
            atlas.symbols().symbol_at(k + 1),
            Some(Symbol::Tile(k as u32 + 1))
        );
    }

    #[test]
    fn test_indices_never_reused_on_reimport() {
        let mut atlas = TileAtlas::new(16);
        let a = atlas.import_sheet(&sheet(32, 32), "a.png").unwrap();
        let b = atlas.import_sheet(&sheet(48, 16), "b.png").unwrap();
        let a_again = atlas.import_sheet(&sheet(32, 32), "a.png").unwrap();

        assert_eq!(a.range(), 0..4);
        assert_eq!(b.range(), 4..7);
        assert_eq!(a_again.range(), 7..11);
        assert_eq!(atlas.symbols().symbol_at(10), Some(Symbol::Tile(10)));
    }

    #[test]
    fn test_groups_are_contiguous() {
        let mut atlas = TileAtlas::new(8);
        atlas.import_sheet(&sheet(16, 16), "a").unwrap();
        atlas.import_sheet(&sheet(4, 4), "tiny").unwrap();
        atlas.import_sheet(&sheet(24, 8), "c").unwrap();

        let groups = atlas.groups();
        for pair in groups.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(groups.last().unwrap().end, atlas.len());
        assert!(groups[1].is_empty());
    }

    #[test]
    fn test_remainder_pixels_are_cropped() {
        let mut atlas = TileAtlas::new(16);
        let group = atlas.import_sheet(&sheet(40, 20), "odd.png").unwrap();
        assert_eq!(group.len(), 2);
        assert!(atlas.symbols().iter().all(|(_, t)| t.size() == 16));
    }

    #[test]
    fn test_tiles_sliced_row_major() {
        let mut image = RgbaImage::new(4, 4);
        // Quadrants: top-left, top-right, bottom-left, bottom-right
        for (x, y, px) in image.enumerate_pixels_mut() {
            let q = (y / 2) * 2 + (x / 2);
            *px = Rgba([q as u8, 0, 0, 255]);
        }
        let mut atlas = TileAtlas::new(2);
        atlas.import_sheet(&image, "quads").unwrap();

        for i in 0..4 {
            let tile = atlas.symbols().tile_at(i).unwrap();
            assert_eq!(tile.image().get_pixel(0, 0).0[0], i as u8);
        }
    }

    #[test]
    fn test_palette_hides_transparent_tiles() {
        let mut image = sheet(32, 16);
        for y in 0..16 {
            for x in 16..32 {
                image.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
        let mut atlas = TileAtlas::new(16);
        atlas.import_sheet(&image, "half.png").unwrap();

        let palette = atlas.palette();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].tiles.len(), 1);
        assert_eq!(palette[0].tiles[0].0, Symbol::Tile(0));
        // Still registered and resolvable
        assert!(atlas.resolve(Symbol::Tile(1)).is_some());
    }

    #[test]
    fn test_import_sheets_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        sheet(16, 16).save(&good).unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"definitely not a png").unwrap();
        let missing = dir.path().join("missing.png");

        let mut atlas = TileAtlas::new(16);
        let report = atlas.import_sheets(&[bad.clone(), good, missing]);

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].name, "good.png");
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(
            &report.failures[0],
            MapError::ImageDecode { path, .. } if *path == bad
        ));
        assert_eq!(atlas.groups().len(), 1);
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn test_zero_tile_size_is_clamped() {
        let atlas = TileAtlas::new(0);
        assert_eq!(atlas.tile_size(), 1);
    }

    #[test]
    fn test_group_serializes_as_flat_range() {
        let group = SpritesheetGroup {
            name: "walls.png".to_string(),
            start: 4,
            end: 7,
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "walls.png", "start": 4, "end": 7 })
        );
    }
}
