//! Multi-layer grid of cell symbols

use crate::error::MapError;
use crate::symbol::Symbol;

/// Default number of stacked layers
pub const DEFAULT_LAYER_COUNT: usize = 4;
/// Default map height in cells
pub const DEFAULT_ROWS: usize = 20;
/// Default map width in cells
pub const DEFAULT_COLS: usize = 20;

/// Conventional role of a layer, by index. Only used for labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Ground,
    Midground,
    Collision,
    Top,
}

impl LayerKind {
    pub const COLLISION_LAYER: usize = 2;

    /// Role for a layer index; `None` past the fourth layer
    pub fn from_index(layer: usize) -> Option<Self> {
        match layer {
            0 => Some(LayerKind::Ground),
            1 => Some(LayerKind::Midground),
            2 => Some(LayerKind::Collision),
            3 => Some(LayerKind::Top),
            _ => None,
        }
    }

    /// Label shown in the layer selector
    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Ground => "Ground",
            LayerKind::Midground => "Midground",
            LayerKind::Collision => "COLLISION",
            LayerKind::Top => "Top",
        }
    }
}

/// `layer_count × rows × cols` cells, one flat row-major vector per layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredGrid {
    rows: usize,
    cols: usize,
    layers: Vec<Vec<Symbol>>,
}

impl Default for LayeredGrid {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            layers: vec![vec![Symbol::Empty; DEFAULT_ROWS * DEFAULT_COLS]; DEFAULT_LAYER_COUNT],
        }
    }
}

impl LayeredGrid {
    /// Create a grid with every cell set to `e0`
    pub fn new(rows: usize, cols: usize, layer_count: usize) -> Result<Self, MapError> {
        let cells = check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            layers: vec![vec![Symbol::Empty; cells]; layer_count],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Display label for a layer; layers beyond the conventional four get a numbered name
    pub fn layer_label(&self, layer: usize) -> String {
        LayerKind::from_index(layer)
            .map(|kind| kind.label().to_string())
            .unwrap_or_else(|| format!("Layer {layer}"))
    }

    fn offset(&self, layer: usize, row: usize, col: usize) -> Result<usize, MapError> {
        if layer >= self.layers.len() || row >= self.rows || col >= self.cols {
            return Err(MapError::OutOfBounds { layer, row, col });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, layer: usize, row: usize, col: usize) -> Result<Symbol, MapError> {
        let idx = self.offset(layer, row, col)?;
        Ok(self.layers[layer][idx])
    }

    /// Overwrite a single cell
    pub fn place(
        &mut self,
        layer: usize,
        row: usize,
        col: usize,
        symbol: Symbol,
    ) -> Result<(), MapError> {
        let idx = self.offset(layer, row, col)?;
        self.layers[layer][idx] = symbol;
        Ok(())
    }

    /// Change the map size, keeping every cell inside both the old and the
    /// new bounds. New cells are `e0`; cells outside the new bounds are dropped.
    pub fn resize(&mut self, new_rows: usize, new_cols: usize) -> Result<(), MapError> {
        let cell_count = check_dimensions(new_rows, new_cols)?;
        let keep_rows = self.rows.min(new_rows);
        let keep_cols = self.cols.min(new_cols);

        let layers = self
            .layers
            .iter()
            .map(|old| {
                let mut cells = vec![Symbol::Empty; cell_count];
                for r in 0..keep_rows {
                    let src = r * self.cols;
                    let dst = r * new_cols;
                    cells[dst..dst + keep_cols].copy_from_slice(&old[src..src + keep_cols]);
                }
                cells
            })
            .collect();

        self.layers = layers;
        self.rows = new_rows;
        self.cols = new_cols;
        Ok(())
    }

    /// Reset every layer from `start_layer` upward to `e0`
    pub fn clear_layers_from(&mut self, start_layer: usize) {
        for layer in self.layers.iter_mut().skip(start_layer) {
            layer.fill(Symbol::Empty);
        }
    }

    /// Set every cell of one layer
    pub fn fill_layer(&mut self, layer: usize, symbol: Symbol) -> Result<(), MapError> {
        let cells = self
            .layers
            .get_mut(layer)
            .ok_or(MapError::NoSuchLayer(layer))?;
        cells.fill(symbol);
        Ok(())
    }

    /// Rows of one layer, top to bottom
    pub fn layer_rows(&self, layer: usize) -> Result<impl Iterator<Item = &[Symbol]>, MapError> {
        let cells = self.layers.get(layer).ok_or(MapError::NoSuchLayer(layer))?;
        Ok(cells.chunks(self.cols))
    }

    /// Replace a whole row of one layer. `symbols` must be exactly `cols` long.
    pub fn set_row(&mut self, layer: usize, row: usize, symbols: &[Symbol]) -> Result<(), MapError> {
        if symbols.len() != self.cols {
            return Err(MapError::RowLength {
                expected: self.cols,
                found: symbols.len(),
            });
        }
        let start = self.offset(layer, row, 0)?;
        self.layers[layer][start..start + self.cols].copy_from_slice(symbols);
        Ok(())
    }

    /// Symbols of one cell from the bottom layer to the top
    pub fn stack(&self, row: usize, col: usize) -> Result<Vec<Symbol>, MapError> {
        let idx = self.offset(0, row, col)?;
        Ok(self.layers.iter().map(|layer| layer[idx]).collect())
    }
}

/// Cells per layer for a `rows × cols` map
fn check_dimensions(rows: usize, cols: usize) -> Result<usize, MapError> {
    let bytes = rows
        .checked_mul(cols)
        .and_then(|cells| cells.checked_mul(std::mem::size_of::<Symbol>()));
    match bytes {
        Some(bytes) if bytes > 0 && bytes <= isize::MAX as usize => Ok(rows * cols),
        _ => Err(MapError::InvalidDimensions { rows, cols }),
    }
}
