//! Error type shared by the palette, grid and map codec

use std::path::PathBuf;

use thiserror::Error;

use crate::symbol::Symbol;

/// Errors that can occur while importing sheets, editing the grid or
/// reading/writing map files
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Failed to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Symbol {0} is already registered")]
    DuplicateSymbol(Symbol),
    #[error("Symbol {0} is reserved and cannot be registered in the palette")]
    ReservedSymbol(Symbol),
    #[error("Symbol {0} is not in the palette")]
    UnknownSymbol(Symbol),
    #[error("Cell (layer {layer}, row {row}, col {col}) is outside the map")]
    OutOfBounds { layer: usize, row: usize, col: usize },
    #[error("Layer {0} does not exist")]
    NoSuchLayer(usize),
    #[error("Invalid map dimensions {rows}x{cols}: rows and columns must be at least 1 and fit in memory")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Row has {found} cells, expected {expected}")]
    RowLength { expected: usize, found: usize },
    #[error("Missing layer file: {}", .path.display())]
    MissingFile { path: PathBuf },
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write tile image {}: {source}", .path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Parse error in {} line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("Invalid symbol '{0}'")]
    InvalidSymbol(String),
}

impl MapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}
