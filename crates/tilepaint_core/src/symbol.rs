//! Symbolic cell codes
//!
//! Every map cell holds exactly one [`Symbol`]. On disk a symbol is a short
//! token (`e0`, `c0` or `t<N>`); in memory it is parsed once into a tagged
//! variant so painting and rendering never look at string prefixes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// A cell code: the empty marker, the collision marker, or a palette tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Symbol {
    /// `e0` - nothing painted; also the eraser tool
    #[default]
    Empty,
    /// `c0` - impassable cell, drawn as a flat overlay instead of an image
    Collision,
    /// `t<N>` - palette tile number `N`
    Tile(u32),
}

impl Symbol {
    pub const EMPTY_TOKEN: &'static str = "e0";
    pub const COLLISION_TOKEN: &'static str = "c0";

    /// Whether this is one of the reserved markers (not backed by an image)
    pub fn is_reserved(&self) -> bool {
        !matches!(self, Symbol::Tile(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Symbol::Empty)
    }

    /// Palette tile number, if this symbol refers to one
    pub fn tile_number(&self) -> Option<u32> {
        match self {
            Symbol::Tile(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Empty => f.write_str(Self::EMPTY_TOKEN),
            Symbol::Collision => f.write_str(Self::COLLISION_TOKEN),
            Symbol::Tile(n) => write!(f, "t{n}"),
        }
    }
}

impl FromStr for Symbol {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::EMPTY_TOKEN => Ok(Symbol::Empty),
            Self::COLLISION_TOKEN => Ok(Symbol::Collision),
            _ => {
                // Canonical decimal only: `t0`, `t7`, never `t007`
                let digits = s
                    .strip_prefix('t')
                    .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                    .filter(|d| *d == "0" || !d.starts_with('0'))
                    .ok_or_else(|| MapError::InvalidSymbol(s.to_string()))?;
                digits
                    .parse::<u32>()
                    .map(Symbol::Tile)
                    .map_err(|_| MapError::InvalidSymbol(s.to_string()))
            }
        }
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

impl TryFrom<String> for Symbol {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
