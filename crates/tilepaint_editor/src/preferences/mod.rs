//! Editor settings
//!
//! Map and tile dimensions used when a session starts. Stored as JSON in the
//! platform-specific config directory:
//! - Windows: %APPDATA%/tilepaint/
//! - Linux: ~/.config/tilepaint/
//! - macOS: ~/Library/Application Support/tilepaint/

mod file;

pub use file::*;

use serde::{Deserialize, Serialize};
use tilepaint_core::{DEFAULT_COLS, DEFAULT_LAYER_COUNT, DEFAULT_ROWS, DEFAULT_TILE_SIZE};

/// Dimensions for new sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Version for future migrations
    pub version: u32,
    /// Tile edge length in pixels, for both sheets and the map
    pub tile_size: u32,
    pub rows: usize,
    pub cols: usize,
    pub layer_count: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            version: 1,
            tile_size: DEFAULT_TILE_SIZE,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            layer_count: DEFAULT_LAYER_COUNT,
        }
    }
}

impl EditorSettings {
    /// Reject values a session cannot be built from
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tile_size == 0 {
            return Err(SettingsError::Invalid("tile_size must be at least 1".to_string()));
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(SettingsError::Invalid(format!(
                "map size {}x{} must be at least 1x1",
                self.rows, self.cols
            )));
        }
        if self.layer_count == 0 {
            return Err(SettingsError::Invalid(
                "layer_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert_eq!(settings.tile_size, 16);
        assert_eq!((settings.rows, settings.cols), (20, 20));
        assert_eq!(settings.layer_count, 4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let settings = EditorSettings {
            tile_size: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = EditorSettings {
            cols: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: EditorSettings = serde_json::from_str(r#"{ "tile_size": 32 }"#).unwrap();
        assert_eq!(settings.tile_size, 32);
        assert_eq!(settings.rows, 20);
        assert_eq!(settings.layer_count, 4);
    }
}
