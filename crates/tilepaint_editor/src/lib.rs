//! tilepaint_editor - Editing session and tools for tilepaint maps
//!
//! This crate wraps `tilepaint_core` in the pieces an editor front-end needs:
//! - `EditorSession` - the map, the tile atlas and the current tool selection
//! - `EditorSettings` - tile and map dimensions, persisted between runs
//!
//! # Usage
//!
//! ```rust,ignore
//! use tilepaint_editor::{EditorSession, EditorSettings};
//!
//! let mut session = EditorSession::new(EditorSettings::load())?;
//! let report = session.import_sheets(&["tiles/grass.png"]);
//! session.set_current_tile("t3".parse()?)?;
//! session.paint_at(0, 0)?;
//! session.export_to(Path::new("out"))?;
//! ```

pub mod preferences;
pub mod session;

pub use tilepaint_core;

pub use preferences::{EditorSettings, SettingsError};
pub use session::EditorSession;
