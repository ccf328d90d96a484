//! Headless tilepaint front-end
//!
//! Usage:
//!   tilepaint new maps/level1 --rows 30 --cols 40
//!   tilepaint palette --sheet tiles/grass.png --sheet tiles/walls.png
//!   tilepaint export --map maps/level1 --sheet tiles/grass.png --out build/level1

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tilepaint_editor::tilepaint_core::{SpritesheetGroup, Symbol};
use tilepaint_editor::{EditorSession, EditorSettings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilepaint")]
#[command(about = "Tile map authoring tools")]
struct Cli {
    #[command(flatten)]
    dims: Dimensions,
    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the saved editor settings
#[derive(Args)]
struct Dimensions {
    /// Tile size in pixels
    #[arg(long, global = true)]
    tile_size: Option<u32>,
    /// Map height in cells
    #[arg(long, global = true)]
    rows: Option<usize>,
    /// Map width in cells
    #[arg(long, global = true)]
    cols: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty map (all layers `e0`) into a directory
    New {
        dir: PathBuf,
    },
    /// List the palette produced by importing sprite sheets
    Palette {
        #[arg(long = "sheet", required = true)]
        sheets: Vec<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load a saved map, import sheets and write the runtime export layout
    Export {
        /// Directory holding map_layer_<L>.txt files
        #[arg(long)]
        map: PathBuf,
        #[arg(long = "sheet")]
        sheets: Vec<PathBuf>,
        /// Output directory (created if missing)
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct SheetListing<'a> {
    #[serde(flatten)]
    group: &'a SpritesheetGroup,
    visible: Vec<Symbol>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = settings_with(&cli.dims)?;

    match cli.command {
        Commands::New { dir } => new_map(settings, &dir),
        Commands::Palette { sheets, json } => list_palette(settings, &sheets, json),
        Commands::Export { map, sheets, out } => export(settings, &map, &sheets, &out),
    }
}

/// Saved settings with command-line overrides applied
fn settings_with(dims: &Dimensions) -> Result<EditorSettings> {
    let mut settings = EditorSettings::load();
    if let Some(tile_size) = dims.tile_size {
        settings.tile_size = tile_size;
    }
    if let Some(rows) = dims.rows {
        settings.rows = rows;
    }
    if let Some(cols) = dims.cols {
        settings.cols = cols;
    }
    settings.validate()?;
    Ok(settings)
}

fn new_map(settings: EditorSettings, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut session = EditorSession::new(settings)?;
    session.save_to(dir)?;
    Ok(())
}

/// Import every sheet, reporting files that failed without stopping
fn import_all(session: &mut EditorSession, sheets: &[PathBuf]) {
    let report = session.import_sheets(sheets);
    for failure in &report.failures {
        eprintln!("Failed to import: {failure}");
    }
}

fn list_palette(settings: EditorSettings, sheets: &[PathBuf], json: bool) -> Result<()> {
    let mut session = EditorSession::new(settings)?;
    import_all(&mut session, sheets);

    let palette = session.palette();
    if json {
        let listing: Vec<SheetListing> = palette
            .iter()
            .map(|g| SheetListing {
                group: g.group,
                visible: g.tiles.iter().map(|(symbol, _)| *symbol).collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for group in &palette {
        let symbols: Vec<String> = group.tiles.iter().map(|(s, _)| s.to_string()).collect();
        println!(
            "{} [{}..{}) {} visible: {}",
            group.group.name,
            group.group.start,
            group.group.end,
            symbols.len(),
            symbols.join(" ")
        );
    }
    Ok(())
}

fn export(settings: EditorSettings, map: &Path, sheets: &[PathBuf], out: &Path) -> Result<()> {
    let mut session = EditorSession::new(settings)?;
    session
        .load_from(map)
        .with_context(|| format!("Failed to load map from {}", map.display()))?;
    import_all(&mut session, sheets);

    std::fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    session.export_to(out)?;
    println!("Export complete: {}", out.display());
    Ok(())
}
