use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tilepaint_editor::tilepaint_core::{LayeredGrid, MapError, Symbol};
use tilepaint_editor::{EditorSession, EditorSettings};

fn settings(rows: usize, cols: usize) -> EditorSettings {
    EditorSettings {
        tile_size: 16,
        rows,
        cols,
        ..Default::default()
    }
}

/// Write a sheet of `cols x rows` opaque tiles, each tile a different shade
fn write_sheet(dir: &Path, name: &str, cols: u32, rows: u32) -> PathBuf {
    let mut image = RgbaImage::new(cols * 16, rows * 16);
    for (x, y, px) in image.enumerate_pixels_mut() {
        let n = (y / 16) * cols + (x / 16);
        *px = Rgba([n as u8 * 10, 0, 0, 255]);
    }
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

#[test]
fn test_import_sheets_numbering_across_batches() {
    let tmp = tempfile::tempdir().unwrap();
    let a = write_sheet(tmp.path(), "a.png", 2, 2);
    let b = write_sheet(tmp.path(), "b.png", 3, 1);

    let mut session = EditorSession::new(settings(4, 4)).unwrap();
    let report = session.import_sheets(&[a.clone(), b]);
    assert!(report.is_clean());
    assert_eq!(report.groups[0].range(), 0..4);
    assert_eq!(report.groups[1].range(), 4..7);

    let report = session.import_sheets(&[a]);
    assert_eq!(report.groups[0].range(), 7..11);
    assert_eq!(report.groups[0].name, "a.png");

    let names: Vec<&str> = session
        .palette()
        .iter()
        .map(|g| g.group.name.as_str())
        .collect();
    assert_eq!(names, vec!["a.png", "b.png", "a.png"]);
}

#[test]
fn test_two_by_two_scenario_file_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let sheet = write_sheet(tmp.path(), "s.png", 4, 1);
    let mut session = EditorSession::new(settings(2, 2)).unwrap();
    session.import_sheets(&[sheet]);

    session.set_current_tile(Symbol::Tile(3)).unwrap();
    session.paint_cell(0, 0, 0).unwrap();
    session.select_collision();
    session.paint_cell(0, 1, 1).unwrap();

    let out = tmp.path().join("map");
    std::fs::create_dir(&out).unwrap();
    session.save_to(&out).unwrap();
    assert!(!session.is_dirty());

    let layer0 = std::fs::read_to_string(out.join("map_layer_0.txt")).unwrap();
    assert_eq!(layer0.lines().collect::<Vec<_>>(), vec!["t3 e0", "e0 c0"]);
}

#[test]
fn test_save_load_round_trip_through_sessions() {
    let tmp = tempfile::tempdir().unwrap();
    let sheet = write_sheet(tmp.path(), "s.png", 4, 2);

    let mut first = EditorSession::new(settings(5, 6)).unwrap();
    first.import_sheets(&[sheet.clone()]);
    for (i, (layer, row, col)) in [(0, 0, 0), (1, 4, 5), (3, 2, 3), (0, 4, 0)]
        .into_iter()
        .enumerate()
    {
        first.set_current_tile(Symbol::Tile(i as u32 + 2)).unwrap();
        first.paint_cell(layer, row, col).unwrap();
    }
    first.select_collision();
    first.set_current_layer(2).unwrap();
    first.paint_at(1, 1).unwrap();

    let dir = tmp.path().join("saved");
    std::fs::create_dir(&dir).unwrap();
    first.save_to(&dir).unwrap();

    // Symbols resolve even before the sheet is imported into the new session
    let mut second = EditorSession::new(settings(5, 6)).unwrap();
    second.load_from(&dir).unwrap();
    assert_eq!(second.grid(), first.grid());
    assert!(second.render_cells().iter().all(|d| d.layer == 2));

    second.import_sheets(&[sheet]);
    assert_eq!(second.render_cells().len(), first.render_cells().len());
}

#[test]
fn test_resize_then_restore_keeps_painted_cells() {
    let tmp = tempfile::tempdir().unwrap();
    let sheet = write_sheet(tmp.path(), "s.png", 1, 1);
    let mut session = EditorSession::new(settings(6, 6)).unwrap();
    session.import_sheets(&[sheet]);
    session.set_current_tile(Symbol::Tile(0)).unwrap();
    session.paint_cell(1, 2, 2).unwrap();
    session.paint_cell(1, 5, 5).unwrap();

    session.resize_map(3, 3).unwrap();
    session.resize_map(6, 6).unwrap();

    assert_eq!(session.grid().get(1, 2, 2).unwrap(), Symbol::Tile(0));
    assert_eq!(session.grid().get(1, 5, 5).unwrap(), Symbol::Empty);
    assert!(matches!(
        session.resize_map(0, 6),
        Err(MapError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_export_layout_and_bad_sheet() {
    let tmp = tempfile::tempdir().unwrap();
    let good = write_sheet(tmp.path(), "good.png", 2, 1);
    let bad = tmp.path().join("bad.png");
    std::fs::write(&bad, b"garbage").unwrap();

    let mut session = EditorSession::new(settings(2, 3)).unwrap();
    let report = session.import_sheets(&[bad, good]);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].to_string().contains("bad.png"));

    session.set_current_tile(Symbol::Tile(1)).unwrap();
    session.paint_cell(0, 1, 2).unwrap();
    session.select_collision();
    session.paint_cell(2, 0, 0).unwrap();

    let out = tmp.path().join("export");
    std::fs::create_dir(&out).unwrap();
    session.export_to(&out).unwrap();

    let collision = std::fs::read_to_string(out.join("COLLISION.txt")).unwrap();
    assert_eq!(collision, "c0 e0 e0\ne0 e0 e0\n");
    let ground = std::fs::read_to_string(out.join("map_layer_0.txt")).unwrap();
    assert_eq!(ground, "e0 e0 e0\ne0 e0 t1\n");
    assert!(out.join("t0.png").exists());
    assert!(out.join("t1.png").exists());
    assert!(!out.join("map_layer_2.txt").exists());

    // The exported layer files are not a loadable save (layer 2 is renamed)
    let mut other = EditorSession::new(settings(2, 3)).unwrap();
    assert!(matches!(
        other.load_from(&out),
        Err(MapError::MissingFile { .. })
    ));
    assert_eq!(other.grid(), &LayeredGrid::new(2, 3, 4).unwrap());
}
