//! Terminal rendition of sketch scenes for runs without a window.

use std::collections::BTreeMap;

use grid_sketch_core::Layout;
use grid_sketch_rendering::{FrameInput, Key, Scene, SketchMode};
use grid_sketch_system_sketches::Shell;

/// Runs `frames` frames, tapping one scripted key per frame, and renders
/// the last scene as text.
///
/// The run is extended until every scripted key has been delivered.
pub(crate) fn run(mut shell: Shell, frames: u64, keys: &[Key]) -> String {
    let frames = frames.max(u64::try_from(keys.len()).unwrap_or(u64::MAX));
    let mut scene = Scene::new(Layout::Square);
    let mut scripted = keys.iter();

    for frame in 1..=frames {
        let tapped: Vec<Key> = scripted.next().copied().into_iter().collect();
        shell.frame(&FrameInput::tapped(frame, &tapped), &mut scene);
    }
    if frames == 0 {
        shell.draw(&mut scene);
    }

    let mut output = format!("{}\n", scene.caption);
    output.push_str(&render(&scene));
    output
}

/// Draws valid cells as `.` and entities by their symbol.
///
/// Hex rows are indented by their row index so the axial skew stays visible.
pub(crate) fn render(scene: &Scene) -> String {
    let mut rows: BTreeMap<i32, BTreeMap<i32, char>> = BTreeMap::new();
    for cell in &scene.cells {
        let _ = rows.entry(cell.row).or_default().insert(cell.col, '.');
    }
    for glyph in &scene.glyphs {
        let _ = rows.entry(glyph.row).or_default().insert(glyph.col, glyph.symbol);
    }

    let min_col = rows
        .values()
        .filter_map(|cols| cols.keys().next().copied())
        .min()
        .unwrap_or(0);
    let min_row = rows.keys().next().copied().unwrap_or(0);

    let mut output = String::new();
    for (row, cols) in &rows {
        let mut line = String::new();
        if matches!(scene.layout, Layout::Hex(_)) {
            line.push_str(&" ".repeat(usize::try_from(row - min_row).unwrap_or(0)));
        }
        let mut next_col = min_col;
        for (col, symbol) in cols {
            while next_col < *col {
                line.push_str("  ");
                next_col += 1;
            }
            line.push(*symbol);
            line.push(' ');
            next_col += 1;
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_sketch_core::Orientation;
    use grid_sketch_system_sketches::{SketchConfig, SketchKind};

    fn shell(kind: SketchKind) -> Shell {
        Shell::new(&SketchConfig::default(), kind).expect("default layout fits")
    }

    #[test]
    fn square_scene_renders_one_line_per_row() {
        let mut scene = Scene::new(Layout::Square);
        for row in 0..2 {
            for col in 0..3 {
                scene.push_cell(row, col);
            }
        }
        assert_eq!(render(&scene), ". . .\n. . .\n");
    }

    #[test]
    fn hex_rows_are_indented() {
        let mut scene = Scene::new(Layout::Hex(Orientation::Flat));
        scene.push_cell(0, 1);
        scene.push_cell(1, 0);
        scene.push_cell(1, 1);
        assert_eq!(render(&scene), "  .\n . .\n");
    }

    #[test]
    fn basic_sketch_shows_bots_and_patrol() {
        let output = run(shell(SketchKind::Basic), 1, &[]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Basic entities");
        assert_eq!(lines[1], "P . . . . . . . . .");
        assert_eq!(lines[4], ". . . @ . . . . . .");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn scripted_keys_move_the_arrow_bot() {
        let output = run(shell(SketchKind::Basic), 0, &[Key::Up, Key::Up]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[2], ". . . @ . . . . . .");
    }

    #[test]
    fn scripted_digit_switches_sketch() {
        let output = run(shell(SketchKind::Basic), 1, &[Key::Char('4')]);
        assert!(output.starts_with("Hexagon-shaped grid\n"));
        assert_eq!(output.matches('@').count(), 1);
        assert_eq!(output.matches(['.', '@']).count(), 37);
    }
}
