//! Translation of world state into scene descriptors.

use grid_sketch_core::{Cell, Direction, Layout};
use grid_sketch_rendering::{cell_center, heading, Color, EntityGlyph, GlyphShape, Scene};
use grid_sketch_world::{query, Behavior, Shape, World};

/// Outlines every valid cell and adds a glyph per placed entity.
pub(crate) fn draw_world<S: Shape>(world: &World<S>, scene: &mut Scene) {
    let grid = query::grid(world);
    let layout = grid.layout();
    scene.reset(layout);

    for cell in grid.valid_cells() {
        scene.push_cell(cell.row(), cell.col());
    }

    let size = cell_size(layout);
    let mut glyphs = Vec::new();
    for entity in query::entities(world) {
        let Some(cell) = entity.cell() else {
            continue;
        };
        let (shape, fill, stroke, symbol) = match *entity.behavior() {
            Behavior::Player { color } => (
                GlyphShape::Disc {
                    diameter: 0.9 * size,
                },
                Some(Color::from(color)),
                Color::WHITE,
                '@',
            ),
            Behavior::Patrol { facing } => (
                GlyphShape::Marker {
                    size: 0.6 * size,
                    heading: heading(layout, facing.delta()),
                },
                None,
                Color::RED,
                'P',
            ),
            Behavior::Wall => (
                GlyphShape::Block { size },
                Some(Color::GRAY),
                Color::GRAY,
                '#',
            ),
            Behavior::Chaser { caught, .. } => (
                GlyphShape::Disc {
                    diameter: 0.7 * size,
                },
                caught.then_some(Color::RED),
                Color::RED,
                if caught { 'X' } else { 'C' },
            ),
        };
        glyphs.push(EntityGlyph {
            row: cell.row(),
            col: cell.col(),
            center: cell_center(layout, cell.row(), cell.col()),
            shape,
            fill,
            stroke,
            symbol,
        });
    }
    scene.glyphs = glyphs;
}

/// Width of the largest square fitting inside a cell.
fn cell_size(layout: Layout) -> f32 {
    match layout {
        Layout::Square => 1.0,
        Layout::Hex(_) => 3.0_f32.sqrt(),
    }
}
