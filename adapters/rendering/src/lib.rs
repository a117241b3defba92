#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for grid sketch adapters.
//!
//! Sketches never talk to a window directly. They describe each frame as a
//! [`Scene`] expressed in layout units (one unit per square cell, unit
//! circumradius per hexagon) and receive keyboard activity through
//! [`FrameInput`]. Backends implementing [`RenderingBackend`] translate both.

use std::{f32::consts::PI, fmt, str::FromStr};

use anyhow::Result as AnyResult;
use grid_sketch_core::{Layout, Orientation};
use thiserror::Error;

pub use glam::Vec2;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);
    /// Mid gray used for walls.
    pub const GRAY: Self = Self::from_rgb_u8(128, 128, 128);
    /// Blue-leaning aqua used for the arrow-key bot.
    pub const AQUA: Self = Self::from_rgb_u8(0, 128, 255);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<grid_sketch_core::EntityColor> for Color {
    fn from(color: grid_sketch_core::EntityColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Row and column basis vectors for the provided layout.
///
/// Square cells advance one unit per step. Hex cells have unit circumradius.
#[must_use]
pub fn basis_vectors(layout: Layout) -> (Vec2, Vec2) {
    let root3 = 3.0_f32.sqrt();
    match layout {
        Layout::Square => (Vec2::Y, Vec2::X),
        Layout::Hex(Orientation::Pointy) => (Vec2::new(root3 / 2.0, 1.5), Vec2::new(root3, 0.0)),
        Layout::Hex(Orientation::Flat) => (Vec2::new(0.0, root3), Vec2::new(1.5, root3 / 2.0)),
    }
}

/// Center of the cell at `(row, col)` in layout units.
///
/// Square cells have their top-left corner at `(col, row)`; hex cells are
/// centered on `row · row_basis + col · col_basis`.
#[must_use]
pub fn cell_center(layout: Layout, row: i32, col: i32) -> Vec2 {
    match layout {
        Layout::Square => Vec2::new(col as f32 + 0.5, row as f32 + 0.5),
        Layout::Hex(_) => {
            let (row_basis, col_basis) = basis_vectors(layout);
            row as f32 * row_basis + col as f32 * col_basis
        }
    }
}

/// Unit vector pointing from a cell towards its neighbour at `(row, col)`
/// offset `delta`.
#[must_use]
pub fn heading(layout: Layout, delta: (i32, i32)) -> Vec2 {
    let (row_basis, col_basis) = basis_vectors(layout);
    (delta.0 as f32 * row_basis + delta.1 as f32 * col_basis).normalize_or_zero()
}

/// Corners of a unit-circumradius hexagon around `center`.
///
/// Corners sit at angles `i·π/3`, offset by `π/6` for pointy-top hexagons,
/// with the y axis pointing down.
#[must_use]
pub fn hex_corners(center: Vec2, orientation: Orientation) -> [Vec2; 6] {
    let offset = match orientation {
        Orientation::Flat => 0.0,
        Orientation::Pointy => PI / 6.0,
    };
    let mut corners = [Vec2::ZERO; 6];
    for (index, corner) in corners.iter_mut().enumerate() {
        let angle = index as f32 * PI / 3.0 + offset;
        *corner = center + Vec2::new(angle.cos(), -angle.sin());
    }
    corners
}

/// Outline of a single valid grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellOutline {
    /// Row of the outlined cell.
    pub row: i32,
    /// Column of the outlined cell.
    pub col: i32,
    /// Center of the cell in layout units.
    pub center: Vec2,
}

/// Geometry of an entity glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlyphShape {
    /// Circle with the provided diameter.
    Disc {
        /// Diameter in layout units.
        diameter: f32,
    },
    /// Axis-aligned square with the provided side length.
    Block {
        /// Side length in layout units.
        size: f32,
    },
    /// Outlined square with a line from its center along `heading`.
    Marker {
        /// Side length in layout units.
        size: f32,
        /// Unit vector pointing in the facing direction.
        heading: Vec2,
    },
}

/// Visual description of one placed entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityGlyph {
    /// Row of the cell the entity occupies.
    pub row: i32,
    /// Column of the cell the entity occupies.
    pub col: i32,
    /// Center of the glyph in layout units.
    pub center: Vec2,
    /// Glyph geometry.
    pub shape: GlyphShape,
    /// Fill color, `None` for outline-only glyphs.
    pub fill: Option<Color>,
    /// Stroke color.
    pub stroke: Color,
    /// Character used by text renderers.
    pub symbol: char,
}

/// Scene description assembled by a sketch each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Layout the cells and glyphs are positioned with.
    pub layout: Layout,
    /// Every valid cell of the grid.
    pub cells: Vec<CellOutline>,
    /// Every placed entity.
    pub glyphs: Vec<EntityGlyph>,
    /// Caption naming the active sketch.
    pub caption: String,
}

impl Scene {
    /// Creates an empty scene for the provided layout.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            cells: Vec::new(),
            glyphs: Vec::new(),
            caption: String::new(),
        }
    }

    /// Drops every cell and glyph and switches to `layout`.
    pub fn reset(&mut self, layout: Layout) {
        self.layout = layout;
        self.cells.clear();
        self.glyphs.clear();
        self.caption.clear();
    }

    /// Appends the outline of the cell at `(row, col)`.
    pub fn push_cell(&mut self, row: i32, col: i32) {
        self.cells.push(CellOutline {
            row,
            col,
            center: cell_center(self.layout, row, col),
        });
    }

    /// Corners of the provided cell outline, in drawing order.
    #[must_use]
    pub fn outline_corners(&self, cell: &CellOutline) -> Vec<Vec2> {
        match self.layout {
            Layout::Square => {
                let half = Vec2::splat(0.5);
                let min = cell.center - half;
                let max = cell.center + half;
                vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
            }
            Layout::Hex(orientation) => hex_corners(cell.center, orientation).to_vec(),
        }
    }

    /// Smallest rectangle containing every cell outline, as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut corners = self
            .cells
            .iter()
            .flat_map(|cell| self.outline_corners(cell));
        let first = corners.next()?;
        Some(corners.fold((first, first), |(min, max), corner| {
            (min.min(corner), max.max(corner))
        }))
    }
}

/// Keyboard keys understood by the sketches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Escape.
    Escape,
    /// Printable key, lowercase.
    Char(char),
}

impl FromStr for Key {
    type Err = RenderingError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let lowered = token.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "esc" | "escape" => Ok(Self::Escape),
            _ => {
                let mut chars = lowered.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) if key.is_ascii_graphic() => Ok(Self::Char(key)),
                    _ => Err(RenderingError::UnknownKey {
                        token: token.to_owned(),
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::Escape => f.write_str("escape"),
            Self::Char(key) => write!(f, "{key}"),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// One-based index of the frame being produced.
    pub frame: u64,
    /// Keys that went down during this frame.
    pub pressed: Vec<Key>,
    /// Keys that went up during this frame.
    pub released: Vec<Key>,
}

impl FrameInput {
    /// Input for a frame where the provided keys were tapped.
    #[must_use]
    pub fn tapped(frame: u64, keys: &[Key]) -> Self {
        Self {
            frame,
            pressed: keys.to_vec(),
            released: keys.to_vec(),
        }
    }
}

/// One mode of a multi-mode sketch.
///
/// Every hook defaults to doing nothing.
pub trait SketchMode {
    /// Human-readable name of the mode.
    fn title(&self) -> &str;

    /// Advances the mode's state; called once per frame before drawing.
    fn update(&mut self, _frame: u64) {}

    /// Describes the current frame.
    fn draw(&self, _scene: &mut Scene) {}

    /// Reacts to a key going down.
    fn key_pressed(&mut self, _key: Key) {}

    /// Reacts to a key going up.
    fn key_released(&mut self, _key: Key) {}
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Pixels per layout unit.
    pub scale: f32,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    pub fn new<T>(window_title: T, clear_color: Color, scale: f32) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RenderingError::InvalidScale { scale });
        }
        Ok(Self {
            window_title: window_title.into(),
            clear_color,
            scale,
        })
    }
}

/// Rendering backend capable of presenting sketch scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the input captured for
    /// the frame and refills the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Scale must be a positive finite number.
    #[error("scale must be positive (received {scale})")]
    InvalidScale {
        /// Provided scale that failed validation.
        scale: f32,
    },
    /// Key names must be an arrow name, `escape`, or a single character.
    #[error("`{token}` is not a known key")]
    UnknownKey {
        /// Token that failed to parse.
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(left: Vec2, right: Vec2) {
        assert!(
            left.abs_diff_eq(right, 1e-5),
            "expected {right:?}, got {left:?}"
        );
    }

    #[test]
    fn hex_basis_vectors_match_unit_circumradius() {
        let root3 = 3.0_f32.sqrt();
        let (row, col) = basis_vectors(Layout::Hex(Orientation::Pointy));
        assert_close(row, Vec2::new(root3 / 2.0, 1.5));
        assert_close(col, Vec2::new(root3, 0.0));

        let (row, col) = basis_vectors(Layout::Hex(Orientation::Flat));
        assert_close(row, Vec2::new(0.0, root3));
        assert_close(col, Vec2::new(1.5, root3 / 2.0));
    }

    #[test]
    fn neighbouring_hex_centers_are_root_three_apart() {
        let layout = Layout::Hex(Orientation::Flat);
        let origin = cell_center(layout, 2, 2);
        for (row, col) in [(2, 3), (3, 2), (3, 1), (2, 1), (1, 2), (1, 3)] {
            let distance = origin.distance(cell_center(layout, row, col));
            assert!((distance - 3.0_f32.sqrt()).abs() < 1e-5, "({row}, {col})");
        }
    }

    #[test]
    fn square_centers_sit_in_the_middle_of_the_cell() {
        assert_close(cell_center(Layout::Square, 2, 3), Vec2::new(3.5, 2.5));
        assert_close(heading(Layout::Square, (-1, 0)), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn flat_hex_corners_start_on_the_positive_x_axis() {
        let corners = hex_corners(Vec2::ZERO, Orientation::Flat);
        assert_close(corners[0], Vec2::X);
        assert_close(corners[3], -Vec2::X);
        for corner in corners {
            assert!((corner.length() - 1.0).abs() < 1e-5);
        }

        let pointy = hex_corners(Vec2::ZERO, Orientation::Pointy);
        assert_close(pointy[1], Vec2::new(0.0, -1.0));
    }

    #[test]
    fn scene_bounds_cover_every_outline() {
        let mut scene = Scene::new(Layout::Square);
        assert!(scene.bounds().is_none());
        scene.push_cell(0, 0);
        scene.push_cell(2, 3);

        let (min, max) = scene.bounds().expect("cells present");
        assert_close(min, Vec2::ZERO);
        assert_close(max, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn scene_reset_switches_layout_and_clears_content() {
        let mut scene = Scene::new(Layout::Square);
        scene.push_cell(1, 1);
        scene.caption.push_str("demo");
        scene.reset(Layout::Hex(Orientation::Pointy));

        assert!(scene.cells.is_empty());
        assert!(scene.caption.is_empty());
        assert_eq!(scene.layout, Layout::Hex(Orientation::Pointy));
    }

    #[test]
    fn keys_parse_from_names_and_characters() {
        assert_eq!("Up".parse::<Key>(), Ok(Key::Up));
        assert_eq!("esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("W".parse::<Key>(), Ok(Key::Char('w')));
        assert_eq!("3".parse::<Key>(), Ok(Key::Char('3')));
        assert_eq!(
            "jump".parse::<Key>(),
            Err(RenderingError::UnknownKey {
                token: "jump".to_owned()
            })
        );
    }

    #[test]
    fn presentation_rejects_non_positive_scale() {
        assert!(Presentation::new("sketch", Color::BLACK, 40.0).is_ok());
        assert_eq!(
            Presentation::new("sketch", Color::BLACK, 0.0),
            Err(RenderingError::InvalidScale { scale: 0.0 })
        );
    }
}
