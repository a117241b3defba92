//! Concrete grid geometries.

use grid_sketch_core::{Cell, HexCell, Layout, Orientation, OrthoCell};

use crate::grid::{Grid, Shape};

/// Orthogonal grid with four-neighbour adjacency.
pub type OrthoGrid = Grid<Rectangle>;

/// Hex grid in the shape of a parallelogram.
pub type HexGrid = Grid<Parallelogram>;

/// Hex grid carved into a regular hexagon.
pub type HexagonHexGrid = Grid<Hexagon>;

/// Rectangle of orthogonal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rectangle {
    rows: u32,
    cols: u32,
}

impl Rectangle {
    /// Creates a rectangle spanning `rows × cols` cells.
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }
}

impl Shape for Rectangle {
    type Cell = OrthoCell;

    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }

    fn contains(&self, cell: OrthoCell) -> bool {
        within(cell.row(), self.rows) && within(cell.col(), self.cols)
    }

    fn layout(&self) -> Layout {
        Layout::Square
    }
}

/// Parallelogram of hex cells addressed by axial `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parallelogram {
    rows: u32,
    cols: u32,
    orientation: Orientation,
}

impl Parallelogram {
    /// Creates a parallelogram spanning `rows × cols` hex cells.
    #[must_use]
    pub const fn new(rows: u32, cols: u32, orientation: Orientation) -> Self {
        Self {
            rows,
            cols,
            orientation,
        }
    }
}

impl Shape for Parallelogram {
    type Cell = HexCell;

    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }

    fn contains(&self, cell: HexCell) -> bool {
        within(cell.row(), self.rows) && within(cell.col(), self.cols)
    }

    fn layout(&self) -> Layout {
        Layout::Hex(self.orientation)
    }
}

/// Regular hexagon of hex cells with `radius` cells from center to edge,
/// center included.
///
/// The hexagon is carved out of a bounding square of side `2·radius − 1`
/// centered on `(radius − 1, radius − 1)`: a cell is valid when it lies in
/// the square and its cube `y` axis is less than `radius` away from the
/// center's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hexagon {
    radius: u32,
    orientation: Orientation,
}

impl Hexagon {
    /// Creates a hexagon with the provided radius.
    #[must_use]
    pub const fn new(radius: u32, orientation: Orientation) -> Self {
        Self {
            radius,
            orientation,
        }
    }

    /// Number of cells from the center to the edge, center included.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Cell at the center of the hexagon.
    #[must_use]
    pub fn center(&self) -> HexCell {
        let offset = i32::try_from(self.radius.saturating_sub(1)).unwrap_or(i32::MAX);
        HexCell::new(offset, offset)
    }

    fn side(&self) -> u32 {
        (2 * u64::from(self.radius))
            .saturating_sub(1)
            .try_into()
            .unwrap_or(u32::MAX)
    }
}

impl Shape for Hexagon {
    type Cell = HexCell;

    fn rows(&self) -> u32 {
        self.side()
    }

    fn cols(&self) -> u32 {
        self.side()
    }

    fn contains(&self, cell: HexCell) -> bool {
        let side = self.side();
        within(cell.row(), side)
            && within(cell.col(), side)
            && cell.y().abs_diff(self.center().y()) < self.radius
    }

    fn layout(&self) -> Layout {
        Layout::Hex(self.orientation)
    }
}

impl Grid<Rectangle> {
    /// Creates an empty orthogonal grid with `rows × cols` cells.
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self::from_shape(Rectangle::new(rows, cols))
    }
}

impl Grid<Parallelogram> {
    /// Creates an empty parallelogram hex grid.
    #[must_use]
    pub fn new(rows: u32, cols: u32, orientation: Orientation) -> Self {
        Self::from_shape(Parallelogram::new(rows, cols, orientation))
    }
}

impl Grid<Hexagon> {
    /// Creates an empty hexagon-shaped hex grid.
    #[must_use]
    pub fn new(radius: u32, orientation: Orientation) -> Self {
        Self::from_shape(Hexagon::new(radius, orientation))
    }
}

fn within(value: i32, bound: u32) -> bool {
    u32::try_from(value).map_or(false, |value| value < bound)
}
