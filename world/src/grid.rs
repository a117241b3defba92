//! Dense occupancy storage shared by every grid shape.

use grid_sketch_core::{Cell, EntityId, GridError, Layout};

/// Validity predicate and dimensions of a grid.
///
/// A shape owns the bounding rectangle of the addressable space and decides
/// which cells inside it are valid. Storage and every occupancy query live
/// on [`Grid`], so shapes only describe geometry.
pub trait Shape {
    /// Coordinate system used to address cells.
    type Cell: Cell;

    /// Number of rows in the bounding rectangle.
    fn rows(&self) -> u32;

    /// Number of columns in the bounding rectangle.
    fn cols(&self) -> u32;

    /// Reports whether the cell belongs to the shape.
    fn contains(&self, cell: Self::Cell) -> bool;

    /// How the shape's cells are laid out when drawn.
    fn layout(&self) -> Layout;
}

/// Sparse mapping from valid cells to at most one occupant.
///
/// Slots are stored densely in row-major order over the bounding rectangle
/// of the shape; cells outside the shape never hold an occupant.
#[derive(Clone, Debug)]
pub struct Grid<S: Shape> {
    shape: S,
    slots: Vec<Option<EntityId>>,
}

impl<S: Shape> Grid<S> {
    /// Creates an empty grid covering the provided shape.
    #[must_use]
    pub fn from_shape(shape: S) -> Self {
        let capacity_u64 = u64::from(shape.rows()) * u64::from(shape.cols());
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            shape,
            slots: vec![None; capacity],
        }
    }

    /// Geometry of the grid.
    #[must_use]
    pub fn shape(&self) -> &S {
        &self.shape
    }

    /// Number of rows in the bounding rectangle.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.shape.rows()
    }

    /// Number of columns in the bounding rectangle.
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.shape.cols()
    }

    /// How the grid's cells are laid out when drawn.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.shape.layout()
    }

    /// Reports whether the cell is addressable in this grid.
    #[must_use]
    pub fn is_valid(&self, cell: S::Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Returns the occupant of the cell, if any.
    pub fn get(&self, cell: S::Cell) -> Result<Option<EntityId>, GridError> {
        let index = self.checked_index(cell)?;
        Ok(self.slots[index])
    }

    /// Reports whether the valid cell holds no occupant.
    pub fn is_empty(&self, cell: S::Cell) -> Result<bool, GridError> {
        Ok(self.get(cell)?.is_none())
    }

    /// Stores an occupant, clobbering whatever the cell held.
    ///
    /// Returns the previous occupant.
    pub fn put(&mut self, cell: S::Cell, occupant: EntityId) -> Result<Option<EntityId>, GridError> {
        let index = self.checked_index(cell)?;
        Ok(self.slots[index].replace(occupant))
    }

    /// Clears the cell, returning what it held.
    pub fn remove(&mut self, cell: S::Cell) -> Result<Option<EntityId>, GridError> {
        let index = self.checked_index(cell)?;
        Ok(self.slots[index].take())
    }

    /// Moves the occupant of `from` into `to`, returning the occupant that
    /// `to` held beforehand.
    ///
    /// The occupant of `from` is read first, then `to` and `from` are cleared
    /// in that order and the read occupant is stored at `to`. Moving a cell
    /// onto itself therefore re-places the same occupant and reports it as
    /// clobbered. Both cells are validated before anything changes.
    pub fn move_occupant(
        &mut self,
        from: S::Cell,
        to: S::Cell,
    ) -> Result<Option<EntityId>, GridError> {
        let moved = self.get(from)?;
        let clobbered = self.remove(to)?;
        let _ = self.remove(from)?;
        if let Some(occupant) = moved {
            let _ = self.put(to, occupant)?;
        }
        Ok(clobbered)
    }

    /// Every valid cell, enumerated row-major.
    #[must_use]
    pub fn valid_cells(&self) -> Vec<S::Cell> {
        self.cells_where(|_| true)
    }

    /// Every valid cell holding an occupant, enumerated row-major.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<S::Cell> {
        self.cells_where(|occupant| occupant.is_some())
    }

    /// Neighbours of `cell` that are valid in this grid.
    #[must_use]
    pub fn valid_adjacent_cells(&self, cell: S::Cell) -> Vec<S::Cell> {
        cell.all_adjacent()
            .into_iter()
            .filter(|neighbour| self.is_valid(*neighbour))
            .collect()
    }

    /// Valid neighbours of `cell` that hold no occupant.
    #[must_use]
    pub fn empty_adjacent_cells(&self, cell: S::Cell) -> Vec<S::Cell> {
        self.valid_adjacent_cells(cell)
            .into_iter()
            .filter(|neighbour| self.occupant(*neighbour).is_none())
            .collect()
    }

    /// Valid neighbours of `cell` that hold an occupant.
    #[must_use]
    pub fn occupied_adjacent_cells(&self, cell: S::Cell) -> Vec<S::Cell> {
        self.valid_adjacent_cells(cell)
            .into_iter()
            .filter(|neighbour| self.occupant(*neighbour).is_some())
            .collect()
    }

    /// Occupants of the valid neighbours of `cell`.
    #[must_use]
    pub fn neighbors(&self, cell: S::Cell) -> Vec<EntityId> {
        self.valid_adjacent_cells(cell)
            .into_iter()
            .filter_map(|neighbour| self.occupant(neighbour))
            .collect()
    }

    fn occupant(&self, cell: S::Cell) -> Option<EntityId> {
        self.index(cell).and_then(|index| self.slots[index])
    }

    fn cells_where<F>(&self, mut keep: F) -> Vec<S::Cell>
    where
        F: FnMut(Option<EntityId>) -> bool,
    {
        let mut cells = Vec::new();
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let (Ok(row), Ok(col)) = (i32::try_from(row), i32::try_from(col)) else {
                    continue;
                };
                let cell = S::Cell::at(row, col);
                if let Some(index) = self.index(cell) {
                    if keep(self.slots[index]) {
                        cells.push(cell);
                    }
                }
            }
        }
        cells
    }

    fn checked_index(&self, cell: S::Cell) -> Result<usize, GridError> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            row: cell.row(),
            col: cell.col(),
        })
    }

    fn index(&self, cell: S::Cell) -> Option<usize> {
        if !self.shape.contains(cell) {
            return None;
        }
        let row = u32::try_from(cell.row()).ok()?;
        let col = u32::try_from(cell.col()).ok()?;
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let width = usize::try_from(self.cols()).ok()?;
        let index = usize::try_from(row).ok()? * width + usize::try_from(col).ok()?;
        (index < self.slots.len()).then_some(index)
    }
}
