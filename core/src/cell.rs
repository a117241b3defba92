use std::{fmt, hash::Hash, str::FromStr};

use crate::GridError;

/// Direction vocabulary of a coordinate system.
///
/// Each implementation supplies its complete adjacency table as data: the
/// declaration order used when enumerating neighbours, the clockwise order
/// used when turning, and the `(delta_row, delta_col)` offset of every
/// direction.
pub trait Direction:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + FromStr<Err = GridError> + 'static
{
    /// Every direction in declaration order.
    const ALL: &'static [Self];

    /// Every direction in clockwise turning order.
    const CLOCKWISE: &'static [Self];

    /// Offset applied to `(row, col)` when stepping in this direction.
    fn delta(self) -> (i32, i32);

    /// Direction that undoes a step in this direction.
    #[must_use]
    fn opposite(self) -> Self;

    /// Token naming the direction in input bindings and configuration.
    fn token(self) -> &'static str;

    /// Next direction in clockwise order, wrapping after the last one.
    #[must_use]
    fn turned_clockwise(self) -> Self {
        let order = Self::CLOCKWISE;
        let index = order
            .iter()
            .position(|direction| *direction == self)
            .unwrap_or(0);
        order[(index + 1) % order.len()]
    }

    /// Parses a token against the direction vocabulary.
    fn from_token(token: &str) -> Result<Self, GridError> {
        Self::ALL
            .iter()
            .copied()
            .find(|direction| direction.token() == token)
            .ok_or_else(|| GridError::InvalidDirection {
                token: token.to_owned(),
            })
    }
}

/// Immutable coordinate of a single grid cell.
///
/// Cells are pure values: they never reference a grid and equality is
/// structural.
pub trait Cell: Copy + Eq + Hash + fmt::Debug + fmt::Display {
    /// Direction vocabulary understood by the coordinate system.
    type Direction: Direction;

    /// Creates the cell located at the provided row and column.
    fn at(row: i32, col: i32) -> Self;

    /// Row axis of the cell.
    fn row(&self) -> i32;

    /// Column axis of the cell.
    fn col(&self) -> i32;

    /// Returns the neighbouring cell in the provided direction.
    ///
    /// Coordinates saturate at the bounds of `i32`.
    #[must_use]
    fn adjacent(&self, direction: Self::Direction) -> Self {
        let (delta_row, delta_col) = direction.delta();
        Self::at(
            self.row().saturating_add(delta_row),
            self.col().saturating_add(delta_col),
        )
    }

    /// Returns the neighbouring cell named by a direction token.
    ///
    /// Fails with [`GridError::InvalidDirection`] when the token is not part
    /// of the coordinate system's vocabulary.
    fn adjacent_by_token(&self, token: &str) -> Result<Self, GridError> {
        let direction = Self::Direction::from_token(token)?;
        Ok(self.adjacent(direction))
    }

    /// Returns one neighbour per direction, in declaration order.
    fn all_adjacent(&self) -> Vec<Self> {
        Self::Direction::ALL
            .iter()
            .map(|direction| self.adjacent(*direction))
            .collect()
    }

    /// Chooses a direction that brings this cell closer to `other`.
    ///
    /// Returns `Ok(None)` when both cells are equal. Coordinate systems
    /// without a steering policy report [`GridError::SteeringUnsupported`].
    fn direction_toward(&self, _other: &Self) -> Result<Option<Self::Direction>, GridError> {
        Err(GridError::SteeringUnsupported)
    }
}
