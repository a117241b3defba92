use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Cell, Direction, GridError};

/// Cell of an orthogonal grid addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrthoCell {
    row: i32,
    col: i32,
}

impl OrthoCell {
    /// Creates a new orthogonal cell.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: OrthoCell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl Cell for OrthoCell {
    type Direction = OrthoDirection;

    fn at(row: i32, col: i32) -> Self {
        Self::new(row, col)
    }

    fn row(&self) -> i32 {
        self.row
    }

    fn col(&self) -> i32 {
        self.col
    }

    /// Picks the axis with the larger displacement.
    ///
    /// Ties favour vertical movement: `south`/`north` is returned whenever
    /// the absolute row delta is at least the absolute column delta.
    fn direction_toward(&self, other: &Self) -> Result<Option<OrthoDirection>, GridError> {
        if self == other {
            return Ok(None);
        }

        let row_delta = i64::from(other.row) - i64::from(self.row);
        let col_delta = i64::from(other.col) - i64::from(self.col);

        let direction = if row_delta.abs() >= col_delta.abs() {
            if row_delta >= 0 {
                OrthoDirection::South
            } else {
                OrthoDirection::North
            }
        } else if col_delta >= 0 {
            OrthoDirection::East
        } else {
            OrthoDirection::West
        };
        Ok(Some(direction))
    }
}

impl fmt::Display for OrthoCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Four-neighbour directions of the orthogonal grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrthoDirection {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing row indices.
    South,
    /// Toward increasing column indices.
    East,
    /// Toward decreasing column indices.
    West,
}

impl Direction for OrthoDirection {
    const ALL: &'static [Self] = &[Self::North, Self::South, Self::East, Self::West];

    const CLOCKWISE: &'static [Self] = &[Self::East, Self::South, Self::West, Self::North];

    fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl FromStr for OrthoDirection {
    type Err = GridError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::from_token(token)
    }
}

impl fmt::Display for OrthoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_follows_delta_table() {
        let origin = OrthoCell::new(3, 3);
        assert_eq!(origin.adjacent(OrthoDirection::North), OrthoCell::new(2, 3));
        assert_eq!(origin.adjacent(OrthoDirection::South), OrthoCell::new(4, 3));
        assert_eq!(origin.adjacent(OrthoDirection::East), OrthoCell::new(3, 4));
        assert_eq!(origin.adjacent(OrthoDirection::West), OrthoCell::new(3, 2));
    }

    #[test]
    fn opposite_steps_return_to_origin() {
        for row in -2..=2 {
            for col in -2..=2 {
                let cell = OrthoCell::new(row, col);
                for direction in OrthoDirection::ALL {
                    let there = cell.adjacent(*direction);
                    assert_eq!(there.adjacent(direction.opposite()), cell);
                }
            }
        }
    }

    #[test]
    fn all_adjacent_uses_declaration_order() {
        let neighbours = OrthoCell::new(0, 0).all_adjacent();
        assert_eq!(
            neighbours,
            vec![
                OrthoCell::new(-1, 0),
                OrthoCell::new(1, 0),
                OrthoCell::new(0, 1),
                OrthoCell::new(0, -1),
            ]
        );
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let error = OrthoCell::new(0, 0)
            .adjacent_by_token("up")
            .expect_err("`up` is not an orthogonal direction");
        assert_eq!(
            error,
            GridError::InvalidDirection {
                token: "up".to_owned()
            }
        );
        assert_eq!(
            OrthoCell::new(0, 0).adjacent_by_token("east"),
            Ok(OrthoCell::new(0, 1))
        );
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let corner = OrthoCell::new(i32::MAX, i32::MIN);
        assert_eq!(corner.adjacent(OrthoDirection::South), corner);
        assert_eq!(corner.adjacent(OrthoDirection::West), corner);
        assert_eq!(
            corner.adjacent(OrthoDirection::North),
            OrthoCell::new(i32::MAX - 1, i32::MIN)
        );

        assert_eq!(
            OrthoCell::new(i32::MIN, 0).direction_toward(&OrthoCell::new(i32::MAX, 0)),
            Ok(Some(OrthoDirection::South))
        );
        assert_eq!(
            OrthoCell::new(0, i32::MAX).direction_toward(&OrthoCell::new(0, i32::MIN)),
            Ok(Some(OrthoDirection::West))
        );
    }

    #[test]
    fn direction_toward_breaks_ties_vertically() {
        let origin = OrthoCell::new(0, 0);
        assert_eq!(
            origin.direction_toward(&OrthoCell::new(1, 1)),
            Ok(Some(OrthoDirection::South))
        );
        assert_eq!(origin.direction_toward(&origin), Ok(None));
    }

    #[test]
    fn direction_toward_prefers_dominant_axis() {
        let origin = OrthoCell::new(5, 5);
        assert_eq!(
            origin.direction_toward(&OrthoCell::new(5, 9)),
            Ok(Some(OrthoDirection::East))
        );
        assert_eq!(
            origin.direction_toward(&OrthoCell::new(4, 0)),
            Ok(Some(OrthoDirection::West))
        );
        assert_eq!(
            origin.direction_toward(&OrthoCell::new(1, 7)),
            Ok(Some(OrthoDirection::North))
        );
        assert_eq!(
            origin.direction_toward(&OrthoCell::new(2, 2)),
            Ok(Some(OrthoDirection::North))
        );
    }

    #[test]
    fn clockwise_turns_cycle_through_four_directions() {
        let mut facing = OrthoDirection::East;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(facing);
            facing = facing.turned_clockwise();
        }
        assert_eq!(
            seen,
            vec![
                OrthoDirection::East,
                OrthoDirection::South,
                OrthoDirection::West,
                OrthoDirection::North,
            ]
        );
        assert_eq!(facing, OrthoDirection::East);
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = OrthoCell::new(1, 1);
        let destination = OrthoCell::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }
}
