use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Cell, Direction, GridError};

/// Hexagonal cell stored in axial `(row, col)` coordinates.
///
/// Cube coordinates are derived on demand: `x = col`, `z = row` and
/// `y = -row - col`, so `x + y + z == 0` for every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCell {
    row: i32,
    col: i32,
}

impl HexCell {
    /// Creates a new hex cell from axial coordinates.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cube x axis, equal to the column.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.col
    }

    /// Cube y axis, derived from the other two.
    #[must_use]
    pub const fn y(&self) -> i32 {
        -self.row - self.col
    }

    /// Cube z axis, equal to the row.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.row
    }

    /// Cube coordinates as an `(x, y, z)` triple.
    #[must_use]
    pub const fn cube(&self) -> (i32, i32, i32) {
        (self.x(), self.y(), self.z())
    }

    /// Number of hex steps separating two cells.
    #[must_use]
    pub fn distance(self, other: HexCell) -> u32 {
        let dx = self.x().abs_diff(other.x());
        let dy = self.y().abs_diff(other.y());
        let dz = self.z().abs_diff(other.z());
        dx.max(dy).max(dz)
    }
}

impl Cell for HexCell {
    type Direction = HexDirection;

    fn at(row: i32, col: i32) -> Self {
        Self::new(row, col)
    }

    fn row(&self) -> i32 {
        self.row
    }

    fn col(&self) -> i32 {
        self.col
    }
}

impl fmt::Display for HexCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Six-neighbour directions of the hex grid.
///
/// Each name lists the cube axis the step heads toward first and the axis it
/// leans toward second: `Xy` moves toward positive x, angled toward y. The
/// labels do not depend on whether hexagons are drawn pointy or flat topped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexDirection {
    /// Column plus one.
    Xz,
    /// Row plus one.
    Zx,
    /// Row plus one, column minus one.
    Zy,
    /// Column minus one.
    Yz,
    /// Row minus one.
    Yx,
    /// Row minus one, column plus one.
    Xy,
}

impl Direction for HexDirection {
    const ALL: &'static [Self] = &[
        Self::Xz,
        Self::Zx,
        Self::Zy,
        Self::Yz,
        Self::Yx,
        Self::Xy,
    ];

    // Declaration order already walks clockwise around the hexagon.
    const CLOCKWISE: &'static [Self] = Self::ALL;

    fn delta(self) -> (i32, i32) {
        match self {
            Self::Xz => (0, 1),
            Self::Zx => (1, 0),
            Self::Zy => (1, -1),
            Self::Yz => (0, -1),
            Self::Yx => (-1, 0),
            Self::Xy => (-1, 1),
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Xz => Self::Yz,
            Self::Zx => Self::Yx,
            Self::Zy => Self::Xy,
            Self::Yz => Self::Xz,
            Self::Yx => Self::Zx,
            Self::Xy => Self::Zy,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Xz => "xz",
            Self::Zx => "zx",
            Self::Zy => "zy",
            Self::Yz => "yz",
            Self::Yx => "yx",
            Self::Xy => "xy",
        }
    }
}

impl FromStr for HexDirection {
    type Err = GridError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::from_token(token)
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Which part of each hexagon points up when drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// A vertex at the top.
    Pointy,
    /// An edge at the top.
    #[default]
    Flat,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pointy" => Ok(Self::Pointy),
            "flat" => Ok(Self::Flat),
            other => Err(format!("`{other}` is not a hexagon orientation")),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pointy => f.write_str("pointy"),
            Self::Flat => f.write_str("flat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_coordinates_always_sum_to_zero() {
        for row in -6..=6 {
            for col in -6..=6 {
                let (x, y, z) = HexCell::new(row, col).cube();
                assert_eq!(x + y + z, 0, "cube sum broken at ({row}, {col})");
            }
        }
    }

    #[test]
    fn opposite_steps_return_to_origin() {
        let cell = HexCell::new(2, -1);
        for direction in HexDirection::ALL {
            let there = cell.adjacent(*direction);
            assert_ne!(there, cell);
            assert_eq!(there.adjacent(direction.opposite()), cell);
        }
    }

    #[test]
    fn every_step_is_a_unit_cube_move() {
        let cell = HexCell::new(0, 0);
        for neighbour in cell.all_adjacent() {
            assert_eq!(cell.distance(neighbour), 1);
            let (x, y, z) = neighbour.cube();
            assert_eq!(x.abs() + y.abs() + z.abs(), 2);
        }
    }

    #[test]
    fn all_adjacent_returns_six_cells_in_declaration_order() {
        let neighbours = HexCell::new(1, 1).all_adjacent();
        assert_eq!(
            neighbours,
            vec![
                HexCell::new(1, 2),
                HexCell::new(2, 1),
                HexCell::new(2, 0),
                HexCell::new(1, 0),
                HexCell::new(0, 1),
                HexCell::new(0, 2),
            ]
        );
    }

    #[test]
    fn orthogonal_tokens_are_invalid_on_hex_cells() {
        assert_eq!(
            HexCell::new(0, 0).adjacent_by_token("north"),
            Err(GridError::InvalidDirection {
                token: "north".to_owned()
            })
        );
        assert_eq!(
            HexCell::new(0, 0).adjacent_by_token("zy"),
            Ok(HexCell::new(1, -1))
        );
    }

    #[test]
    fn steering_is_not_available_on_hex_cells() {
        let origin = HexCell::new(0, 0);
        assert_eq!(
            origin.direction_toward(&HexCell::new(2, 2)),
            Err(GridError::SteeringUnsupported)
        );
    }

    #[test]
    fn clockwise_turns_wrap_after_six_steps() {
        let mut facing = HexDirection::Xz;
        for _ in 0..6 {
            facing = facing.turned_clockwise();
        }
        assert_eq!(facing, HexDirection::Xz);
        assert_eq!(HexDirection::Xy.turned_clockwise(), HexDirection::Xz);
    }

    #[test]
    fn orientation_parses_from_lowercase_names() {
        assert_eq!("flat".parse::<Orientation>(), Ok(Orientation::Flat));
        assert_eq!("pointy".parse::<Orientation>(), Ok(Orientation::Pointy));
        assert!("round".parse::<Orientation>().is_err());
    }
}
