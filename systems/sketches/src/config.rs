//! Tunables shared by every sketch mode.

use std::{fmt, str::FromStr};

use grid_sketch_core::Orientation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of slots a single sketch grid may allocate.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Settings controlling grid sizes, pacing and randomness of the sketches.
///
/// Every field falls back to its default when missing from a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// Seed for wall placement and chaser detours.
    pub seed: u64,
    /// Autonomous entities act once every this many frames.
    pub act_interval_frames: u64,
    /// Number of wall placement attempts in the chaser sketch.
    pub wall_count: u32,
    /// Rows of the orthogonal sketches' grid.
    pub grid_rows: u32,
    /// Columns of the orthogonal sketches' grid.
    pub grid_cols: u32,
    /// Rows of the hex parallelogram.
    pub hex_rows: u32,
    /// Columns of the hex parallelogram.
    pub hex_cols: u32,
    /// Radius of the hexagon-shaped grid, center included.
    pub hex_radius: u32,
    /// Orientation of every hex grid.
    pub orientation: Orientation,
    /// Pixels per layout unit.
    pub scale: f32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            act_interval_frames: 30,
            wall_count: 20,
            grid_rows: 10,
            grid_cols: 10,
            hex_rows: 5,
            hex_cols: 9,
            hex_radius: 4,
            orientation: Orientation::Flat,
            scale: 40.0,
        }
    }
}

impl SketchConfig {
    /// Rejects settings that would leave a sketch without cells or pacing,
    /// or whose grids exceed [`MAX_GRID_CELLS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("act_interval_frames", self.act_interval_frames),
            ("grid_rows", u64::from(self.grid_rows)),
            ("grid_cols", u64::from(self.grid_cols)),
            ("hex_rows", u64::from(self.hex_rows)),
            ("hex_cols", u64::from(self.hex_cols)),
            ("hex_radius", u64::from(self.hex_radius)),
        ];
        if let Some((field, _)) = sizes.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Zero { field: *field });
        }
        let hexagon_side = 2 * u64::from(self.hex_radius) - 1;
        let grids = [
            ("grid_rows * grid_cols", u64::from(self.grid_rows) * u64::from(self.grid_cols)),
            ("hex_rows * hex_cols", u64::from(self.hex_rows) * u64::from(self.hex_cols)),
            ("hex_radius", hexagon_side.saturating_mul(hexagon_side)),
        ];
        if let Some((field, cells)) = grids.iter().find(|(_, cells)| *cells > MAX_GRID_CELLS) {
            return Err(ConfigError::GridTooLarge {
                field: *field,
                cells: *cells,
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale { scale: self.scale });
        }
        Ok(())
    }
}

/// Errors reported while validating sketch settings.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A size or interval was zero.
    #[error("`{field}` must be at least 1")]
    Zero {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A grid would hold more slots than [`MAX_GRID_CELLS`].
    #[error(
        "`{field}` spans {cells} cells; at most {limit} are supported",
        limit = MAX_GRID_CELLS
    )]
    GridTooLarge {
        /// Setting, or product of settings, that sized the grid.
        field: &'static str,
        /// Slots the grid would have needed.
        cells: u64,
    },
    /// The drawing scale was not a positive number.
    #[error("`scale` must be positive (received {scale})")]
    InvalidScale {
        /// Offending scale.
        scale: f32,
    },
    /// A sketch name did not match any mode.
    #[error("`{name}` is not a sketch; expected basic, chaser, hex-grid or hexagon")]
    UnknownSketch {
        /// Name that failed to parse.
        name: String,
    },
}

/// The selectable sketch modes, in digit-key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SketchKind {
    /// Two key-driven bots and a patrol.
    #[default]
    Basic,
    /// A key-driven bot pursued by a chaser through random walls.
    Chaser,
    /// A hex parallelogram.
    HexGrid,
    /// A hexagon-shaped hex grid with a key-driven bot.
    Hexagon,
}

impl SketchKind {
    /// Every mode, in digit-key order.
    pub const ALL: [Self; 4] = [Self::Basic, Self::Chaser, Self::HexGrid, Self::Hexagon];

    /// Zero-based position of the mode in [`SketchKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Basic => 0,
            Self::Chaser => 1,
            Self::HexGrid => 2,
            Self::Hexagon => 3,
        }
    }

    /// Mode selected by the digit key `digit`.
    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    /// Name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Chaser => "chaser",
            Self::HexGrid => "hex-grid",
            Self::Hexagon => "hexagon",
        }
    }
}

impl FromStr for SketchKind {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lowered = name.trim().to_ascii_lowercase();
        let mut chars = lowered.chars();
        if let (Some(digit), None) = (chars.next(), chars.next()) {
            if let Some(kind) = Self::from_digit(digit) {
                return Ok(kind);
            }
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered || kind.name().replace('-', "") == lowered)
            .ok_or_else(|| ConfigError::UnknownSketch {
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for SketchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
