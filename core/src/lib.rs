#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the grid sketch workspace.
//!
//! This crate defines the coordinate systems and the message surface that
//! connects drivers with the authoritative world. Cells are immutable values
//! implementing [`Cell`]; each coordinate system supplies its direction
//! vocabulary through [`Direction`]. Drivers submit [`Command`] values, the
//! world executes them through its `apply` entry point and reports what
//! happened as [`Event`] values.

mod cell;
mod error;
mod hex;
mod ortho;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cell::{Cell, Direction};
pub use error::GridError;
pub use hex::{HexCell, HexDirection, Orientation};
pub use ortho::{OrthoCell, OrthoDirection};

/// Unique identifier assigned to an entity by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visual appearance applied to a player-controlled entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EntityColor {
    /// Creates a new entity color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Describes how a grid's cells are laid out on the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Unit squares, one per `(row, col)`.
    Square,
    /// Unit-circumradius hexagons drawn with the provided orientation.
    Hex(Orientation),
}

/// Commands that express all driver-initiated world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command<C: Cell> {
    /// Places a detached or placed entity at the provided cell, clobbering
    /// any occupant.
    PlaceEntity {
        /// Entity being placed.
        entity: EntityId,
        /// Destination cell.
        cell: C,
    },
    /// Clears an entity's placement.
    RemoveEntity {
        /// Entity being removed from the grid.
        entity: EntityId,
    },
    /// Requests that an entity step once in the provided direction.
    MoveEntity {
        /// Entity attempting to move.
        entity: EntityId,
        /// Direction of travel.
        direction: C::Direction,
    },
    /// Runs a single entity's per-step behavior.
    Act {
        /// Entity that should act.
        entity: EntityId,
    },
    /// Runs the per-step behavior of every placed entity in identifier order.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<C: Cell> {
    /// Confirms that an entity was placed into the grid.
    EntityPlaced {
        /// Entity that was placed.
        entity: EntityId,
        /// Cell the entity occupies.
        cell: C,
        /// Entity detached because it previously held the cell, if any.
        clobbered: Option<EntityId>,
    },
    /// Confirms that an entity left the grid.
    EntityRemoved {
        /// Entity that was removed.
        entity: EntityId,
        /// Cell the entity occupied before removal.
        cell: C,
    },
    /// Confirms that an entity moved between two cells.
    EntityMoved {
        /// Entity that moved.
        entity: EntityId,
        /// Cell occupied before the move.
        from: C,
        /// Cell occupied after the move.
        to: C,
    },
    /// Reports that a driver-requested move or act failed.
    MoveRejected {
        /// Entity whose request failed.
        entity: EntityId,
        /// Specific reason the request failed.
        reason: GridError,
    },
    /// Announces that a patrolling entity turned after being blocked.
    FacingChanged {
        /// Entity that turned.
        entity: EntityId,
        /// Direction the entity now faces.
        facing: C::Direction,
    },
    /// Announces that a chaser reached its target.
    TargetCaught {
        /// Chasing entity.
        chaser: EntityId,
        /// Entity that was caught.
        target: EntityId,
    },
    /// Indicates that every entity acted once.
    StepCompleted {
        /// Number of completed steps, starting at one.
        step: u64,
    },
}
