use thiserror::Error;

use crate::EntityId;

/// Failures raised by cell, grid and entity operations.
///
/// Every variant is local and recoverable. Grid and cell operations return
/// them immediately; entity movement propagates them unchanged so the
/// driver handling player input can decide what to do.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum GridError {
    /// The token does not name a direction of the coordinate system.
    #[error("`{token}` is not a valid direction")]
    InvalidDirection {
        /// Token that failed to parse.
        token: String,
    },
    /// The cell fails the grid's validity predicate.
    #[error("cell ({row}, {col}) is out of bounds")]
    OutOfBounds {
        /// Row of the rejected cell.
        row: i32,
        /// Column of the rejected cell.
        col: i32,
    },
    /// The destination of an entity move already holds an occupant.
    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell {
        /// Row of the occupied cell.
        row: i32,
        /// Column of the occupied cell.
        col: i32,
    },
    /// The entity has no placement in the grid.
    #[error("entity {entity} is not placed in the grid")]
    NotPlaced {
        /// Entity that was expected to be placed.
        entity: EntityId,
    },
    /// The identifier does not belong to the world.
    #[error("entity {entity} does not exist")]
    UnknownEntity {
        /// Identifier that failed to resolve.
        entity: EntityId,
    },
    /// The coordinate system cannot derive a direction toward another cell.
    #[error("direction toward another cell is not supported on this coordinate system")]
    SteeringUnsupported,
}

impl GridError {
    /// Reports whether the error describes a blocked move rather than a
    /// misuse of the API.
    ///
    /// Autonomous behaviors treat blocked moves as ordinary control flow.
    #[must_use]
    pub const fn is_blocked_move(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::OccupiedCell { .. })
    }
}
