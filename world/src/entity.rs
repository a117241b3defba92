//! Entities and their per-step behaviors.

use grid_sketch_core::{Cell, Direction, EntityColor, EntityId};

/// Per-step behavior of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior<D: Direction> {
    /// Moves only when a driver forwards player input.
    Player {
        /// Fill color used when drawing the entity.
        color: EntityColor,
    },
    /// Walks straight ahead and turns clockwise whenever a step fails.
    Patrol {
        /// Direction of the next attempted step.
        facing: D,
    },
    /// Immobile blocker.
    Wall,
    /// Steps toward a target until it stands next to it.
    Chaser {
        /// Entity being pursued.
        target: EntityId,
        /// Set once the target was reached; never cleared.
        caught: bool,
    },
}

impl<D: Direction> Behavior<D> {
    /// Player-controlled behavior drawn with the provided color.
    #[must_use]
    pub fn player(color: EntityColor) -> Self {
        Self::Player { color }
    }

    /// Patrol behavior facing the first direction of the clockwise order.
    #[must_use]
    pub fn patrol() -> Self {
        Self::Patrol {
            facing: D::CLOCKWISE[0],
        }
    }

    /// Immobile wall behavior.
    #[must_use]
    pub fn wall() -> Self {
        Self::Wall
    }

    /// Pursuit behavior chasing the provided entity.
    #[must_use]
    pub fn chaser(target: EntityId) -> Self {
        Self::Chaser {
            target,
            caught: false,
        }
    }

    /// Coarse classification of the behavior.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Player { .. } => EntityKind::Player,
            Self::Patrol { .. } => EntityKind::Patrol,
            Self::Wall => EntityKind::Wall,
            Self::Chaser { .. } => EntityKind::Chaser,
        }
    }
}

/// Coarse classification of entity behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Player-controlled bot.
    Player,
    /// Autonomous patrol bot.
    Patrol,
    /// Immobile wall.
    Wall,
    /// Autonomous pursuer.
    Chaser,
}

/// Occupant of a grid together with its back-reference to its placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity<C: Cell> {
    pub(crate) id: EntityId,
    pub(crate) behavior: Behavior<C::Direction>,
    pub(crate) cell: Option<C>,
}

impl<C: Cell> Entity<C> {
    pub(crate) fn detached(id: EntityId, behavior: Behavior<C::Direction>) -> Self {
        Self {
            id,
            behavior,
            cell: None,
        }
    }

    /// Identifier assigned by the world.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current behavior state.
    #[must_use]
    pub fn behavior(&self) -> &Behavior<C::Direction> {
        &self.behavior
    }

    /// Cell currently occupied, or `None` while detached.
    #[must_use]
    pub fn cell(&self) -> Option<C> {
        self.cell
    }

    /// Reports whether the entity occupies a cell.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.cell.is_some()
    }
}

/// Outcome of a single call to an entity's behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity<C: Cell> {
    /// Nothing changed.
    Idle,
    /// The entity stepped between two cells.
    Moved {
        /// Cell occupied before the step.
        from: C,
        /// Cell occupied after the step.
        to: C,
    },
    /// A patrol was blocked and turned to a new facing.
    Turned {
        /// Direction now faced.
        facing: C::Direction,
    },
    /// A chaser reached its target.
    Caught {
        /// Entity that was caught.
        target: EntityId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_sketch_core::{HexDirection, OrthoCell, OrthoDirection};

    #[test]
    fn patrol_starts_facing_first_clockwise_direction() {
        assert_eq!(
            Behavior::<OrthoDirection>::patrol(),
            Behavior::Patrol {
                facing: OrthoDirection::East
            }
        );
        assert_eq!(
            Behavior::<HexDirection>::patrol(),
            Behavior::Patrol {
                facing: HexDirection::Xz
            }
        );
    }

    #[test]
    fn new_entities_are_detached() {
        let entity: Entity<OrthoCell> = Entity::detached(EntityId::new(0), Behavior::wall());
        assert!(!entity.is_placed());
        assert_eq!(entity.behavior().kind(), EntityKind::Wall);
    }
}
