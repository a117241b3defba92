#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid and entity state for the grid sketches.
//!
//! A [`World`] owns exactly one [`Grid`] together with the entities that
//! may occupy it. The grid is the sole owner of occupancy slots; entities
//! only remember the cell they were placed at. Every mutation goes through
//! the world so that both sides stay consistent: a non-empty slot always
//! holds an entity whose placement names that slot.

mod entity;
mod grid;
mod shapes;

use grid_sketch_core::{Cell, Command, Direction, EntityId, Event, GridError};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use entity::{Activity, Behavior, Entity, EntityKind};
pub use grid::{Grid, Shape};
pub use shapes::{Hexagon, HexagonHexGrid, HexGrid, OrthoGrid, Parallelogram, Rectangle};

const DEFAULT_SEED: u64 = 0x5eed_9a1d_c0ff_ee00;

/// Represents the authoritative state of one sketch: a grid and its
/// entities.
#[derive(Debug)]
pub struct World<S: Shape> {
    grid: Grid<S>,
    entities: Vec<Entity<S::Cell>>,
    rng: ChaCha8Rng,
    step_index: u64,
}

impl<S: Shape> World<S> {
    /// Creates an empty world over the provided grid shape.
    #[must_use]
    pub fn new(shape: S) -> Self {
        Self::with_seed(shape, DEFAULT_SEED)
    }

    /// Creates an empty world whose random choices derive from `seed`.
    #[must_use]
    pub fn with_seed(shape: S, seed: u64) -> Self {
        Self {
            grid: Grid::from_shape(shape),
            entities: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            step_index: 0,
        }
    }

    /// Creates a detached entity with the provided behavior.
    pub fn spawn(&mut self, behavior: Behavior<<S::Cell as Cell>::Direction>) -> EntityId {
        let id = EntityId::new(u32::try_from(self.entities.len()).unwrap_or(u32::MAX));
        self.entities.push(Entity::detached(id, behavior));
        id
    }

    /// Places the entity at `cell`, clobbering whatever occupied it.
    ///
    /// The clobbered entity is detached. An entity that was already placed
    /// vacates its previous cell first.
    pub fn put(&mut self, entity: EntityId, cell: S::Cell) -> Result<(), GridError> {
        self.place(entity, cell).map(|_| ())
    }

    /// Removes the entity from the grid, leaving it detached.
    ///
    /// Removing a detached entity is a no-op.
    pub fn remove(&mut self, entity: EntityId) -> Result<(), GridError> {
        self.detach(entity).map(|_| ())
    }

    /// Moves the entity into an empty cell.
    ///
    /// Fails with [`GridError::OccupiedCell`] when the destination holds an
    /// occupant and with [`GridError::OutOfBounds`] when it is not valid.
    pub fn move_to(&mut self, entity: EntityId, cell: S::Cell) -> Result<(), GridError> {
        let index = self.entity_index(entity)?;
        let from = self.placement(entity)?;
        if self.grid.get(cell)?.is_some() {
            return Err(GridError::OccupiedCell {
                row: cell.row(),
                col: cell.col(),
            });
        }
        let clobbered = self.grid.move_occupant(from, cell)?;
        debug_assert!(clobbered.is_none());
        self.entities[index].cell = Some(cell);
        Ok(())
    }

    /// Moves the entity one step in the provided direction.
    pub fn move_dir(
        &mut self,
        entity: EntityId,
        direction: <S::Cell as Cell>::Direction,
    ) -> Result<(), GridError> {
        let from = self.placement(entity)?;
        self.move_to(entity, from.adjacent(direction))
    }

    /// Moves the entity one step in the direction named by `token`.
    pub fn move_by_token(&mut self, entity: EntityId, token: &str) -> Result<(), GridError> {
        let direction = <<S::Cell as Cell>::Direction as Direction>::from_token(token)?;
        self.move_dir(entity, direction)
    }

    /// Runs the entity's per-step behavior once.
    pub fn act(&mut self, entity: EntityId) -> Result<Activity<S::Cell>, GridError> {
        let index = self.entity_index(entity)?;
        match self.entities[index].behavior {
            Behavior::Player { .. } | Behavior::Wall => Ok(Activity::Idle),
            Behavior::Patrol { facing } => self.patrol(index, facing),
            Behavior::Chaser { caught: true, .. } => Ok(Activity::Idle),
            Behavior::Chaser {
                target,
                caught: false,
            } => self.chase(index, target),
        }
    }

    /// Grid owned by the world.
    #[must_use]
    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, entity: EntityId) -> Option<&Entity<S::Cell>> {
        self.entities.get(usize::try_from(entity.get()).ok()?)
    }

    /// Cell occupied by the entity.
    ///
    /// Fails with [`GridError::NotPlaced`] for detached entities.
    pub fn placement(&self, entity: EntityId) -> Result<S::Cell, GridError> {
        let index = self.entity_index(entity)?;
        self.entities[index]
            .cell
            .ok_or(GridError::NotPlaced { entity })
    }

    fn patrol(
        &mut self,
        index: usize,
        facing: <S::Cell as Cell>::Direction,
    ) -> Result<Activity<S::Cell>, GridError> {
        let id = self.entities[index].id;
        let from = self.placement(id)?;
        match self.move_dir(id, facing) {
            Ok(()) => Ok(Activity::Moved {
                from,
                to: from.adjacent(facing),
            }),
            Err(reason) => {
                let turned = facing.turned_clockwise();
                self.entities[index].behavior = Behavior::Patrol { facing: turned };
                log::debug!("patrol {id} blocked at {from} ({reason}); now facing {turned}");
                Ok(Activity::Turned { facing: turned })
            }
        }
    }

    fn chase(&mut self, index: usize, target: EntityId) -> Result<Activity<S::Cell>, GridError> {
        let id = self.entities[index].id;
        let from = self.placement(id)?;
        let Some(goal) = self.entity(target).and_then(Entity::cell) else {
            return Ok(Activity::Idle);
        };
        let Some(direction) = from.direction_toward(&goal)? else {
            return Ok(Activity::Idle);
        };

        let next = from.adjacent(direction);
        if self.grid.is_valid(next) && self.grid.get(next)? == Some(target) {
            self.entities[index].behavior = Behavior::Chaser {
                target,
                caught: true,
            };
            log::info!("chaser {id} caught {target} at {next}");
            return Ok(Activity::Caught { target });
        }

        match self.move_to(id, next) {
            Ok(()) => Ok(Activity::Moved { from, to: next }),
            Err(reason) if reason.is_blocked_move() => {
                let options = self.grid.empty_adjacent_cells(from);
                let Some(detour) = options.choose(&mut self.rng).copied() else {
                    log::debug!("chaser {id} boxed in at {from}");
                    return Ok(Activity::Idle);
                };
                log::debug!("chaser {id} blocked toward {next}; detouring to {detour}");
                self.move_to(id, detour)?;
                Ok(Activity::Moved { from, to: detour })
            }
            Err(reason) => Err(reason),
        }
    }

    fn place(&mut self, entity: EntityId, cell: S::Cell) -> Result<Option<EntityId>, GridError> {
        let index = self.entity_index(entity)?;
        let _ = self.grid.get(cell)?;

        if let Some(previous) = self.entities[index].cell.take() {
            let _ = self.grid.remove(previous)?;
        }

        let clobbered = self.grid.put(cell, entity)?;
        self.entities[index].cell = Some(cell);

        if let Some(other) = clobbered {
            if let Ok(other_index) = self.entity_index(other) {
                self.entities[other_index].cell = None;
            }
            log::debug!("entity {entity} clobbered {other} at {cell}");
        }
        Ok(clobbered)
    }

    fn detach(&mut self, entity: EntityId) -> Result<Option<S::Cell>, GridError> {
        let index = self.entity_index(entity)?;
        let Some(cell) = self.entities[index].cell.take() else {
            return Ok(None);
        };
        let _ = self.grid.remove(cell)?;
        Ok(Some(cell))
    }

    fn entity_index(&self, entity: EntityId) -> Result<usize, GridError> {
        usize::try_from(entity.get())
            .ok()
            .filter(|index| *index < self.entities.len())
            .ok_or(GridError::UnknownEntity { entity })
    }
}

/// Applies the provided command to the world, reporting outcomes as events.
///
/// Failures never abort the caller: they are logged as warnings and
/// surfaced as [`Event::MoveRejected`].
pub fn apply<S: Shape>(
    world: &mut World<S>,
    command: Command<S::Cell>,
    out_events: &mut Vec<Event<S::Cell>>,
) {
    match command {
        Command::PlaceEntity { entity, cell } => match world.place(entity, cell) {
            Ok(clobbered) => out_events.push(Event::EntityPlaced {
                entity,
                cell,
                clobbered,
            }),
            Err(reason) => reject(entity, reason, out_events),
        },
        Command::RemoveEntity { entity } => match world.detach(entity) {
            Ok(Some(cell)) => out_events.push(Event::EntityRemoved { entity, cell }),
            Ok(None) => {}
            Err(reason) => reject(entity, reason, out_events),
        },
        Command::MoveEntity { entity, direction } => {
            let outcome = world.placement(entity).and_then(|from| {
                world.move_dir(entity, direction)?;
                Ok(from)
            });
            match outcome {
                Ok(from) => out_events.push(Event::EntityMoved {
                    entity,
                    from,
                    to: from.adjacent(direction),
                }),
                Err(reason) => reject(entity, reason, out_events),
            }
        }
        Command::Act { entity } => act_and_report(world, entity, out_events),
        Command::Tick => {
            let ids: Vec<EntityId> = world
                .entities
                .iter()
                .filter(|entity| entity.is_placed())
                .map(Entity::id)
                .collect();
            for entity in ids {
                act_and_report(world, entity, out_events);
            }
            world.step_index = world.step_index.saturating_add(1);
            out_events.push(Event::StepCompleted {
                step: world.step_index,
            });
        }
    }
}

fn act_and_report<S: Shape>(
    world: &mut World<S>,
    entity: EntityId,
    out_events: &mut Vec<Event<S::Cell>>,
) {
    match world.act(entity) {
        Ok(Activity::Idle) => {}
        Ok(Activity::Moved { from, to }) => {
            out_events.push(Event::EntityMoved { entity, from, to });
        }
        Ok(Activity::Turned { facing }) => {
            out_events.push(Event::FacingChanged { entity, facing });
        }
        Ok(Activity::Caught { target }) => out_events.push(Event::TargetCaught {
            chaser: entity,
            target,
        }),
        Err(reason) => reject(entity, reason, out_events),
    }
}

fn reject<C: Cell>(entity: EntityId, reason: GridError, out_events: &mut Vec<Event<C>>) {
    log::warn!("request for entity {entity} rejected: {reason}");
    out_events.push(Event::MoveRejected { entity, reason });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use grid_sketch_core::EntityId;

    use super::{Entity, Grid, Shape, World};

    /// Provides read-only access to the world's grid.
    #[must_use]
    pub fn grid<S: Shape>(world: &World<S>) -> &Grid<S> {
        &world.grid
    }

    /// Every entity in identifier order, placed or not.
    #[must_use]
    pub fn entities<S: Shape>(world: &World<S>) -> &[Entity<S::Cell>] {
        &world.entities
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity<S: Shape>(world: &World<S>, entity: EntityId) -> Option<&Entity<S::Cell>> {
        world.entity(entity)
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn step_index<S: Shape>(world: &World<S>) -> u64 {
        world.step_index
    }

    /// Verifies that grid slots and entity placements agree in both
    /// directions.
    #[must_use]
    pub fn placements_consistent<S: Shape>(world: &World<S>) -> bool {
        let slots_agree = world.grid.occupied_cells().into_iter().all(|cell| {
            world
                .grid
                .get(cell)
                .ok()
                .flatten()
                .and_then(|occupant| world.entity(occupant))
                .map_or(false, |entity| entity.cell == Some(cell))
        });
        let entities_agree = world.entities.iter().all(|entity| match entity.cell {
            Some(cell) => world.grid.get(cell) == Ok(Some(entity.id)),
            None => true,
        });
        slots_agree && entities_agree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_sketch_core::{EntityColor, OrthoCell, OrthoDirection};

    fn world(rows: u32, cols: u32) -> World<Rectangle> {
        World::new(Rectangle::new(rows, cols))
    }

    fn player() -> Behavior<OrthoDirection> {
        Behavior::player(EntityColor::from_rgb(0, 128, 255))
    }

    #[test]
    fn spawned_entities_start_detached() {
        let mut world = world(3, 3);
        let id = world.spawn(player());
        assert_eq!(world.placement(id), Err(GridError::NotPlaced { entity: id }));
        assert!(world.grid().occupied_cells().is_empty());
    }

    #[test]
    fn put_binds_entity_and_grid_slot() {
        let mut world = world(3, 3);
        let id = world.spawn(player());
        world.put(id, OrthoCell::new(1, 1)).expect("valid cell");

        assert_eq!(world.placement(id), Ok(OrthoCell::new(1, 1)));
        assert_eq!(world.grid().get(OrthoCell::new(1, 1)), Ok(Some(id)));
        assert!(query::placements_consistent(&world));
    }

    #[test]
    fn put_out_of_bounds_leaves_entity_untouched() {
        let mut world = world(3, 3);
        let id = world.spawn(player());
        world.put(id, OrthoCell::new(0, 0)).expect("valid cell");

        assert_eq!(
            world.put(id, OrthoCell::new(3, 0)),
            Err(GridError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(world.placement(id), Ok(OrthoCell::new(0, 0)));
    }

    #[test]
    fn clobbering_detaches_previous_occupant() {
        let mut world = world(3, 3);
        let first = world.spawn(Behavior::wall());
        let second = world.spawn(player());
        let cell = OrthoCell::new(2, 2);
        world.put(first, cell).expect("valid cell");
        world.put(second, cell).expect("valid cell");

        assert_eq!(world.grid().get(cell), Ok(Some(second)));
        assert_eq!(world.placement(first), Err(GridError::NotPlaced { entity: first }));
        assert!(query::placements_consistent(&world));
    }

    #[test]
    fn putting_a_placed_entity_vacates_its_old_cell() {
        let mut world = world(3, 3);
        let id = world.spawn(player());
        world.put(id, OrthoCell::new(0, 0)).expect("valid cell");
        world.put(id, OrthoCell::new(2, 1)).expect("valid cell");

        assert_eq!(world.grid().occupied_cells(), vec![OrthoCell::new(2, 1)]);
        assert!(query::placements_consistent(&world));
    }

    #[test]
    fn remove_clears_slot_and_placement() {
        let mut world = world(3, 3);
        let id = world.spawn(player());
        world.put(id, OrthoCell::new(1, 2)).expect("valid cell");
        world.remove(id).expect("known entity");

        assert_eq!(world.grid().get(OrthoCell::new(1, 2)), Ok(None));
        assert!(!world.entity(id).expect("known entity").is_placed());
        world.remove(id).expect("removing a detached entity is a no-op");
    }

    #[test]
    fn move_to_refuses_occupied_destinations() {
        let mut world = world(3, 3);
        let mover = world.spawn(player());
        let blocker = world.spawn(Behavior::wall());
        world.put(mover, OrthoCell::new(0, 0)).expect("valid cell");
        world.put(blocker, OrthoCell::new(0, 1)).expect("valid cell");

        assert_eq!(
            world.move_to(mover, OrthoCell::new(0, 1)),
            Err(GridError::OccupiedCell { row: 0, col: 1 })
        );
        assert_eq!(world.placement(mover), Ok(OrthoCell::new(0, 0)));
        assert_eq!(world.placement(blocker), Ok(OrthoCell::new(0, 1)));
    }

    #[test]
    fn move_to_own_cell_counts_as_occupied() {
        let mut world = world(3, 3);
        let id = world.spawn(player());
        world.put(id, OrthoCell::new(1, 1)).expect("valid cell");

        assert_eq!(
            world.move_to(id, OrthoCell::new(1, 1)),
            Err(GridError::OccupiedCell { row: 1, col: 1 })
        );
    }

    #[test]
    fn move_dir_propagates_bounds_and_token_errors() {
        let mut world = world(2, 2);
        let id = world.spawn(player());
        world.put(id, OrthoCell::new(0, 0)).expect("valid cell");

        assert_eq!(
            world.move_dir(id, OrthoDirection::North),
            Err(GridError::OutOfBounds { row: -1, col: 0 })
        );
        assert_eq!(
            world.move_by_token(id, "up"),
            Err(GridError::InvalidDirection {
                token: "up".to_owned()
            })
        );
        world.move_by_token(id, "south").expect("free cell");
        assert_eq!(world.placement(id), Ok(OrthoCell::new(1, 0)));
    }

    #[test]
    fn unknown_entities_are_reported() {
        let mut world = world(2, 2);
        let ghost = EntityId::new(42);
        assert_eq!(
            world.put(ghost, OrthoCell::new(0, 0)),
            Err(GridError::UnknownEntity { entity: ghost })
        );
        assert_eq!(
            world.act(ghost),
            Err(GridError::UnknownEntity { entity: ghost })
        );
    }

    #[test]
    fn walls_and_players_never_act() {
        let mut world = world(3, 3);
        let wall = world.spawn(Behavior::wall());
        let bot = world.spawn(player());
        world.put(wall, OrthoCell::new(0, 0)).expect("valid cell");
        world.put(bot, OrthoCell::new(2, 2)).expect("valid cell");

        assert_eq!(world.act(wall), Ok(Activity::Idle));
        assert_eq!(world.act(bot), Ok(Activity::Idle));
        assert_eq!(world.placement(wall), Ok(OrthoCell::new(0, 0)));
        assert_eq!(world.placement(bot), Ok(OrthoCell::new(2, 2)));
    }

    #[test]
    fn apply_reports_rejected_moves_without_moving() {
        let mut world = world(2, 2);
        let id = world.spawn(player());
        world.put(id, OrthoCell::new(0, 0)).expect("valid cell");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveEntity {
                entity: id,
                direction: OrthoDirection::West,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MoveEntity {
                entity: id,
                direction: OrthoDirection::East,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::MoveRejected {
                    entity: id,
                    reason: GridError::OutOfBounds { row: 0, col: -1 },
                },
                Event::EntityMoved {
                    entity: id,
                    from: OrthoCell::new(0, 0),
                    to: OrthoCell::new(0, 1),
                },
            ]
        );
    }

    #[test]
    fn apply_tick_counts_steps() {
        let mut world = world(2, 2);
        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);
        apply(&mut world, Command::Tick, &mut events);

        assert_eq!(query::step_index(&world), 2);
        assert_eq!(events.last(), Some(&Event::StepCompleted { step: 2 }));
    }

    #[test]
    fn apply_tick_skips_detached_entities() {
        let mut world = world(1, 2);
        let patrol = world.spawn(Behavior::patrol());
        let wall = world.spawn(Behavior::wall());
        let cell = OrthoCell::new(0, 0);
        world.put(patrol, cell).expect("valid cell");
        world.put(wall, cell).expect("valid cell");
        let mut events = Vec::new();

        apply(&mut world, Command::Tick, &mut events);

        assert_eq!(
            world.placement(patrol),
            Err(GridError::NotPlaced { entity: patrol })
        );
        assert_eq!(events, vec![Event::StepCompleted { step: 1 }]);
    }

    #[test]
    fn apply_place_and_remove_report_clobbering() {
        let mut world = world(2, 2);
        let wall = world.spawn(Behavior::wall());
        let bot = world.spawn(player());
        let cell = OrthoCell::new(1, 1);
        let mut events = Vec::new();

        apply(&mut world, Command::PlaceEntity { entity: wall, cell }, &mut events);
        apply(&mut world, Command::PlaceEntity { entity: bot, cell }, &mut events);
        apply(&mut world, Command::RemoveEntity { entity: bot }, &mut events);
        apply(&mut world, Command::RemoveEntity { entity: wall }, &mut events);

        assert_eq!(
            events,
            vec![
                Event::EntityPlaced {
                    entity: wall,
                    cell,
                    clobbered: None,
                },
                Event::EntityPlaced {
                    entity: bot,
                    cell,
                    clobbered: Some(wall),
                },
                Event::EntityRemoved { entity: bot, cell },
            ]
        );
        assert!(world.grid().occupied_cells().is_empty());
    }
}
