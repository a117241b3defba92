#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Demo sketch modes built on the grid sketch world.
//!
//! Each mode owns a [`World`](grid_sketch_world::World), translates key
//! releases into movement commands, paces its autonomous entities by frame
//! number and describes itself through a
//! [`Scene`](grid_sketch_rendering::Scene). The [`Shell`] hosts all four
//! modes behind the digit keys.

mod basic;
pub mod bindings;
mod chaser;
mod config;
mod draw;
mod hex;
mod shell;

use grid_sketch_core::{Cell, Command, Direction, EntityId, Event};
use grid_sketch_world::{apply, Shape, World};

pub use basic::BasicEntities;
pub use chaser::ChaserSketch;
pub use config::{ConfigError, SketchConfig, SketchKind, MAX_GRID_CELLS};
pub use hex::{HexGridSketch, HexagonSketch};
pub use shell::{Shell, ShellError};

/// Moves `entity` one step in the direction named by `token`.
///
/// Unknown tokens are logged and ignored; rejected moves surface as events.
fn steer<S: Shape>(
    world: &mut World<S>,
    entity: EntityId,
    token: &str,
    out_events: &mut Vec<Event<S::Cell>>,
) {
    match <<S::Cell as Cell>::Direction as Direction>::from_token(token) {
        Ok(direction) => apply(world, Command::MoveEntity { entity, direction }, out_events),
        Err(error) => log::warn!("ignoring input for entity {entity}: {error}"),
    }
}
