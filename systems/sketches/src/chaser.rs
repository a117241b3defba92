use grid_sketch_core::{Cell, Command, EntityColor, EntityId, Event, GridError, OrthoCell};
use grid_sketch_rendering::{Key, Scene, SketchMode};
use grid_sketch_world::{apply, Behavior, Rectangle, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{bindings, draw::draw_world, steer, SketchConfig};

/// An arrow-key bot pursued by a chaser through randomly placed walls.
#[derive(Debug)]
pub struct ChaserSketch {
    world: World<Rectangle>,
    bot: EntityId,
    chaser: EntityId,
    walls: Vec<EntityId>,
    act_interval: u64,
    events: Vec<Event<OrthoCell>>,
}

impl ChaserSketch {
    /// Builds the sketch, scattering `wall_count` walls from `seed`.
    ///
    /// Walls never land on the bot or chaser; a wall drawn onto another wall
    /// clobbers it.
    pub fn new(config: &SketchConfig) -> Result<Self, GridError> {
        let mut world = World::with_seed(
            Rectangle::new(config.grid_rows, config.grid_cols),
            config.seed,
        );
        let bot = world.spawn(Behavior::player(EntityColor::from_rgb(0, 128, 255)));
        let chaser = world.spawn(Behavior::chaser(bot));
        world.put(bot, OrthoCell::new(5, 6))?;
        world.put(chaser, OrthoCell::new(0, 0))?;

        let reserved = [world.placement(bot)?, world.placement(chaser)?];
        let rows = i32::try_from(config.grid_rows).unwrap_or(i32::MAX).max(1);
        let cols = i32::try_from(config.grid_cols).unwrap_or(i32::MAX).max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut walls = Vec::new();
        for _ in 0..config.wall_count {
            let cell = OrthoCell::at(rng.gen_range(0..rows), rng.gen_range(0..cols));
            if reserved.contains(&cell) {
                continue;
            }
            let wall = world.spawn(Behavior::wall());
            world.put(wall, cell)?;
            walls.push(wall);
        }
        log::debug!(
            "chaser sketch scattered {} walls from seed {}",
            walls.len(),
            config.seed
        );

        Ok(Self {
            world,
            bot,
            chaser,
            walls,
            act_interval: config.act_interval_frames.max(1),
            events: Vec::new(),
        })
    }

    /// World driven by the sketch.
    #[must_use]
    pub fn world(&self) -> &World<Rectangle> {
        &self.world
    }

    /// Bot steered by the arrow keys.
    #[must_use]
    pub fn bot(&self) -> EntityId {
        self.bot
    }

    /// Entity pursuing the bot.
    #[must_use]
    pub fn chaser(&self) -> EntityId {
        self.chaser
    }

    /// Every wall spawned, including walls later clobbered by another wall.
    #[must_use]
    pub fn walls(&self) -> &[EntityId] {
        &self.walls
    }

    /// Events produced by the most recent update or key release.
    #[must_use]
    pub fn events(&self) -> &[Event<OrthoCell>] {
        &self.events
    }
}

impl SketchMode for ChaserSketch {
    fn title(&self) -> &str {
        "Chaser"
    }

    fn update(&mut self, frame: u64) {
        if frame % self.act_interval == 0 {
            self.events.clear();
            apply(
                &mut self.world,
                Command::Act {
                    entity: self.chaser,
                },
                &mut self.events,
            );
        }
    }

    fn draw(&self, scene: &mut Scene) {
        draw_world(&self.world, scene);
    }

    fn key_released(&mut self, key: Key) {
        if let Some(token) = bindings::arrow_token(key) {
            self.events.clear();
            steer(&mut self.world, self.bot, token, &mut self.events);
        }
    }
}
