use grid_sketch_core::{Command, EntityColor, EntityId, Event, GridError, OrthoCell};
use grid_sketch_rendering::{Key, Scene, SketchMode};
use grid_sketch_world::{apply, Behavior, Rectangle, World};

use crate::{bindings, draw::draw_world, steer, SketchConfig};

/// Two key-driven bots sharing a grid with a patrol.
///
/// The arrow keys steer one bot and WASD the other; the patrol acts once
/// per act interval.
#[derive(Debug)]
pub struct BasicEntities {
    world: World<Rectangle>,
    arrow_bot: EntityId,
    wasd_bot: EntityId,
    patrol: EntityId,
    act_interval: u64,
    events: Vec<Event<OrthoCell>>,
}

impl BasicEntities {
    /// Builds the sketch on a `grid_rows × grid_cols` grid.
    ///
    /// `config` is expected to have passed [`SketchConfig::validate`].
    pub fn new(config: &SketchConfig) -> Result<Self, GridError> {
        let mut world = World::with_seed(
            Rectangle::new(config.grid_rows, config.grid_cols),
            config.seed,
        );
        let arrow_bot = world.spawn(Behavior::player(EntityColor::from_rgb(0, 128, 255)));
        let wasd_bot = world.spawn(Behavior::player(EntityColor::from_rgb(255, 128, 0)));
        let patrol = world.spawn(Behavior::patrol());

        world.put(arrow_bot, OrthoCell::new(3, 3))?;
        world.put(wasd_bot, OrthoCell::new(5, 5))?;
        world.put(patrol, OrthoCell::new(0, 0))?;

        Ok(Self {
            world,
            arrow_bot,
            wasd_bot,
            patrol,
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
    pub fn arrow_bot(&self) -> EntityId {
        self.arrow_bot
    }

    /// Bot steered by WASD.
    #[must_use]
    pub fn wasd_bot(&self) -> EntityId {
        self.wasd_bot
    }

    /// Autonomous patrol.
    #[must_use]
    pub fn patrol(&self) -> EntityId {
        self.patrol
    }

    /// Events produced by the most recent update or key release.
    #[must_use]
    pub fn events(&self) -> &[Event<OrthoCell>] {
        &self.events
    }
}

impl SketchMode for BasicEntities {
    fn title(&self) -> &str {
        "Basic entities"
    }

    fn update(&mut self, frame: u64) {
        if frame % self.act_interval == 0 {
            self.events.clear();
            apply(
                &mut self.world,
                Command::Act {
                    entity: self.patrol,
                },
                &mut self.events,
            );
        }
    }

    fn draw(&self, scene: &mut Scene) {
        draw_world(&self.world, scene);
    }

    fn key_released(&mut self, key: Key) {
        let (entity, token) = if let Some(token) = bindings::arrow_token(key) {
            (self.arrow_bot, token)
        } else if let Some(token) = bindings::wasd_token(key) {
            (self.wasd_bot, token)
        } else {
            return;
        };
        self.events.clear();
        steer(&mut self.world, entity, token, &mut self.events);
    }
}
