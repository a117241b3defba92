use grid_sketch_core::{EntityColor, EntityId, Event, GridError, HexCell};
use grid_sketch_rendering::{Key, Scene, SketchMode};
use grid_sketch_world::{Behavior, Hexagon, Parallelogram, World};

use crate::{bindings, draw::draw_world, steer, SketchConfig};

/// An empty hex parallelogram, useful for eyeballing the layout math.
#[derive(Debug)]
pub struct HexGridSketch {
    world: World<Parallelogram>,
}

impl HexGridSketch {
    /// Builds a `hex_rows × hex_cols` parallelogram.
    ///
    /// `config` is expected to have passed [`SketchConfig::validate`].
    #[must_use]
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            world: World::new(Parallelogram::new(
                config.hex_rows,
                config.hex_cols,
                config.orientation,
            )),
        }
    }

    /// World driven by the sketch.
    #[must_use]
    pub fn world(&self) -> &World<Parallelogram> {
        &self.world
    }
}

impl SketchMode for HexGridSketch {
    fn title(&self) -> &str {
        "Hex grid"
    }

    fn draw(&self, scene: &mut Scene) {
        draw_world(&self.world, scene);
    }
}

/// A hexagon-shaped grid with a bot steered by `w e a d z x`.
#[derive(Debug)]
pub struct HexagonSketch {
    world: World<Hexagon>,
    bot: EntityId,
    events: Vec<Event<HexCell>>,
}

impl HexagonSketch {
    /// Builds a hexagon of radius `hex_radius` with the bot at its center.
    pub fn new(config: &SketchConfig) -> Result<Self, GridError> {
        let shape = Hexagon::new(config.hex_radius, config.orientation);
        let mut world = World::with_seed(shape, config.seed);
        let bot = world.spawn(Behavior::player(EntityColor::from_rgb(255, 0, 0)));
        world.put(bot, shape.center())?;
        Ok(Self {
            world,
            bot,
            events: Vec::new(),
        })
    }

    /// World driven by the sketch.
    #[must_use]
    pub fn world(&self) -> &World<Hexagon> {
        &self.world
    }

    /// Key-driven bot.
    #[must_use]
    pub fn bot(&self) -> EntityId {
        self.bot
    }

    /// Events produced by the most recent key release.
    #[must_use]
    pub fn events(&self) -> &[Event<HexCell>] {
        &self.events
    }
}

impl SketchMode for HexagonSketch {
    fn title(&self) -> &str {
        "Hexagon-shaped grid"
    }

    fn draw(&self, scene: &mut Scene) {
        draw_world(&self.world, scene);
    }

    fn key_released(&mut self, key: Key) {
        if let Some(token) = bindings::hex_token(key) {
            self.events.clear();
            steer(&mut self.world, self.bot, token, &mut self.events);
        }
    }
}
