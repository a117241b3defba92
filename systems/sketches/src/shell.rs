use std::fmt;

use grid_sketch_core::GridError;
use grid_sketch_rendering::{FrameInput, Key, Scene, SketchMode};
use thiserror::Error;

use crate::{
    BasicEntities, ChaserSketch, ConfigError, HexGridSketch, HexagonSketch, SketchConfig,
    SketchKind,
};

/// Reasons the shell could not build its modes.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ShellError {
    /// The settings were rejected before any grid was allocated.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A mode's starting entities did not fit its grid.
    #[error(transparent)]
    Layout(#[from] GridError),
}

/// Hosts every sketch mode and forwards hooks to the active one.
///
/// Pressing a digit key between `1` and `4` switches modes; digit keys are
/// never forwarded. Inactive modes keep their state.
pub struct Shell {
    modes: [Box<dyn SketchMode>; 4],
    active: SketchKind,
}

impl Shell {
    /// Validates `config`, builds every mode from it and activates `start`.
    pub fn new(config: &SketchConfig, start: SketchKind) -> Result<Self, ShellError> {
        config.validate()?;
        Ok(Self {
            modes: [
                Box::new(BasicEntities::new(config)?),
                Box::new(ChaserSketch::new(config)?),
                Box::new(HexGridSketch::new(config)),
                Box::new(HexagonSketch::new(config)?),
            ],
            active: start,
        })
    }

    /// Currently active mode.
    #[must_use]
    pub fn active(&self) -> SketchKind {
        self.active
    }

    /// Activates the provided mode.
    pub fn select(&mut self, kind: SketchKind) {
        if kind != self.active {
            log::debug!("switching sketch from {} to {kind}", self.active);
            self.active = kind;
        }
    }

    /// Runs one frame: delivers key activity, updates, then redraws.
    pub fn frame(&mut self, input: &FrameInput, scene: &mut Scene) {
        for key in &input.pressed {
            self.key_pressed(*key);
        }
        for key in &input.released {
            self.key_released(*key);
        }
        self.update(input.frame);
        self.draw(scene);
    }

    fn mode(&self) -> &dyn SketchMode {
        self.modes[self.active.index()].as_ref()
    }

    fn mode_mut(&mut self) -> &mut dyn SketchMode {
        self.modes[self.active.index()].as_mut()
    }
}

impl SketchMode for Shell {
    fn title(&self) -> &str {
        self.mode().title()
    }

    fn update(&mut self, frame: u64) {
        self.mode_mut().update(frame);
    }

    fn draw(&self, scene: &mut Scene) {
        self.mode().draw(scene);
        scene.caption.clear();
        scene.caption.push_str(self.mode().title());
    }

    fn key_pressed(&mut self, key: Key) {
        if let Key::Char(digit) = key {
            if let Some(kind) = SketchKind::from_digit(digit) {
                self.select(kind);
                return;
            }
        }
        self.mode_mut().key_pressed(key);
    }

    fn key_released(&mut self, key: Key) {
        if matches!(key, Key::Char(digit) if SketchKind::from_digit(digit).is_some()) {
            return;
        }
        self.mode_mut().key_released(key);
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
