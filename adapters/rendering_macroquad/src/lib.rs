#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the grid sketches.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use grid_sketch_core::Layout;
use grid_sketch_rendering::{
    Color, EntityGlyph, FrameInput, GlyphShape, Key, Presentation, RenderingBackend, Scene,
};
use macroquad::input::{is_key_pressed, is_key_released, KeyCode};

const MARGIN: f32 = 60.0;
const CAPTION_SIZE: f32 = 28.0;

/// Physical keys forwarded to sketches.
const KEY_BINDINGS: [(KeyCode, Key); 15] = [
    (KeyCode::Up, Key::Up),
    (KeyCode::Down, Key::Down),
    (KeyCode::Left, Key::Left),
    (KeyCode::Right, Key::Right),
    (KeyCode::W, Key::Char('w')),
    (KeyCode::A, Key::Char('a')),
    (KeyCode::S, Key::Char('s')),
    (KeyCode::D, Key::Char('d')),
    (KeyCode::E, Key::Char('e')),
    (KeyCode::Z, Key::Char('z')),
    (KeyCode::X, Key::Char('x')),
    (KeyCode::Key1, Key::Char('1')),
    (KeyCode::Key2, Key::Char('2')),
    (KeyCode::Key3, Key::Char('3')),
    (KeyCode::Key4, Key::Char('4')),
];

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Configures the swap interval forwarded to macroquad.
    ///
    /// `Some(0)` disables vsync; `None` keeps the platform default.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scale,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let background = to_macroquad_color(clear_color);
            let mut scene = Scene::new(Layout::Square);
            let mut frame = 0_u64;

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }
                frame += 1;
                update_scene(poll_input(frame), &mut scene);

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(&scene, scale);
                draw_cells(&scene, &metrics);
                for glyph in &scene.glyphs {
                    draw_glyph(glyph, &metrics);
                }
                draw_caption(&scene.caption);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn poll_input(frame: u64) -> FrameInput {
    let mut input = FrameInput {
        frame,
        ..FrameInput::default()
    };
    for (code, key) in KEY_BINDINGS {
        if is_key_pressed(code) {
            input.pressed.push(key);
        }
        if is_key_released(code) {
            input.released.push(key);
        }
    }
    input
}

/// Maps layout units onto window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    origin: Vec2,
    scale: f32,
}

impl SceneMetrics {
    /// Places the scene's top-left bound at the window margin.
    fn from_scene(scene: &Scene, scale: f32) -> Self {
        let origin = scene.bounds().map_or(Vec2::ZERO, |(min, _)| min);
        Self { origin, scale }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.origin) * self.scale + Vec2::splat(MARGIN)
    }

    fn length(&self, units: f32) -> f32 {
        units * self.scale
    }
}

fn draw_cells(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(Color::WHITE);
    for cell in &scene.cells {
        let corners: Vec<Vec2> = scene
            .outline_corners(cell)
            .into_iter()
            .map(|corner| metrics.to_screen(corner))
            .collect();
        for (index, from) in corners.iter().enumerate() {
            let to = corners[(index + 1) % corners.len()];
            macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, 1.0, color);
        }
    }
}

fn draw_glyph(glyph: &EntityGlyph, metrics: &SceneMetrics) {
    let center = metrics.to_screen(glyph.center);
    let stroke = to_macroquad_color(glyph.stroke);
    match glyph.shape {
        GlyphShape::Disc { diameter } => {
            let radius = metrics.length(diameter) / 2.0;
            if let Some(fill) = glyph.fill {
                macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(fill));
            }
            macroquad::shapes::draw_circle_lines(center.x, center.y, radius, 1.0, stroke);
        }
        GlyphShape::Block { size } => {
            let side = metrics.length(size);
            let corner = center - Vec2::splat(side / 2.0);
            if let Some(fill) = glyph.fill {
                macroquad::shapes::draw_rectangle(
                    corner.x,
                    corner.y,
                    side,
                    side,
                    to_macroquad_color(fill),
                );
            }
            macroquad::shapes::draw_rectangle_lines(corner.x, corner.y, side, side, 1.0, stroke);
        }
        GlyphShape::Marker { size, heading } => {
            let side = metrics.length(size);
            let corner = center - Vec2::splat(side / 2.0);
            macroquad::shapes::draw_rectangle_lines(corner.x, corner.y, side, side, 1.0, stroke);
            let tip = center + heading * (side / 2.0);
            macroquad::shapes::draw_line(center.x, center.y, tip.x, tip.y, 1.0, stroke);
        }
    }
}

fn draw_caption(caption: &str) {
    if caption.is_empty() {
        return;
    }
    let _ = macroquad::text::draw_text(
        caption,
        MARGIN / 2.0,
        CAPTION_SIZE,
        CAPTION_SIZE,
        to_macroquad_color(Color::WHITE),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_sketch_core::Orientation;
    use std::collections::HashSet;

    #[test]
    fn key_bindings_are_unique() {
        let keys: HashSet<Key> = KEY_BINDINGS.iter().map(|(_, key)| *key).collect();
        assert_eq!(keys.len(), KEY_BINDINGS.len());
    }

    #[test]
    fn key_bindings_only_forward_keys_sketches_read() {
        for (_, key) in KEY_BINDINGS {
            match key {
                Key::Char(symbol) => assert!("wasdezx1234".contains(symbol), "{symbol}"),
                Key::Up | Key::Down | Key::Left | Key::Right => {}
                Key::Escape => panic!("escape quits instead of reaching sketches"),
            }
        }
    }

    #[test]
    fn key_bindings_cover_every_digit_mode() {
        for digit in ['1', '2', '3', '4'] {
            assert!(KEY_BINDINGS.iter().any(|(_, key)| *key == Key::Char(digit)));
        }
    }

    #[test]
    fn metrics_place_top_left_cell_at_the_margin() {
        let mut scene = Scene::new(Layout::Square);
        scene.push_cell(0, 0);
        scene.push_cell(1, 1);
        let metrics = SceneMetrics::from_scene(&scene, 40.0);

        assert_eq!(metrics.to_screen(Vec2::ZERO), Vec2::splat(MARGIN));
        assert_eq!(
            metrics.to_screen(scene.cells[1].center),
            Vec2::splat(MARGIN + 60.0)
        );
    }

    #[test]
    fn metrics_shift_hex_scenes_into_view() {
        let mut scene = Scene::new(Layout::Hex(Orientation::Flat));
        scene.push_cell(0, 0);
        let metrics = SceneMetrics::from_scene(&scene, 10.0);

        let screen = metrics.to_screen(scene.cells[0].center);
        assert!((screen.x - (MARGIN + 10.0)).abs() < 1e-4);
        assert!(screen.y > MARGIN);
    }

    #[test]
    fn empty_scene_uses_the_layout_origin() {
        let metrics = SceneMetrics::from_scene(&Scene::new(Layout::Square), 20.0);
        assert_eq!(metrics.length(2.0), 40.0);
        assert_eq!(metrics.to_screen(Vec2::ZERO), Vec2::splat(MARGIN));
    }
}
