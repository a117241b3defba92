//! Key bindings translating keys into direction tokens.

use grid_sketch_rendering::Key;

/// Arrow keys mapped onto orthogonal directions.
#[must_use]
pub fn arrow_token(key: Key) -> Option<&'static str> {
    match key {
        Key::Up => Some("north"),
        Key::Down => Some("south"),
        Key::Left => Some("west"),
        Key::Right => Some("east"),
        _ => None,
    }
}

/// WASD keys mapped onto orthogonal directions.
#[must_use]
pub fn wasd_token(key: Key) -> Option<&'static str> {
    match key {
        Key::Char('w') => Some("north"),
        Key::Char('s') => Some("south"),
        Key::Char('a') => Some("west"),
        Key::Char('d') => Some("east"),
        _ => None,
    }
}

/// The `w e a d z x` cluster mapped onto hex directions.
#[must_use]
pub fn hex_token(key: Key) -> Option<&'static str> {
    match key {
        Key::Char('w') => Some("yx"),
        Key::Char('e') => Some("xy"),
        Key::Char('a') => Some("yz"),
        Key::Char('d') => Some("xz"),
        Key::Char('z') => Some("zy"),
        Key::Char('x') => Some("zx"),
        _ => None,
    }
}
