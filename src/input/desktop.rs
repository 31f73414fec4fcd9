//! Keyboard + mouse adapter
//!
//! Key and mouse events update raw device state immediately; the
//! [`InputState`] snapshot is only rebuilt by [`KeyboardMouse::sample`],
//! which the host calls on a fixed interval independent of rendering.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::InputState;

/// On-page rectangle of the canvas plus its backing-store size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    /// CSS size
    pub width: f32,
    pub height: f32,
    /// Backing-store (simulation) size
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl CanvasRect {
    /// Map a client-space point to canvas pixels
    pub fn to_canvas(&self, client_x: f32, client_y: f32) -> Vec2 {
        let scale_x = if self.width > 0.0 { self.canvas_width / self.width } else { 1.0 };
        let scale_y = if self.height > 0.0 { self.canvas_height / self.height } else { 1.0 };
        Vec2::new((client_x - self.left) * scale_x, (client_y - self.top) * scale_y)
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardMouse {
    /// Held keys, lower-cased
    keys: HashSet<String>,
    mouse: Vec2,
    button_down: bool,
    sampled: InputState,
}

impl KeyboardMouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase());
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    /// Track the pointer in canvas pixels
    pub fn mouse_move(&mut self, client_x: f32, client_y: f32, rect: &CanvasRect) {
        self.mouse = rect.to_canvas(client_x, client_y);
    }

    pub fn mouse_down(&mut self) {
        self.button_down = true;
    }

    pub fn mouse_up(&mut self) {
        self.button_down = false;
    }

    /// Drop held keys and the button (e.g. on window blur)
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.button_down = false;
    }

    fn held(&self, a: &str, b: &str) -> bool {
        self.keys.contains(a) || self.keys.contains(b)
    }

    /// Rebuild the snapshot from the current device state
    pub fn sample(&mut self) -> InputState {
        let mut move_x = 0.0;
        let mut move_y = 0.0;
        if self.held("w", "arrowup") {
            move_y -= 1.0;
        }
        if self.held("s", "arrowdown") {
            move_y += 1.0;
        }
        if self.held("a", "arrowleft") {
            move_x -= 1.0;
        }
        if self.held("d", "arrowright") {
            move_x += 1.0;
        }

        self.sampled = InputState {
            move_x,
            move_y,
            aim_x: self.mouse.x,
            aim_y: self.mouse.y,
            firing: self.button_down,
        };
        self.sampled
    }

    /// Last sampled snapshot
    pub fn current(&self) -> InputState {
        self.sampled
    }
}
