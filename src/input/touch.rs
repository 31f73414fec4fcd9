//! Virtual joystick + fire button for touch screens
//!
//! Event driven: every touch handler writes straight into the snapshot.

use glam::Vec2;

use crate::sim::InputState;

/// Default knob travel (CSS px)
pub const JOYSTICK_MAX_DISTANCE: f32 = 40.0;

#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    max_distance: f32,
    active: bool,
    /// Knob offset from the joystick center, for drawing the stick
    knob: Vec2,
    state: InputState,
}

impl VirtualJoystick {
    /// Aim defaults to `aim_default` (usually the canvas center)
    pub fn new(max_distance: f32, aim_default: Vec2) -> Self {
        Self {
            max_distance: max_distance.max(1.0),
            active: false,
            knob: Vec2::ZERO,
            state: InputState::aiming_at(aim_default),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn knob_offset(&self) -> Vec2 {
        self.knob
    }

    /// Touch landed on the joystick whose center is at `center`
    pub fn touch_start(&mut self, touch: Vec2, center: Vec2) {
        self.active = true;
        self.touch_move(touch, center);
    }

    /// Knob follows the finger, limited to `max_distance`
    pub fn touch_move(&mut self, touch: Vec2, center: Vec2) {
        if !self.active {
            return;
        }
        self.knob = (touch - center).clamp_length_max(self.max_distance);
        let movement = self.knob / self.max_distance;
        self.state.move_x = movement.x;
        self.state.move_y = movement.y;
    }

    pub fn touch_end(&mut self) {
        self.active = false;
        self.knob = Vec2::ZERO;
        self.state.move_x = 0.0;
        self.state.move_y = 0.0;
    }

    pub fn set_firing(&mut self, firing: bool) {
        self.state.firing = firing;
    }

    /// Aim target in canvas pixels
    pub fn aim_at(&mut self, target: Vec2) {
        self.state.aim_x = target.x;
        self.state.aim_y = target.y;
    }

    pub fn current(&self) -> InputState {
        self.state
    }
}
