//! Bacon Ops - a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, systems, mode state machine)
//! - `game_loop`: Real-time orchestrator driving the simulation each frame
//! - `renderer`: Draw list generation and WebGPU backend
//! - `input`: Keyboard/mouse and virtual joystick adapters
//! - `best_score`: Best-score bookkeeping for finished arena runs
//! - `hud`: HUD and overlay data for the host page

pub mod best_score;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use best_score::{BestScoreStore, BestScoreTracker};
pub use game_loop::GameLoop;
pub use settings::{ControlScheme, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default canvas size
    pub const DEFAULT_CANVAS_WIDTH: f32 = 1280.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_MAX_AMMO: u32 = 30;
    /// Minimum seconds between shots
    pub const PLAYER_FIRE_RATE: f32 = 0.15;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 600.0;
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const PROJECTILE_DAMAGE: f32 = 25.0;
    /// Seconds before a projectile expires
    pub const PROJECTILE_LIFETIME: f32 = 2.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 25.0;
    pub const ENEMY_HEALTH: f32 = 100.0;
    pub const ENEMY_PATROL_SPEED: f32 = 80.0;

    /// Enemies per arena round
    pub const ROUND_ENEMY_COUNT: usize = 5;
    /// Dummies per practice wave
    pub const PRACTICE_ENEMY_COUNT: usize = 3;
    /// Distance from canvas center to the spawn ring
    pub const SPAWN_RING_RADIUS: f32 = 250.0;

    pub const POINTS_PER_KILL: u32 = 100;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the ray from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Point on a circle of `radius` around `center` at `angle`
#[inline]
pub fn point_on_ring(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + direction_from_angle(angle) * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_to_cardinal_directions() {
        let origin = Vec2::new(10.0, 10.0);
        assert!((angle_to(origin, Vec2::new(20.0, 10.0)) - 0.0).abs() < 1e-6);
        assert!((angle_to(origin, Vec2::new(10.0, 20.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_to(origin, Vec2::new(0.0, 10.0)).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!((normalize_angle(PI + 0.5) - (0.5 - PI)).abs() < 1e-5);
    }

    #[test]
    fn test_point_on_ring() {
        let p = point_on_ring(Vec2::new(640.0, 360.0), 250.0, 0.0);
        assert!((p - Vec2::new(890.0, 360.0)).length() < 1e-3);
    }
}
