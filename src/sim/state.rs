//! Game state and core simulation types
//!
//! Everything the loop mutates each tick lives in [`GameState`]; a fresh
//! one is built per session.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::point_on_ring;

/// 2D vector in canvas space (origin top-left, y down)
pub type Vector2 = Vec2;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    /// Built but not started
    Menu,
    /// Systems run every tick
    Playing,
    /// Host-driven pause
    Paused,
    /// Arena cleared
    RoundComplete,
    /// Player died in arena mode
    GameOver,
}

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// One round of patrol enemies, permanent death
    #[default]
    Arena,
    /// Respawning dummies, no death
    Practice,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Arena => "arena",
            GameMode::Practice => "practice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arena" => Some(GameMode::Arena),
            "practice" => Some(GameMode::Practice),
            _ => None,
        }
    }
}

/// Shared shape of everything that moves: a circle with a velocity
pub trait Entity {
    fn position(&self) -> Vector2;
    fn velocity(&self) -> Vector2;
    fn radius(&self) -> f32;

    /// Integrate position by velocity
    fn integrate(&mut self, dt: f32);
}

macro_rules! impl_entity {
    ($ty:ty) => {
        impl Entity for $ty {
            fn position(&self) -> Vector2 {
                self.position
            }

            fn velocity(&self) -> Vector2 {
                self.velocity
            }

            fn radius(&self) -> f32 {
                self.radius
            }

            fn integrate(&mut self, dt: f32) {
                self.position += self.velocity * dt;
            }
        }
    };
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// Tracked for the HUD; firing does not consume it
    pub ammo: u32,
    pub max_ammo: u32,
    /// Minimum seconds between shots
    pub fire_rate: f32,
    /// Elapsed-clock time of the last shot
    pub last_fire_time: f32,
    /// Facing direction (radians)
    pub aim_angle: f32,
}

impl Player {
    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            ammo: PLAYER_MAX_AMMO,
            max_ammo: PLAYER_MAX_AMMO,
            fire_rate: PLAYER_FIRE_RATE,
            // The elapsed clock starts at 0; allow a shot on the first tick
            last_fire_time: -PLAYER_FIRE_RATE,
            aim_angle: 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

impl_entity!(Player);

/// Enemy behavior variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnemyKind {
    /// Stationary target
    Dummy,
    /// Bounces off the canvas bounds at a fixed speed
    Patrol,
}

/// A hostile target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    /// Heading (radians), patrol enemies only; assigned lazily when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol_direction: Option<f32>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vector2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius: ENEMY_RADIUS,
            health: ENEMY_HEALTH,
            max_health: ENEMY_HEALTH,
            kind,
            patrol_direction: None,
        }
    }

    /// Fraction of health left, for health bars
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl_entity!(Enemy);

/// A shot fired by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projectile {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f32,
    pub damage: f32,
    /// Seconds alive
    pub lifetime: f32,
    /// Seconds until expiry
    pub max_lifetime: f32,
}

impl Projectile {
    /// Fresh projectile leaving `origin` along `angle`
    pub fn fired_from(origin: Vector2, angle: f32) -> Self {
        Self {
            position: origin,
            velocity: crate::direction_from_angle(angle) * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            damage: PROJECTILE_DAMAGE,
            lifetime: 0.0,
            max_lifetime: PROJECTILE_LIFETIME,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime >= self.max_lifetime
    }
}

impl_entity!(Projectile);

/// Per-tick input snapshot produced by an adapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputState {
    /// Movement intent, each axis in [-1, 1]
    pub move_x: f32,
    pub move_y: f32,
    /// Aim target in canvas coordinates
    pub aim_x: f32,
    pub aim_y: f32,
    pub firing: bool,
}

impl InputState {
    /// Idle input aiming at `target`
    pub fn aiming_at(target: Vector2) -> Self {
        Self {
            aim_x: target.x,
            aim_y: target.y,
            ..Default::default()
        }
    }

    pub fn movement(&self) -> Vector2 {
        Vec2::new(self.move_x, self.move_y)
    }

    pub fn aim_target(&self) -> Vector2 {
        Vec2::new(self.aim_x, self.aim_y)
    }
}

/// Seeded random stream, stored as (seed, draws) so it serializes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Rebuild the generator positioned after all previous draws
    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.draws);
        rng
    }

    /// Uniform angle in [0, TAU)
    pub fn next_angle(&mut self) -> f32 {
        let mut rng = self.to_rng();
        self.draws += 1;
        rng.random::<f32>() * TAU
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub status: GameStatus,
    pub mode: GameMode,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub round_number: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub rng_state: RngState,
}

impl GameState {
    /// Build the opening arrangement for `mode` on a canvas of the given size
    pub fn new(canvas_width: f32, canvas_height: f32, mode: GameMode, seed: u64) -> Self {
        let center = Vec2::new(canvas_width / 2.0, canvas_height / 2.0);
        let enemies = match mode {
            GameMode::Practice => spawn_ring(center, EnemyKind::Dummy, PRACTICE_ENEMY_COUNT),
            GameMode::Arena => spawn_ring(center, EnemyKind::Patrol, ROUND_ENEMY_COUNT),
        };

        Self {
            status: GameStatus::Menu,
            mode,
            player: Player::new(center),
            enemies,
            projectiles: Vec::new(),
            score: 0,
            round_number: 1,
            canvas_width,
            canvas_height,
            rng_state: RngState::new(seed),
        }
    }

    pub fn center(&self) -> Vector2 {
        Vec2::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    pub fn bounds(&self) -> Vector2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Status is terminal until the host builds a new state
    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::RoundComplete | GameStatus::GameOver)
    }
}

/// Place `count` enemies evenly on the spawn ring around `center`
///
/// Patrol enemies start heading tangentially (a quarter turn past their
/// ring angle).
pub fn spawn_ring(center: Vector2, kind: EnemyKind, count: usize) -> Vec<Enemy> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * TAU;
            let mut enemy = Enemy::new(kind, point_on_ring(center, SPAWN_RING_RADIUS, angle));
            if kind == EnemyKind::Patrol {
                enemy.patrol_direction = Some(angle + FRAC_PI_2);
            }
            enemy
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_factory_layout() {
        let state = GameState::new(1280.0, 720.0, GameMode::Arena, 7);
        assert_eq!(state.status, GameStatus::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.round_number, 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), ROUND_ENEMY_COUNT);
        assert_eq!(state.player.position, Vec2::new(640.0, 360.0));
        assert_eq!(state.player.health, state.player.max_health);
        assert_eq!(state.player.ammo, state.player.max_ammo);

        for enemy in &state.enemies {
            assert_eq!(enemy.kind, EnemyKind::Patrol);
            assert!(enemy.patrol_direction.is_some());
            let dist = (enemy.position - state.center()).length();
            assert!((dist - SPAWN_RING_RADIUS).abs() < 1e-3);
        }

        // First enemy sits to the right of center, heading down
        let first = &state.enemies[0];
        assert!((first.position - Vec2::new(890.0, 360.0)).length() < 1e-3);
        assert!((first.patrol_direction.unwrap() - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_practice_factory_layout() {
        let state = GameState::new(800.0, 600.0, GameMode::Practice, 7);
        assert_eq!(state.enemies.len(), PRACTICE_ENEMY_COUNT);
        for enemy in &state.enemies {
            assert_eq!(enemy.kind, EnemyKind::Dummy);
            assert_eq!(enemy.patrol_direction, None);
            assert_eq!(enemy.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_rng_state_is_reproducible() {
        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        let first: Vec<f32> = (0..4).map(|_| a.next_angle()).collect();
        let second: Vec<f32> = (0..4).map(|_| b.next_angle()).collect();
        assert_eq!(first, second);
        assert_eq!(a.draws, 4);
        assert!(first.iter().all(|angle| (0.0..TAU).contains(angle)));
        // Draws continue the stream rather than repeating it
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn test_snapshot_serializes_with_host_field_names() {
        let state = GameState::new(1280.0, 720.0, GameMode::Arena, 1);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "menu");
        assert_eq!(json["mode"], "arena");
        assert_eq!(json["roundNumber"], 1);
        assert_eq!(json["enemies"][0]["type"], "patrol");
        assert!(json["player"]["aimAngle"].is_number());

        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back.enemies, state.enemies);
    }

    #[test]
    fn test_game_mode_from_str() {
        assert_eq!(GameMode::from_str("Practice"), Some(GameMode::Practice));
        assert_eq!(GameMode::from_str("arena"), Some(GameMode::Arena));
        assert_eq!(GameMode::from_str("deathmatch"), None);
    }
}
