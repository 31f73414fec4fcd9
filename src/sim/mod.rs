//! Simulation core
//!
//! All gameplay logic lives here. Rules for this module:
//! - Stepped only through [`tick`] with an explicit `dt` and clock
//! - Seeded RNG only
//! - Stable iteration order for enemies and projectiles
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod systems;
pub mod tick;

pub use ai::{AiContext, AiStrategy, strategy_for};
pub use collision::{circles_overlap, clamp_to_bounds, entities_collide, reflect_in_bounds};
pub use state::{
    Enemy, EnemyKind, Entity, GameMode, GameState, GameStatus, InputState, Player, Projectile,
    RngState, Vector2, spawn_ring,
};
pub use systems::{CollisionReport, RoundEvent};
pub use tick::{TickEvents, tick};
