//! Enemy AI strategies
//!
//! Each [`EnemyKind`] maps to one strategy function. Callers go through
//! [`strategy_for`], so a new kind only needs a new arm there.

use glam::Vec2;

use super::collision::reflect_in_bounds;
use super::state::{Enemy, EnemyKind, Entity, RngState, Vector2};
use crate::consts::ENEMY_PATROL_SPEED;
use crate::direction_from_angle;

/// What a strategy may read or draw from besides the enemy itself
pub struct AiContext<'a> {
    pub dt: f32,
    /// Canvas size
    pub bounds: Vector2,
    pub rng: &'a mut RngState,
}

/// Per-tick velocity policy for one enemy
pub type AiStrategy = fn(&mut Enemy, &mut AiContext<'_>);

/// Strategy lookup
pub fn strategy_for(kind: EnemyKind) -> AiStrategy {
    match kind {
        EnemyKind::Dummy => update_dummy,
        EnemyKind::Patrol => update_patrol,
    }
}

/// Stationary target
pub fn update_dummy(enemy: &mut Enemy, _ctx: &mut AiContext<'_>) {
    enemy.velocity = Vec2::ZERO;
}

/// Constant-speed heading, bouncing off the canvas edges
pub fn update_patrol(enemy: &mut Enemy, ctx: &mut AiContext<'_>) {
    let heading = match enemy.patrol_direction {
        Some(heading) => heading,
        None => {
            let heading = ctx.rng.next_angle();
            enemy.patrol_direction = Some(heading);
            heading
        }
    };

    enemy.velocity = direction_from_angle(heading) * ENEMY_PATROL_SPEED;
    enemy.integrate(ctx.dt);

    let (position, new_heading) = reflect_in_bounds(enemy.position, enemy.radius, heading, ctx.bounds);
    enemy.position = position;
    enemy.patrol_direction = Some(new_heading);
}
