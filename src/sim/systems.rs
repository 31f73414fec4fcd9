//! Simulation systems
//!
//! Small step functions over [`GameState`] parts. [`super::tick`] calls them
//! in a fixed order; each one is usable on its own in tests.

use glam::Vec2;

use super::ai::{AiContext, strategy_for};
use super::collision::{clamp_to_bounds, entities_collide};
use super::state::{
    EnemyKind, Enemy, Entity, GameMode, GameState, GameStatus, InputState, Player, Projectile,
    RngState, Vector2, spawn_ring,
};
use crate::angle_to;
use crate::consts::*;

/// Set velocity from movement intent, integrate, and keep the player on the canvas
///
/// Any non-zero intent moves at full speed; there is no acceleration.
pub fn update_player_movement(player: &mut Player, input: &InputState, dt: f32, bounds: Vector2) {
    let intent = input.movement();
    player.velocity = if intent.length_squared() > 0.0 {
        intent.normalize() * PLAYER_SPEED
    } else {
        Vec2::ZERO
    };

    player.integrate(dt);
    player.position = clamp_to_bounds(player.position, player.radius, bounds);
}

/// Face the input's aim target
pub fn update_player_aiming(player: &mut Player, input: &InputState) {
    player.aim_angle = angle_to(player.position, input.aim_target());
}

/// Fire along the aim angle if the cooldown has elapsed
///
/// `now` is the loop's elapsed-seconds clock. Returns whether a shot left.
pub fn try_fire_projectile(player: &mut Player, now: f32, projectiles: &mut Vec<Projectile>) -> bool {
    if now - player.last_fire_time < player.fire_rate {
        return false;
    }

    player.last_fire_time = now;
    projectiles.push(Projectile::fired_from(player.position, player.aim_angle));
    true
}

/// Advance projectiles and drop expired ones. Returns how many expired.
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, dt: f32) -> usize {
    let before = projectiles.len();
    for proj in projectiles.iter_mut() {
        proj.integrate(dt);
        proj.lifetime += dt;
    }
    projectiles.retain(|p| !p.is_expired());
    before - projectiles.len()
}

/// Run each enemy's AI strategy
pub fn update_enemies(enemies: &mut [Enemy], dt: f32, bounds: Vector2, rng: &mut RngState) {
    let mut ctx = AiContext { dt, bounds, rng };
    for enemy in enemies.iter_mut() {
        strategy_for(enemy.kind)(enemy, &mut ctx);
    }
}

/// What collision resolution did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub hits: u32,
    pub kills: u32,
}

/// Projectile vs enemy hits (O(P*E))
///
/// A projectile hits at most one enemy and is consumed by it. An enemy
/// whose health drops to zero or below is removed and scores a kill.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    // Reverse index walk so removals never skip an element
    let mut i = state.projectiles.len();
    while i > 0 {
        i -= 1;

        let mut j = state.enemies.len();
        while j > 0 {
            j -= 1;
            if !entities_collide(&state.projectiles[i], &state.enemies[j]) {
                continue;
            }

            let proj = state.projectiles.remove(i);
            let enemy = &mut state.enemies[j];
            enemy.health -= proj.damage;
            report.hits += 1;

            if enemy.health <= 0.0 {
                let enemy = state.enemies.remove(j);
                state.score += POINTS_PER_KILL;
                report.kills += 1;
                log::debug!(
                    "{:?} enemy destroyed at ({:.0}, {:.0}), score {}",
                    enemy.kind,
                    enemy.position.x,
                    enemy.position.y,
                    state.score
                );
            }
            break;
        }
    }

    report
}

/// Outcome of the round-end check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Arena cleared
    RoundComplete,
    /// Player died in the arena
    GameOver,
    /// Practice wave refilled with this many dummies
    Respawned(usize),
}

/// Mode state machine, evaluated after collisions
pub fn check_round_end(state: &mut GameState) -> Option<RoundEvent> {
    match state.mode {
        GameMode::Arena => {
            let mut event = None;
            // Cleared is checked first and wins a same-tick tie
            if state.enemies.is_empty() && state.status == GameStatus::Playing {
                state.status = GameStatus::RoundComplete;
                log::info!("Round {} complete, score {}", state.round_number, state.score);
                event = Some(RoundEvent::RoundComplete);
            }
            if state.player.is_dead() && state.status == GameStatus::Playing {
                state.status = GameStatus::GameOver;
                log::info!("Game over, score {}", state.score);
                event = Some(RoundEvent::GameOver);
            }
            event
        }
        GameMode::Practice => {
            // Health never ends a practice session
            if state.enemies.is_empty() && state.status == GameStatus::Playing {
                let wave = spawn_ring(state.center(), EnemyKind::Dummy, PRACTICE_ENEMY_COUNT);
                let count = wave.len();
                state.enemies.extend(wave);
                log::info!("Practice targets respawned ({})", count);
                Some(RoundEvent::Respawned(count))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing(mode: GameMode) -> GameState {
        let mut state = GameState::new(1280.0, 720.0, mode, 5);
        state.status = GameStatus::Playing;
        state
    }

    #[test]
    fn test_movement_normalizes_diagonal() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let input = InputState {
            move_x: 1.0,
            move_y: -1.0,
            ..Default::default()
        };
        update_player_movement(&mut player, &input, 0.1, Vec2::new(800.0, 600.0));
        assert!((player.velocity.length() - PLAYER_SPEED).abs() < 1e-3);
        assert!(player.position.x > 400.0 && player.position.y < 300.0);
    }

    #[test]
    fn test_movement_stops_without_intent() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        player.velocity = Vec2::new(100.0, 0.0);
        update_player_movement(&mut player, &InputState::default(), 0.1, Vec2::new(800.0, 600.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_movement_clamps_at_edge() {
        let mut player = Player::new(Vec2::new(22.0, 300.0));
        let input = InputState {
            move_x: -1.0,
            ..Default::default()
        };
        update_player_movement(&mut player, &input, 0.1, Vec2::new(800.0, 600.0));
        assert_eq!(player.position.x, player.radius);
    }

    #[test]
    fn test_aiming_points_at_target() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        update_player_aiming(&mut player, &InputState::aiming_at(Vec2::new(100.0, 200.0)));
        assert!((player.aim_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_fire_rate_gate() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let mut projectiles = Vec::new();

        assert!(try_fire_projectile(&mut player, 0.0, &mut projectiles));
        assert!(!try_fire_projectile(&mut player, 0.1, &mut projectiles));
        assert_eq!(projectiles.len(), 1);

        assert!(try_fire_projectile(&mut player, 0.25, &mut projectiles));
        assert_eq!(projectiles.len(), 2);
        assert_eq!(player.last_fire_time, 0.25);
    }

    #[test]
    fn test_fired_projectile_shape() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.aim_angle = std::f32::consts::PI;
        let mut projectiles = Vec::new();
        try_fire_projectile(&mut player, 1.0, &mut projectiles);

        let proj = &projectiles[0];
        assert_eq!(proj.position, player.position);
        assert!((proj.velocity - Vec2::new(-PROJECTILE_SPEED, 0.0)).length() < 1e-2);
        assert_eq!(proj.radius, PROJECTILE_RADIUS);
        assert_eq!(proj.damage, PROJECTILE_DAMAGE);
        assert_eq!(proj.lifetime, 0.0);
        assert_eq!(proj.max_lifetime, PROJECTILE_LIFETIME);
        // Ammo is not consumed
        assert_eq!(player.ammo, player.max_ammo);
    }

    #[test]
    fn test_projectiles_expire_in_order() {
        let mut projectiles = vec![
            Projectile::fired_from(Vec2::ZERO, 0.0),
            Projectile::fired_from(Vec2::ZERO, 1.0),
            Projectile::fired_from(Vec2::ZERO, 2.0),
        ];
        projectiles[0].lifetime = 1.75;
        projectiles[2].lifetime = 1.75;

        let expired = update_projectiles(&mut projectiles, 0.25);

        assert_eq!(expired, 2);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].lifetime, 0.25);
    }

    #[test]
    fn test_hit_without_kill() {
        let mut state = playing(GameMode::Arena);
        let target = state.enemies[0].position;
        state.projectiles.push(Projectile::fired_from(target, 0.0));

        let report = resolve_collisions(&mut state);

        assert_eq!(report, CollisionReport { hits: 1, kills: 0 });
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), ROUND_ENEMY_COUNT);
        assert_eq!(state.enemies[0].health, ENEMY_HEALTH - PROJECTILE_DAMAGE);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_kill_removes_enemy_and_scores() {
        let mut state = playing(GameMode::Arena);
        state.enemies[1].health = PROJECTILE_DAMAGE;
        let target = state.enemies[1].position;
        let survivor = state.enemies[2].clone();
        state.projectiles.push(Projectile::fired_from(target, 0.0));

        let report = resolve_collisions(&mut state);

        assert_eq!(report, CollisionReport { hits: 1, kills: 1 });
        assert_eq!(state.enemies.len(), ROUND_ENEMY_COUNT - 1);
        assert_eq!(state.enemies[1], survivor);
        assert_eq!(state.score, POINTS_PER_KILL);
    }

    #[test]
    fn test_projectile_hits_only_one_enemy() {
        let mut state = playing(GameMode::Practice);
        // Stack two dummies on the same spot
        let spot = state.enemies[0].position;
        state.enemies[1].position = spot;
        state.projectiles.push(Projectile::fired_from(spot, 0.0));

        let report = resolve_collisions(&mut state);

        assert_eq!(report.hits, 1);
        let damaged = state.enemies.iter().filter(|e| e.health < e.max_health).count();
        assert_eq!(damaged, 1);
    }

    #[test]
    fn test_touching_projectile_misses() {
        let mut state = playing(GameMode::Practice);
        let target = state.enemies[0].position;
        let offset = Vec2::new(PROJECTILE_RADIUS + ENEMY_RADIUS, 0.0);
        // Ring point at angle 0 is to the right of center; approach from further right
        state.projectiles.push(Projectile::fired_from(target + offset, 0.0));

        let report = resolve_collisions(&mut state);

        assert_eq!(report.hits, 0);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_arena_round_complete() {
        let mut state = playing(GameMode::Arena);
        state.enemies.clear();
        assert_eq!(check_round_end(&mut state), Some(RoundEvent::RoundComplete));
        assert_eq!(state.status, GameStatus::RoundComplete);
        // Terminal: nothing further happens
        assert_eq!(check_round_end(&mut state), None);
    }

    #[test]
    fn test_arena_game_over() {
        let mut state = playing(GameMode::Arena);
        state.player.health = -5.0;
        assert_eq!(check_round_end(&mut state), Some(RoundEvent::GameOver));
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_arena_clear_wins_over_death() {
        let mut state = playing(GameMode::Arena);
        state.enemies.clear();
        state.player.health = 0.0;
        assert_eq!(check_round_end(&mut state), Some(RoundEvent::RoundComplete));
        assert_eq!(state.status, GameStatus::RoundComplete);
    }

    #[test]
    fn test_practice_respawns_and_never_dies() {
        let mut state = playing(GameMode::Practice);
        state.player.health = -100.0;
        assert_eq!(check_round_end(&mut state), None);
        assert_eq!(state.status, GameStatus::Playing);

        state.enemies.clear();
        assert_eq!(check_round_end(&mut state), Some(RoundEvent::Respawned(PRACTICE_ENEMY_COUNT)));
        assert_eq!(state.enemies.len(), PRACTICE_ENEMY_COUNT);
        assert!(state.enemies.iter().all(|e| e.kind == EnemyKind::Dummy));
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_round_end_ignored_outside_playing() {
        let mut state = GameState::new(1280.0, 720.0, GameMode::Practice, 5);
        state.enemies.clear();
        assert_eq!(check_round_end(&mut state), None);
        assert!(state.enemies.is_empty());
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_canvas(
            x in 20.0f32..780.0, y in 20.0f32..580.0,
            mx in -1.0f32..=1.0, my in -1.0f32..=1.0,
            dt in 0.0001f32..=0.1, steps in 1usize..50,
        ) {
            let bounds = Vec2::new(800.0, 600.0);
            let mut player = Player::new(Vec2::new(x, y));
            let input = InputState { move_x: mx, move_y: my, ..Default::default() };
            for _ in 0..steps {
                update_player_movement(&mut player, &input, dt, bounds);
                prop_assert!(player.position.x >= player.radius);
                prop_assert!(player.position.x <= bounds.x - player.radius);
                prop_assert!(player.position.y >= player.radius);
                prop_assert!(player.position.y <= bounds.y - player.radius);
            }
        }

        #[test]
        fn prop_projectile_lives_exactly_max_lifetime(steps in 1u32..64) {
            // dt = 1/32 is exact in binary, so lifetimes sum without drift
            let dt = 1.0 / 32.0;
            let mut projectiles = vec![Projectile::fired_from(Vec2::ZERO, 0.0)];
            let max_lifetime = steps as f32 * dt;
            projectiles[0].max_lifetime = max_lifetime;

            for tick in 1..=steps {
                update_projectiles(&mut projectiles, dt);
                if tick < steps {
                    prop_assert_eq!(projectiles.len(), 1);
                } else {
                    prop_assert!(projectiles.is_empty());
                }
            }
        }
    }
}
