//! Single simulation step
//!
//! Runs every system once, in a fixed order, when the session is playing.

use super::state::{GameState, GameStatus, InputState};
use super::systems::{
    RoundEvent, check_round_end, resolve_collisions, try_fire_projectile, update_enemies,
    update_player_aiming, update_player_movement, update_projectiles,
};

/// What happened during one tick (for HUD/sound hooks)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// False when the state was not playing and nothing ran
    pub stepped: bool,
    pub shot_fired: bool,
    pub projectiles_expired: usize,
    pub hits: u32,
    pub kills: u32,
    /// Dummies added by a practice respawn
    pub respawned: usize,
    /// New status if the round ended this tick
    pub status_change: Option<GameStatus>,
}

/// Advance the game state by `dt` seconds
///
/// `now` is the session's elapsed-seconds clock, used for the fire-rate
/// gate. Order: movement, aiming, firing, projectiles, enemies,
/// collisions, round end.
pub fn tick(state: &mut GameState, input: &InputState, dt: f32, now: f32) -> TickEvents {
    let mut events = TickEvents::default();
    if state.status != GameStatus::Playing {
        return events;
    }
    events.stepped = true;

    let bounds = state.bounds();

    update_player_movement(&mut state.player, input, dt, bounds);
    update_player_aiming(&mut state.player, input);

    if input.firing {
        events.shot_fired = try_fire_projectile(&mut state.player, now, &mut state.projectiles);
    }

    events.projectiles_expired = update_projectiles(&mut state.projectiles, dt);
    update_enemies(&mut state.enemies, dt, bounds, &mut state.rng_state);

    let report = resolve_collisions(state);
    events.hits = report.hits;
    events.kills = report.kills;

    match check_round_end(state) {
        Some(RoundEvent::RoundComplete) => events.status_change = Some(GameStatus::RoundComplete),
        Some(RoundEvent::GameOver) => events.status_change = Some(GameStatus::GameOver),
        Some(RoundEvent::Respawned(count)) => events.respawned = count,
        None => {}
    }

    events
}
