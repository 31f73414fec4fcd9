//! HUD and overlay data read from a published snapshot

use crate::sim::{GameState, GameStatus};

/// End-of-run overlay to show, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    Victory,
    Defeat,
}

/// Everything the HUD displays, already formatted-ready
#[derive(Debug, Clone, PartialEq)]
pub struct HudData {
    pub health: f32,
    pub max_health: f32,
    pub score: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub round: u32,
    pub enemies_left: usize,
    pub overlay: Overlay,
    /// Touch controls only make sense while playing
    pub show_touch_controls: bool,
}

impl HudData {
    pub fn from_state(state: &GameState) -> Self {
        let overlay = match state.status {
            GameStatus::Paused => Overlay::Paused,
            GameStatus::RoundComplete => Overlay::Victory,
            GameStatus::GameOver => Overlay::Defeat,
            GameStatus::Menu | GameStatus::Playing => Overlay::None,
        };

        Self {
            health: state.player.health,
            max_health: state.player.max_health,
            score: state.score,
            ammo: state.player.ammo,
            max_ammo: state.player.max_ammo,
            round: state.round_number,
            enemies_left: state.enemies.len(),
            overlay,
            show_touch_controls: state.status == GameStatus::Playing,
        }
    }

    /// Health as a 0..=1 fraction for the bar width
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn health_text(&self) -> String {
        format!("{:.0}/{:.0}", self.health.max(0.0), self.max_health)
    }

    pub fn ammo_text(&self) -> String {
        format!("{}/{}", self.ammo, self.max_ammo)
    }
}
