//! Draw list for one frame
//!
//! Back to front: aim line, player, enemies (with health bars),
//! projectiles. Coordinates are canvas pixels, origin top-left.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Enemy, GameState, Player};

const CIRCLE_SEGMENTS: u32 = 32;
const PROJECTILE_SEGMENTS: u32 = 12;
const OUTLINE_WIDTH: f32 = 3.0;
const BARREL_WIDTH: f32 = 8.0;
/// How far the barrel sticks out past the player's edge
const BARREL_REACH: f32 = 15.0;
const HEALTH_BAR_HEIGHT: f32 = 4.0;
/// Gap between an enemy's top edge and its health bar
const HEALTH_BAR_OFFSET: f32 = 10.0;

/// Optional layers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub health_bars: bool,
    /// Aim target to draw a guide line to, if any
    pub aim_line_to: Option<Vec2>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            health_bars: true,
            aim_line_to: None,
        }
    }
}

impl SceneOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            health_bars: settings.show_health_bars,
            aim_line_to: None,
        }
    }
}

/// Build the full triangle list for `state`
pub fn build_scene(state: &GameState, options: &SceneOptions) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    if let Some(target) = options.aim_line_to {
        vertices.extend(shapes::line(state.player.position, target, 1.0, colors::AIM_LINE));
    }

    push_player(&mut vertices, &state.player);

    for enemy in &state.enemies {
        push_enemy(&mut vertices, enemy, options.health_bars);
    }

    for proj in &state.projectiles {
        vertices.extend(shapes::circle(
            proj.position,
            proj.radius,
            colors::PROJECTILE,
            PROJECTILE_SEGMENTS,
        ));
    }

    vertices
}

fn push_player(vertices: &mut Vec<Vertex>, player: &Player) {
    vertices.extend(shapes::circle(player.position, player.radius, colors::PLAYER, CIRCLE_SEGMENTS));
    vertices.extend(shapes::ring(
        player.position,
        player.radius,
        OUTLINE_WIDTH,
        colors::PLAYER_OUTLINE,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(shapes::bar(
        player.position,
        player.aim_angle,
        player.radius + BARREL_REACH,
        BARREL_WIDTH,
        colors::BARREL,
    ));
}

fn push_enemy(vertices: &mut Vec<Vertex>, enemy: &Enemy, health_bar: bool) {
    vertices.extend(shapes::circle(enemy.position, enemy.radius, colors::ENEMY, CIRCLE_SEGMENTS));
    vertices.extend(shapes::ring(
        enemy.position,
        enemy.radius,
        OUTLINE_WIDTH,
        colors::ENEMY_OUTLINE,
        CIRCLE_SEGMENTS,
    ));

    if health_bar {
        let width = enemy.radius * 2.0;
        let top_left = enemy.position - Vec2::new(width / 2.0, enemy.radius + HEALTH_BAR_OFFSET);
        vertices.extend(shapes::rect(top_left, Vec2::new(width, HEALTH_BAR_HEIGHT), colors::HEALTH_BACK));
        vertices.extend(shapes::rect(
            top_left,
            Vec2::new(width * enemy.health_fraction(), HEALTH_BAR_HEIGHT),
            colors::HEALTH_FILL,
        ));
    }
}
