//! Rendering
//!
//! [`scene`] turns a [`GameState`] into a triangle list in canvas pixels;
//! [`pipeline`] draws that list with WebGPU. The loop only sees the
//! [`Renderer`] trait.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{SceneOptions, build_scene};
pub use vertex::Vertex;

use crate::sim::GameState;

/// Draws a state snapshot; must not mutate it
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Draws nothing (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

impl<F> Renderer for F
where
    F: FnMut(&GameState),
{
    fn render(&mut self, state: &GameState) {
        self(state)
    }
}
