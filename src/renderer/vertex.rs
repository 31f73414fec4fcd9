//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [1.0, 0.42, 0.21, 1.0]; // #FF6B35
    pub const PLAYER_OUTLINE: [f32; 4] = [0.85, 0.26, 0.08, 1.0]; // #D84315
    pub const BARREL: [f32; 4] = [0.55, 0.27, 0.07, 1.0]; // #8B4513
    pub const ENEMY: [f32; 4] = [0.78, 0.16, 0.16, 1.0]; // #C62828
    pub const ENEMY_OUTLINE: [f32; 4] = [0.55, 0.0, 0.0, 1.0]; // #8B0000
    pub const HEALTH_BACK: [f32; 4] = [0.2, 0.2, 0.2, 1.0]; // #333
    pub const HEALTH_FILL: [f32; 4] = [0.3, 0.69, 0.31, 1.0]; // #4CAF50
    pub const PROJECTILE: [f32; 4] = [1.0, 0.42, 0.21, 1.0];
    pub const AIM_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.15];
    pub const BACKGROUND: [f32; 4] = [0.07, 0.05, 0.04, 1.0];
}
