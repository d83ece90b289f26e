//! Vertex data structure and layout for voxel rendering.
//!
//! This module defines the vertex format produced by surface extraction and
//! provides the buffer layout the rendering pipeline binds it with.

/// A vertex in the voxel rendering pipeline.
///
/// Carries a world-space position, atlas texture coordinates, and a
/// per-vertex ambient occlusion factor. The layout matches the vertex
/// shader's expected input.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Ambient Occlusion: f32 (4 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position of the vertex.
    pub position: [f32; 3],
    /// UV coordinates into the texture atlas (normalized 0.0-1.0).
    pub tex_coords: [f32; 2],
    /// Ambient occlusion darkening factor, 0.0 (dark) to 1.0 (open).
    pub ao: f32,
}

impl Vertex {
    /// Creates a new vertex with the given attributes.
    pub fn new(position: [f32; 3], tex_coords: [f32; 2], ao: f32) -> Self {
        Vertex {
            position,
            tex_coords,
            ao,
        }
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: tex_coords (vec2<f32>)
    /// - `location = 2`: ao (f32)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.attributes.len(), 3);
    }
}
