//! Vertex and instance layouts for the sprite pipeline.
//!
//! Every draw is the same unit quad, instanced once per entity transform. The
//! per-instance data carries everything the shader needs to place, shade and
//! foreshorten the quad.

/// One corner of the unit quad, `[-1, 1]` on both axes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub corner: [f32; 2],
}

/// Corners of the shared quad, counter-clockwise from bottom-left.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [-1.0, -1.0] },
    QuadVertex { corner: [1.0, -1.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [-1.0, 1.0] },
];

/// Two triangles covering [`QUAD_VERTICES`].
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

impl QuadVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Per-instance sprite data, already projected to normalized device coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    /// Quad center in NDC.
    pub center: [f32; 2],
    /// Half extents in NDC.
    pub half_size: [f32; 2],
    /// Premultiplied by the transform opacity.
    pub color: [f32; 4],
    /// Tilt about X and turn about Y, radians.
    pub rotation: [f32; 2],
    /// Shape id (see [`crate::renderer::sprite::shape_id`]) and horizontal texture scroll.
    pub params: [f32; 2],
    /// Shape-specific values, copied from the entity's appearance.
    pub pattern: [f32; 2],
}

impl SpriteInstance {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const F32X2: wgpu::BufferAddress = std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress;
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: F32X2,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: F32X2 * 2,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // Color is four floats wide
                wgpu::VertexAttribute {
                    offset: F32X2 * 4,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: F32X2 * 5,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: F32X2 * 6,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_stride_matches_attributes() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 14 * 4);
        assert_eq!(std::mem::size_of::<QuadVertex>(), 8);
    }
}
