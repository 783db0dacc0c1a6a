//! Per-frame uniforms for the sprite pipeline.

use wgpu::util::DeviceExt;

/// Values shared by every sprite in a frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Elapsed scene time in seconds.
    pub time: f32,
    /// Viewport width over height.
    pub aspect: f32,
    /// Uniform buffers are 16-byte aligned.
    pub _padding: [f32; 2],
}

impl FrameUniforms {
    pub fn new(time: f32, aspect: f32) -> Self {
        Self {
            time,
            aspect,
            _padding: [0.0; 2],
        }
    }

    /// Returns the raw bytes of the uniform struct for uploading to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Creates a GPU buffer containing the uniform data.
    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: self.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Creates a bind group and layout for the uniform buffer.
    ///
    /// # Arguments
    /// * `buffer` - The uniform buffer to bind.
    /// * `device` - The wgpu device to create the bind group and layout.
    ///
    /// # Returns
    /// A tuple of (`wgpu::BindGroup`, `wgpu::BindGroupLayout`) bound at group 0.
    pub fn create_bind_group(
        buffer: &wgpu::Buffer,
        device: &wgpu::Device,
    ) -> (wgpu::BindGroup, wgpu::BindGroupLayout) {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("frame_uniform_bind_group_layout"),
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("frame_uniform_bind_group"),
        });
        (bind_group, layout)
    }

    /// Uploads new values into an existing buffer.
    pub fn write(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, self.as_bytes());
    }
}
