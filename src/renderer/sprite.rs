//! Instanced sprite renderer for draw lists.
//!
//! Each [`DrawCommand`] becomes a batch of [`SpriteInstance`]s sharing one
//! texture. Batches are drawn in draw-list order with alpha blending, so lower
//! layers end up behind higher ones.

use crate::animation::{Shape, Space, Transform};
use crate::compose::{DrawCommand, DrawList};
use crate::math::Vec3;
use crate::math::mat::BackdropCamera;
use crate::renderer::texture::TextureCache;
use crate::renderer::uniform::FrameUniforms;
use crate::renderer::vertex::{QUAD_INDICES, QUAD_VERTICES, QuadVertex, SpriteInstance};
use std::f32::consts::TAU;
use std::ops::Range;
use wgpu::util::DeviceExt;

const INITIAL_INSTANCE_CAPACITY: u64 = 1024;

/// Shape id the shader switches on.
pub fn shape_id(shape: Shape) -> f32 {
    match shape {
        Shape::Sphere => 0.0,
        Shape::Glow => 1.0,
        Shape::Bar => 2.0,
        Shape::Panel => 3.0,
        Shape::Grid => 4.0,
        Shape::Stripes => 5.0,
        Shape::Vignette => 6.0,
        Shape::FadeDown => 7.0,
        Shape::FadeUp => 8.0,
    }
}

/// Projects one command's transforms into sprite instances.
///
/// World-space transforms go through `camera`; instances behind it are dropped.
/// Screen-space positions are viewport fractions with `y` growing downwards.
pub fn build_instances(command: &DrawCommand, camera: &BackdropCamera) -> Vec<SpriteInstance> {
    command
        .instances
        .iter()
        .filter_map(|transform| instance_for(command, transform, camera))
        .collect()
}

fn instance_for(
    command: &DrawCommand,
    transform: &Transform,
    camera: &BackdropCamera,
) -> Option<SpriteInstance> {
    let opacity = transform.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || transform.scale <= 0.0 {
        return None;
    }

    let mut half = [
        command.size[0] * 0.5 * transform.scale,
        command.size[1] * 0.5 * transform.scale,
    ];
    let mut position = transform.position;
    if matches!(command.shape, Shape::Grid | Shape::Stripes) {
        // Drift is measured in viewport heights on both axes
        let aspect = camera.aspect.max(f32::EPSILON);
        position = Vec3::new(0.5 + (position.x() - 0.5) / aspect, position.y(), position.z());
        // Pad by one cell so the drifting pattern never exposes an edge
        let cell = command.pattern[0].max(0.0);
        half[0] += cell / aspect;
        half[1] += cell;
    }
    let (center, half_size) = match command.space {
        Space::World => {
            let projected = camera.project(position)?;
            (
                projected.ndc,
                [
                    half[0] * projected.units_per_world[0],
                    half[1] * projected.units_per_world[1],
                ],
            )
        }
        Space::Screen => (
            [
                position.x() * 2.0 - 1.0,
                1.0 - position.y() * 2.0,
            ],
            // A viewport fraction of `f` spans `2f` in NDC
            [half[0] * 2.0, half[1] * 2.0],
        ),
    };

    let [r, g, b, a] = command.color.0;
    let scroll = match command.shape {
        Shape::Sphere => transform.rotation.y() / TAU,
        _ => 0.0,
    };

    Some(SpriteInstance {
        center,
        half_size,
        color: [r, g, b, a * opacity],
        rotation: [transform.rotation.x(), transform.rotation.y()],
        params: [shape_id(command.shape), scroll],
        pattern: command.pattern,
    })
}

/// One texture binding and the instances drawn with it.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    texture: Option<String>,
    instances: Range<u32>,
}

/// GPU resources for drawing sprites.
pub struct SpriteRenderer {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    instance_capacity: u64,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
    pub textures: TextureCache,
    batches: Vec<Batch>,
}

impl SpriteRenderer {
    /// Creates the pipeline and buffers.
    ///
    /// # Arguments
    /// - `device`: The wgpu device to create buffers and pipeline.
    /// - `surface_config`: The surface configuration (for color format).
    /// - `textures`: Texture cache rooted at the asset directory.
    pub fn new(
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
        textures: TextureCache,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Quad Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);

        let aspect = surface_config.width as f32 / surface_config.height.max(1) as f32;
        let uniform_buffer = FrameUniforms::new(0.0, aspect).create_buffer(device);
        let (uniform_bind_group, uniform_layout) =
            FrameUniforms::create_bind_group(&uniform_buffer, device);

        let pipeline =
            create_sprite_pipeline(device, surface_config, &uniform_layout, textures.layout());

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            uniform_buffer,
            uniform_bind_group,
            textures,
            batches: Vec::new(),
        }
    }

    /// Uploads the instances for `list`. Textures must already be in the cache
    /// (see [`crate::renderer::WgpuRenderer::preload_textures`]); missing ones draw blank.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        list: &DrawList,
        camera: &BackdropCamera,
    ) {
        let mut instances: Vec<SpriteInstance> = Vec::new();
        self.batches.clear();

        for command in &list.commands {
            let built = build_instances(command, camera);
            if built.is_empty() {
                continue;
            }
            let start = instances.len() as u32;
            instances.extend(built);
            self.batches.push(Batch {
                texture: command.texture.clone(),
                instances: start..instances.len() as u32,
            });
        }

        let needed = instances.len() as u64;
        if needed > self.instance_capacity {
            self.instance_capacity = needed.next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
            tracing::debug!(capacity = self.instance_capacity, "sprite instance buffer grown");
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        FrameUniforms::new(list.elapsed, camera.aspect).write(queue, &self.uniform_buffer);
    }

    /// Drops the prepared batches, e.g. when nothing is mounted.
    pub fn clear(&mut self) {
        self.batches.clear();
    }

    /// Issues one instanced draw per prepared batch.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass) {
        if self.batches.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for batch in &self.batches {
            render_pass.set_bind_group(1, self.textures.bind_group(batch.texture.as_deref()), &[]);
            render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, batch.instances.clone());
        }
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Instance Buffer"),
        size: capacity * std::mem::size_of::<SpriteInstance>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Creates the alpha-blended sprite pipeline.
///
/// Group 0 holds the frame uniforms, group 1 the sprite texture and sampler.
pub fn create_sprite_pipeline(
    device: &wgpu::Device,
    surface_config: &wgpu::SurfaceConfiguration,
    uniform_layout: &wgpu::BindGroupLayout,
    texture_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Sprite Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("sprite_shader.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Sprite Pipeline Layout"),
        bind_group_layouts: &[uniform_layout, texture_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Sprite Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[QuadVertex::desc(), SpriteInstance::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_config.format,
                blend: Some(wgpu::BlendState {
                    color: wgpu::BlendComponent {
                        src_factor: wgpu::BlendFactor::SrcAlpha,
                        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                        operation: wgpu::BlendOperation::Add,
                    },
                    alpha: wgpu::BlendComponent {
                        src_factor: wgpu::BlendFactor::One,
                        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                        operation: wgpu::BlendOperation::Add,
                    },
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Rgba;
    use crate::compose::EntityId;

    fn command(space: Space, shape: Shape, instances: Vec<Transform>) -> DrawCommand {
        DrawCommand {
            entity: EntityId(0),
            label: "test".to_string(),
            layer: 0,
            kind: "pulse",
            shape,
            space,
            color: Rgba([0.0, 1.0, 0.5, 0.6]),
            size: [0.1, 0.2],
            texture: None,
            pattern: [0.0; 2],
            instances,
        }
    }

    fn at(position: Vec3) -> Transform {
        Transform {
            position,
            ..Transform::default()
        }
    }

    #[test]
    fn test_screen_space_maps_to_ndc() {
        let cmd = command(
            Space::Screen,
            Shape::Glow,
            vec![at(Vec3::new(0.0, 0.0, 0.0)), at(Vec3::new(0.5, 0.5, 0.0))],
        );
        let built = build_instances(&cmd, &BackdropCamera::default());
        assert_eq!(built[0].center, [-1.0, 1.0]);
        assert_eq!(built[1].center, [0.0, 0.0]);
        assert!((built[1].half_size[0] - 0.1).abs() < 1e-6);
        assert!((built[1].half_size[1] - 0.2).abs() < 1e-6);
        assert_eq!(built[1].params[0], shape_id(Shape::Glow));
    }

    #[test]
    fn test_opacity_scales_alpha_and_hides() {
        let faded = Transform {
            opacity: 0.5,
            ..at(Vec3::new(0.5, 0.5, 0.0))
        };
        let hidden = Transform {
            opacity: 0.0,
            ..at(Vec3::new(0.5, 0.5, 0.0))
        };
        let built = build_instances(
            &command(Space::Screen, Shape::Bar, vec![faded, hidden]),
            &BackdropCamera::default(),
        );
        assert_eq!(built.len(), 1);
        assert!((built[0].color[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_world_space_projects_and_culls() {
        let camera = BackdropCamera::default();
        let visible = at(Vec3::ZERO);
        let behind = at(Vec3::new(0.0, 0.0, 10.0));
        let built = build_instances(
            &command(Space::World, Shape::Sphere, vec![visible, behind]),
            &camera,
        );
        assert_eq!(built.len(), 1);
        assert!(built[0].center[0].abs() < 1e-6 && built[0].center[1].abs() < 1e-6);
        assert!(built[0].half_size[1] > 0.0);
    }

    #[test]
    fn test_grid_covers_viewport_while_drifting() {
        let camera = BackdropCamera {
            aspect: 2.0,
            ..BackdropCamera::default()
        };
        let grid = DrawCommand {
            size: [1.0, 1.0],
            pattern: [0.1, 0.002],
            ..command(Space::Screen, Shape::Grid, vec![at(Vec3::new(0.58, 0.58, 0.0))])
        };
        let built = build_instances(&grid, &camera);
        let instance = built[0];
        assert_eq!(instance.pattern, [0.1, 0.002]);
        assert_eq!(instance.params[0], shape_id(Shape::Grid));
        // Every viewport edge stays inside the shifted quad
        for axis in 0..2 {
            assert!(instance.center[axis] - instance.half_size[axis] <= -1.0);
            assert!(instance.center[axis] + instance.half_size[axis] >= 1.0);
        }
    }

    #[test]
    fn test_shape_ids_are_distinct() {
        let shapes = [
            Shape::Sphere,
            Shape::Glow,
            Shape::Bar,
            Shape::Panel,
            Shape::Grid,
            Shape::Stripes,
            Shape::Vignette,
            Shape::FadeDown,
            Shape::FadeUp,
        ];
        let mut ids: Vec<i32> = shapes.iter().map(|&shape| shape_id(shape) as i32).collect();
        ids.dedup();
        assert_eq!(ids, (0..9).collect::<Vec<i32>>());
    }

    #[test]
    fn test_sphere_scroll_follows_rotation() {
        let turned = Transform {
            rotation: Vec3::new(0.0, std::f32::consts::PI, 0.0),
            ..at(Vec3::ZERO)
        };
        let built = build_instances(
            &command(Space::World, Shape::Sphere, vec![turned]),
            &BackdropCamera::default(),
        );
        assert!((built[0].params[1] - 0.5).abs() < 1e-6);
    }
}
