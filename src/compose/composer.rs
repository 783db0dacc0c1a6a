//! The composer owns the mounted scene.
//!
//! Mounting copies the scene's entity descriptors into an arena alongside one
//! [`EntityRuntimeState`] per entity and starts a fresh [`FrameClock`]. Each
//! frame ticks the clock once, hands every entity the same [`FrameContext`] and
//! collects the resulting transforms into a [`DrawList`] ordered back-to-front.

use crate::animation::{
    EntityDescriptor, EntityRuntimeState, FrameClock, FrameContext, Rgba, Shape, Space, Transform,
    update_entity,
};
use crate::input::PointerState;
use crate::scene::{PageKey, SceneDescriptor};
use std::time::Instant;

/// Index of an entity in the mounted scene's arena (its declaration order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// Everything the renderer needs to draw one entity for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub entity: EntityId,
    pub label: String,
    pub layer: i32,
    /// Entity kind tag, e.g. `"scan_line"`.
    pub kind: &'static str,
    pub shape: Shape,
    pub space: Space,
    pub color: Rgba,
    pub size: [f32; 2],
    pub texture: Option<String>,
    /// See [`crate::animation::Appearance::pattern`].
    pub pattern: [f32; 2],
    pub instances: Vec<Transform>,
}

/// Draw commands for one frame, sorted by layer ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub page: PageKey,
    pub elapsed: f32,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug)]
struct MountedScene {
    page: PageKey,
    name: String,
    pointer_region: Option<[f32; 4]>,
    entities: Vec<EntityDescriptor>,
    states: Vec<EntityRuntimeState>,
    /// Arena indices sorted by layer, ties kept in declaration order.
    draw_order: Vec<EntityId>,
    clock: FrameClock,
}

/// Owns at most one mounted scene.
#[derive(Debug, Default)]
pub struct Composer {
    mounted: Option<MountedScene>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts `scene`, tearing down whatever was mounted before.
    ///
    /// # Arguments
    /// * `scene` - Scene to animate
    /// * `now` - Host timestamp the new clock starts at
    /// * `seed` - Scene seed; each entity's particle generator is derived from it
    pub fn mount(&mut self, scene: &SceneDescriptor, now: Instant, seed: u64) {
        self.teardown();

        let entities = scene.entities.clone();
        let states = entities
            .iter()
            .enumerate()
            .map(|(index, entity)| EntityRuntimeState::new(entity, entity_seed(seed, index)))
            .collect();

        let mut draw_order: Vec<EntityId> = (0..entities.len()).map(EntityId).collect();
        draw_order.sort_by_key(|id| entities[id.0].layer);

        tracing::info!(
            page = %scene.page,
            scene = %scene.name,
            entities = entities.len(),
            "scene mounted"
        );

        self.mounted = Some(MountedScene {
            page: scene.page,
            name: scene.name.clone(),
            pointer_region: scene.pointer_region(),
            entities,
            states,
            draw_order,
            clock: FrameClock::start(now),
        });
    }

    /// Advances the mounted scene to `now` and returns its draw list.
    ///
    /// Returns `None` when nothing is mounted.
    pub fn frame(&mut self, now: Instant, pointer: PointerState) -> Option<DrawList> {
        let scene = self.mounted.as_mut()?;
        let elapsed = scene.clock.tick(now)?;
        let ctx = FrameContext { elapsed, pointer };

        let commands = scene
            .draw_order
            .iter()
            .map(|&id| {
                let descriptor = &scene.entities[id.0];
                let instances = update_entity(descriptor, &mut scene.states[id.0], &ctx);
                DrawCommand {
                    entity: id,
                    label: descriptor.label.clone(),
                    layer: descriptor.layer,
                    kind: descriptor.kind.tag(),
                    shape: descriptor.appearance.shape,
                    space: descriptor.appearance.space,
                    color: descriptor.appearance.color,
                    size: descriptor.appearance.size,
                    texture: descriptor.appearance.texture.clone(),
                    pattern: descriptor.appearance.pattern,
                    instances,
                }
            })
            .collect();

        Some(DrawList {
            page: scene.page,
            elapsed,
            commands,
        })
    }

    /// Freezes the mounted scene, e.g. while the window is hidden.
    pub fn pause(&mut self, now: Instant) {
        if let Some(scene) = self.mounted.as_mut() {
            scene.clock.pause(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(scene) = self.mounted.as_mut() {
            scene.clock.resume(now);
        }
    }

    /// Stops the clock and drops every entity's state. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(mut scene) = self.mounted.take() {
            scene.clock.stop();
            tracing::info!(page = %scene.page, scene = %scene.name, "scene torn down");
        }
    }

    pub fn mounted_page(&self) -> Option<PageKey> {
        self.mounted.as_ref().map(|scene| scene.page)
    }

    pub fn mounted_scene_name(&self) -> Option<&str> {
        self.mounted.as_ref().map(|scene| scene.name.as_str())
    }

    /// Viewport rectangle whose pointer movement drives the scene, if any.
    pub fn pointer_region(&self) -> Option<[f32; 4]> {
        self.mounted.as_ref().and_then(|scene| scene.pointer_region)
    }

    /// Runtime state of one entity, for inspection.
    pub fn entity_state(&self, id: EntityId) -> Option<&EntityRuntimeState> {
        self.mounted.as_ref()?.states.get(id.0)
    }
}

fn entity_seed(scene_seed: u64, index: usize) -> u64 {
    scene_seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::entity::{ParticleFieldParams, RotatorParams};
    use crate::animation::{Appearance, EntityKind};
    use crate::math::Vec3;
    use crate::scene::presets::{SceneTuning, about_backdrop, home_globe, portfolio_cyber_map};
    use std::time::Duration;

    fn rotator(label: &str, layer: i32) -> EntityDescriptor {
        EntityDescriptor {
            label: label.to_string(),
            kind: EntityKind::Rotator(RotatorParams {
                position: Vec3::ZERO,
                angular_speed: 1.0,
            }),
            appearance: Appearance {
                shape: Shape::Sphere,
                space: Space::World,
                color: Rgba([1.0; 4]),
                size: [1.0, 1.0],
                texture: None,
                pattern: [0.0; 2],
            },
            layer,
        }
    }

    fn layered_scene() -> SceneDescriptor {
        SceneDescriptor {
            page: PageKey::Home,
            name: "layers".to_string(),
            entities: vec![
                rotator("front", 5),
                rotator("back-a", -1),
                rotator("middle", 0),
                rotator("back-b", -1),
            ],
        }
    }

    #[test]
    fn test_draw_list_sorted_and_stable() {
        let t0 = Instant::now();
        let mut composer = Composer::new();
        composer.mount(&layered_scene(), t0, 0);
        let list = composer.frame(t0, PointerState::default()).unwrap();
        let labels: Vec<&str> = list.commands.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["back-a", "back-b", "middle", "front"]);
        assert_eq!(list.commands[0].entity, EntityId(1));
        assert_eq!(list.commands[0].kind, "rotator");
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let t0 = Instant::now();
        let mut composer = Composer::new();
        composer.teardown();
        composer.mount(&layered_scene(), t0, 0);
        composer.teardown();
        composer.teardown();
        assert_eq!(composer.mounted_page(), None);
        assert!(composer.frame(t0 + Duration::from_secs(1), PointerState::default()).is_none());
        assert!(composer.entity_state(EntityId(0)).is_none());
    }

    #[test]
    fn test_mount_replaces_previous_scene() {
        let t0 = Instant::now();
        let tuning = SceneTuning {
            star_count: 16,
            ..SceneTuning::default()
        };
        let mut composer = Composer::new();
        composer.mount(&home_globe(&tuning), t0, 3);
        composer.frame(t0 + Duration::from_secs(5), PointerState::default());

        let t1 = t0 + Duration::from_secs(6);
        composer.mount(&about_backdrop(&tuning), t1, 3);
        assert_eq!(composer.mounted_page(), Some(PageKey::About));
        assert!(composer.pointer_region().is_some());

        let list = composer.frame(t1, PointerState::default()).unwrap();
        assert_eq!(list.page, PageKey::About);
        assert_eq!(list.elapsed, 0.0);
        assert!(list.commands.iter().all(|c| c.label != "earth"));
    }

    #[test]
    fn test_home_first_frame_starts_every_entity_at_rest() {
        let t0 = Instant::now();
        let scene = home_globe(&SceneTuning {
            star_count: 32,
            ..SceneTuning::default()
        });
        let mut composer = Composer::new();
        composer.mount(&scene, t0, 7);
        let list = composer.frame(t0, PointerState::default()).unwrap();
        assert_eq!(list.elapsed, 0.0);

        let mut rotators = 0;
        let mut orbiters = 0;
        for command in &list.commands {
            let descriptor = &scene.entities[command.entity.0];
            match &descriptor.kind {
                EntityKind::Rotator(_) => {
                    rotators += 1;
                    assert_eq!(command.instances[0].rotation.y(), 0.0, "{}", command.label);
                }
                EntityKind::Orbiter(params) => {
                    orbiters += 1;
                    let position = command.instances[0].position - params.center;
                    assert!((position.x() - params.radius * params.phase.cos()).abs() < 1e-4);
                    assert!((position.length() - params.radius).abs() < 1e-4);
                    assert_eq!(command.instances[0].rotation.y(), 0.0);
                }
                _ => {}
            }
        }
        assert_eq!(rotators, 4);
        assert_eq!(orbiters, 2);
    }

    #[test]
    fn test_portfolio_first_frame_then_double_teardown() {
        let t0 = Instant::now();
        let mut composer = Composer::new();
        composer.mount(&portfolio_cyber_map(&SceneTuning::default()), t0, 1);
        let list = composer.frame(t0, PointerState::default()).unwrap();
        let scan = list.commands.iter().find(|c| c.label == "scan-line").unwrap();
        assert!((scan.instances[0].position.y() + 0.1).abs() < 1e-6);

        composer.teardown();
        composer.teardown();
        assert_eq!(composer.mounted_page(), None);
        assert!(composer.frame(t0, PointerState::default()).is_none());
    }

    #[test]
    fn test_pause_freezes_frames() {
        let t0 = Instant::now();
        let mut composer = Composer::new();
        composer.mount(&layered_scene(), t0, 0);
        composer.frame(t0 + Duration::from_secs(1), PointerState::default());
        composer.pause(t0 + Duration::from_secs(1));

        let a = composer.frame(t0 + Duration::from_secs(2), PointerState::default()).unwrap();
        let b = composer.frame(t0 + Duration::from_secs(9), PointerState::default()).unwrap();
        assert_eq!(a, b);

        composer.resume(t0 + Duration::from_secs(9));
        let c = composer.frame(t0 + Duration::from_secs(10), PointerState::default()).unwrap();
        assert!((c.elapsed - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_particles_seeded_per_entity() {
        let field = |label: &str| EntityDescriptor {
            kind: EntityKind::ParticleField(ParticleFieldParams {
                count: 4,
                origin: Vec3::ZERO,
                start_radius: 0.0,
                speed_range: (0.1, 1.0),
                lifetime: 5.0,
                planar: false,
            }),
            ..rotator(label, 0)
        };
        let scene = SceneDescriptor {
            page: PageKey::Home,
            name: "fields".to_string(),
            entities: vec![field("a"), field("b")],
        };

        let t0 = Instant::now();
        let mut composer = Composer::new();
        composer.mount(&scene, t0, 11);
        let first = composer.entity_state(EntityId(0)).unwrap().particles.clone();
        let second = composer.entity_state(EntityId(1)).unwrap().particles.clone();
        assert_ne!(first, second);

        composer.mount(&scene, t0, 11);
        assert_eq!(composer.entity_state(EntityId(0)).unwrap().particles, first);
    }
}
