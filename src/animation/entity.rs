//! Animated entity descriptors and their per-frame update functions.
//!
//! An entity is described once by an immutable [`EntityDescriptor`] and animated by
//! [`update_entity`], which recomputes its transforms from the frame context alone.
//! The only mutable state an entity has lives in its own [`EntityRuntimeState`]:
//! the tilt card's springs and the particle seeds captured at mount.

use crate::animation::easing::{Easing, Keyframes, loop_progress, there_and_back};
use crate::animation::particles::{ParticleSeed, local_time, seed_particles};
use crate::animation::spring::{SpringConfig, SpringState};
use crate::input::PointerState;
use crate::math::{Vec3, deg_to_rad, finite_or, lerp, wrap_angle};

/// Linear RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Builds a color from 8-bit sRGB-ish channels and an alpha.
    pub const fn rgb(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Rgba([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, alpha])
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Rgba([r, g, b, alpha])
    }
}

/// Coordinate space an entity's transform is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// 3D world units, projected through the backdrop camera.
    World,
    /// Normalized viewport units: `(0, 0)` top-left, `(1, 1)` bottom-right.
    Screen,
}

/// How a draw command is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Shaded disc; the texture scrolls horizontally with `rotation.y`.
    Sphere,
    /// Soft round glow.
    Glow,
    /// Thin bar that fades out towards both ends.
    Bar,
    /// Textured rectangle, foreshortened by `rotation.x`/`rotation.y`.
    Panel,
    /// Square line grid that slides with the entity's position.
    Grid,
    /// Horizontal bands, otherwise like [`Shape::Grid`].
    Stripes,
    /// Radial darkening towards the corners.
    Vignette,
    /// Opaque at its top edge, transparent at its bottom edge.
    FadeDown,
    /// Opaque at its bottom edge, transparent at its top edge.
    FadeUp,
}

/// Visual attributes the renderer needs alongside the transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub shape: Shape,
    pub space: Space,
    pub color: Rgba,
    /// Width and height: world units for [`Space::World`], viewport fraction for [`Space::Screen`].
    pub size: [f32; 2],
    /// Asset key of the texture, if any.
    pub texture: Option<String>,
    /// Shape-specific values: `[cell, line width]` in viewport heights for
    /// [`Shape::Grid`] and [`Shape::Stripes`], `[inner, outer]` radii for
    /// [`Shape::Vignette`]. Unused by the other shapes.
    pub pattern: [f32; 2],
}

/// Resolved position, rotation (radians), uniform scale and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl Transform {
    fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Transforms produced by one entity for one frame: one per particle for particle
/// fields, a single transform otherwise.
pub type EntityFrame = Vec<Transform>;

/// Everything an entity may read during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the scene was mounted, as reported by the frame clock.
    pub elapsed: f32,
    /// Latest pointer snapshot.
    pub pointer: PointerState,
}

/// Constant angular velocity about the Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatorParams {
    pub position: Vec3,
    /// Radians per second. Zero gives a static layer.
    pub angular_speed: f32,
}

/// Circular orbit with an independent self-rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbiterParams {
    pub center: Vec3,
    pub radius: f32,
    /// Radians per second along the orbit.
    pub orbital_speed: f32,
    /// Starting angle in radians.
    pub phase: f32,
    /// Tilt of the orbital plane about the X axis, in radians.
    pub inclination: f32,
    /// Radians per second about the entity's own Y axis.
    pub spin_speed: f32,
}

/// Particles flying out from a fixed origin and respawning after `lifetime`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleFieldParams {
    pub count: usize,
    pub origin: Vec3,
    /// Distance from the origin a particle respawns at.
    pub start_radius: f32,
    /// Speed bounds; each particle picks one at mount.
    pub speed_range: (f32, f32),
    pub lifetime: f32,
    /// Restrict directions to the XY plane.
    pub planar: bool,
}

/// Which coordinate a scan line travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAxis {
    /// Moves down the screen (a horizontal line).
    Y,
    /// Moves across the screen (a vertical line).
    X,
}

/// How a scan line covers its range in one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMotion {
    /// `from -> to` linearly, then jump back.
    Sweep,
    /// `from -> to -> from`, eased.
    PingPong,
}

/// A line sweeping between two bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanLineParams {
    pub axis: ScanAxis,
    pub from: f32,
    pub to: f32,
    /// The fixed coordinate on the other axis.
    pub cross: f32,
    pub period: f32,
    pub delay: f32,
    pub motion: ScanMotion,
    /// Fraction of the period spent fading in and out at each end. Zero disables it.
    pub edge_fade: f32,
}

/// A card that tilts towards the pointer through a spring.
#[derive(Debug, Clone, PartialEq)]
pub struct TiltCardParams {
    pub center: Vec3,
    /// Maximum tilt in degrees for each axis.
    pub max_tilt_degrees: f32,
    pub spring: SpringConfig,
}

/// Looping keyframe tracks for opacity, scale and vertical offset.
///
/// Before `delay` every track rests on its first value.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseParams {
    pub position: Vec3,
    pub period: f32,
    pub delay: f32,
    pub opacity: Keyframes,
    pub scale: Keyframes,
    /// Added to `position.y`, in the entity's space.
    pub offset_y: Keyframes,
    pub easing: Easing,
}

/// A tiled pattern drifting at constant velocity.
///
/// The offset wraps every `cell`, so the pattern looks the same at any elapsed time
/// a whole number of cells apart.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    /// Cell size in viewport heights.
    pub cell: f32,
    /// Drift in viewport heights per second, `[x, y]`.
    pub velocity: [f32; 2],
}

/// A fixed screen layer: vignettes, fades and tints.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayParams {
    pub position: Vec3,
    pub opacity: f32,
}

/// Full-screen image layer with an intro and an optional slow sway.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropParams {
    pub intro_duration: f32,
    /// Scale at the start of the intro; settles to 1.
    pub intro_scale: f32,
    /// Opacity once the intro finishes.
    pub opacity: f32,
    /// Static perspective tilt about X, in radians.
    pub tilt_x: f32,
    /// Sway amplitude about Y, in radians. Zero disables sway.
    pub sway_amplitude: f32,
    pub sway_period: f32,
}

/// The animation an entity runs, with its base parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Rotator(RotatorParams),
    Orbiter(OrbiterParams),
    ParticleField(ParticleFieldParams),
    ScanLine(ScanLineParams),
    TiltCard(TiltCardParams),
    Pulse(PulseParams),
    Backdrop(BackdropParams),
    Grid(GridParams),
    Overlay(OverlayParams),
}

impl EntityKind {
    /// Short name used in logs and draw commands.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Rotator(_) => "rotator",
            EntityKind::Orbiter(_) => "orbiter",
            EntityKind::ParticleField(_) => "particle_field",
            EntityKind::ScanLine(_) => "scan_line",
            EntityKind::TiltCard(_) => "tilt_card",
            EntityKind::Pulse(_) => "pulse",
            EntityKind::Backdrop(_) => "backdrop",
            EntityKind::Grid(_) => "grid",
            EntityKind::Overlay(_) => "overlay",
        }
    }
}

/// Immutable description of one entity in a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescriptor {
    pub label: String,
    pub kind: EntityKind,
    pub appearance: Appearance,
    /// Draw order; lower layers are drawn first.
    pub layer: i32,
}

/// Mutable state owned by one mounted entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRuntimeState {
    /// Transform produced by the last update (the first instance for particle fields).
    pub transform: Transform,
    /// Elapsed time of the last update.
    pub last_update_time: f32,
    /// Seeds for particle fields; empty for other kinds.
    pub particles: Vec<ParticleSeed>,
    /// `[x, y]` springs for tilt cards.
    pub tilt: [SpringState; 2],
}

impl EntityRuntimeState {
    /// Fresh state for `descriptor`. `seed` feeds the particle generator.
    pub fn new(descriptor: &EntityDescriptor, seed: u64) -> Self {
        let particles = match &descriptor.kind {
            EntityKind::ParticleField(params) => seed_particles(params, seed),
            _ => Vec::new(),
        };
        Self {
            transform: Transform::default(),
            last_update_time: 0.0,
            particles,
            tilt: [SpringState::default(); 2],
        }
    }
}

/// Recomputes an entity's transforms for this frame.
///
/// Only `state` is written. Calling this twice with the same context yields the
/// same transforms: time-driven kinds are closed-form in `ctx.elapsed`, and the
/// tilt card's springs do not move over a zero-length step.
pub fn update_entity(
    descriptor: &EntityDescriptor,
    state: &mut EntityRuntimeState,
    ctx: &FrameContext,
) -> EntityFrame {
    let t = if ctx.elapsed.is_finite() { ctx.elapsed.max(0.0) } else { 0.0 };

    let instances = match &descriptor.kind {
        EntityKind::Rotator(params) => vec![rotator(params, t)],
        EntityKind::Orbiter(params) => vec![orbiter(params, t)],
        EntityKind::ParticleField(params) => particle_field(params, &state.particles, t),
        EntityKind::ScanLine(params) => vec![scan_line(params, t)],
        EntityKind::TiltCard(params) => vec![tilt_card(params, state, t, ctx.pointer)],
        EntityKind::Pulse(params) => vec![pulse(params, t)],
        EntityKind::Backdrop(params) => vec![backdrop(params, t)],
        EntityKind::Grid(params) => vec![grid(params, t)],
        EntityKind::Overlay(params) => vec![Transform {
            opacity: params.opacity.clamp(0.0, 1.0),
            ..Transform::at(params.position)
        }],
    };

    if let Some(first) = instances.first() {
        state.transform = *first;
    }
    state.last_update_time = state.last_update_time.max(t);
    instances
}

fn rotator(params: &RotatorParams, t: f32) -> Transform {
    Transform {
        rotation: Vec3::new(0.0, wrap_angle(t * params.angular_speed), 0.0),
        ..Transform::at(params.position)
    }
}

fn orbiter(params: &OrbiterParams, t: f32) -> Transform {
    let angle = wrap_angle(t * params.orbital_speed + params.phase);
    let (sin_a, cos_a) = angle.sin_cos();
    let (sin_i, cos_i) = params.inclination.sin_cos();

    // Circle in the XZ plane, tilted about X
    let flat_z = params.radius * sin_a;
    let offset = Vec3::new(params.radius * cos_a, -flat_z * sin_i, flat_z * cos_i);

    Transform {
        rotation: Vec3::new(0.0, wrap_angle(t * params.spin_speed), 0.0),
        ..Transform::at(params.center + offset)
    }
}

fn particle_field(params: &ParticleFieldParams, seeds: &[ParticleSeed], t: f32) -> EntityFrame {
    let lifetime = params.lifetime.max(f32::EPSILON);
    seeds
        .iter()
        .map(|seed| {
            let local = local_time(t, seed.phase, lifetime);
            Transform {
                scale: seed.size,
                opacity: 1.0 - local / lifetime,
                ..Transform::at(seed.position_at(params, local))
            }
        })
        .collect()
}

fn scan_line(params: &ScanLineParams, t: f32) -> Transform {
    let (offset, opacity) = match loop_progress(t, params.period, params.delay) {
        None => (0.0, edge_opacity(0.0, params.edge_fade)),
        Some(progress) => {
            let offset = match params.motion {
                ScanMotion::Sweep => progress,
                ScanMotion::PingPong => Easing::EaseInOut.apply(there_and_back(progress)),
            };
            (offset, edge_opacity(progress, params.edge_fade))
        }
    };

    let value = lerp(params.from, params.to, offset);
    let position = match params.axis {
        ScanAxis::Y => Vec3::new(params.cross, value, 0.0),
        ScanAxis::X => Vec3::new(value, params.cross, 0.0),
    };
    Transform {
        opacity,
        ..Transform::at(position)
    }
}

fn edge_opacity(progress: f32, edge_fade: f32) -> f32 {
    if edge_fade <= 0.0 {
        return 1.0;
    }
    (progress / edge_fade).min((1.0 - progress) / edge_fade).clamp(0.0, 1.0)
}

fn tilt_card(
    params: &TiltCardParams,
    state: &mut EntityRuntimeState,
    t: f32,
    pointer: PointerState,
) -> Transform {
    let dt = (t - state.last_update_time).max(0.0);
    let target = pointer;

    state.tilt[0] = params.spring.step(state.tilt[0], target.x(), dt);
    state.tilt[1] = params.spring.step(state.tilt[1], target.y(), dt);

    let max = deg_to_rad(finite_or(params.max_tilt_degrees, 0.0).abs());
    // Pointer offsets span [-0.5, 0.5], so doubling maps the edge to the max tilt
    let rotate_x = finite_or(-state.tilt[1].value * 2.0 * max, 0.0).clamp(-max, max);
    let rotate_y = finite_or(state.tilt[0].value * 2.0 * max, 0.0).clamp(-max, max);

    Transform {
        rotation: Vec3::new(rotate_x, rotate_y, 0.0),
        ..Transform::at(params.center)
    }
}

fn pulse(params: &PulseParams, t: f32) -> Transform {
    let progress = loop_progress(t, params.period, params.delay).unwrap_or(0.0);
    let sample = |track: &Keyframes| track.sample(progress, params.easing);

    Transform {
        scale: sample(&params.scale),
        opacity: sample(&params.opacity),
        ..Transform::at(params.position + Vec3::new(0.0, sample(&params.offset_y), 0.0))
    }
}

/// The grid sits at the viewport center, shifted by the wrapped drift.
fn grid(params: &GridParams, t: f32) -> Transform {
    let wrap = |speed: f32| {
        if params.cell > 0.0 && speed.is_finite() {
            (t * speed).rem_euclid(params.cell)
        } else {
            0.0
        }
    };
    Transform::at(Vec3::new(
        0.5 + wrap(params.velocity[0]),
        0.5 + wrap(params.velocity[1]),
        0.0,
    ))
}

fn backdrop(params: &BackdropParams, t: f32) -> Transform {
    let intro = if params.intro_duration > 0.0 {
        Easing::EaseOut.apply(t / params.intro_duration)
    } else {
        1.0
    };
    let sway = match loop_progress(t, params.sway_period, 0.0) {
        Some(progress) if params.sway_amplitude != 0.0 => {
            let swing = Easing::EaseInOut.apply(there_and_back(progress));
            lerp(-params.sway_amplitude, params.sway_amplitude, swing)
        }
        _ => 0.0,
    };

    Transform {
        position: Vec3::new(0.5, 0.5, 0.0),
        rotation: Vec3::new(params.tilt_x, sway, 0.0),
        scale: lerp(params.intro_scale, 1.0, intro),
        opacity: params.opacity * intro,
    }
}
