//! The site's built-in backdrops.
//!
//! Screen-space positions are viewport fractions (`(0, 0)` top-left); world-space
//! entities are framed by [`crate::math::mat::BackdropCamera`]. Pixel sizes are
//! given against a 900px tall viewport and converted with [`px`].

use crate::animation::easing::{Easing, Keyframes};
use crate::animation::entity::{
    BackdropParams, GridParams, OrbiterParams, OverlayParams, ParticleFieldParams, PulseParams,
    RotatorParams, ScanAxis, ScanLineParams, ScanMotion, TiltCardParams,
};
use crate::animation::spring::SpringConfig;
use crate::animation::{Appearance, EntityDescriptor, EntityKind, Rgba, Shape, Space};
use crate::math::{Vec3, deg_to_rad};
use crate::scene::{PageKey, SceneDescriptor};
use std::f32::consts::PI;

const CYBER: Rgba = Rgba::rgb(0, 255, 170, 1.0);
const PRIMARY: Rgba = Rgba::rgb(56, 189, 248, 1.0);
const BEAM_BLUE: Rgba = Rgba::rgb(0, 150, 255, 1.0);
const NODE_BLUE: Rgba = Rgba::rgb(0, 180, 255, 1.0);
const ATMOSPHERE: Rgba = Rgba::rgb(77, 166, 255, 1.0);
const RIM: Rgba = Rgba::rgb(135, 206, 235, 1.0);
const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);
const SLATE: Rgba = Rgba::rgb(30, 41, 59, 1.0);
const NAVY: Rgba = Rgba::rgb(0, 0, 20, 1.0);
/// Matches the renderer's clear colour so fades blend into the page.
const BACKGROUND: Rgba = Rgba([0.008, 0.012, 0.03, 1.0]);

const REFERENCE_HEIGHT: f32 = 900.0;

/// Converts a pixel length at the reference height into viewport heights.
pub fn px(value: f32) -> f32 {
    value / REFERENCE_HEIGHT
}

/// Knobs exposed through the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTuning {
    /// Stars in the home page starfield.
    pub star_count: usize,
    /// Maximum tilt of the profile card, in degrees.
    pub max_tilt_degrees: f32,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            star_count: 1500,
            max_tilt_degrees: 15.0,
        }
    }
}

fn entity(
    label: impl Into<String>,
    layer: i32,
    kind: EntityKind,
    appearance: Appearance,
) -> EntityDescriptor {
    EntityDescriptor {
        label: label.into(),
        kind,
        appearance,
        layer,
    }
}

fn look(
    shape: Shape,
    space: Space,
    color: Rgba,
    size: [f32; 2],
    texture: Option<&str>,
) -> Appearance {
    Appearance {
        shape,
        space,
        color,
        size,
        texture: texture.map(str::to_string),
        pattern: [0.0, 0.0],
    }
}

fn full_screen(shape: Shape, color: Rgba, pattern: [f32; 2]) -> Appearance {
    Appearance {
        pattern,
        ..look(shape, Space::Screen, color, [1.0, 1.0], None)
    }
}

fn grid(
    label: &str,
    layer: i32,
    color: Rgba,
    cell: f32,
    line: f32,
    velocity: [f32; 2],
) -> EntityDescriptor {
    entity(
        label,
        layer,
        EntityKind::Grid(GridParams { cell, velocity }),
        full_screen(Shape::Grid, color, [cell, line]),
    )
}

/// The slate grid behind every page, drifting one cell diagonally every 20 seconds.
fn site_grid() -> EntityDescriptor {
    let cell = px(64.0);
    grid(
        "site-grid",
        -30,
        SLATE.with_alpha(0.3),
        cell,
        px(1.0),
        [cell / 20.0, cell / 20.0],
    )
}

fn overlay(label: &str, layer: i32, at: (f32, f32), appearance: Appearance) -> EntityDescriptor {
    entity(
        label,
        layer,
        EntityKind::Overlay(OverlayParams {
            position: Vec3::new(at.0, at.1, 0.0),
            opacity: 1.0,
        }),
        appearance,
    )
}

fn vignette(label: &str, layer: i32, color: Rgba, inner: f32, outer: f32) -> EntityDescriptor {
    overlay(label, layer, (0.5, 0.5), full_screen(Shape::Vignette, color, [inner, outer]))
}

/// Background fades over the top and bottom `height` of the viewport.
fn edge_fades(prefix: &str, layer: i32, height: f32) -> [EntityDescriptor; 2] {
    let band = |shape| Appearance {
        size: [1.0, height],
        ..full_screen(shape, BACKGROUND, [0.0, 0.0])
    };
    [
        overlay(&format!("{prefix}-fade-top"), layer, (0.5, height / 2.0), band(Shape::FadeDown)),
        overlay(
            &format!("{prefix}-fade-bottom"),
            layer,
            (0.5, 1.0 - height / 2.0),
            band(Shape::FadeUp),
        ),
    ]
}

fn sphere(
    label: &str,
    layer: i32,
    radius: f32,
    speed: f32,
    color: Rgba,
    texture: Option<&str>,
    shape: Shape,
) -> EntityDescriptor {
    entity(
        label,
        layer,
        EntityKind::Rotator(RotatorParams {
            position: Vec3::ZERO,
            angular_speed: speed,
        }),
        look(shape, Space::World, color, [radius * 2.0, radius * 2.0], texture),
    )
}

/// Looping `[low, high, low]` node in screen space.
#[allow(clippy::too_many_arguments)]
fn node(
    label: String,
    layer: i32,
    at: (f32, f32),
    timing: (f32, f32),
    opacity: (f32, f32),
    scale: (f32, f32),
    color: Rgba,
    size: f32,
) -> EntityDescriptor {
    entity(
        label,
        layer,
        EntityKind::Pulse(PulseParams {
            position: Vec3::new(at.0, at.1, 0.0),
            period: timing.0,
            delay: timing.1,
            opacity: Keyframes::there_and_back(opacity.0, opacity.1),
            scale: Keyframes::there_and_back(scale.0, scale.1),
            offset_y: Keyframes::constant(0.0),
            easing: Easing::EaseInOut,
        }),
        look(Shape::Glow, Space::Screen, color, [size, size], None),
    )
}

#[allow(clippy::too_many_arguments)]
fn scan(
    label: impl Into<String>,
    layer: i32,
    axis: ScanAxis,
    range: (f32, f32),
    cross: f32,
    timing: (f32, f32),
    color: Rgba,
    size: [f32; 2],
) -> EntityDescriptor {
    entity(
        label,
        layer,
        EntityKind::ScanLine(ScanLineParams {
            axis,
            from: range.0,
            to: range.1,
            cross,
            period: timing.0,
            delay: timing.1,
            motion: ScanMotion::Sweep,
            edge_fade: 0.0,
        }),
        look(Shape::Bar, Space::Screen, color, size, None),
    )
}

fn backdrop(label: &str, texture: &str, params: BackdropParams, size: f32) -> EntityDescriptor {
    entity(
        label,
        -10,
        EntityKind::Backdrop(params),
        look(Shape::Panel, Space::Screen, WHITE, [size, size], Some(texture)),
    )
}

/// Home: textured earth with cloud and atmosphere shells, two satellites and a starfield.
pub fn home_globe(tuning: &SceneTuning) -> SceneDescriptor {
    let mut entities = vec![
        entity(
            "starfield",
            -20,
            EntityKind::ParticleField(ParticleFieldParams {
                count: tuning.star_count,
                origin: Vec3::ZERO,
                start_radius: 20.0,
                speed_range: (0.05, 0.2),
                lifetime: 120.0,
                planar: false,
            }),
            look(Shape::Glow, Space::World, WHITE.with_alpha(0.8), [0.08, 0.08], None),
        ),
        sphere("atmosphere-rim", -2, 2.25, 0.0, RIM.with_alpha(0.05), None, Shape::Glow),
        sphere("atmosphere", -1, 2.15, 0.05, ATMOSPHERE.with_alpha(0.08), None, Shape::Glow),
        sphere("earth", 0, 2.0, 0.08, WHITE, Some("earth"), Shape::Sphere),
        sphere("clouds", 1, 2.02, 0.1, WHITE.with_alpha(0.4), Some("clouds"), Shape::Sphere),
        site_grid(),
    ];

    let satellites = [
        ("satellite-leo", 2.8, 0.4, 0.0, 0.35, 1.2),
        ("satellite-geo", 3.4, -0.22, PI, -0.5, 0.6),
    ];
    for (label, radius, orbital_speed, phase, inclination, spin_speed) in satellites {
        entities.push(entity(
            label,
            2,
            EntityKind::Orbiter(OrbiterParams {
                center: Vec3::ZERO,
                radius,
                orbital_speed,
                phase,
                inclination,
                spin_speed,
            }),
            look(Shape::Glow, Space::World, CYBER, [0.14, 0.14], None),
        ));
    }

    SceneDescriptor {
        page: PageKey::Home,
        name: "globe".to_string(),
        entities,
    }
}

/// Portfolio: tilted cyber map fading in, one scan line, a static grid under a
/// vignette and edge fades, and eight pulsing data points.
pub fn portfolio_cyber_map(_tuning: &SceneTuning) -> SceneDescriptor {
    let mut entities = vec![
        backdrop(
            "cyber-map",
            "cyber-map",
            BackdropParams {
                intro_duration: 1.5,
                intro_scale: 1.1,
                opacity: 0.4,
                tilt_x: deg_to_rad(15.0),
                sway_amplitude: 0.0,
                sway_period: 0.0,
            },
            1.0,
        ),
        scan(
            "scan-line",
            0,
            ScanAxis::Y,
            (-0.1, 1.1),
            0.5,
            (4.0, 0.0),
            CYBER.with_alpha(0.6),
            [1.0, 0.002],
        ),
        grid("map-grid", 2, CYBER.with_alpha(0.05), px(48.0), px(1.0), [0.0, 0.0]),
        vignette("map-vignette", 3, BACKGROUND, 0.0, 0.7),
        site_grid(),
    ];
    entities.extend(edge_fades("map", 4, px(128.0)));

    for i in 0..8 {
        let f = i as f32;
        entities.push(node(
            format!("data-point-{i}"),
            5,
            (0.15 + f * 0.10, 0.20 + (i % 3) as f32 * 0.25),
            (2.0 + f * 0.3, f * 0.4),
            (0.3, 0.8),
            (1.0, 1.5),
            CYBER.with_alpha(0.6),
            0.008,
        ));
    }

    SceneDescriptor {
        page: PageKey::Portfolio,
        name: "cyber-map".to_string(),
        entities,
    }
}

/// About: swaying backdrop with two scan lines, binary rain and pulse nodes,
/// plus the hero profile card that tilts towards the pointer.
pub fn about_backdrop(tuning: &SceneTuning) -> SceneDescriptor {
    let mut entities = vec![
        backdrop(
            "about-backdrop",
            "about",
            BackdropParams {
                intro_duration: 1.5,
                intro_scale: 1.1,
                opacity: 0.35,
                tilt_x: deg_to_rad(10.0),
                sway_amplitude: deg_to_rad(5.0),
                sway_period: 20.0,
            },
            1.0,
        ),
        scan(
            "scan-horizontal",
            0,
            ScanAxis::Y,
            (-0.05, 1.05),
            0.5,
            (5.0, 0.0),
            CYBER.with_alpha(0.5),
            [1.0, 0.003],
        ),
        scan(
            "scan-vertical",
            0,
            ScanAxis::X,
            (-0.05, 1.05),
            0.5,
            (8.0, 2.0),
            PRIMARY.with_alpha(0.3),
            [0.003, 1.0],
        ),
        grid("about-grid", 2, PRIMARY.with_alpha(0.05), px(32.0), px(1.0), [0.0, 0.0]),
        vignette("about-vignette", 3, BACKGROUND, 0.0, 1.0),
        site_grid(),
    ];
    entities.extend(edge_fades("about", 4, px(160.0)));

    // Columns 0.3 tall whose top edge falls from -100% to 100% of the viewport
    for i in 0..12 {
        let f = i as f32;
        entities.push(scan(
            format!("binary-rain-{i}"),
            1,
            ScanAxis::Y,
            (-0.85, 1.15),
            0.02 + f * 0.08,
            (10.0 + f * 2.0, f * 0.5),
            CYBER.with_alpha(0.1),
            [0.006, 0.3],
        ));
    }

    for i in 0..6 {
        let f = i as f32;
        let color = if i % 2 == 0 { CYBER } else { PRIMARY };
        entities.push(node(
            format!("pulse-node-{i}"),
            5,
            (0.20 + f * 0.12, 0.25 + (i % 2) as f32 * 0.35),
            (2.5 + f * 0.3, f * 0.6),
            (0.4, 1.0),
            (1.0, 2.0),
            color,
            0.004,
        ));
    }

    entities.extend(profile_card(tuning));

    SceneDescriptor {
        page: PageKey::About,
        name: "about-backdrop".to_string(),
        entities,
    }
}

/// The hero portrait card with its scan band, floating badges and particles.
fn profile_card(tuning: &SceneTuning) -> Vec<EntityDescriptor> {
    let (cx, cy) = (0.72, 0.5);
    let (w, h) = (0.26, 0.52);
    let top = cy - h / 2.0;

    let mut card = vec![
        entity(
            "profile-card",
            10,
            EntityKind::TiltCard(TiltCardParams {
                center: Vec3::new(cx, cy, 0.0),
                max_tilt_degrees: tuning.max_tilt_degrees,
                spring: SpringConfig::default(),
            }),
            look(Shape::Panel, Space::Screen, WHITE, [w, h], Some("profile")),
        ),
        // Band 30% of the card tall, travelling from -100% to 200% of its own height
        scan(
            "profile-scan",
            11,
            ScanAxis::Y,
            (top - 0.15 * h, top + 0.75 * h),
            cx,
            (3.0, 0.0),
            CYBER.with_alpha(0.1),
            [w, 0.3 * h],
        ),
    ];

    let badges = [
        ("badge-security-plus", cx + w / 2.0, top + h / 4.0, -px(5.0), 2.0, 0.0),
        ("badge-splunk", cx - w / 2.0, top + h / 2.0, px(5.0), 2.5, 0.5),
        ("badge-network-plus", cx + w / 2.0 - 0.002, top + 0.75 * h, -px(3.0), 1.8, 1.0),
    ];
    for (label, x, y, float, period, delay) in badges {
        card.push(entity(
            label,
            12,
            EntityKind::Pulse(PulseParams {
                position: Vec3::new(x, y, 0.0),
                period,
                delay,
                opacity: Keyframes::constant(1.0),
                scale: Keyframes::constant(1.0),
                offset_y: Keyframes::there_and_back(0.0, float),
                easing: Easing::EaseInOut,
            }),
            look(Shape::Panel, Space::Screen, CYBER, [0.07, 0.03], Some(label)),
        ));
    }

    for i in 0..6 {
        let f = i as f32;
        card.push(entity(
            format!("profile-particle-{i}"),
            9,
            EntityKind::Pulse(PulseParams {
                position: Vec3::new(
                    cx - w / 2.0 + w * (0.2 + f * 0.15),
                    top + h * (0.1 + (i % 3) as f32 * 0.3),
                    0.0,
                ),
                period: 4.0 + (i % 3) as f32 * 0.7,
                delay: f * 0.5,
                opacity: Keyframes::new([0.0, 1.0, 1.0, 0.0]),
                scale: Keyframes::constant(1.0),
                // Starts at rest, then floats 20px either way
                offset_y: Keyframes::new([0.0, -px(20.0), px(20.0), -px(20.0)]),
                easing: Easing::EaseInOut,
            }),
            look(Shape::Glow, Space::Screen, CYBER.with_alpha(0.6), [0.008, 0.008], None),
        ));
    }

    card
}

/// Contact: slightly tilted backdrop under scrolling stripes, a ping-pong scanning
/// beam, eight security nodes and a faint grid, all darkened by a vignette.
pub fn contact_backdrop(_tuning: &SceneTuning) -> SceneDescriptor {
    let mut entities = vec![
        backdrop(
            "contact-backdrop",
            "contact",
            BackdropParams {
                intro_duration: 0.0,
                intro_scale: 1.0,
                opacity: 0.6,
                tilt_x: deg_to_rad(2.0),
                sway_amplitude: 0.0,
                sway_period: 0.0,
            },
            1.1,
        ),
        entity(
            "scan-stripes",
            0,
            EntityKind::Grid(GridParams {
                cell: px(4.0),
                velocity: [0.0, px(2.5)],
            }),
            full_screen(Shape::Stripes, BEAM_BLUE.with_alpha(0.03), [px(4.0), px(2.0)]),
        ),
        entity(
            "scanning-beam",
            1,
            EntityKind::ScanLine(ScanLineParams {
                axis: ScanAxis::Y,
                from: 0.0,
                to: 1.0,
                cross: 0.5,
                period: 4.0,
                delay: 0.0,
                motion: ScanMotion::PingPong,
                edge_fade: 0.1,
            }),
            look(Shape::Bar, Space::Screen, BEAM_BLUE.with_alpha(0.5), [1.0, 0.004], None),
        ),
    ];

    for i in 0..8 {
        let f = i as f32;
        entities.push(node(
            format!("security-node-{i}"),
            2,
            (0.15 + f * 0.12, 0.20 + (i % 3) as f32 * 0.25),
            (2.0 + f * 0.3, f * 0.4),
            (0.6, 1.0),
            (1.0, 1.5),
            NODE_BLUE.with_alpha(0.6),
            0.008,
        ));
    }

    entities.extend([
        grid("contact-grid", 3, BEAM_BLUE.with_alpha(0.02), px(60.0), px(1.0), [0.0, 0.0]),
        vignette("contact-vignette", 4, NAVY.with_alpha(0.7), 0.3, 1.0),
        overlay(
            "contact-shade",
            5,
            (0.5, 0.5),
            full_screen(Shape::Panel, BACKGROUND.with_alpha(0.4), [0.0, 0.0]),
        ),
        site_grid(),
    ]);

    SceneDescriptor {
        page: PageKey::Contact,
        name: "contact-backdrop".to_string(),
        entities,
    }
}

/// Project pages: only the site grid.
pub fn project_detail(_tuning: &SceneTuning) -> SceneDescriptor {
    SceneDescriptor {
        page: PageKey::ProjectDetail,
        name: "site-grid".to_string(),
        entities: vec![site_grid()],
    }
}
