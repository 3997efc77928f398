//! Decoration placement: star, ornaments, garland lights, and gifts

use std::f32::consts::TAU;
use crate::config::{GiftSpec, SceneParameters};
use crate::math::{SceneRng, Transform, Vec3};
use crate::scene::object::{Lifecycle, ObjectId, ObjectKind, VisualState};
use crate::scene::registry::DecorationRegistry;

const STAR_SPIN_SPEED: f32 = 0.5;
const STAR_EMISSIVE: f32 = 0.3;
const ORNAMENT_EMISSIVE: f32 = 0.1;
const ORNAMENT_SPIN_RANGE: (f32, f32) = (0.3, 0.9);
const GARLAND_EMISSIVE: f32 = 0.3;
const GIFT_SPIN_RANGE: (f32, f32) = (0.2, 0.5);
const GIFT_SIZE_RANGE: (f32, f32) = (0.35, 0.6);
const GIFT_DISK_RADIUS: f32 = 1.8;

/// Single tree-topper, fixed position, Active immediately
pub fn place_star(registry: &mut DecorationRegistry, params: &SceneParameters) -> ObjectId {
    let kind = ObjectKind::Star {
        spin_speed: STAR_SPIN_SPEED,
        base_color: params.palette.star,
    };
    registry.insert(
        kind,
        Transform::at(Vec3::new(0.0, params.star_height, 0.0)),
        VisualState::new(params.palette.star, STAR_EMISSIVE),
        Lifecycle::Active,
    )
}

/// Scatter ornaments over the allowed layer band
pub fn place_ornaments(
    registry: &mut DecorationRegistry,
    params: &SceneParameters,
    rng: &mut SceneRng,
) {
    for _ in 0..params.ornament_count {
        spawn_ornament(registry, params, rng, Lifecycle::Active);
    }
}

/// Place one ornament at a random spot on the tree
pub fn spawn_ornament(
    registry: &mut DecorationRegistry,
    params: &SceneParameters,
    rng: &mut SceneRng,
    lifecycle: Lifecycle,
) -> ObjectId {
    let (lo, hi) = params.ornament_layer_range;
    let layer = rng.range_inclusive(lo as usize, hi as usize) as f32;

    let angle = rng.range(0.0, TAU);
    let distance = params.ornament_base_radius - layer * params.ornament_radius_shrink;
    let height = params.ornament_base_height
        + layer * params.ornament_level_height
        + rng.range(0.0, params.ornament_height_jitter);

    let position = Vec3::new(angle.cos() * distance, height, angle.sin() * distance);
    let color = *rng.pick(&params.palette.ornaments);

    let kind = ObjectKind::Ornament {
        base_y: height,
        spin_speed: rng.range(ORNAMENT_SPIN_RANGE.0, ORNAMENT_SPIN_RANGE.1),
        float_phase: rng.range(0.0, TAU),
        pulse_phase: rng.range(0.0, TAU),
    };

    registry.insert(
        kind,
        Transform::at(position),
        VisualState::new(color, ORNAMENT_EMISSIVE),
        lifecycle,
    )
}

/// Spiral garland; every k-th sample emits a point light alternating between
/// the two configured colors
pub fn place_garland(registry: &mut DecorationRegistry, params: &SceneParameters) {
    let segments = params.garland_segments;
    let every = params.garland_light_every;

    let mut emitted = 0u32;
    for i in (0..segments).step_by(every as usize) {
        let t = i as f32 / segments as f32;
        let angle = t * TAU * params.garland_turns;
        let radius = params.garland_base_radius * (1.0 - t * params.garland_radius_shrink);
        let height = params.garland_base_height + t * params.garland_span;

        let position = Vec3::new(angle.cos() * radius, height, angle.sin() * radius);
        let color = params.palette.garland[(emitted % 2) as usize];

        // The pulse phase strides per light, not per spiral sample
        let kind = ObjectKind::GarlandLight {
            index: emitted,
            twinkle_left: 0.0,
        };
        emitted += 1;

        registry.insert(
            kind,
            Transform::at(position),
            VisualState::new(color, GARLAND_EMISSIVE),
            Lifecycle::Active,
        );
    }
}

/// The configured initial gift layout, Pending until their entrances finish
pub fn place_initial_gifts(
    registry: &mut DecorationRegistry,
    params: &SceneParameters,
    rng: &mut SceneRng,
) -> Vec<ObjectId> {
    params
        .initial_gifts
        .iter()
        .map(|spec| spawn_gift(registry, spec, rng))
        .collect()
}

/// Register one gift box at its resting position, Pending
pub fn spawn_gift(
    registry: &mut DecorationRegistry,
    spec: &GiftSpec,
    rng: &mut SceneRng,
) -> ObjectId {
    let rest_y = spec.rest_y();
    let kind = ObjectKind::Gift {
        base_y: rest_y,
        size: spec.size,
        spin_speed: rng.range(GIFT_SPIN_RANGE.0, GIFT_SPIN_RANGE.1),
        float_phase: rng.range(0.0, TAU),
        ribbon: spec.ribbon,
    };

    registry.insert(
        kind,
        Transform::at(Vec3::new(spec.x, rest_y, spec.z)),
        VisualState::new(spec.color, 0.0),
        Lifecycle::Pending,
    )
}

/// Random gift within a bounded disk around the tree
pub fn random_gift_spec(params: &SceneParameters, rng: &mut SceneRng) -> GiftSpec {
    let angle = rng.range(0.0, TAU);
    // sqrt keeps the disk uniform instead of center-heavy
    let radius = GIFT_DISK_RADIUS * rng.next_f32().sqrt();

    GiftSpec {
        x: angle.cos() * radius,
        z: angle.sin() * radius,
        size: rng.range(GIFT_SIZE_RANGE.0, GIFT_SIZE_RANGE.1),
        color: *rng.pick(&params.palette.ornaments),
        ribbon: *rng.pick(&params.palette.ribbons),
    }
}
