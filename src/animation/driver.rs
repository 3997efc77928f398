//! Steady-state animation
//!
//! Advances every Active object each frame. Positional oscillation is sampled
//! absolutely from the scene clock, so a zero-delta frame never drifts state;
//! only accumulating rotations and twinkle timers consume the scaled delta.

use crate::animation::clock::AnimationClock;
use crate::config::FeatureFlags;
use crate::math::SceneRng;
use crate::scene::object::{DecorativeObject, ObjectKind};
use crate::scene::registry::DecorationRegistry;

/// Steady-state motion constants
#[derive(Debug, Clone, Copy)]
pub struct AnimationTuning {
    pub branch_sway_amplitude: f32,
    /// Sway loses this much amplitude per layer going up
    pub branch_sway_decay: f32,
    pub branch_sway_frequency: f32,

    pub ornament_float_amplitude: f32,
    pub ornament_float_frequency: f32,
    pub ornament_swing_amplitude: f32,
    pub ornament_swing_frequency: f32,
    pub ornament_pulse_frequency: f32,
    pub ornament_emissive_base: f32,

    pub garland_pulse_frequency: f32,
    /// Phase offset between neighboring lights
    pub garland_pulse_stride: f32,
    pub garland_twinkle_chance: f32,
    pub garland_twinkle_emissive: f32,
    pub garland_twinkle_duration: f32,
    pub garland_idle_emissive: f32,

    pub star_breathe_frequency: f32,
    pub star_emissive_frequency: f32,
    pub star_hue_drift_frequency: f32,
    pub star_hue_drift_amount: f32,

    pub gift_float_amplitude: f32,
    pub gift_wobble_amplitude: f32,
    pub gift_wobble_frequency: f32,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            branch_sway_amplitude: 0.02,
            branch_sway_decay: 0.1,
            branch_sway_frequency: 0.8,

            ornament_float_amplitude: 0.03,
            ornament_float_frequency: 0.5,
            ornament_swing_amplitude: 0.04,
            ornament_swing_frequency: 0.3,
            ornament_pulse_frequency: 1.2,
            ornament_emissive_base: 0.1,

            garland_pulse_frequency: 2.0,
            garland_pulse_stride: 0.3,
            garland_twinkle_chance: 0.01,
            garland_twinkle_emissive: 1.0,
            garland_twinkle_duration: 0.05,
            garland_idle_emissive: 0.3,

            star_breathe_frequency: 1.5,
            star_emissive_frequency: 1.8,
            star_hue_drift_frequency: 0.1,
            star_hue_drift_amount: 0.05,

            gift_float_amplitude: 0.02,
            gift_wobble_amplitude: 0.015,
            gift_wobble_frequency: 0.4,
        }
    }
}

#[derive(Debug)]
pub struct AnimationDriver {
    tuning: AnimationTuning,
    /// Draws the per-frame twinkle rolls; independent of the build rng
    twinkle_rng: SceneRng,
}

impl AnimationDriver {
    pub fn new(tuning: AnimationTuning, twinkle_rng: SceneRng) -> Self {
        Self { tuning, twinkle_rng }
    }

    /// Advance all Active objects. `scaled_dt` is the speed-adjusted frame
    /// delta already applied to the clock.
    pub fn advance(
        &mut self,
        registry: &mut DecorationRegistry,
        clock: &AnimationClock,
        scaled_dt: f32,
        features: &FeatureFlags,
    ) {
        if scaled_dt <= 0.0 {
            return;
        }
        let t = clock.time();
        let tuning = self.tuning;

        for object in registry.iter_mut() {
            if !object.is_active() {
                continue;
            }
            let DecorativeObject {
                kind,
                transform,
                visual,
                ..
            } = object;

            match kind {
                ObjectKind::Branch {
                    layer, sway_phase, ..
                }
                | ObjectKind::NeedleCluster {
                    layer, sway_phase, ..
                } => {
                    if features.wind {
                        let amplitude = tuning.branch_sway_amplitude
                            * (1.0 - tuning.branch_sway_decay * *layer as f32);
                        transform.rotation.z =
                            (t * tuning.branch_sway_frequency + *sway_phase).sin() * amplitude;
                    }
                }
                ObjectKind::Ornament {
                    base_y,
                    spin_speed,
                    float_phase,
                    pulse_phase,
                } => {
                    transform.rotation.y += *spin_speed * scaled_dt;
                    transform.position.y = *base_y
                        + (t * tuning.ornament_float_frequency + *float_phase).sin()
                            * tuning.ornament_float_amplitude;
                    transform.rotation.x = (t * tuning.ornament_swing_frequency + *float_phase)
                        .sin()
                        * tuning.ornament_swing_amplitude;
                    visual.emissive = tuning.ornament_emissive_base
                        * ((t * tuning.ornament_pulse_frequency + *pulse_phase).sin() * 0.1 + 0.9);
                }
                ObjectKind::GarlandLight {
                    index,
                    twinkle_left,
                } => {
                    if !features.lights {
                        continue;
                    }
                    let pulse = (t * tuning.garland_pulse_frequency
                        + tuning.garland_pulse_stride * *index as f32)
                        .sin()
                        * 0.2
                        + 0.8;
                    transform.set_uniform_scale(pulse);

                    if *twinkle_left > 0.0 {
                        *twinkle_left -= scaled_dt;
                        if *twinkle_left <= 0.0 {
                            *twinkle_left = 0.0;
                            visual.emissive = tuning.garland_idle_emissive;
                        }
                    } else if self.twinkle_rng.chance(tuning.garland_twinkle_chance) {
                        visual.emissive = tuning.garland_twinkle_emissive;
                        *twinkle_left = tuning.garland_twinkle_duration;
                    }
                }
                ObjectKind::Star {
                    spin_speed,
                    base_color,
                } => {
                    transform.rotation.y += *spin_speed * scaled_dt;
                    transform
                        .set_uniform_scale((t * tuning.star_breathe_frequency).sin() * 0.1 + 0.9);
                    visual.emissive = 0.2 + (t * tuning.star_emissive_frequency).sin() * 0.1;
                    visual.color = base_color.shift_hue(
                        (t * tuning.star_hue_drift_frequency).sin() * tuning.star_hue_drift_amount,
                    );
                }
                ObjectKind::Gift {
                    base_y,
                    spin_speed,
                    float_phase,
                    ..
                } => {
                    transform.rotation.y += *spin_speed * scaled_dt;
                    transform.position.y =
                        *base_y + (t + *float_phase).sin() * tuning.gift_float_amplitude;
                    transform.rotation.z = (t * tuning.gift_wobble_frequency + *float_phase).sin()
                        * tuning.gift_wobble_amplitude;
                }
            }
        }
    }
}
