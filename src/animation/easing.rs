//! Easing and feedback curves for entrance and selection animation

use std::f32::consts::{PI, TAU};

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Snappy ease-out: 1 - (1-t)^n, n configurable (3 = soft, higher = snappier)
pub fn ease_out_pow(t: f32, n: u32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(n.max(1) as i32)
}

/// Entrance overshoot: a sine that fades out as progress completes
pub fn entrance_bounce(t: f32, amplitude: f32, cycles: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    amplitude * (t * cycles * PI).sin() * (1.0 - t)
}

/// Decaying sine for selection feedback bounces
pub fn decaying_sine(t: f32, amplitude: f32, cycles: f32) -> f32 {
    if !(0.0..1.0).contains(&t) {
        return 0.0;
    }
    amplitude * (t * cycles * TAU).sin() * (1.0 - t)
}
