use super::Vec3;

/// Evaluate a quadratic Bezier curve at parameter t
///
/// Branch segments droop from a trunk-adjacent start through a sagging
/// control point to an outer tip, so a single quadratic is enough.
pub fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    p0.scale(u * u) + p1.scale(2.0 * u * t) + p2.scale(t * t)
}

/// Sample a quadratic Bezier at n evenly spaced parameters
pub fn sample_quadratic(p0: Vec3, p1: Vec3, p2: Vec3, n: usize) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1).max(1) as f32;
            quadratic_bezier(p0, p1, p2, t)
        })
        .collect()
}
