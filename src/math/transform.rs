use serde::{Deserialize, Serialize};
use super::Vec3;

/// Position / Euler rotation / scale triple owned by one decorative object.
///
/// Steady-state animation and entrance sequencing each mutate this directly;
/// the hierarchy exists only at composition time via [`Mat4`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied Y then X then Z
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    /// Local transform matrix: T * Ry * Rx * Rz * S
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position)
            .mul(&Mat4::rotation_y(self.rotation.y))
            .mul(&Mat4::rotation_x(self.rotation.x))
            .mul(&Mat4::rotation_z(self.rotation.z))
            .mul(&Mat4::scaling(self.scale))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Column-major 4x4 matrix for transform composition
#[derive(Debug, Clone, Copy)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        let mut data = [0.0; 16];
        data[0] = 1.0;
        data[5] = 1.0;
        data[10] = 1.0;
        data[15] = 1.0;
        Self { data }
    }

    pub fn translation(t: Vec3) -> Self {
        let mut m = Self::identity();
        m.data[12] = t.x;
        m.data[13] = t.y;
        m.data[14] = t.z;
        m
    }

    pub fn scaling(s: Vec3) -> Self {
        let mut m = Self::identity();
        m.data[0] = s.x;
        m.data[5] = s.y;
        m.data[10] = s.z;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m.data[5] = c;
        m.data[6] = s;
        m.data[9] = -s;
        m.data[10] = c;
        m
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m.data[0] = c;
        m.data[2] = -s;
        m.data[8] = s;
        m.data[10] = c;
        m
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m.data[0] = c;
        m.data[1] = s;
        m.data[4] = -s;
        m.data[5] = c;
        m
    }

    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }
        Self { data: result }
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }
}

/// Compose a parent matrix with a child local transform
pub fn compose(parent: &Mat4, child: &Transform) -> Mat4 {
    parent.mul(&child.matrix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform_is_noop() {
        let t = Transform::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        let out = t.matrix().transform_point(p);
        assert!(out.distance(&p) < 0.0001);
    }

    #[test]
    fn test_translation_applies() {
        let mut t = Transform::identity();
        t.position = Vec3::new(0.0, 5.0, 0.0);
        let out = t.matrix().transform_point(Vec3::ZERO);
        assert!((out.y - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let m = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        let out = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(out.x.abs() < 0.0001);
        assert!((out.z + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_uniform_scale() {
        let mut t = Transform::identity();
        t.set_uniform_scale(2.0);
        let out = t.matrix().transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert!((out.x - 2.0).abs() < 0.0001);
        assert!((out.y - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_compose_layer_then_branch() {
        // A layer frame lifted by 2 with a child offset of 1.5 outward
        let layer = Mat4::translation(Vec3::new(0.0, 2.0, 0.0));
        let branch = Transform::at(Vec3::new(1.5, 0.0, 0.0));
        let world = compose(&layer, &branch);
        let tip = world.transform_point(Vec3::ZERO);
        assert!((tip.x - 1.5).abs() < 0.0001);
        assert!((tip.y - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_transform_order_scale_before_translate() {
        let mut t = Transform::identity();
        t.position = Vec3::new(1.0, 0.0, 0.0);
        t.set_uniform_scale(3.0);
        let out = t.matrix().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((out.x - 4.0).abs() < 0.0001);
    }
}
