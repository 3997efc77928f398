//! Ray hit-testing against selectable objects
//!
//! Selection works on bounding spheres; only kinds reporting a bounding
//! radius (gifts) are candidates. Ties at equal distance resolve to the
//! smaller id so picking is deterministic.

use crate::math::Vec3;
use crate::scene::object::ObjectId;
use crate::scene::registry::DecorationRegistry;

const DISTANCE_EPS: f32 = 0.0001;

/// World-space picking ray
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Construct with the direction normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
}

/// Nearest non-negative intersection distance of `ray` with a sphere, if any
pub fn ray_sphere_intersect(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(&ray.direction);
    let c = oc.dot(&oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_d;
    if far >= 0.0 {
        // Origin inside the sphere
        return Some(far);
    }
    None
}

/// Closest Active selectable object hit by `ray`
pub fn pick_gift(registry: &DecorationRegistry, ray: &Ray) -> Option<(ObjectId, f32)> {
    let mut best: Option<(ObjectId, f32)> = None;

    for object in registry.iter() {
        if !object.is_active() {
            continue;
        }
        let Some(radius) = object.bounding_radius() else {
            continue;
        };
        let scaled = radius * object.transform.scale.x;
        let Some(distance) = ray_sphere_intersect(ray, object.transform.position, scaled) else {
            continue;
        };

        best = match best {
            None => Some((object.id, distance)),
            Some((best_id, best_distance)) => {
                if distance + DISTANCE_EPS < best_distance
                    || ((distance - best_distance).abs() <= DISTANCE_EPS && object.id < best_id)
                {
                    Some((object.id, distance))
                } else {
                    Some((best_id, best_distance))
                }
            }
        };
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::decorations::spawn_gift;
    use crate::config::GiftSpec;
    use crate::math::{Color, SceneRng};
    use crate::scene::object::Lifecycle;

    fn gift_at(x: f32, z: f32, size: f32) -> GiftSpec {
        GiftSpec {
            x,
            z,
            size,
            color: Color::from_hex(0xF44336),
            ribbon: Color::from_hex(0xFF9800),
        }
    }

    fn activate(registry: &mut DecorationRegistry, id: ObjectId) {
        registry.get_mut(id).unwrap().lifecycle = Lifecycle::Active;
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let d = ray_sphere_intersect(&ray, Vec3::ZERO, 1.0).unwrap();
        assert!((d - 4.0).abs() < 0.0001);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray_sphere_intersect(&ray, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray_sphere_intersect(&ray, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_origin_inside_sphere() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let d = ray_sphere_intersect(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((d - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_picks_nearest_gift() {
        let mut registry = DecorationRegistry::new();
        let mut rng = SceneRng::new(5);
        let near = spawn_gift(&mut registry, &gift_at(0.0, -1.0, 0.5), &mut rng);
        let far = spawn_gift(&mut registry, &gift_at(0.0, 2.0, 0.5), &mut rng);
        activate(&mut registry, near);
        activate(&mut registry, far);

        let rest_y = gift_at(0.0, 0.0, 0.5).rest_y();
        let ray = Ray::new(Vec3::new(0.0, rest_y, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let (picked, _) = pick_gift(&registry, &ray).unwrap();
        assert_eq!(picked, near);
    }

    #[test]
    fn test_pending_gift_not_pickable() {
        let mut registry = DecorationRegistry::new();
        let mut rng = SceneRng::new(5);
        let spec = gift_at(0.0, 0.0, 0.5);
        spawn_gift(&mut registry, &spec, &mut rng);

        let ray = Ray::new(Vec3::new(0.0, spec.rest_y(), -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(pick_gift(&registry, &ray).is_none());
    }

    #[test]
    fn test_non_gift_kinds_ignored() {
        let mut registry = DecorationRegistry::new();
        let params = crate::config::SceneParameters::default();
        let star = crate::build::decorations::place_star(&mut registry, &params);

        let star_y = registry.get(star).unwrap().transform.position.y;
        let ray = Ray::new(Vec3::new(0.0, star_y, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(pick_gift(&registry, &ray).is_none());
    }

    #[test]
    fn test_tie_resolves_to_smaller_id() {
        let mut registry = DecorationRegistry::new();
        let mut rng = SceneRng::new(5);
        // Two gifts concentric: identical hit distance
        let a = spawn_gift(&mut registry, &gift_at(0.0, 0.0, 0.5), &mut rng);
        let b = spawn_gift(&mut registry, &gift_at(0.0, 0.0, 0.5), &mut rng);
        activate(&mut registry, a);
        activate(&mut registry, b);

        let rest_y = gift_at(0.0, 0.0, 0.5).rest_y();
        let ray = Ray::new(Vec3::new(0.0, rest_y, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let (picked, _) = pick_gift(&registry, &ray).unwrap();
        assert_eq!(picked, a.min(b));
    }
}
