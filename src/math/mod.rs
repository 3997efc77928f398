pub mod color;
pub mod curve;
pub mod rng;
pub mod transform;
pub mod vec3;

pub use color::Color;
pub use curve::quadratic_bezier;
pub use rng::SceneRng;
pub use transform::{Mat4, Transform};
pub use vec3::Vec3;
