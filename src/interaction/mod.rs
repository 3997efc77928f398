pub mod controller;
pub mod picking;

pub use controller::{InteractionController, PointerSample, TapConfig};
pub use picking::{pick_gift, Ray};
