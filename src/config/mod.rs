pub mod params;

pub use params::{Feature, FeatureFlags, GiftSpec, Palette, SceneParameters};
