pub mod decorations;
pub mod generator;

pub use generator::{BuildReport, LayerFrame, SceneGraph, SceneGraphBuilder, TrunkSpec};
