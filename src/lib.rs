//! Procedural holiday tree scene engine
//!
//! Generates a layered conifer with ornaments, a spiral garland, a tree
//! topper, and gift boxes, then animates the whole scene: staggered drop-in
//! entrances, wind sway, ornament drift, garland twinkle, and tap selection.
//! Rendering and camera work stay on the host side; the engine exposes a flat
//! per-object snapshot each frame.

pub mod animation;
pub mod build;
pub mod config;
pub mod error;
pub mod interaction;
pub mod math;
pub mod scene;

pub use config::{Feature, SceneParameters};
pub use error::SceneError;
pub use interaction::{PointerSample, Ray};
pub use scene::object::{KindTag, ObjectId};
pub use scene::Scene;

use wasm_bindgen::prelude::*;
use math::Vec3;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_kind(name: &str) -> Result<KindTag, JsValue> {
    KindTag::parse(name).ok_or_else(|| JsValue::from_str(&format!("unknown object kind: {}", name)))
}

/// JS-facing engine handle
#[wasm_bindgen]
pub struct FestiveScene {
    inner: Scene,
}

#[wasm_bindgen]
impl FestiveScene {
    /// Default scene, clock-seeded
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FestiveScene, JsValue> {
        let inner = Scene::build(SceneParameters::default(), None).map_err(to_js)?;
        Ok(FestiveScene { inner })
    }

    /// Default parameters with a fixed seed, for reproducible scenes
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u32) -> Result<FestiveScene, JsValue> {
        let inner = Scene::build(SceneParameters::default(), Some(seed)).map_err(to_js)?;
        Ok(FestiveScene { inner })
    }

    /// Build from a YAML parameter document
    #[wasm_bindgen(js_name = fromYaml)]
    pub fn from_yaml(yaml: &str) -> Result<FestiveScene, JsValue> {
        let params = SceneParameters::from_yaml(yaml).map_err(to_js)?;
        let inner = Scene::build(params, None).map_err(to_js)?;
        Ok(FestiveScene { inner })
    }

    /// Advance by a frame delta in seconds
    pub fn tick(&mut self, delta: f32) {
        self.inner.tick(delta);
    }

    /// Add a gift at a random free spot around the tree
    #[wasm_bindgen(js_name = addGift)]
    pub fn add_gift(&mut self) -> Result<u32, JsValue> {
        self.add_object("gift")
    }

    /// Add an object by kind name; only gifts and ornaments are allowed
    #[wasm_bindgen(js_name = addObject)]
    pub fn add_object(&mut self, kind: &str) -> Result<u32, JsValue> {
        let tag = parse_kind(kind)?;
        self.inner
            .add_decorative_object(tag)
            .map(|id| id.0)
            .map_err(to_js)
    }

    /// Remove by id; false if the id is not live
    #[wasm_bindgen(js_name = removeObject)]
    pub fn remove_object(&mut self, id: u32) -> bool {
        self.inner.remove_decorative_object(ObjectId(id))
    }

    /// Single-object record in the same layout as `snapshot`; errors on a
    /// stale id
    #[wasm_bindgen(js_name = objectSnapshot)]
    pub fn object_snapshot(&self, id: u32) -> Result<Vec<f32>, JsValue> {
        self.inner.object_snapshot(ObjectId(id)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = activeCount)]
    pub fn active_count(&self, kind: &str) -> Result<u32, JsValue> {
        let tag = parse_kind(kind)?;
        Ok(self.inner.get_active_count(tag) as u32)
    }

    #[wasm_bindgen(js_name = setAnimationSpeed)]
    pub fn set_animation_speed(&mut self, speed: f32) {
        self.inner.set_global_animation_speed(speed);
    }

    /// Returns the clamped scale actually applied
    #[wasm_bindgen(js_name = setSceneScale)]
    pub fn set_scene_scale(&mut self, scale: f32) -> f32 {
        self.inner.set_scene_scale(scale)
    }

    #[wasm_bindgen(js_name = sceneScale)]
    pub fn scene_scale(&self) -> f32 {
        self.inner.scene_scale()
    }

    #[wasm_bindgen(js_name = toggleWind)]
    pub fn toggle_wind(&mut self) -> bool {
        self.inner.toggle_feature(Feature::Wind)
    }

    #[wasm_bindgen(js_name = toggleSnow)]
    pub fn toggle_snow(&mut self) -> bool {
        self.inner.toggle_feature(Feature::Snow)
    }

    #[wasm_bindgen(js_name = toggleLights)]
    pub fn toggle_lights(&mut self) -> bool {
        self.inner.toggle_feature(Feature::Lights)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32, time_ms: f64) {
        self.inner.pointer_down(PointerSample { x, y, time_ms });
    }

    /// True if the gesture qualified as a tap
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32, time_ms: f64) -> bool {
        self.inner.pointer_up(PointerSample { x, y, time_ms })
    }

    /// Cast a world-space ray (the host unprojects the tap) and select the
    /// gift it hits, if any
    pub fn pick(&mut self, ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) -> Option<u32> {
        let ray = Ray::new(Vec3::new(ox, oy, oz), Vec3::new(dx, dy, dz));
        self.inner.handle_pointer(&ray).map(|id| id.0)
    }

    pub fn selected(&self) -> Option<u32> {
        self.inner.selected().map(|id| id.0)
    }

    /// Flat render feed, 14 floats per object:
    /// `[id, kind, pos.xyz, rot.xyz, scale.xyz, color.rgb, emissive]`
    pub fn snapshot(&self) -> Vec<f32> {
        self.inner.snapshot()
    }

    /// Report that the host failed to initialize its render context; the
    /// scene freezes but stays queryable
    #[wasm_bindgen(js_name = reportInitFailure)]
    pub fn report_init_failure(&mut self, message: &str) {
        self.inner.report_initialization_failure(message);
    }

    #[wasm_bindgen(js_name = clockTime)]
    pub fn clock_time(&self) -> f32 {
        self.inner.clock_time()
    }

    /// Regenerate the scene and replay the entrance sequence
    pub fn rebuild(&mut self) {
        self.inner.rebuild();
    }
}
