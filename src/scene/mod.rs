//! Scene assembly and the engine facade
//!
//! `Scene` owns every subsystem and enforces the per-frame order: clock,
//! entrance sequencing, steady-state animation, selection feedback. All
//! mutation funnels through it, so lifecycle transitions stay consistent
//! with the sequencer and the interaction controller.

pub mod object;
pub mod registry;

use crate::animation::{
    AnimationClock, AnimationDriver, AnimationTuning, EntranceSequencer, EntranceStyle,
};
use crate::build::{decorations, BuildReport, SceneGraph, SceneGraphBuilder};
use crate::config::{Feature, FeatureFlags, SceneParameters};
use crate::error::SceneError;
use crate::interaction::{InteractionController, PointerSample, Ray, TapConfig};
use crate::math::SceneRng;
use object::{KindTag, ObjectId};
use registry::DecorationRegistry;

pub struct Scene {
    params: SceneParameters,
    graph: SceneGraph,
    registry: DecorationRegistry,
    rng: SceneRng,
    clock: AnimationClock,
    sequencer: EntranceSequencer,
    driver: AnimationDriver,
    controller: InteractionController,
    features: FeatureFlags,
    scene_scale: f32,
    init_failure: Option<String>,
}

impl Scene {
    /// Validate parameters, generate the scene, and queue the staggered
    /// entrance of every initial gift.
    pub fn build(params: SceneParameters, seed: Option<u32>) -> Result<Scene, SceneError> {
        params.validate()?;

        let mut rng = match seed {
            Some(seed) => SceneRng::new(seed),
            None => SceneRng::from_clock(),
        };
        let twinkle_rng = SceneRng::new(rng.next_u32());

        let mut registry = DecorationRegistry::new();
        let report = SceneGraphBuilder::new(&params).populate(&mut registry, &mut rng);

        let mut sequencer = EntranceSequencer::new(entrance_style(&params));
        schedule_initial_entrances(&mut sequencer, &mut registry, &params, &report, 0.0);

        let features = FeatureFlags::from_params(&params);
        let clock = AnimationClock::new(params.animation_speed);
        let driver = AnimationDriver::new(AnimationTuning::default(), twinkle_rng);
        let controller = InteractionController::new(TapConfig::default());

        Ok(Scene {
            graph: report.graph,
            params,
            registry,
            rng,
            clock,
            sequencer,
            driver,
            controller,
            features,
            scene_scale: 1.0,
            init_failure: None,
        })
    }

    /// Advance the whole scene by a raw frame delta in seconds
    pub fn tick(&mut self, delta: f32) {
        if self.init_failure.is_some() {
            return;
        }
        let scaled = self.clock.advance(delta);
        if scaled <= 0.0 {
            return;
        }
        self.sequencer.tick(self.clock.time(), &mut self.registry);
        self.driver
            .advance(&mut self.registry, &self.clock, scaled, &self.features);
        self.controller.tick(&mut self.registry, scaled);
    }

    /// Spawn a decoration at runtime; only gifts and ornaments may be added
    /// after the build. New objects enter through the drop-in sequence.
    pub fn add_decorative_object(&mut self, tag: KindTag) -> Result<ObjectId, SceneError> {
        if let Some(message) = &self.init_failure {
            return Err(SceneError::InitializationFailed(message.clone()));
        }
        let id = match tag {
            KindTag::Gift => {
                let cap = self.params.max_gift_cap;
                if self.registry.count(KindTag::Gift) >= cap {
                    return Err(SceneError::CapacityExceeded { cap });
                }
                let spec = decorations::random_gift_spec(&self.params, &mut self.rng);
                decorations::spawn_gift(&mut self.registry, &spec, &mut self.rng)
            }
            KindTag::Ornament => decorations::spawn_ornament(
                &mut self.registry,
                &self.params,
                &mut self.rng,
                object::Lifecycle::Pending,
            ),
            other => {
                return Err(SceneError::configuration(format!(
                    "cannot add {:?} objects at runtime",
                    other
                )))
            }
        };

        self.sequencer.schedule(
            &mut self.registry,
            id,
            0.0,
            self.params.entrance_duration_ms / 1000.0,
            self.clock.time(),
        );
        log::debug!("added {:?} as {}", tag, id);
        Ok(id)
    }

    /// Remove an object and detach every subsystem from it in the same call.
    /// Returns false for ids that are not live.
    pub fn remove_decorative_object(&mut self, id: ObjectId) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        self.sequencer.cancel(id);
        self.controller.notify_removed(id);
        log::debug!("removed {}", id);
        true
    }

    pub fn get_active_count(&self, tag: KindTag) -> usize {
        self.registry.active_count(tag)
    }

    /// Look up a live object; ids of removed objects stay stale forever
    pub fn get_object(&self, id: ObjectId) -> Result<&object::DecorativeObject, SceneError> {
        self.registry
            .get(id)
            .ok_or(SceneError::StaleReference(id.0))
    }

    /// Non-positive speeds are rejected and the current speed kept
    pub fn set_global_animation_speed(&mut self, speed: f32) {
        if speed <= 0.0 {
            log::warn!("ignoring non-positive animation speed {}", speed);
            return;
        }
        self.clock.set_speed(speed);
    }

    /// Clamp into the configured bounds and return the applied value
    pub fn set_scene_scale(&mut self, scale: f32) -> f32 {
        self.scene_scale = scale.clamp(self.params.scale_min, self.params.scale_max);
        self.scene_scale
    }

    pub fn scene_scale(&self) -> f32 {
        self.scene_scale
    }

    /// Flip a feature and return its new state
    pub fn toggle_feature(&mut self, feature: Feature) -> bool {
        self.features.toggle(feature)
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.controller.pointer_down(sample);
    }

    pub fn pointer_up(&mut self, sample: PointerSample) -> bool {
        self.controller.pointer_up(sample)
    }

    /// Resolve a world-space tap ray to a selection
    pub fn handle_pointer(&mut self, ray: &Ray) -> Option<ObjectId> {
        self.controller.handle_ray(ray, &mut self.registry)
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.controller.selected()
    }

    /// Record a fatal initialization failure from the render host. The scene
    /// stays queryable but stops advancing.
    pub fn report_initialization_failure(&mut self, message: &str) {
        log::error!("initialization failed: {}", message);
        self.init_failure = Some(message.to_string());
    }

    pub fn initialization_failure(&self) -> Option<&str> {
        self.init_failure.as_deref()
    }

    /// Regenerate the scene in place. Ids keep counting up, the clock
    /// restarts, and the entrance sequence plays again.
    pub fn rebuild(&mut self) {
        self.registry.clear();
        self.clock.reset();
        self.sequencer = EntranceSequencer::new(entrance_style(&self.params));
        self.controller = InteractionController::new(TapConfig::default());

        let report =
            SceneGraphBuilder::new(&self.params).populate(&mut self.registry, &mut self.rng);
        schedule_initial_entrances(
            &mut self.sequencer,
            &mut self.registry,
            &self.params,
            &report,
            0.0,
        );
        self.graph = report.graph;
        self.init_failure = None;
    }

    /// Flat render feed: 14 floats per object, in registry order.
    /// `[id, kind, pos.xyz, rot.xyz, scale.xyz, color.rgb, emissive]`
    pub fn snapshot(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.registry.len() * 14);
        for object in self.registry.iter() {
            write_record(&mut out, object);
        }
        out
    }

    /// One record in `snapshot` layout for a single id
    pub fn object_snapshot(&self, id: ObjectId) -> Result<Vec<f32>, SceneError> {
        let object = self.get_object(id)?;
        let mut out = Vec::with_capacity(14);
        write_record(&mut out, object);
        Ok(out)
    }

    pub fn clock_time(&self) -> f32 {
        self.clock.time()
    }

    pub fn params(&self) -> &SceneParameters {
        &self.params
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn registry(&self) -> &DecorationRegistry {
        &self.registry
    }
}

fn write_record(out: &mut Vec<f32>, object: &object::DecorativeObject) {
    out.push(object.id.0 as f32);
    out.push(object.kind.tag().index() as f32);
    out.extend_from_slice(&object.transform.position.to_array());
    out.extend_from_slice(&object.transform.rotation.to_array());
    out.extend_from_slice(&object.transform.scale.to_array());
    out.extend_from_slice(&object.visual.color.to_array());
    out.push(object.visual.effective_emissive());
}

fn entrance_style(params: &SceneParameters) -> EntranceStyle {
    EntranceStyle {
        snappiness: params.entrance_snappiness,
        ..EntranceStyle::default()
    }
}

fn schedule_initial_entrances(
    sequencer: &mut EntranceSequencer,
    registry: &mut DecorationRegistry,
    params: &SceneParameters,
    report: &BuildReport,
    now: f32,
) {
    let duration = params.entrance_duration_ms / 1000.0;
    let stagger = params.entrance_stagger_ms / 1000.0;
    for (i, id) in report.gift_ids.iter().enumerate() {
        sequencer.schedule(registry, *id, stagger * i as f32, duration, now);
    }
}
