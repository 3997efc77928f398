//! Pointer gestures and selection feedback
//!
//! Tap recognition is pure input bookkeeping; the caller resolves the tap to
//! a world ray (camera projection stays outside the engine) and hands it to
//! `handle_ray`. Selection highlights one gift at a time via the emissive
//! override and drives a short decaying bounce on top of the steady-state
//! float.

use crate::animation::easing::decaying_sine;
use crate::interaction::picking::{pick_gift, Ray};
use crate::scene::object::ObjectId;
use crate::scene::registry::DecorationRegistry;

/// Raw pointer event as reported by the host
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub time_ms: f64,
}

/// What still counts as a tap rather than a drag
#[derive(Debug, Clone, Copy)]
pub struct TapConfig {
    pub max_movement_px: f32,
    pub max_duration_ms: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            max_movement_px: 10.0,
            max_duration_ms: 300.0,
        }
    }
}

const HIGHLIGHT_EMISSIVE: f32 = 0.8;
const BOUNCE_DURATION: f32 = 0.6;
const BOUNCE_AMPLITUDE: f32 = 0.08;
const BOUNCE_CYCLES: f32 = 3.0;

#[derive(Debug, Clone, Copy)]
struct BounceFeedback {
    id: ObjectId,
    elapsed: f32,
}

#[derive(Debug)]
pub struct InteractionController {
    tap: TapConfig,
    pointer_down: Option<PointerSample>,
    selected: Option<ObjectId>,
    bounce: Option<BounceFeedback>,
}

impl InteractionController {
    pub fn new(tap: TapConfig) -> Self {
        Self {
            tap,
            pointer_down: None,
            selected: None,
            bounce: None,
        }
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.pointer_down = Some(sample);
    }

    /// True if down/up form a tap within the movement and duration limits
    pub fn pointer_up(&mut self, sample: PointerSample) -> bool {
        let Some(down) = self.pointer_down.take() else {
            return false;
        };
        let dx = sample.x - down.x;
        let dy = sample.y - down.y;
        let moved = (dx * dx + dy * dy).sqrt();
        let held = sample.time_ms - down.time_ms;
        moved <= self.tap.max_movement_px && held >= 0.0 && held <= self.tap.max_duration_ms
    }

    /// Resolve a tap ray: highlight the hit gift, or clear the selection on a
    /// miss. Returns the new selection.
    pub fn handle_ray(
        &mut self,
        ray: &Ray,
        registry: &mut DecorationRegistry,
    ) -> Option<ObjectId> {
        self.clear_highlight(registry);
        self.bounce = None;

        match pick_gift(registry, ray) {
            Some((id, _)) => {
                if let Some(object) = registry.get_mut(id) {
                    object.visual.emissive_override = Some(HIGHLIGHT_EMISSIVE);
                }
                log::debug!("selected gift {}", id);
                self.selected = Some(id);
                self.bounce = Some(BounceFeedback { id, elapsed: 0.0 });
            }
            None => {
                self.selected = None;
            }
        }
        self.selected
    }

    /// Drop any state referencing `id`; called when the object is removed
    pub fn notify_removed(&mut self, id: ObjectId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.bounce.map(|b| b.id) == Some(id) {
            self.bounce = None;
        }
    }

    /// Apply the bounce offset; runs after the steady-state pass so the
    /// offset stacks on the animated position.
    pub fn tick(&mut self, registry: &mut DecorationRegistry, scaled_dt: f32) {
        let Some(mut bounce) = self.bounce else {
            return;
        };
        bounce.elapsed += scaled_dt.max(0.0);

        if bounce.elapsed >= BOUNCE_DURATION {
            self.bounce = None;
            return;
        }

        match registry.get_mut(bounce.id) {
            Some(object) if object.is_active() => {
                let t = bounce.elapsed / BOUNCE_DURATION;
                object.transform.position.y += decaying_sine(t, BOUNCE_AMPLITUDE, BOUNCE_CYCLES);
                self.bounce = Some(bounce);
            }
            _ => self.bounce = None,
        }
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    fn clear_highlight(&mut self, registry: &mut DecorationRegistry) {
        if let Some(id) = self.selected {
            if let Some(object) = registry.get_mut(id) {
                object.visual.emissive_override = None;
            }
        }
    }
}
