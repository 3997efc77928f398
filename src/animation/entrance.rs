//! Staged entrance sequencing
//!
//! Every newly added object drops in from below the ground plane, scaling up
//! and spinning while it rises, with a fading sine overshoot near the top.
//! Tasks are plain polled state advanced once per tick; cancellation is a
//! phase flip, so a removed object can never receive a stale mutation.

use crate::animation::easing::{ease_out_pow, entrance_bounce, lerp};
use crate::scene::object::{Lifecycle, ObjectId};
use crate::scene::registry::DecorationRegistry;

/// Per-task lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// Delay not yet elapsed
    Queued,
    /// Interpolating toward the resting pose
    Running,
    /// Snapped to target; the object is now Active
    Completed,
    /// Object removed before completion
    Cancelled,
}

/// One scheduled entrance
#[derive(Debug, Clone)]
pub struct EntranceTask {
    pub id: ObjectId,
    pub scheduled_at: f32,
    pub delay: f32,
    pub duration: f32,
    pub start_y: f32,
    pub target_y: f32,
    pub phase: TaskPhase,
}

/// Shape of the entrance motion, shared by all tasks
#[derive(Debug, Clone, Copy)]
pub struct EntranceStyle {
    /// Exponent n of the 1-(1-p)^n ease
    pub snappiness: u32,
    pub bounce_amplitude: f32,
    pub bounce_cycles: f32,
    /// Total yaw accumulated over the entrance
    pub spin_radians: f32,
    /// Where objects drop in from
    pub start_y: f32,
    pub start_scale: f32,
}

impl Default for EntranceStyle {
    fn default() -> Self {
        Self {
            snappiness: 3,
            bounce_amplitude: 0.3,
            bounce_cycles: 3.0,
            spin_radians: 4.0 * std::f32::consts::PI,
            start_y: -2.0,
            start_scale: 0.1,
        }
    }
}

#[derive(Debug)]
pub struct EntranceSequencer {
    style: EntranceStyle,
    tasks: Vec<EntranceTask>,
}

impl EntranceSequencer {
    pub fn new(style: EntranceStyle) -> Self {
        Self {
            style,
            tasks: Vec::new(),
        }
    }

    /// Enqueue an entrance for `id`, reading the resting pose from the object
    /// and moving it to the start pose. Silent no-op if the object is gone.
    pub fn schedule(
        &mut self,
        registry: &mut DecorationRegistry,
        id: ObjectId,
        delay: f32,
        duration: f32,
        now: f32,
    ) {
        let Some(object) = registry.get_mut(id) else {
            log::debug!("entrance schedule for missing object {}, ignored", id);
            return;
        };
        if object.lifecycle == Lifecycle::Removed {
            return;
        }

        let target_y = object.transform.position.y;
        object.transform.position.y = self.style.start_y;
        object.transform.set_uniform_scale(self.style.start_scale);
        object.lifecycle = Lifecycle::Pending;

        self.tasks.push(EntranceTask {
            id,
            scheduled_at: now,
            delay,
            duration,
            start_y: self.style.start_y,
            target_y,
            phase: TaskPhase::Queued,
        });
    }

    /// Advance all live tasks to `now`. Tasks are independent; order within a
    /// tick does not matter.
    pub fn tick(&mut self, now: f32, registry: &mut DecorationRegistry) {
        let style = self.style;
        for task in &mut self.tasks {
            if matches!(task.phase, TaskPhase::Completed | TaskPhase::Cancelled) {
                continue;
            }

            let object = match registry.get_mut(task.id) {
                Some(o) if o.lifecycle != Lifecycle::Removed => o,
                _ => {
                    task.phase = TaskPhase::Cancelled;
                    continue;
                }
            };

            let elapsed = now - task.scheduled_at - task.delay;
            if elapsed < 0.0 {
                task.phase = TaskPhase::Queued;
                continue;
            }
            task.phase = TaskPhase::Running;

            let p = if task.duration > 0.0 {
                (elapsed / task.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let eased = ease_out_pow(p, style.snappiness);

            object.transform.position.y = task.start_y
                + (task.target_y - task.start_y) * eased
                + entrance_bounce(p, style.bounce_amplitude, style.bounce_cycles);
            object
                .transform
                .set_uniform_scale(lerp(style.start_scale, 1.0, eased));
            object.transform.rotation.y = p * style.spin_radians;

            if p >= 1.0 {
                // Snap exactly to the resting pose before handing off
                object.transform.position.y = task.target_y;
                object.transform.set_uniform_scale(1.0);
                object.transform.rotation.y = style.spin_radians;
                object.lifecycle = Lifecycle::Active;
                task.phase = TaskPhase::Completed;
            }
        }

        self.tasks
            .retain(|t| !matches!(t.phase, TaskPhase::Completed | TaskPhase::Cancelled));
    }

    /// Cancel any live task for `id`; no-op if none exists
    pub fn cancel(&mut self, id: ObjectId) {
        for task in &mut self.tasks {
            if task.id == id && matches!(task.phase, TaskPhase::Queued | TaskPhase::Running) {
                task.phase = TaskPhase::Cancelled;
            }
        }
    }

    /// Phase of the live task for `id`, if any
    pub fn phase_of(&self, id: ObjectId) -> Option<TaskPhase> {
        self.tasks.iter().find(|t| t.id == id).map(|t| t.phase)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t.phase, TaskPhase::Queued | TaskPhase::Running))
            .count()
    }

    pub fn is_idle(&self) -> bool {
        self.pending_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GiftSpec;
    use crate::build::decorations::spawn_gift;
    use crate::math::{Color, SceneRng};

    fn gift_spec() -> GiftSpec {
        GiftSpec {
            x: 1.0,
            z: -1.0,
            size: 0.5,
            color: Color::from_hex(0xF44336),
            ribbon: Color::from_hex(0xFF9800),
        }
    }

    fn setup() -> (DecorationRegistry, EntranceSequencer, ObjectId, f32) {
        let mut registry = DecorationRegistry::new();
        let mut rng = SceneRng::new(42);
        let spec = gift_spec();
        let id = spawn_gift(&mut registry, &spec, &mut rng);
        let target_y = spec.rest_y();
        let sequencer = EntranceSequencer::new(EntranceStyle::default());
        (registry, sequencer, id, target_y)
    }

    #[test]
    fn test_schedule_moves_object_to_start_pose() {
        let (mut registry, mut seq, id, _) = setup();
        seq.schedule(&mut registry, id, 0.0, 1.2, 0.0);

        let obj = registry.get(id).unwrap();
        assert!((obj.transform.position.y + 2.0).abs() < 0.0001);
        assert!((obj.transform.scale.x - 0.1).abs() < 0.0001);
        assert_eq!(obj.lifecycle, Lifecycle::Pending);
        assert_eq!(seq.phase_of(id), Some(TaskPhase::Queued));
    }

    #[test]
    fn test_delay_keeps_task_queued() {
        let (mut registry, mut seq, id, _) = setup();
        seq.schedule(&mut registry, id, 0.5, 1.0, 0.0);

        seq.tick(0.4, &mut registry);
        assert_eq!(seq.phase_of(id), Some(TaskPhase::Queued));
        assert_eq!(registry.get(id).unwrap().lifecycle, Lifecycle::Pending);

        seq.tick(0.6, &mut registry);
        assert_eq!(seq.phase_of(id), Some(TaskPhase::Running));
    }

    #[test]
    fn test_completion_snaps_to_target() {
        let (mut registry, mut seq, id, target_y) = setup();
        seq.schedule(&mut registry, id, 0.5, 1.0, 0.0);

        // Exactly delay + duration
        seq.tick(1.5, &mut registry);

        let obj = registry.get(id).unwrap();
        assert!((obj.transform.position.y - target_y).abs() < 0.0001);
        assert!((obj.transform.scale.x - 1.0).abs() < 0.0001);
        assert_eq!(obj.lifecycle, Lifecycle::Active);
        // Completed tasks are pruned
        assert!(seq.is_idle());
    }

    #[test]
    fn test_progress_rises_and_scales_up() {
        let (mut registry, mut seq, id, target_y) = setup();
        seq.schedule(&mut registry, id, 0.0, 1.0, 0.0);

        seq.tick(0.25, &mut registry);
        let early = registry.get(id).unwrap().transform;
        seq.tick(0.75, &mut registry);
        let late = registry.get(id).unwrap().transform;

        assert!(late.position.y > early.position.y);
        assert!(late.scale.x > early.scale.x);
        assert!(late.rotation.y > early.rotation.y);
        assert!(late.position.y <= target_y + 0.35); // bounce overshoot bound
    }

    #[test]
    fn test_tick_is_idempotent_at_same_now() {
        let (mut registry, mut seq, id, _) = setup();
        seq.schedule(&mut registry, id, 0.0, 1.0, 0.0);

        seq.tick(0.5, &mut registry);
        let first = registry.get(id).unwrap().transform;
        seq.tick(0.5, &mut registry);
        let second = registry.get(id).unwrap().transform;
        assert_eq!(first, second);
    }

    #[test]
    fn test_removed_object_cancels_task() {
        let (mut registry, mut seq, id, _) = setup();
        seq.schedule(&mut registry, id, 0.0, 1.0, 0.0);
        seq.tick(0.2, &mut registry);

        registry.remove(id);
        seq.cancel(id);
        // Further ticks never touch the removed object and never panic
        seq.tick(0.4, &mut registry);
        seq.tick(2.0, &mut registry);
        assert!(seq.is_idle());
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn test_stale_removal_detected_during_tick() {
        let (mut registry, mut seq, id, _) = setup();
        seq.schedule(&mut registry, id, 0.0, 1.0, 0.0);
        // Removed without an explicit cancel; tick must cancel, not crash
        registry.remove(id);
        seq.tick(0.5, &mut registry);
        assert!(seq.is_idle());
    }

    #[test]
    fn test_schedule_for_missing_object_is_noop() {
        let (mut registry, mut seq, _, _) = setup();
        seq.schedule(&mut registry, ObjectId(999), 0.0, 1.0, 0.0);
        assert!(seq.is_idle());
    }

    #[test]
    fn test_staggered_tasks_are_independent() {
        let mut registry = DecorationRegistry::new();
        let mut rng = SceneRng::new(1);
        let a = spawn_gift(&mut registry, &gift_spec(), &mut rng);
        let b = spawn_gift(&mut registry, &gift_spec(), &mut rng);

        let mut seq = EntranceSequencer::new(EntranceStyle::default());
        seq.schedule(&mut registry, a, 0.0, 1.0, 0.0);
        seq.schedule(&mut registry, b, 0.2, 1.0, 0.0);

        seq.tick(1.0, &mut registry);
        assert_eq!(registry.get(a).unwrap().lifecycle, Lifecycle::Active);
        assert_eq!(registry.get(b).unwrap().lifecycle, Lifecycle::Pending);

        seq.tick(1.2, &mut registry);
        assert_eq!(registry.get(b).unwrap().lifecycle, Lifecycle::Active);
    }
}
