//! Flat decoration registry
//!
//! Objects live in a slot arena with a side index from stable id to slot, so
//! iteration is a linear scan and removal never shifts other objects. Ids are
//! never reused within a registry's lifetime.

use std::collections::HashMap;
use crate::math::Transform;
use super::object::{DecorativeObject, KindTag, Lifecycle, ObjectId, ObjectKind, VisualState};

#[derive(Debug, Default)]
pub struct DecorationRegistry {
    slots: Vec<Option<DecorativeObject>>,
    free: Vec<usize>,
    index: HashMap<ObjectId, usize>,
    next_id: u32,
}

impl DecorationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new object and return its id
    pub fn insert(
        &mut self,
        kind: ObjectKind,
        transform: Transform,
        visual: VisualState,
        lifecycle: Lifecycle,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let object = DecorativeObject {
            id,
            kind,
            transform,
            visual,
            lifecycle,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(object);
                slot
            }
            None => {
                self.slots.push(Some(object));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        id
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&DecorativeObject> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut DecorativeObject> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    /// Remove an object, returning it with its lifecycle marked Removed
    pub fn remove(&mut self, id: ObjectId) -> Option<DecorativeObject> {
        let slot = self.index.remove(&id)?;
        let mut object = self.slots[slot].take()?;
        object.lifecycle = Lifecycle::Removed;
        self.free.push(slot);
        Some(object)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecorativeObject> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DecorativeObject> {
        self.slots.iter_mut().filter_map(|s| s.as_mut())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Live objects of a kind, regardless of lifecycle
    pub fn count(&self, tag: KindTag) -> usize {
        self.iter().filter(|o| o.kind.tag() == tag).count()
    }

    /// Active objects of a kind
    pub fn active_count(&self, tag: KindTag) -> usize {
        self.iter()
            .filter(|o| o.kind.tag() == tag && o.is_active())
            .count()
    }

    /// Drop every object; ids keep counting up so stale ids stay stale
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;

    fn ornament() -> ObjectKind {
        ObjectKind::Ornament {
            base_y: 2.0,
            spin_speed: 0.5,
            float_phase: 0.0,
            pulse_phase: 0.0,
        }
    }

    fn visual() -> VisualState {
        VisualState::new(Color::from_hex(0xF44336), 0.1)
    }

    fn insert_one(reg: &mut DecorationRegistry, lifecycle: Lifecycle) -> ObjectId {
        reg.insert(ornament(), Transform::identity(), visual(), lifecycle)
    }

    #[test]
    fn test_insert_and_get() {
        let mut reg = DecorationRegistry::new();
        let id = insert_one(&mut reg, Lifecycle::Active);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(id).unwrap().id, id);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut reg = DecorationRegistry::new();
        let a = insert_one(&mut reg, Lifecycle::Active);
        let b = insert_one(&mut reg, Lifecycle::Active);
        reg.remove(a);
        let c = insert_one(&mut reg, Lifecycle::Active);
        assert!(b > a);
        assert!(c > b, "removed ids must never be reissued");
    }

    #[test]
    fn test_remove_marks_lifecycle() {
        let mut reg = DecorationRegistry::new();
        let id = insert_one(&mut reg, Lifecycle::Active);
        let removed = reg.remove(id).unwrap();
        assert_eq!(removed.lifecycle, Lifecycle::Removed);
        assert!(reg.get(id).is_none());
        assert!(!reg.contains(id));
    }

    #[test]
    fn test_remove_twice_is_none() {
        let mut reg = DecorationRegistry::new();
        let id = insert_one(&mut reg, Lifecycle::Active);
        assert!(reg.remove(id).is_some());
        assert!(reg.remove(id).is_none());
    }

    #[test]
    fn test_slot_reuse_preserves_other_objects() {
        let mut reg = DecorationRegistry::new();
        let a = insert_one(&mut reg, Lifecycle::Active);
        let b = insert_one(&mut reg, Lifecycle::Active);
        reg.remove(a);
        let c = insert_one(&mut reg, Lifecycle::Active);
        assert!(reg.get(b).is_some());
        assert!(reg.get(c).is_some());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_active_count_excludes_pending() {
        let mut reg = DecorationRegistry::new();
        insert_one(&mut reg, Lifecycle::Active);
        insert_one(&mut reg, Lifecycle::Pending);
        assert_eq!(reg.count(KindTag::Ornament), 2);
        assert_eq!(reg.active_count(KindTag::Ornament), 1);
    }

    #[test]
    fn test_clear_empties_but_keeps_id_sequence() {
        let mut reg = DecorationRegistry::new();
        let a = insert_one(&mut reg, Lifecycle::Active);
        reg.clear();
        assert!(reg.is_empty());
        let b = insert_one(&mut reg, Lifecycle::Active);
        assert!(b > a);
    }
}
