//! The decorative object model
//!
//! Each object carries exactly the animation fields its kind needs, sampled
//! once at creation and immutable afterwards (twinkle timers being the one
//! piece of mutable per-kind state, advanced by the driver).

use std::fmt;
use crate::math::{Color, Transform, Vec3};

/// Stable identity of a registered object, unique for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which subsystem currently owns the object's transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Owned by the entrance sequencer, excluded from steady-state animation
    Pending,
    /// Owned by the animation driver
    Active,
    /// Terminal; the object is gone from the registry
    Removed,
}

/// Color/material descriptor mutated by animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub color: Color,
    pub emissive: f32,
    /// Selection highlight; takes precedence over the animated emissive
    pub emissive_override: Option<f32>,
}

impl VisualState {
    pub fn new(color: Color, emissive: f32) -> Self {
        Self {
            color,
            emissive,
            emissive_override: None,
        }
    }

    pub fn effective_emissive(&self) -> f32 {
        self.emissive_override.unwrap_or(self.emissive)
    }

    pub fn is_highlighted(&self) -> bool {
        self.emissive_override.is_some()
    }
}

/// Local-space droop curve of one branch segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchShape {
    /// Mid control point, sagging below the chord
    pub control: Vec3,
    /// Outer tip
    pub end: Vec3,
    pub thickness: f32,
}

/// One needle primitive inside a cluster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleSprig {
    pub offset: Vec3,
    pub rotation: Vec3,
}

/// Kind tag plus the per-kind animation parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Branch {
        layer: u32,
        sway_phase: f32,
        shape: BranchShape,
    },
    NeedleCluster {
        layer: u32,
        sway_phase: f32,
        needles: Vec<NeedleSprig>,
    },
    Ornament {
        base_y: f32,
        spin_speed: f32,
        float_phase: f32,
        pulse_phase: f32,
    },
    GarlandLight {
        /// Light ordinal along the spiral; offsets the pulse phase
        index: u32,
        /// Seconds left on an active twinkle flash, 0 when idle
        twinkle_left: f32,
    },
    Star {
        spin_speed: f32,
        base_color: Color,
    },
    Gift {
        base_y: f32,
        size: f32,
        spin_speed: f32,
        float_phase: f32,
        ribbon: Color,
    },
}

/// Fieldless kind discriminant for counting, selection, and the public API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Branch,
    NeedleCluster,
    Ornament,
    GarlandLight,
    Star,
    Gift,
}

impl KindTag {
    pub fn parse(name: &str) -> Option<KindTag> {
        match name {
            "branch" => Some(KindTag::Branch),
            "needle_cluster" => Some(KindTag::NeedleCluster),
            "ornament" => Some(KindTag::Ornament),
            "garland_light" => Some(KindTag::GarlandLight),
            "star" => Some(KindTag::Star),
            "gift" => Some(KindTag::Gift),
            _ => None,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            KindTag::Branch => 0,
            KindTag::NeedleCluster => 1,
            KindTag::Ornament => 2,
            KindTag::GarlandLight => 3,
            KindTag::Star => 4,
            KindTag::Gift => 5,
        }
    }
}

impl ObjectKind {
    pub fn tag(&self) -> KindTag {
        match self {
            ObjectKind::Branch { .. } => KindTag::Branch,
            ObjectKind::NeedleCluster { .. } => KindTag::NeedleCluster,
            ObjectKind::Ornament { .. } => KindTag::Ornament,
            ObjectKind::GarlandLight { .. } => KindTag::GarlandLight,
            ObjectKind::Star { .. } => KindTag::Star,
            ObjectKind::Gift { .. } => KindTag::Gift,
        }
    }
}

/// A single decorated entity in the registry
#[derive(Debug, Clone, PartialEq)]
pub struct DecorativeObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub visual: VisualState,
    pub lifecycle: Lifecycle,
}

impl DecorativeObject {
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Bounding sphere radius for hit-testing; only gifts are selectable
    pub fn bounding_radius(&self) -> Option<f32> {
        match &self.kind {
            ObjectKind::Gift { size, .. } => Some(size * 0.75),
            _ => None,
        }
    }
}
