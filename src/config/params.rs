//! Scene configuration surface
//!
//! All generation and animation knobs live here. Parameters are immutable
//! once a scene is built; out-of-range values are rejected at build time.

use serde::{Deserialize, Serialize};
use crate::error::SceneError;
use crate::math::Color;

/// One entry in the initial gift layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GiftSpec {
    pub x: f32,
    pub z: f32,
    pub size: f32,
    pub color: Color,
    pub ribbon: Color,
}

impl GiftSpec {
    /// Resting height of the box center above the ground plane
    pub fn rest_y(&self) -> f32 {
        0.15 + self.size * 0.5
    }
}

/// Named colors consumed by the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub trunk: Color,
    /// Branch greens, alternated by layer parity
    pub tree_greens: Vec<Color>,
    pub star: Color,
    pub star_glow: Color,
    pub ornaments: Vec<Color>,
    pub ribbons: Vec<Color>,
    /// Garland lights alternate between these two
    pub garland: [Color; 2],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            trunk: Color::from_hex(0x5D4037),
            tree_greens: vec![Color::from_hex(0x2E7D32), Color::from_hex(0x4CAF50)],
            star: Color::from_hex(0xFFD700),
            star_glow: Color::from_hex(0xFFAB00),
            ornaments: vec![
                Color::from_hex(0xF44336),
                Color::from_hex(0x2196F3),
                Color::from_hex(0xFFC107),
                Color::from_hex(0xE0E0E0),
                Color::from_hex(0x4CAF50),
                Color::from_hex(0x9C27B0),
            ],
            ribbons: vec![Color::from_hex(0xFF9800), Color::from_hex(0xE0E0E0)],
            garland: [Color::from_hex(0xFF4444), Color::from_hex(0x44FF44)],
        }
    }
}

/// Immutable configuration consumed by the scene builder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParameters {
    // Tree structure
    pub layer_count: u32,
    pub branch_base: u32,
    pub branch_step: u32,
    /// Height of the lowest branch layer
    pub layer_base_height: f32,
    pub height_step: f32,
    /// Radius of the lowest branch layer
    pub layer_base_radius: f32,
    pub radius_shrink: f32,
    /// Horizontal reach of a layer-0 branch tip
    pub branch_reach: f32,
    pub branch_reach_shrink: f32,
    /// Base thickness of a layer-0 branch
    pub branch_thickness: f32,
    /// Geometric per-level factor for branch thickness and needle spread
    pub branch_falloff: f32,

    // Needles
    pub clusters_per_branch: u32,
    pub needles_min: u32,
    pub needles_max: u32,
    pub needle_spread: f32,

    // Ornaments
    pub ornament_count: u32,
    /// Inclusive layer range ornaments may land on
    pub ornament_layer_range: (u32, u32),
    pub ornament_base_radius: f32,
    pub ornament_radius_shrink: f32,
    pub ornament_base_height: f32,
    pub ornament_level_height: f32,
    pub ornament_height_jitter: f32,

    // Garland
    pub garland_segments: u32,
    pub garland_turns: f32,
    pub garland_base_radius: f32,
    pub garland_radius_shrink: f32,
    pub garland_base_height: f32,
    pub garland_span: f32,
    /// Every k-th spiral sample emits a light
    pub garland_light_every: u32,

    // Star
    pub star_height: f32,

    // Gifts
    pub max_gift_cap: usize,
    pub initial_gifts: Vec<GiftSpec>,

    // Colors
    pub palette: Palette,

    // Entrance
    pub entrance_duration_ms: f32,
    pub entrance_stagger_ms: f32,
    /// Exponent n of the 1-(1-p)^n entrance ease
    pub entrance_snappiness: u32,

    // Animation
    pub animation_speed: f32,
    pub scale_min: f32,
    pub scale_max: f32,

    // Feature flags
    pub wind_enabled: bool,
    pub snow_enabled: bool,
    pub lights_enabled: bool,
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            layer_count: 6,
            branch_base: 8,
            branch_step: 2,
            layer_base_height: 2.0,
            height_step: 0.8,
            layer_base_radius: 1.8,
            radius_shrink: 0.25,
            branch_reach: 1.5,
            branch_reach_shrink: 0.2,
            branch_thickness: 0.08,
            branch_falloff: 0.8,

            clusters_per_branch: 2,
            needles_min: 3,
            needles_max: 6,
            needle_spread: 0.1,

            ornament_count: 25,
            ornament_layer_range: (1, 4),
            ornament_base_radius: 0.8,
            ornament_radius_shrink: 0.15,
            ornament_base_height: 1.5,
            ornament_level_height: 1.0,
            ornament_height_jitter: 0.5,

            garland_segments: 40,
            garland_turns: 2.5,
            garland_base_radius: 1.2,
            garland_radius_shrink: 0.4,
            garland_base_height: 1.2,
            garland_span: 5.0,
            garland_light_every: 2,

            star_height: 6.8,

            max_gift_cap: 50,
            initial_gifts: default_gifts(),

            palette: Palette::default(),

            entrance_duration_ms: 1200.0,
            entrance_stagger_ms: 200.0,
            entrance_snappiness: 3,

            animation_speed: 1.0,
            scale_min: 0.6,
            scale_max: 1.5,

            wind_enabled: true,
            snow_enabled: false,
            lights_enabled: true,
        }
    }
}

fn default_gifts() -> Vec<GiftSpec> {
    let ornament_red = Color::from_hex(0xF44336);
    let ornament_blue = Color::from_hex(0x2196F3);
    let ornament_gold = Color::from_hex(0xFFC107);
    let ornament_purple = Color::from_hex(0x9C27B0);
    let ribbon_gold = Color::from_hex(0xFF9800);
    let ribbon_silver = Color::from_hex(0xE0E0E0);

    vec![
        GiftSpec { x: -1.8, z: -1.2, size: 0.5, color: ornament_red, ribbon: ribbon_gold },
        GiftSpec { x: 1.6, z: -0.9, size: 0.45, color: ornament_blue, ribbon: ribbon_silver },
        GiftSpec { x: -1.0, z: 1.6, size: 0.6, color: ornament_gold, ribbon: ornament_red },
        GiftSpec { x: 1.2, z: 1.0, size: 0.4, color: ornament_purple, ribbon: ribbon_gold },
    ]
}

impl SceneParameters {
    /// Parse parameters from a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, SceneError> {
        let params: SceneParameters = serde_yaml::from_str(yaml)
            .map_err(|e| SceneError::configuration(format!("YAML parse error: {}", e)))?;
        params.validate()?;
        Ok(params)
    }

    /// Reject out-of-range values before any generation happens
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.layer_count == 0 {
            return Err(SceneError::configuration("layer_count must be at least 1"));
        }
        if self.branch_base == 0 {
            return Err(SceneError::configuration("branch_base must be at least 1"));
        }
        let top = (self.layer_count - 1) as f32;
        if self.layer_base_radius <= 0.0 || self.layer_base_radius - top * self.radius_shrink <= 0.0 {
            return Err(SceneError::configuration(
                "layer radius must stay positive across all layers",
            ));
        }
        if self.branch_reach <= 0.0 || self.branch_reach - top * self.branch_reach_shrink <= 0.0 {
            return Err(SceneError::configuration(
                "branch reach must stay positive across all layers",
            ));
        }
        if self.branch_thickness <= 0.0 {
            return Err(SceneError::configuration("branch_thickness must be positive"));
        }
        if !(0.0..=1.0).contains(&self.branch_falloff) || self.branch_falloff == 0.0 {
            return Err(SceneError::configuration("branch_falloff must be in (0, 1]"));
        }
        if self.needles_min == 0 || self.needles_max < self.needles_min {
            return Err(SceneError::configuration("needle count range is invalid"));
        }
        let (lo, hi) = self.ornament_layer_range;
        if lo > hi || hi >= self.layer_count {
            return Err(SceneError::configuration(
                "ornament_layer_range must fit within the layer count",
            ));
        }
        if self.ornament_base_radius <= 0.0
            || self.ornament_base_radius - hi as f32 * self.ornament_radius_shrink <= 0.0
        {
            return Err(SceneError::configuration(
                "ornament radius must stay positive across its layer range",
            ));
        }
        if self.ornament_height_jitter < 0.0 {
            return Err(SceneError::configuration(
                "ornament_height_jitter must be non-negative",
            ));
        }
        if self.garland_segments < 2 {
            return Err(SceneError::configuration("garland_segments must be at least 2"));
        }
        if self.garland_light_every == 0 {
            return Err(SceneError::configuration("garland_light_every must be at least 1"));
        }
        if self.garland_base_radius <= 0.0 || self.garland_span <= 0.0 {
            return Err(SceneError::configuration("garland geometry must be positive"));
        }
        if self.star_height <= 0.0 {
            return Err(SceneError::configuration("star_height must be positive"));
        }
        if self.max_gift_cap < self.initial_gifts.len() {
            return Err(SceneError::configuration(
                "max_gift_cap is smaller than the initial gift list",
            ));
        }
        if self.initial_gifts.iter().any(|g| g.size <= 0.0) {
            return Err(SceneError::configuration("gift sizes must be positive"));
        }
        if self.entrance_duration_ms <= 0.0 || self.entrance_stagger_ms < 0.0 {
            return Err(SceneError::configuration("entrance timing must be positive"));
        }
        if !(1..=8).contains(&self.entrance_snappiness) {
            return Err(SceneError::configuration("entrance_snappiness must be in 1..=8"));
        }
        if self.animation_speed <= 0.0 {
            return Err(SceneError::configuration("animation_speed must be positive"));
        }
        if self.scale_min <= 0.0 || self.scale_min >= self.scale_max {
            return Err(SceneError::configuration("scale bounds must satisfy 0 < min < max"));
        }
        if self.palette.tree_greens.is_empty()
            || self.palette.ornaments.is_empty()
            || self.palette.ribbons.is_empty()
        {
            return Err(SceneError::configuration("palette color lists must be non-empty"));
        }
        Ok(())
    }

    /// Branch count for a given layer
    pub fn branch_count(&self, layer: u32) -> u32 {
        self.branch_base + layer * self.branch_step
    }

    pub fn layer_height(&self, layer: u32) -> f32 {
        self.layer_base_height + layer as f32 * self.height_step
    }

    pub fn layer_radius(&self, layer: u32) -> f32 {
        self.layer_base_radius - layer as f32 * self.radius_shrink
    }
}

/// Runtime-toggleable presentation features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Wind,
    Snow,
    Lights,
}

impl Feature {
    pub fn parse(name: &str) -> Option<Feature> {
        match name {
            "wind" => Some(Feature::Wind),
            "snow" => Some(Feature::Snow),
            "lights" => Some(Feature::Lights),
            _ => None,
        }
    }
}

/// Live feature state, seeded from parameters and flipped at runtime
#[derive(Debug, Clone, Copy)]
pub struct FeatureFlags {
    pub wind: bool,
    pub snow: bool,
    pub lights: bool,
}

impl FeatureFlags {
    pub fn from_params(params: &SceneParameters) -> Self {
        Self {
            wind: params.wind_enabled,
            snow: params.snow_enabled,
            lights: params.lights_enabled,
        }
    }

    /// Flip a feature and return its new state
    pub fn toggle(&mut self, feature: Feature) -> bool {
        let slot = match feature {
            Feature::Wind => &mut self.wind,
            Feature::Snow => &mut self.snow,
            Feature::Lights => &mut self.lights,
        };
        *slot = !*slot;
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SceneParameters::default().validate().is_ok());
    }

    #[test]
    fn test_branch_counts_per_layer() {
        let params = SceneParameters::default();
        let counts: Vec<u32> = (0..params.layer_count).map(|l| params.branch_count(l)).collect();
        assert_eq!(counts, vec![8, 10, 12, 14, 16, 18]);
        assert_eq!(counts.iter().sum::<u32>(), 78);
    }

    #[test]
    fn test_zero_layers_rejected() {
        let params = SceneParameters { layer_count: 0, ..Default::default() };
        assert!(matches!(params.validate(), Err(SceneError::Configuration(_))));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let params = SceneParameters { layer_base_radius: -1.0, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_radius_must_survive_top_layer() {
        // 1.8 - 9 * 0.25 goes negative before layer 10
        let params = SceneParameters { layer_count: 10, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_ornament_radius_rejected() {
        let params = SceneParameters { ornament_base_radius: -1.0, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_ornament_radius_must_survive_layer_range() {
        // 0.8 - 4 * 0.3 goes negative at the top ornament layer
        let params = SceneParameters { ornament_radius_shrink: 0.3, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_ornament_jitter_rejected() {
        let params = SceneParameters { ornament_height_jitter: -0.1, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_cap_below_initial_gifts_rejected() {
        let params = SceneParameters { max_gift_cap: 2, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_animation_speed_rejected() {
        let params = SceneParameters { animation_speed: 0.0, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_from_yaml_overrides() {
        let params = SceneParameters::from_yaml(
            "layer_count: 4\nornament_count: 10\nornament_layer_range: [1, 3]\n",
        )
        .unwrap();
        assert_eq!(params.layer_count, 4);
        assert_eq!(params.ornament_count, 10);
        // Untouched fields keep defaults
        assert_eq!(params.branch_base, 8);
    }

    #[test]
    fn test_from_yaml_rejects_invalid() {
        let result = SceneParameters::from_yaml("layer_count: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_toggle() {
        let mut flags = FeatureFlags::from_params(&SceneParameters::default());
        assert!(flags.wind);
        assert!(!flags.toggle(Feature::Wind));
        assert!(flags.toggle(Feature::Snow));
    }

    #[test]
    fn test_feature_parse() {
        assert_eq!(Feature::parse("wind"), Some(Feature::Wind));
        assert_eq!(Feature::parse("sparkle"), None);
    }

    #[test]
    fn test_gift_rest_height() {
        let gift = GiftSpec {
            x: 0.0,
            z: 0.0,
            size: 0.5,
            color: Color::from_hex(0xF44336),
            ribbon: Color::from_hex(0xFF9800),
        };
        assert!((gift.rest_y() - 0.4).abs() < 0.0001);
    }
}
