//! Procedural tree generation
//!
//! Turns `SceneParameters` plus an explicit random source into the static
//! tree structure (trunk and layer frames) and the registered decorative
//! objects. Pure given parameters and rng: the same seed always produces the
//! same scene.

use std::f32::consts::TAU;
use crate::config::SceneParameters;
use crate::math::transform::compose;
use crate::math::{quadratic_bezier, Mat4, SceneRng, Transform, Vec3};
use crate::scene::object::{
    BranchShape, Lifecycle, NeedleSprig, ObjectId, ObjectKind, VisualState,
};
use crate::scene::registry::DecorationRegistry;
use super::decorations;

/// Fixed trunk primitive; no randomness involved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrunkSpec {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub center_y: f32,
}

/// One horizontal ring of branches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerFrame {
    pub layer: u32,
    pub height: f32,
    pub radius: f32,
    pub branch_count: u32,
}

/// Static structure kept only for transform composition and external render
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub trunk: TrunkSpec,
    pub layers: Vec<LayerFrame>,
}

impl SceneGraph {
    /// Parent matrix of a layer frame
    pub fn layer_matrix(&self, layer: u32) -> Mat4 {
        let height = self
            .layers
            .get(layer as usize)
            .map(|l| l.height)
            .unwrap_or(0.0);
        Mat4::translation(Vec3::new(0.0, height, 0.0))
    }
}

/// Result of populating a registry from scratch
#[derive(Debug)]
pub struct BuildReport {
    pub graph: SceneGraph,
    /// Gifts start Pending; the caller schedules their entrances
    pub gift_ids: Vec<ObjectId>,
}

pub struct SceneGraphBuilder<'a> {
    params: &'a SceneParameters,
}

impl<'a> SceneGraphBuilder<'a> {
    pub fn new(params: &'a SceneParameters) -> Self {
        Self { params }
    }

    /// Generate the tree and all initial decorations into `registry`
    pub fn populate(&self, registry: &mut DecorationRegistry, rng: &mut SceneRng) -> BuildReport {
        let graph = self.build_graph();

        self.place_branches(registry, rng, &graph);
        decorations::place_star(registry, self.params);
        decorations::place_ornaments(registry, self.params, rng);
        decorations::place_garland(registry, self.params);
        let gift_ids = decorations::place_initial_gifts(registry, self.params, rng);

        log::info!(
            "scene generated: {} layers, {} objects, {} initial gifts",
            graph.layers.len(),
            registry.len(),
            gift_ids.len()
        );

        BuildReport { graph, gift_ids }
    }

    fn build_graph(&self) -> SceneGraph {
        let trunk = TrunkSpec {
            radius_top: 0.2,
            radius_bottom: 0.3,
            height: 2.0,
            center_y: 1.0,
        };

        let layers = (0..self.params.layer_count)
            .map(|layer| LayerFrame {
                layer,
                height: self.params.layer_height(layer),
                radius: self.params.layer_radius(layer),
                branch_count: self.params.branch_count(layer),
            })
            .collect();

        SceneGraph { trunk, layers }
    }

    fn place_branches(
        &self,
        registry: &mut DecorationRegistry,
        rng: &mut SceneRng,
        graph: &SceneGraph,
    ) {
        let params = self.params;
        let greens = &params.palette.tree_greens;

        for frame in &graph.layers {
            let falloff = params.branch_falloff.powi(frame.layer as i32);
            let reach = params.branch_reach - frame.layer as f32 * params.branch_reach_shrink;
            let thickness = params.branch_thickness * falloff;
            let color = greens[frame.layer as usize % greens.len()];
            let layer_matrix = graph.layer_matrix(frame.layer);

            for i in 0..frame.branch_count {
                let angle = TAU * i as f32 / frame.branch_count as f32;

                // Branch-local curve droops outward along +X; the yaw
                // rotation places it around the trunk.
                let shape = BranchShape {
                    control: Vec3::new(0.3, -0.2, 0.0),
                    end: Vec3::new(reach, -0.8, 0.0),
                    thickness,
                };

                let mut transform = Transform::at(Vec3::new(0.0, frame.height, 0.0));
                transform.rotation.y = angle;

                let kind = ObjectKind::Branch {
                    layer: frame.layer,
                    sway_phase: rng.range(0.0, TAU),
                    shape,
                };

                registry.insert(kind, transform, VisualState::new(color, 0.0), Lifecycle::Active);

                self.place_needle_clusters(registry, rng, &layer_matrix, angle, &shape, frame.layer);
            }
        }
    }

    /// Needle clusters at evenly spaced parametric positions along a branch
    fn place_needle_clusters(
        &self,
        registry: &mut DecorationRegistry,
        rng: &mut SceneRng,
        layer_matrix: &Mat4,
        branch_angle: f32,
        shape: &BranchShape,
        layer: u32,
    ) {
        let params = self.params;
        let clusters = params.clusters_per_branch;
        if clusters == 0 {
            return;
        }

        let spread = params.needle_spread * params.branch_falloff.powi(layer as i32);
        let greens = &params.palette.tree_greens;
        let needle_color = greens[greens.len() - 1];

        let mut branch_local = Transform::identity();
        branch_local.rotation.y = branch_angle;
        let branch_matrix = compose(layer_matrix, &branch_local);

        for j in 0..clusters {
            let t = (j + 1) as f32 / (clusters + 1) as f32;
            let local = quadratic_bezier(Vec3::ZERO, shape.control, shape.end, t);
            let world = branch_matrix.transform_point(local);

            let count = rng.range_inclusive(params.needles_min as usize, params.needles_max as usize);
            let needles = (0..count)
                .map(|_| NeedleSprig {
                    offset: Vec3::new(
                        (rng.next_f32() - 0.5) * spread,
                        (rng.next_f32() - 0.5) * spread,
                        (rng.next_f32() - 0.5) * spread,
                    ),
                    rotation: Vec3::new(
                        rng.range(0.0, std::f32::consts::PI),
                        rng.range(0.0, std::f32::consts::PI),
                        0.0,
                    ),
                })
                .collect();

            let kind = ObjectKind::NeedleCluster {
                layer,
                sway_phase: rng.range(0.0, TAU),
                needles,
            };

            registry.insert(
                kind,
                Transform::at(world),
                VisualState::new(needle_color, 0.0),
                Lifecycle::Active,
            );
        }
    }
}
