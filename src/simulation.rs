//! Force-directed layout in the unit square
//!
//! A Fruchterman-Reingold style relaxation: every pair of nodes repels with
//! `K² / d`, every edge attracts its endpoints with `d² / K`, and each
//! iteration moves a node by its clamped net force times a fixed step scale.
//! The loop runs a fixed number of iterations with no randomness and no
//! convergence check, so identical input gives identical output.
//!
//! Repulsion is O(n²) per iteration, which is fine for graphs of tens to a
//! few hundred nodes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::graph::{self, Edge, Graph, LaidOutGraph, Node};

// =============================================================================
// Default Constants
// =============================================================================

/// Default number of relaxation passes
pub const DEFAULT_ITERATIONS: usize = 500;

/// Area of the layout space (the unit square)
pub const DEFAULT_AREA: f64 = 1.0;

/// Below this pairwise distance repulsion is doubled
pub const DEFAULT_MIN_DISTANCE: f64 = 0.03;

/// Multiplier applied to the clamped force before it moves a node
pub const DEFAULT_STEP_SCALE: f64 = 0.01;

/// Bound on each force component before scaling
pub const DEFAULT_MAX_DISPLACEMENT: f64 = 1.0;

/// Added to every distance so coincident nodes never divide by zero
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Node count assumed by the legacy spacing calibration
pub const LEGACY_EXPECTED_NODE_COUNT: usize = 28;

/// Angle between successive fallback directions for coincident pairs
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Configuration for the layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of relaxation passes
    pub iterations: usize,
    /// Area of the layout space, used to derive the ideal spacing
    pub area: f64,
    /// Pairwise distance below which repulsion doubles
    pub min_distance: f64,
    /// Scale applied to each iteration's clamped force
    pub step_scale: f64,
    /// Per-component force clamp (applied as `[-max, max]`)
    pub max_displacement: f64,
    /// Added to every Euclidean distance
    pub epsilon: f64,
    /// Node count used for the ideal spacing. `None` uses the actual count.
    pub expected_node_count: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            area: DEFAULT_AREA,
            min_distance: DEFAULT_MIN_DISTANCE,
            step_scale: DEFAULT_STEP_SCALE,
            max_displacement: DEFAULT_MAX_DISPLACEMENT,
            epsilon: DEFAULT_EPSILON,
            expected_node_count: None,
        }
    }
}

impl LayoutConfig {
    /// Config calibrated the way the spacing constant was first tuned,
    /// for a fixed 28-node graph
    pub fn legacy() -> Self {
        Self {
            expected_node_count: Some(LEGACY_EXPECTED_NODE_COUNT),
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_expected_node_count(mut self, count: Option<usize>) -> Self {
        self.expected_node_count = count;
        self
    }

    /// Ideal spacing `K = sqrt(area / n)` for a graph of `node_count` nodes
    pub fn ideal_spacing(&self, node_count: usize) -> f64 {
        let n = self.expected_node_count.unwrap_or(node_count).max(1);
        (self.area / n as f64).sqrt()
    }

    /// Reject values that would make the arithmetic meaningless
    pub fn validate(&self) -> LayoutResult<()> {
        let positive = [
            ("area", self.area),
            ("epsilon", self.epsilon),
            ("step_scale", self.step_scale),
            ("max_displacement", self.max_displacement),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "min_distance must be non-negative, got {}",
                self.min_distance
            )));
        }
        if self.expected_node_count == Some(0) {
            return Err(LayoutError::InvalidConfig(
                "expected_node_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-node displacement accumulated during one iteration
///
/// Indexed like the node slice; lives only for the duration of a run.
struct Displacements {
    dx: Vec<f64>,
    dy: Vec<f64>,
}

impl Displacements {
    fn new(len: usize) -> Self {
        Self {
            dx: vec![0.0; len],
            dy: vec![0.0; len],
        }
    }

    fn reset(&mut self) {
        self.dx.fill(0.0);
        self.dy.fill(0.0);
    }

    /// Push `i` by `(fx, fy)` and `j` by the opposite
    fn apply_pair(&mut self, i: usize, j: usize, fx: f64, fy: f64) {
        self.dx[i] += fx;
        self.dy[i] += fy;
        self.dx[j] -= fx;
        self.dy[j] -= fy;
    }
}

/// Computes node positions for a graph
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `nodes` using `edges` as springs.
    ///
    /// Returns the nodes in input order with new positions inside the unit
    /// square. Input is validated up front, so an error means no iteration
    /// ran.
    pub fn layout(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult<Vec<Node>> {
        self.config.validate()?;
        let index = graph::index_nodes(nodes)?;
        let links = graph::resolve_edges(&index, edges)?;

        let mut nodes = nodes.to_vec();
        if nodes.is_empty() {
            return Ok(nodes);
        }

        let k = self.config.ideal_spacing(nodes.len());
        debug!(
            nodes = nodes.len(),
            edges = links.len(),
            iterations = self.config.iterations,
            k,
            "running force layout"
        );

        let mut displacements = Displacements::new(nodes.len());
        for _ in 0..self.config.iterations {
            displacements.reset();
            self.apply_repulsion(&nodes, k, &mut displacements);
            self.apply_attraction(&nodes, &links, k, &mut displacements);
            self.integrate(&mut nodes, &displacements);
        }

        debug!(nodes = nodes.len(), "force layout complete");
        Ok(nodes)
    }

    /// Lay out a whole document, carrying its edges through unchanged
    pub fn layout_graph(&self, graph: &Graph) -> LayoutResult<LaidOutGraph> {
        let nodes = self.layout(&graph.nodes, &graph.edges)?;
        Ok(LaidOutGraph {
            nodes,
            edges: graph.edges.clone(),
        })
    }

    /// Apply `K² / d` repulsion between all node pairs
    fn apply_repulsion(&self, nodes: &[Node], k: f64, displacements: &mut Displacements) {
        let n = nodes.len();
        let k_sq = k * k;

        for i in 0..n {
            for j in (i + 1)..n {
                let (mut dx, mut dy) = (nodes[i].x - nodes[j].x, nodes[i].y - nodes[j].y);

                // Exactly coincident pair: no direction to push along, so pick
                // a deterministic one that differs from pair to pair
                if dx == 0.0 && dy == 0.0 {
                    let angle = GOLDEN_ANGLE * (i * n + j) as f64;
                    dx = angle.cos() * self.config.epsilon;
                    dy = angle.sin() * self.config.epsilon;
                }

                let dist = (dx * dx + dy * dy).sqrt() + self.config.epsilon;

                let mut force = k_sq / dist;
                if dist < self.config.min_distance {
                    force *= 2.0;
                }

                let fx = dx / dist * force;
                let fy = dy / dist * force;
                displacements.apply_pair(i, j, fx, fy);
            }
        }
    }

    /// Apply `d² / K` attraction along every edge
    fn apply_attraction(
        &self,
        nodes: &[Node],
        links: &[(usize, usize)],
        k: f64,
        displacements: &mut Displacements,
    ) {
        for &(source, target) in links {
            let dx = nodes[source].x - nodes[target].x;
            let dy = nodes[source].y - nodes[target].y;
            let dist = (dx * dx + dy * dy).sqrt() + self.config.epsilon;

            let force = dist * dist / k;

            let fx = dx / dist * force;
            let fy = dy / dist * force;

            // Opposite sign to repulsion: pull source toward target
            displacements.apply_pair(source, target, -fx, -fy);
        }
    }

    /// Move each node by its clamped, scaled displacement and keep it in bounds
    fn integrate(&self, nodes: &mut [Node], displacements: &Displacements) {
        let max = self.config.max_displacement;
        let step = self.config.step_scale;

        for (i, node) in nodes.iter_mut().enumerate() {
            let dx = displacements.dx[i].clamp(-max, max);
            let dy = displacements.dy[i].clamp(-max, max);
            node.x = (node.x + dx * step).clamp(0.0, 1.0);
            node.y = (node.y + dy * step).clamp(0.0, 1.0);
        }
    }
}

/// Lay out a graph with the default configuration
pub fn layout(nodes: &[Node], edges: &[Edge]) -> LayoutResult<Vec<Node>> {
    LayoutEngine::default().layout(nodes, edges)
}
