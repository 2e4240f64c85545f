//! Graph data types for layout
//!
//! The wire format mirrors the documents the layout is usually fed:
//! `{"nodes": [{"id", "x", "y"}], "edges": [["a", "b"]]}`. Edges are plain
//! two-element arrays of node ids.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// A node with its position in the unit square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, stable across the run
    pub id: String,

    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Create a node at the given position
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    /// Euclidean distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An undirected edge between two node ids
///
/// Serialized as `["source", "target"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl From<(String, String)> for Edge {
    fn from((source, target): (String, String)) -> Self {
        Self { source, target }
    }
}

impl From<Edge> for (String, String) {
    fn from(edge: Edge) -> Self {
        (edge.source, edge.target)
    }
}

/// Input document: nodes with initial positions plus edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Map each node id to its position in `nodes`
    pub fn node_index(&self) -> LayoutResult<HashMap<&str, usize>> {
        index_nodes(&self.nodes)
    }

    /// Check ids, coordinates and edge references without running a layout
    pub fn validate(&self) -> LayoutResult<()> {
        let index = self.node_index()?;
        resolve_edges(&index, &self.edges)?;
        Ok(())
    }
}

/// Laid-out nodes paired with the edges they were computed from
///
/// Edges are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Build an id -> index map, rejecting duplicate ids and positions outside
/// the unit square
pub(crate) fn index_nodes(nodes: &[Node]) -> LayoutResult<HashMap<&str, usize>> {
    let mut index = HashMap::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        if !node.x.is_finite() || !node.y.is_finite() {
            return Err(LayoutError::NonFiniteCoordinate {
                id: node.id.clone(),
            });
        }
        if !(0.0..=1.0).contains(&node.x) || !(0.0..=1.0).contains(&node.y) {
            return Err(LayoutError::OutOfBounds {
                id: node.id.clone(),
                x: node.x,
                y: node.y,
            });
        }
        if index.insert(node.id.as_str(), i).is_some() {
            return Err(LayoutError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    Ok(index)
}

/// Resolve edges to index pairs, failing on the first dangling reference
pub(crate) fn resolve_edges(
    index: &HashMap<&str, usize>,
    edges: &[Edge],
) -> LayoutResult<Vec<(usize, usize)>> {
    edges
        .iter()
        .enumerate()
        .map(|(i, edge)| -> LayoutResult<(usize, usize)> {
            let lookup = |id: &str| {
                index
                    .get(id)
                    .copied()
                    .ok_or_else(|| LayoutError::DanglingEdgeReference {
                        edge: i,
                        id: id.to_string(),
                    })
            };
            Ok((lookup(&edge.source)?, lookup(&edge.target)?))
        })
        .collect()
}
