//! fdlayout - Force-directed 2D graph layout.
//!
//! Positions nodes in the unit square so that connected nodes sit close
//! together and every node keeps its distance from the others. The core is
//! [`LayoutEngine`]; [`io`] adds JSON/YAML reading and writing around it.

pub mod error;
pub mod graph;
pub mod io;
pub mod simulation;

pub use error::{LayoutError, LayoutResult};
pub use graph::{Edge, Graph, LaidOutGraph, Node};
pub use simulation::{LayoutConfig, LayoutEngine, layout};
