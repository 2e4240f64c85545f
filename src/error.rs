//! Errors raised while validating input or running a layout

use thiserror::Error;

/// Errors that reject a layout run before any position is changed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Two nodes share the same identifier
    #[error("duplicate node id `{id}`")]
    DuplicateNodeId { id: String },

    /// A node coordinate is NaN or infinite
    #[error("node `{id}` has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    /// A node starts outside the unit square
    #[error("node `{id}` starts outside the unit square at ({x}, {y})")]
    OutOfBounds { id: String, x: f64, y: f64 },

    /// An edge names a node id absent from the node set
    #[error("edge {edge} references unknown node id `{id}`")]
    DanglingEdgeReference { edge: usize, id: String },

    /// A configuration value cannot produce a meaningful layout
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}

impl LayoutError {
    /// Whether this error belongs to the malformed-input class
    /// (as opposed to a dangling reference or a bad config)
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            LayoutError::DuplicateNodeId { .. }
                | LayoutError::NonFiniteCoordinate { .. }
                | LayoutError::OutOfBounds { .. }
        )
    }
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_reference_display() {
        let err = LayoutError::DanglingEdgeReference {
            edge: 3,
            id: "ghost".to_string(),
        };
        insta::assert_snapshot!(err.to_string(), @"edge 3 references unknown node id `ghost`");
    }

    #[test]
    fn out_of_bounds_display() {
        let err = LayoutError::OutOfBounds {
            id: "a".to_string(),
            x: 1.5,
            y: 0.25,
        };
        insta::assert_snapshot!(err.to_string(), @"node `a` starts outside the unit square at (1.5, 0.25)");
    }

    #[test]
    fn classifies_invalid_input() {
        assert!(
            LayoutError::DuplicateNodeId {
                id: "a".to_string()
            }
            .is_invalid_input()
        );
        assert!(
            !LayoutError::DanglingEdgeReference {
                edge: 0,
                id: "a".to_string()
            }
            .is_invalid_input()
        );
        assert!(!LayoutError::InvalidConfig("x".to_string()).is_invalid_input());
    }
}
