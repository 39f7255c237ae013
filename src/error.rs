//! Errors raised at shape construction from malformed external input.

use thiserror::Error;

/// Failure building a [`Shape`](crate::shape::Shape) from raw mesh arrays.
///
/// This is the only fallible entry point in the crate; everything built on
/// top of a successfully constructed `Shape` is infallible by construction.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    /// The node array was empty.
    #[error("shape has no nodes")]
    EmptyNodes,
    /// The face array was empty.
    #[error("shape has no faces")]
    EmptyFaces,
    /// A face referenced a node index outside the bounds of the node array.
    #[error("face {face} references node index {index}, but only {num_node} nodes exist")]
    NodeIndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range node index.
        index: u32,
        /// Number of nodes actually present.
        num_node: usize,
    },
}
