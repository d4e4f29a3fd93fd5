use thiserror::Error;

/// Errors raised while building a graph or computing shortest paths.
///
/// Per-pair outcomes (no path, unbounded below) are not errors; they are
/// carried by [`crate::Distance`] inside a successful result.
#[derive(Error, Debug)]
pub enum ApspError {
    #[error("graph must have at least one vertex")]
    EmptyGraph,

    #[error("vertex {vertex} is outside 1..={n}")]
    VertexOutOfRange { vertex: usize, n: usize },

    #[error("edge {tail} -> {head} has a non-finite weight")]
    NonFiniteWeight { tail: usize, head: usize },

    #[error("graph contains a negative cycle")]
    NegativeCycleDetected,

    #[error("path weight exceeds the range of the weight type")]
    WeightOverflow,

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApspError {
    /// True for the errors callers get from malformed input rather than
    /// from the shape of the graph.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ApspError::EmptyGraph
                | ApspError::VertexOutOfRange { .. }
                | ApspError::NonFiniteWeight { .. }
                | ApspError::Parse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ApspError>;
