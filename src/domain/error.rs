use thiserror::Error;

/// Failure of a graph operation. The graph is left untouched whenever one of
/// these is returned.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex already exists: {0}")]
    DuplicateVertex(String),

    #[error("vertex does not exist: {0}")]
    UnknownVertex(String),

    #[error("vertex id must be a non-empty token without whitespace: {0:?}")]
    InvalidVertexId(String),

    #[error("edge does not exist: {from} -> {to}")]
    UnknownEdge { from: String, to: String },

    #[error("invalid graph mode: {0}")]
    InvalidGraphMode(&'static str),

    #[error("malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    #[error("malformed edge line {line}: {content:?}")]
    MalformedEdgeLine { line: usize, content: String },

    #[error("i/o failure on {path}: {err}")]
    Io {
        path: String,
        #[source]
        err: std::io::Error,
    },

    #[error("graph too large to traverse: {elements} vertices+edges exceeds ceiling {ceiling}")]
    TraversalLimit { elements: usize, ceiling: usize },
}

impl GraphError {
    pub(crate) fn unknown_edge(from: &str, to: &str) -> Self {
        GraphError::UnknownEdge {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Stable snake_case name of the error kind, used in emitted events.
    pub fn kind(&self) -> &'static str {
        match self {
            GraphError::DuplicateVertex(_) => "duplicate_vertex",
            GraphError::UnknownVertex(_) => "unknown_vertex",
            GraphError::InvalidVertexId(_) => "invalid_vertex_id",
            GraphError::UnknownEdge { .. } => "unknown_edge",
            GraphError::InvalidGraphMode(_) => "invalid_graph_mode",
            GraphError::MalformedHeaderLine(_) => "malformed_header_line",
            GraphError::MalformedEdgeLine { .. } => "malformed_edge_line",
            GraphError::Io { .. } => "io_failure",
            GraphError::TraversalLimit { .. } => "traversal_limit",
        }
    }
}
