//! Error types for graph construction and decomposition

use crate::graph::VertexId;
use thiserror::Error;

/// Errors raised by graph operations and the detection engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The input graph has no vertices.
    #[error("input graph has no vertices")]
    EmptyGraph,

    /// The input graph must be a single connected component.
    #[error("input graph is disconnected ({components} components)")]
    DisconnectedInput { components: usize },

    /// A bounded depth of 0 leaves no neighborhood to recompute over.
    #[error("depth must be at least 1 when bounded")]
    InvalidDepth,

    /// A vertex id outside the graph's arena.
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    /// Self loops are not part of the simple-graph input contract.
    #[error("self loop on vertex {0}")]
    SelfLoop(VertexId),

    /// The edge already exists (the input must be a simple graph).
    #[error("duplicate edge {0}-{1}")]
    DuplicateEdge(VertexId, VertexId),

    /// An edge expected to be live was not found.
    #[error("no live edge {0}-{1}")]
    MissingEdge(VertexId, VertexId),

    /// The connectivity probe was asked a question with no defined answer,
    /// e.g. probing a vertex against itself.
    #[error("connectivity probe undefined for {from} -> {target}")]
    ProbeUndefined { from: VertexId, target: VertexId },
}
