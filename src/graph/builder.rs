//! Graph construction module

use anyhow::Result;

use crate::graph::{MutableGraph, VertexId};

/// Builder for incrementally constructing a validated input graph
pub struct GraphBuilder {
    graph: MutableGraph,
}

impl GraphBuilder {
    /// Create a builder holding `vertex_count` vertices, each its own origin
    pub fn new(vertex_count: usize) -> Self {
        let mut graph = MutableGraph::with_capacity(vertex_count, vertex_count * 2);
        for i in 0..vertex_count as VertexId {
            graph.add_vertex(i);
        }
        Self { graph }
    }

    /// Add an undirected edge between two input vertices.
    ///
    /// Self loops, duplicate edges and unknown vertex ids are rejected, since
    /// the decomposition contract requires a simple graph.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<&mut Self> {
        self.graph.add_edge(a, b)?;
        Ok(self)
    }

    /// Finish construction
    pub fn build(self) -> MutableGraph {
        self.graph
    }

    /// Build a graph directly from an edge list
    pub fn from_edges(vertex_count: usize, edges: &[(VertexId, VertexId)]) -> Result<MutableGraph> {
        let mut builder = Self::new(vertex_count);
        for &(a, b) in edges {
            builder.add_edge(a, b)?;
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_edge_list() {
        let g = GraphBuilder::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.has_edge(3, 0));
        assert!(!g.has_edge(0, 2));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(GraphBuilder::from_edges(3, &[(0, 0)]).is_err());
        assert!(GraphBuilder::from_edges(3, &[(0, 1), (1, 0)]).is_err());
        assert!(GraphBuilder::from_edges(3, &[(0, 7)]).is_err());
    }
}
