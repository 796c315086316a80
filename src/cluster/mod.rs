//! Overlapping cover types and the decomposition engine

pub mod engine;
pub mod modularity;

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::graph::algorithms::Components;
use crate::graph::{MutableGraph, VertexId};

/// An overlapping vertex cover: one cluster per connected piece, expressed
/// in origin (input) vertex ids.
///
/// The same origin id may appear in more than one cluster when a vertex
/// split assigned descendants of one input vertex to different pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    /// Clusters ordered by smallest member; members sorted and deduplicated
    pub clusters: Vec<Vec<VertexId>>,
}

/// Registry of recorded covers keyed by cluster count
pub type CoverRegistry = BTreeMap<usize, Cover>;

impl Cover {
    /// Number of clusters in this cover
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// The trivial cover placing every origin vertex in one cluster
    pub fn whole_graph(graph: &MutableGraph) -> Self {
        let mut members: Vec<VertexId> = graph.vertex_ids().map(|v| graph.origin(v)).collect();
        members.sort_unstable();
        members.dedup();
        Self { clusters: vec![members] }
    }

    /// Translate current component membership back to origin ids.
    ///
    /// Components are numbered by smallest member, so cluster order is
    /// deterministic. Two descendants of one origin landing in the same
    /// component collapse to a single entry.
    pub fn from_components(graph: &MutableGraph, components: &Components) -> Self {
        let mut clusters: Vec<Vec<VertexId>> = vec![Vec::new(); components.count()];
        for v in graph.vertex_ids() {
            let comp = components.membership[v as usize] as usize;
            clusters[comp].push(graph.origin(v));
        }
        for cluster in &mut clusters {
            cluster.sort_unstable();
            cluster.dedup();
        }
        Self { clusters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::algorithms::connected_components;
    use crate::graph::GraphBuilder;

    #[test]
    fn split_descendants_translate_back_to_origin() {
        let mut g = GraphBuilder::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        let clone = g.add_vertex(1);
        g.add_edge(clone, 2).unwrap();

        let cover = Cover::from_components(&g, &connected_components(&g));
        assert_eq!(cover.cluster_count(), 2);
        assert_eq!(cover.clusters[0], vec![0, 1]);
        // the clone reports its origin id, overlapping with cluster 0
        assert_eq!(cover.clusters[1], vec![1, 2, 3]);
    }

    #[test]
    fn whole_graph_cover_is_single_cluster() {
        let g = GraphBuilder::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let cover = Cover::whole_graph(&g);
        assert_eq!(cover.clusters, vec![vec![0, 1, 2]]);
    }
}
