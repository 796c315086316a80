//! Cover ranking by overlap-aware modularity
//!
//! Scores every recorded cover with the Lazar measure: per cluster, internal
//! edge density times the average normalized surplus of intra- over
//! inter-cluster edges, averaged over clusters. The highest-scoring cluster
//! count is reported as the recommended cover; all covers stay retrievable.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use rayon::prelude::*;
use serde_json::json;

use crate::cluster::{Cover, CoverRegistry};
use crate::graph::{MutableGraph, VertexId};

/// Lazar modularity of one cover, evaluated against the original input graph
pub fn lazar_modularity(graph: &MutableGraph, cover: &Cover) -> f64 {
    if cover.clusters.is_empty() {
        return 0.0;
    }
    let multiplicity = community_multiplicity(cover);
    let total: f64 = cover
        .clusters
        .iter()
        .map(|members| single_cluster_modularity(graph, members, &multiplicity))
        .sum();
    total / cover.clusters.len() as f64
}

/// How many clusters of this cover each vertex belongs to
fn community_multiplicity(cover: &Cover) -> HashMap<VertexId, usize> {
    let mut counts = HashMap::new();
    for cluster in &cover.clusters {
        for &v in cluster {
            *counts.entry(v).or_insert(0) += 1;
        }
    }
    counts
}

fn single_cluster_modularity(
    graph: &MutableGraph,
    members: &[VertexId],
    multiplicity: &HashMap<VertexId, usize>,
) -> f64 {
    let n = members.len();
    // clusters too small to hold an internal edge contribute nothing
    if n < 2 {
        return 0.0;
    }
    let inside: HashSet<VertexId> = members.iter().copied().collect();

    let mut internal_weight = 0.0;
    for (_, (u, w)) in graph.edges() {
        if inside.contains(&u) && inside.contains(&w) {
            internal_weight += 1.0;
        }
    }
    let possible = (n * (n - 1) / 2) as f64;
    let density = internal_weight / possible / n as f64;

    let mut inter_vs_intra = 0.0;
    for &v in members {
        let degree = graph.degree(v);
        if degree == 0 {
            continue;
        }
        let shared = multiplicity.get(&v).copied().unwrap_or(1) as f64;
        let mut surplus = 0.0;
        for &(w, _) in graph.neighbors(v) {
            surplus += if inside.contains(&w) { 1.0 } else { -1.0 };
        }
        inter_vs_intra += surplus / (degree as f64 * shared);
    }
    density * inter_vs_intra
}

/// Final product of a decomposition run: every recorded cover, its
/// modularity, and the recommended cluster count
#[derive(Debug, Clone)]
pub struct OverlapResult {
    graph: MutableGraph,
    covers: CoverRegistry,
    modularities: BTreeMap<usize, f64>,
    optimal: usize,
}

impl OverlapResult {
    /// Score all covers against the original graph and pick the best count.
    ///
    /// Scoring is independent per cover over immutable data, so it runs in
    /// parallel. Modularity ties resolve to the smaller cluster count.
    pub fn new(graph: MutableGraph, covers: CoverRegistry) -> Self {
        let modularities: BTreeMap<usize, f64> = covers
            .par_iter()
            .map(|(&count, cover)| (count, lazar_modularity(&graph, cover)))
            .collect();

        let mut optimal = 0;
        let mut best = f64::NEG_INFINITY;
        for (&count, &score) in &modularities {
            if score > best {
                best = score;
                optimal = count;
            }
        }

        Self { graph, covers, modularities, optimal }
    }

    /// Cover with the given cluster count, if one was recorded
    pub fn cover(&self, cluster_count: usize) -> Option<&Cover> {
        self.covers.get(&cluster_count)
    }

    /// All recorded covers keyed by cluster count
    pub fn covers(&self) -> &CoverRegistry {
        &self.covers
    }

    /// Modularity of one recorded cover
    pub fn modularity(&self, cluster_count: usize) -> Option<f64> {
        self.modularities.get(&cluster_count).copied()
    }

    /// Modularity per recorded cluster count
    pub fn modularities(&self) -> &BTreeMap<usize, f64> {
        &self.modularities
    }

    /// Recommended cluster count (highest modularity)
    pub fn optimal_count(&self) -> usize {
        self.optimal
    }

    /// The cover at the recommended cluster count
    pub fn best_cover(&self) -> Option<&Cover> {
        self.covers.get(&self.optimal)
    }

    /// JSON summary of the run for downstream reporting
    pub fn summary(&self) -> serde_json::Value {
        json!({
            "vertex_count": self.graph.vertex_count(),
            "edge_count": self.graph.edge_count(),
            "cover_count": self.covers.len(),
            "optimal_count": self.optimal,
            "modularities": self.modularities,
            "optimal_cover": self.best_cover(),
        })
    }
}

impl fmt::Display for OverlapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices in {} possible covers.",
            self.graph.vertex_count(),
            self.covers.len()
        )
    }
}
