//! Edge and pair betweenness maintenance
//!
//! Two coupled statistics drive the decomposition: per-edge betweenness, and
//! per-vertex "pair betweenness" keyed by the unordered pair of neighbors a
//! shortest path enters and leaves through. Both live in side tables indexed
//! by stable graph ids rather than as attributes on the graph itself.
//!
//! Invariant: the pair table of a vertex holds exactly one entry per
//! unordered pair of its current neighbors. `fix_attributes` re-establishes
//! this after every structural mutation.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::graph::algorithms::{
    connected_components, for_each_shortest_path, shortest_path_dag,
};
use crate::graph::mutable::order_pair;
use crate::graph::{EdgeId, MutableGraph, VertexId};

/// Betweenness side tables over one graph instance
#[derive(Debug, Clone, Default)]
pub struct BetweennessTables {
    /// Edge betweenness, indexed by `EdgeId`; tombstoned slots are zeroed
    /// by the repair pass
    pub edge: Vec<f64>,

    /// Pair betweenness per vertex: unordered neighbor pair -> score
    pub pair: Vec<HashMap<(VertexId, VertexId), f64>>,
}

impl BetweennessTables {
    /// Compute both statistics from scratch over the whole graph.
    ///
    /// Every shortest path between every reachable vertex pair (capped at
    /// `depth + 1` edges when `depth` is bounded) deposits `1/σ` onto each
    /// traversed edge and onto the interior vertices' pair entries, where σ
    /// is the number of shortest paths joining that pair of endpoints.
    ///
    /// Not idempotent: calling this twice on live tables would double-count,
    /// so it always starts from zeroed tables.
    pub fn compute(graph: &MutableGraph, depth: Option<usize>) -> Self {
        let mut tables = Self::default();
        tables.fix_attributes(graph);
        let region: Vec<VertexId> = graph.vertex_ids().collect();
        tables.accumulate(graph, &region, None, depth, 1.0);
        tables
    }

    /// Add (`sign = 1.0`) or subtract (`sign = -1.0`) the contributions of
    /// all shortest paths confined to `neighborhood`.
    ///
    /// A path is counted only if every vertex on it lies inside the
    /// neighborhood; paths escaping the observed region are left alone, since
    /// their context may have changed outside it. The weight denominator is
    /// the full-graph shortest-path count, so recomputing over the entire
    /// vertex set reproduces [`BetweennessTables::compute`] exactly.
    pub fn recompute_local(
        &mut self,
        graph: &MutableGraph,
        neighborhood: &[VertexId],
        depth: Option<usize>,
        sign: f64,
    ) {
        let restrict: HashSet<VertexId> = neighborhood.iter().copied().collect();
        self.accumulate(graph, neighborhood, Some(&restrict), depth, sign);
    }

    /// Repair pass run after every structural mutation.
    ///
    /// Extends the edge table to cover newly allocated edge slots, zeroes
    /// tombstoned slots, and rebuilds each vertex's pair-key set to exactly
    /// its current unordered neighbor pairs: retained pairs keep their score,
    /// new pairs start at zero, stale pairs are dropped.
    pub fn fix_attributes(&mut self, graph: &MutableGraph) {
        self.edge.resize(graph.edge_slot_count(), 0.0);
        for e in 0..graph.edge_slot_count() as EdgeId {
            if !graph.edge_alive(e) {
                self.edge[e as usize] = 0.0;
            }
        }

        while self.pair.len() < graph.vertex_count() {
            self.pair.push(HashMap::new());
        }
        for v in graph.vertex_ids() {
            let ids: Vec<VertexId> = graph.neighbors(v).iter().map(|&(w, _)| w).collect();
            let old = &self.pair[v as usize];
            let mut fresh = HashMap::with_capacity(ids.len() * ids.len() / 2);
            for (&a, &b) in ids.iter().tuple_combinations() {
                let key = order_pair(a, b);
                fresh.insert(key, old.get(&key).copied().unwrap_or(0.0));
            }
            self.pair[v as usize] = fresh;
        }
    }

    /// Pair betweenness entries of one vertex
    pub fn pair_scores(&self, v: VertexId) -> &HashMap<(VertexId, VertexId), f64> {
        &self.pair[v as usize]
    }

    /// Live edge with the highest betweenness; ties resolve to the smallest
    /// edge id
    pub fn max_edge(&self, graph: &MutableGraph) -> Option<(EdgeId, f64)> {
        let mut best: Option<(EdgeId, f64)> = None;
        for (e, _) in graph.edges() {
            let score = self.edge[e as usize];
            match best {
                Some((_, b)) if score <= b => {}
                _ => best = Some((e, score)),
            }
        }
        best
    }

    /// Derive vertex betweenness from edge betweenness:
    /// `vb(v) = (Σ incident edge betweenness − (|component(v)| − 1)) / 2`.
    ///
    /// Every shortest path ending at `v` contributes exactly one incident
    /// edge, and every path crossing `v` contributes two, which is what makes
    /// the halved difference equal the interior-path betweenness of `v`.
    pub fn vertex_betweenness(&self, graph: &MutableGraph) -> Vec<f64> {
        let comps = connected_components(graph);
        graph
            .vertex_ids()
            .map(|v| {
                let incident: f64 = graph
                    .neighbors(v)
                    .iter()
                    .map(|&(_, e)| self.edge[e as usize])
                    .sum();
                0.5 * (incident - (comps.size_of(v) as f64 - 1.0))
            })
            .collect()
    }

    fn accumulate(
        &mut self,
        graph: &MutableGraph,
        region: &[VertexId],
        restrict: Option<&HashSet<VertexId>>,
        depth: Option<usize>,
        sign: f64,
    ) {
        let limit = depth.map(|h| h + 1);
        for (i, &source) in region.iter().enumerate() {
            let dag = shortest_path_dag(graph, source, limit);
            for &target in &region[i + 1..] {
                if dag.dist[target as usize] < 0 {
                    continue;
                }
                let weight = sign / dag.sigma[target as usize];
                for_each_shortest_path(&dag, source, target, &mut |path| {
                    if let Some(inside) = restrict {
                        if path.iter().any(|v| !inside.contains(v)) {
                            return;
                        }
                    }
                    deposit(graph, &mut self.edge, &mut self.pair, path, weight);
                });
            }
        }
    }
}

/// Spread one path's weight onto its edges and interior pair entries
fn deposit(
    graph: &MutableGraph,
    edge: &mut [f64],
    pair: &mut [HashMap<(VertexId, VertexId), f64>],
    path: &[VertexId],
    weight: f64,
) {
    for window in path.windows(2) {
        if let Some(e) = graph.edge_between(window[0], window[1]) {
            edge[e as usize] += weight;
        }
    }
    for window in path.windows(3) {
        let key = order_pair(window[0], window[2]);
        *pair[window[1] as usize].entry(key).or_insert(0.0) += weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::algorithms::neighborhood;
    use crate::graph::GraphBuilder;

    const TOL: f64 = 1e-9;

    fn four_cycle() -> MutableGraph {
        GraphBuilder::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    fn bridged_triangles() -> MutableGraph {
        GraphBuilder::from_edges(
            6,
            &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5), (2, 3)],
        )
        .unwrap()
    }

    #[test]
    fn four_cycle_edge_scores_are_uniform() {
        let g = four_cycle();
        let t = BetweennessTables::compute(&g, None);
        // each edge: its endpoint pair, plus half of each diagonal pair
        for (e, _) in g.edges() {
            assert!((t.edge[e as usize] - 2.0).abs() < TOL);
        }
    }

    #[test]
    fn bridge_carries_all_cross_traffic() {
        let g = bridged_triangles();
        let t = BetweennessTables::compute(&g, None);
        let bridge = g.edge_between(2, 3).unwrap();
        assert!((t.edge[bridge as usize] - 9.0).abs() < TOL);
        let inner = g.edge_between(0, 1).unwrap();
        assert!((t.edge[inner as usize] - 1.0).abs() < TOL);
    }

    #[test]
    fn pair_sums_match_derived_vertex_betweenness() {
        for g in [four_cycle(), bridged_triangles()] {
            let t = BetweennessTables::compute(&g, None);
            let vb = t.vertex_betweenness(&g);
            for v in g.vertex_ids() {
                let pair_sum: f64 = t.pair_scores(v).values().sum();
                assert!(
                    (pair_sum - vb[v as usize]).abs() < TOL,
                    "vertex {}: pairs {} vs derived {}",
                    v,
                    pair_sum,
                    vb[v as usize]
                );
            }
        }
    }

    #[test]
    fn bounded_depth_skips_long_paths() {
        let g = GraphBuilder::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let t = BetweennessTables::compute(&g, Some(1));
        // the 0..3 pair is three hops away and must not be counted
        let eb = |a, b| t.edge[g.edge_between(a, b).unwrap() as usize];
        assert!((eb(0, 1) - 2.0).abs() < TOL);
        assert!((eb(1, 2) - 3.0).abs() < TOL);
        assert!((eb(2, 3) - 2.0).abs() < TOL);
    }

    #[test]
    fn repair_pass_tracks_neighbor_pairs() {
        let mut g = four_cycle();
        let mut t = BetweennessTables::compute(&g, None);
        assert_eq!(t.pair_scores(1).len(), 1);

        g.remove_edge_between(1, 2).unwrap();
        let e = g.add_edge(1, 3).unwrap();
        t.fix_attributes(&g);

        // vertex 1 now neighbors {0, 3}; the stale {0, 2} key is gone
        assert_eq!(t.pair_scores(1).keys().copied().collect::<Vec<_>>(), vec![(0, 3)]);
        assert_eq!(t.pair_scores(1)[&(0, 3)], 0.0);
        // vertex 3 gained a neighbor: three zero-initialized or retained pairs
        assert_eq!(t.pair_scores(3).len(), 3);
        assert_eq!(t.edge[e as usize], 0.0);
    }

    #[test]
    fn local_subtract_then_add_round_trips() {
        let g = bridged_triangles();
        let reference = BetweennessTables::compute(&g, Some(2));
        let mut t = reference.clone();

        let region = neighborhood(&g, 2, 1);
        t.recompute_local(&g, &region, Some(2), -1.0);
        t.recompute_local(&g, &region, Some(2), 1.0);

        for (e, _) in g.edges() {
            assert!((t.edge[e as usize] - reference.edge[e as usize]).abs() < TOL);
        }
        for v in g.vertex_ids() {
            for (key, score) in reference.pair_scores(v) {
                assert!((t.pair_scores(v)[key] - score).abs() < TOL);
            }
        }
    }

    #[test]
    fn local_over_everything_matches_global() {
        let g = bridged_triangles();
        let global = BetweennessTables::compute(&g, None);

        let mut local = BetweennessTables::default();
        local.fix_attributes(&g);
        let all: Vec<VertexId> = g.vertex_ids().collect();
        local.recompute_local(&g, &all, None, 1.0);

        for (e, _) in g.edges() {
            assert!((local.edge[e as usize] - global.edge[e as usize]).abs() < TOL);
        }
    }

    #[test]
    fn max_edge_breaks_ties_by_id() {
        let g = four_cycle();
        let t = BetweennessTables::compute(&g, None);
        let (e, score) = t.max_edge(&g).unwrap();
        assert_eq!(e, 0);
        assert!((score - 2.0).abs() < TOL);
    }
}
