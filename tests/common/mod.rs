//! Shared fixtures and reference implementations for integration tests
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use overlap_cluster_engine::graph::{GraphBuilder, MutableGraph, VertexId};

/// Initialize test logging once per binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Zachary's 34-member club graph, 0-indexed, 78 edges
pub fn club_edges() -> Vec<(VertexId, VertexId)> {
    vec![
        (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7), (0, 8),
        (0, 10), (0, 11), (0, 12), (0, 13), (0, 17), (0, 19), (0, 21), (0, 31),
        (1, 2), (1, 3), (1, 7), (1, 13), (1, 17), (1, 19), (1, 21), (1, 30),
        (2, 3), (2, 7), (2, 8), (2, 9), (2, 13), (2, 27), (2, 28), (2, 32),
        (3, 7), (3, 12), (3, 13),
        (4, 6), (4, 10),
        (5, 6), (5, 10), (5, 16),
        (6, 16),
        (8, 30), (8, 32), (8, 33),
        (9, 33),
        (13, 33),
        (14, 32), (14, 33),
        (15, 32), (15, 33),
        (18, 32), (18, 33),
        (19, 33),
        (20, 32), (20, 33),
        (22, 32), (22, 33),
        (23, 25), (23, 27), (23, 29), (23, 32), (23, 33),
        (24, 25), (24, 27), (24, 31),
        (25, 31),
        (26, 29), (26, 33),
        (27, 33),
        (28, 31), (28, 33),
        (29, 32), (29, 33),
        (30, 32), (30, 33),
        (31, 32), (31, 33),
        (32, 33),
    ]
}

/// Build the club graph fixture
pub fn club_graph() -> MutableGraph {
    GraphBuilder::from_edges(34, &club_edges()).expect("club fixture is well formed")
}

/// Independent reference: Brandes' edge betweenness for undirected unweighted
/// graphs, keyed by ordered endpoint pair.
///
/// Accumulates over every ordered source, so each unordered endpoint pair is
/// counted twice; scores are halved to match once-per-pair accounting.
pub fn brandes_edge_betweenness(graph: &MutableGraph) -> HashMap<(VertexId, VertexId), f64> {
    let n = graph.vertex_count();
    let mut scores: HashMap<(VertexId, VertexId), f64> = HashMap::new();

    for s in 0..n as VertexId {
        let mut stack: Vec<VertexId> = Vec::new();
        let mut preds: Vec<Vec<VertexId>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist = vec![-1i32; n];

        sigma[s as usize] = 1.0;
        dist[s as usize] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(s);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &(w, _) in graph.neighbors(v) {
                if dist[w as usize] < 0 {
                    dist[w as usize] = dist[v as usize] + 1;
                    queue.push_back(w);
                }
                if dist[w as usize] == dist[v as usize] + 1 {
                    sigma[w as usize] += sigma[v as usize];
                    preds[w as usize].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w as usize] {
                let contribution = sigma[v as usize] / sigma[w as usize] * (1.0 + delta[w as usize]);
                let key = if v <= w { (v, w) } else { (w, v) };
                *scores.entry(key).or_insert(0.0) += contribution;
                delta[v as usize] += contribution;
            }
        }
    }

    for score in scores.values_mut() {
        *score /= 2.0;
    }
    scores
}
