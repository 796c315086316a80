//! Split-value solver
//!
//! Given a vertex and its pair betweenness scores, finds the best achievable
//! "split betweenness" and the two-way partition of its neighbors realizing
//! it. Exhausting all 2^(k-1) partitions is intractable, so the solver runs
//! the greedy matrix collapse: repeatedly merge the two neighbor groups with
//! the lowest mutual score until only two groups remain.

use std::collections::HashMap;

use ndarray::Array2;

use crate::graph::mutable::order_pair;
use crate::graph::{MutableGraph, VertexId};

/// A proposed two-way split of one vertex's neighbor set
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    /// Vertex to split
    pub vertex: VertexId,

    /// Split betweenness achieved by this partition
    pub score: f64,

    /// Neighbors to reattach to the newly created vertex
    pub migrate: Vec<VertexId>,

    /// Neighbors left on the original vertex
    pub keep: Vec<VertexId>,
}

/// Best split of `v` under its current pair betweenness scores.
///
/// Returns `None` for vertices with fewer than two neighbors, which cannot
/// be split. Neighbor order (and therefore tie-breaking) is made
/// deterministic by sorting neighbor ids ascending before building the
/// matrix.
pub fn best_split(
    graph: &MutableGraph,
    v: VertexId,
    pair_scores: &HashMap<(VertexId, VertexId), f64>,
) -> Option<SplitPlan> {
    let mut neighbors: Vec<VertexId> = graph.neighbors(v).iter().map(|&(w, _)| w).collect();
    neighbors.sort_unstable();
    if neighbors.len() < 2 {
        return None;
    }

    let mut matrix = pair_matrix(&neighbors, pair_scores);
    let mut groups: Vec<Vec<VertexId>> = neighbors.into_iter().map(|w| vec![w]).collect();

    // Collapse the cheapest off-diagonal entry until a 2x2 matrix remains;
    // its single off-diagonal value is the split betweenness.
    while matrix.nrows() > 2 {
        let (i, j) = min_off_diagonal(&matrix);
        matrix = collapse(&matrix, i, j);
        let merged = groups.remove(j);
        groups[i].extend(merged);
    }

    let mut groups = groups.into_iter();
    Some(SplitPlan {
        vertex: v,
        score: matrix[(0, 1)],
        migrate: groups.next().unwrap_or_default(),
        keep: groups.next().unwrap_or_default(),
    })
}

/// Symmetric neighbor-by-neighbor matrix of pair betweenness scores,
/// diagonal zero
fn pair_matrix(neighbors: &[VertexId], pair_scores: &HashMap<(VertexId, VertexId), f64>) -> Array2<f64> {
    let n = neighbors.len();
    let mut matrix = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let key = order_pair(neighbors[i], neighbors[j]);
            let score = pair_scores.get(&key).copied().unwrap_or(0.0);
            matrix[(i, j)] = score;
            matrix[(j, i)] = score;
        }
    }
    matrix
}

/// Index of the minimum entry in the strict upper triangle; first occurrence
/// wins on ties
fn min_off_diagonal(matrix: &Array2<f64>) -> (usize, usize) {
    let n = matrix.nrows();
    let mut best = (0, 1);
    let mut best_value = f64::INFINITY;
    for i in 0..n {
        for j in (i + 1)..n {
            if matrix[(i, j)] < best_value {
                best_value = matrix[(i, j)];
                best = (i, j);
            }
        }
    }
    best
}

/// Merge row/column `j` into `i` (requires `i < j`), dropping `j` and
/// zeroing the diagonal
fn collapse(matrix: &Array2<f64>, i: usize, j: usize) -> Array2<f64> {
    let n = matrix.nrows();
    let mut out = Array2::zeros((n - 1, n - 1));
    for a in 0..n {
        if a == j {
            continue;
        }
        let na = if a > j { a - 1 } else { a };
        for b in 0..n {
            if b == j {
                continue;
            }
            let nb = if b > j { b - 1 } else { b };
            let mut value = matrix[(a, b)];
            if a == i {
                value += matrix[(j, b)];
            }
            if b == i {
                value += matrix[(a, j)];
            }
            out[(na, nb)] = value;
        }
    }
    for d in 0..(n - 1) {
        out[(d, d)] = 0.0;
    }
    out
}
