//! Graph traversal algorithms
//!
//! BFS shortest-path machinery, radius-bounded neighborhoods, connected
//! components and the connectivity probe used for split detection.

use std::collections::VecDeque;

use crate::error::EngineError;
use crate::graph::{MutableGraph, VertexId};

/// Union-Find structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of vertex i)
    parent: Vec<u32>,

    /// Size of each root's set (for union by rank)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets structure with each element its own set
    pub fn new(size: usize) -> Self {
        let parent = (0..size as u32).collect();
        let rank = vec![1; size];
        Self { parent, rank }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Union by rank: attach smaller tree under root of larger tree
        if self.rank[root_x as usize] > self.rank[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += self.rank[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += self.rank[root_x as usize];
        }
    }

    /// Size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.rank[root as usize]
    }
}

/// Connected components of a graph
pub struct Components {
    /// Component index per vertex, densely numbered in discovery order
    pub membership: Vec<u32>,

    /// Vertex count per component
    pub sizes: Vec<usize>,
}

impl Components {
    /// Number of components
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Size of the component containing `v`
    pub fn size_of(&self, v: VertexId) -> usize {
        self.sizes[self.membership[v as usize] as usize]
    }
}

/// Compute connected components, numbering them by smallest member
pub fn connected_components(graph: &MutableGraph) -> Components {
    let n = graph.vertex_count();
    let mut sets = DisjointSets::new(n);
    for (_, (u, w)) in graph.edges() {
        sets.union(u, w);
    }

    let mut membership = vec![u32::MAX; n];
    let mut sizes = Vec::new();
    for v in 0..n as u32 {
        let root = sets.find(v);
        if membership[root as usize] == u32::MAX {
            membership[root as usize] = sizes.len() as u32;
            sizes.push(0);
        }
        let comp = membership[root as usize];
        membership[v as usize] = comp;
        sizes[comp as usize] += 1;
    }

    Components { membership, sizes }
}

/// Probe whether two distinct vertices are still joined by at least one path.
///
/// Probing a vertex against itself or an id outside the arena has no defined
/// answer and is reported as an error instead of a silent `false`.
pub fn connectivity_probe(
    graph: &MutableGraph,
    source: VertexId,
    target: VertexId,
) -> Result<bool, EngineError> {
    if source == target || !graph.contains_vertex(source) || !graph.contains_vertex(target) {
        return Err(EngineError::ProbeUndefined { from: source, target });
    }

    let mut seen = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::new();
    seen[source as usize] = true;
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        if v == target {
            return Ok(true);
        }
        for &(w, _) in graph.neighbors(v) {
            if !seen[w as usize] {
                seen[w as usize] = true;
                queue.push_back(w);
            }
        }
    }
    Ok(false)
}

/// Vertices within `radius` hops of `v`, including `v` itself, in BFS order
pub fn neighborhood(graph: &MutableGraph, v: VertexId, radius: usize) -> Vec<VertexId> {
    let mut dist = vec![usize::MAX; graph.vertex_count()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();
    dist[v as usize] = 0;
    order.push(v);
    queue.push_back(v);
    while let Some(u) = queue.pop_front() {
        if dist[u as usize] == radius {
            continue;
        }
        for &(w, _) in graph.neighbors(u) {
            if dist[w as usize] == usize::MAX {
                dist[w as usize] = dist[u as usize] + 1;
                order.push(w);
                queue.push_back(w);
            }
        }
    }
    order
}

/// Layered BFS result: shortest-path distances, predecessors and path counts
/// from a single source
pub struct ShortestPathDag {
    /// Hop distance per vertex, -1 when unreached (or beyond the length limit)
    pub dist: Vec<i32>,

    /// Predecessors of each vertex on shortest paths from the source
    pub preds: Vec<Vec<VertexId>>,

    /// Number of distinct shortest paths from the source per vertex
    pub sigma: Vec<f64>,
}

/// Build the shortest-path DAG from `source`, optionally capping path length
/// (in edges) at `limit`
pub fn shortest_path_dag(
    graph: &MutableGraph,
    source: VertexId,
    limit: Option<usize>,
) -> ShortestPathDag {
    let n = graph.vertex_count();
    let mut dist = vec![-1i32; n];
    let mut preds: Vec<Vec<VertexId>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];

    dist[source as usize] = 0;
    sigma[source as usize] = 1.0;

    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        let dv = dist[v as usize];
        if let Some(limit) = limit {
            if dv as usize == limit {
                continue;
            }
        }
        for &(w, _) in graph.neighbors(v) {
            if dist[w as usize] < 0 {
                dist[w as usize] = dv + 1;
                queue.push_back(w);
            }
            if dist[w as usize] == dv + 1 {
                sigma[w as usize] += sigma[v as usize];
                preds[w as usize].push(v);
            }
        }
    }

    ShortestPathDag { dist, preds, sigma }
}

/// Visit every shortest path from the DAG's source to `target`.
///
/// Paths are delivered as vertex sequences ordered target-to-source; callers
/// treating edges and neighbor pairs as unordered are direction-agnostic.
pub fn for_each_shortest_path<F>(dag: &ShortestPathDag, source: VertexId, target: VertexId, f: &mut F)
where
    F: FnMut(&[VertexId]),
{
    if dag.dist[target as usize] < 0 {
        return;
    }
    let mut path = vec![target];
    descend(dag, source, target, &mut path, f);
}

fn descend<F>(
    dag: &ShortestPathDag,
    source: VertexId,
    v: VertexId,
    path: &mut Vec<VertexId>,
    f: &mut F,
) where
    F: FnMut(&[VertexId]),
{
    if v == source {
        f(path);
        return;
    }
    for &p in &dag.preds[v as usize] {
        path.push(p);
        descend(dag, source, p, path, f);
        path.pop();
    }
}
