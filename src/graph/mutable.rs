//! Arena-based mutable undirected graph
//!
//! Vertices live in an arena and are never removed; splitting only adds
//! vertices. Every vertex carries the `origin` id of the input vertex it
//! descends from, so covers can always be translated back to the caller's
//! identifiers. Edges are tombstoned on deletion and their ids are never
//! reused, which keeps external side tables indexed by `EdgeId` stable.

use std::collections::HashMap;

use crate::error::EngineError;

/// Stable identifier of a vertex slot in the arena
pub type VertexId = u32;

/// Stable identifier of an edge slot; survives as a tombstone after deletion
pub type EdgeId = u32;

#[derive(Debug, Clone)]
struct VertexSlot {
    /// Input vertex this slot descends from (itself, unless created by a split)
    origin: VertexId,

    /// Live incident edges as (neighbor, edge id)
    neighbors: Vec<(VertexId, EdgeId)>,
}

#[derive(Debug, Clone)]
struct EdgeSlot {
    endpoints: (VertexId, VertexId),
    alive: bool,
}

/// Mutable undirected simple graph with stable vertex/edge ids
#[derive(Debug, Clone, Default)]
pub struct MutableGraph {
    vertices: Vec<VertexSlot>,
    edges: Vec<EdgeSlot>,

    /// Ordered endpoint pair -> live edge id
    edge_index: HashMap<(VertexId, VertexId), EdgeId>,

    live_edges: usize,
}

/// Normalize an unordered endpoint pair to (min, max)
pub fn order_pair(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl MutableGraph {
    /// Create an empty graph with pre-allocated vertex capacity
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            edges: Vec::with_capacity(edge_count),
            edge_index: HashMap::with_capacity(edge_count),
            live_edges: 0,
        }
    }

    /// Number of vertex slots (all of them live)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live edges
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// Total edge slots ever allocated, including tombstones
    pub fn edge_slot_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether a vertex id refers to a slot in the arena
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        (v as usize) < self.vertices.len()
    }

    /// Append a vertex descending from `origin` and return its id
    pub fn add_vertex(&mut self, origin: VertexId) -> VertexId {
        let id = self.vertices.len() as VertexId;
        self.vertices.push(VertexSlot { origin, neighbors: Vec::new() });
        id
    }

    /// Origin id of a vertex
    pub fn origin(&self, v: VertexId) -> VertexId {
        self.vertices[v as usize].origin
    }

    /// Live incident edges of `v` as (neighbor, edge id) pairs
    pub fn neighbors(&self, v: VertexId) -> &[(VertexId, EdgeId)] {
        &self.vertices[v as usize].neighbors
    }

    /// Current degree of `v`
    pub fn degree(&self, v: VertexId) -> usize {
        self.vertices[v as usize].neighbors.len()
    }

    /// Live edge between two vertices, if any
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_index.get(&order_pair(a, b)).copied()
    }

    /// Whether a live edge joins `a` and `b`
    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.edge_between(a, b).is_some()
    }

    /// Endpoints of an edge slot (defined even for tombstones)
    pub fn endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        self.edges[e as usize].endpoints
    }

    /// Whether an edge slot is live
    pub fn edge_alive(&self, e: EdgeId) -> bool {
        self.edges[e as usize].alive
    }

    /// Iterate over live edges as (edge id, (u, w))
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, (VertexId, VertexId))> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(id, slot)| (id as EdgeId, slot.endpoints))
    }

    /// Iterate over all vertex ids
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        0..self.vertices.len() as VertexId
    }

    /// Insert an undirected edge, returning its id
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId, EngineError> {
        if !self.contains_vertex(a) {
            return Err(EngineError::UnknownVertex(a));
        }
        if !self.contains_vertex(b) {
            return Err(EngineError::UnknownVertex(b));
        }
        if a == b {
            return Err(EngineError::SelfLoop(a));
        }
        let key = order_pair(a, b);
        if self.edge_index.contains_key(&key) {
            return Err(EngineError::DuplicateEdge(key.0, key.1));
        }

        let id = self.edges.len() as EdgeId;
        self.edges.push(EdgeSlot { endpoints: key, alive: true });
        self.edge_index.insert(key, id);
        self.vertices[a as usize].neighbors.push((b, id));
        self.vertices[b as usize].neighbors.push((a, id));
        self.live_edges += 1;
        Ok(id)
    }

    /// Tombstone the live edge between `a` and `b`, returning its id
    pub fn remove_edge_between(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId, EngineError> {
        let key = order_pair(a, b);
        let id = self
            .edge_index
            .remove(&key)
            .ok_or(EngineError::MissingEdge(key.0, key.1))?;
        self.edges[id as usize].alive = false;
        self.vertices[a as usize].neighbors.retain(|&(_, e)| e != id);
        self.vertices[b as usize].neighbors.retain(|&(_, e)| e != id);
        self.live_edges -= 1;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MutableGraph {
        let mut g = MutableGraph::with_capacity(3, 3);
        for i in 0..3 {
            g.add_vertex(i);
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 2).unwrap();
        g
    }

    #[test]
    fn edge_ids_are_stable_across_removal() {
        let mut g = triangle();
        let removed = g.remove_edge_between(1, 0).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_slot_count(), 3);
        assert!(!g.edge_alive(0));
        // tombstoned id is never reused
        let fresh = g.add_edge(0, 1).unwrap();
        assert_eq!(fresh, 3);
    }

    #[test]
    fn adjacency_tracks_removal() {
        let mut g = triangle();
        g.remove_edge_between(0, 2).unwrap();
        assert_eq!(g.degree(0), 1);
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(2, 0));
        assert_eq!(
            g.remove_edge_between(0, 2),
            Err(EngineError::MissingEdge(0, 2))
        );
    }

    #[test]
    fn rejects_self_loops_and_duplicates() {
        let mut g = triangle();
        assert_eq!(g.add_edge(1, 1), Err(EngineError::SelfLoop(1)));
        assert_eq!(g.add_edge(2, 1), Err(EngineError::DuplicateEdge(1, 2)));
        assert_eq!(g.add_edge(0, 9), Err(EngineError::UnknownVertex(9)));
    }

    #[test]
    fn split_vertices_share_origin() {
        let mut g = triangle();
        let clone = g.add_vertex(g.origin(1));
        assert_eq!(g.origin(clone), 1);
        assert_eq!(g.origin(0), 0);
    }
}
