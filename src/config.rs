//! Configuration for the community detection engine

/// Tunable parameters for a decomposition run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path-length horizon for betweenness recomputation.
    ///
    /// `None` means unbounded: betweenness is recomputed exactly over the
    /// whole graph after every mutation. `Some(h)` restricts shortest paths
    /// to length `h + 1` edges and confines recomputation to the mutated
    /// neighborhood, trading exactness for speed on larger graphs. Must be
    /// at least 1 when bounded.
    pub depth: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { depth: None }
    }
}

impl EngineConfig {
    /// Create a configuration with a bounded recomputation horizon
    pub fn with_depth(depth: usize) -> Self {
        Self { depth: Some(depth) }
    }
}
