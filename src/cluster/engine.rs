//! Decomposition main loop
//!
//! Each iteration either deletes the edge with the highest betweenness or
//! splits the vertex whose best neighbor partition beats that edge, then
//! repairs the betweenness statistics and checks whether the mutation
//! disconnected a new piece. Every new piece is recorded as an overlapping
//! cover. The loop is strictly sequential: every decision depends on the
//! statistics left behind by the previous mutation.

use anyhow::Result;

use crate::betweenness::BetweennessTables;
use crate::cluster::modularity::OverlapResult;
use crate::cluster::{Cover, CoverRegistry};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::graph::algorithms::{connected_components, connectivity_probe, neighborhood};
use crate::graph::{EdgeId, MutableGraph, VertexId};
use crate::split::{best_split, SplitPlan};

/// Lifecycle of one decomposition run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Live edges remain; further mutations will happen
    Active,
    /// No edges remain; the cover registry is complete
    Terminal,
}

/// Stateful driver of one decomposition run over a private graph copy
#[derive(Debug)]
pub struct CommunityEngine {
    graph: MutableGraph,
    /// Untouched copy of the input, used for cover ranking at the end
    original: MutableGraph,
    tables: BetweennessTables,
    config: EngineConfig,
    covers: CoverRegistry,
    phase: Phase,
}

impl CommunityEngine {
    /// Validate the input graph and prepare the initial statistics.
    ///
    /// The graph must be non-empty and connected; a disconnected input is a
    /// precondition violation, never healed by running per component. A
    /// bounded depth must be at least 1.
    pub fn new(graph: MutableGraph, config: EngineConfig) -> Result<Self> {
        if graph.vertex_count() == 0 {
            return Err(EngineError::EmptyGraph.into());
        }
        if config.depth == Some(0) {
            return Err(EngineError::InvalidDepth.into());
        }
        let components = connected_components(&graph);
        if components.count() != 1 {
            return Err(EngineError::DisconnectedInput { components: components.count() }.into());
        }

        log::info!(
            "decomposing graph with {} vertices and {} edges (depth: {:?})",
            graph.vertex_count(),
            graph.edge_count(),
            config.depth
        );

        let tables = BetweennessTables::compute(&graph, config.depth);
        let mut covers = CoverRegistry::new();
        covers.insert(1, Cover::whole_graph(&graph));

        let phase = if graph.edge_count() == 0 { Phase::Terminal } else { Phase::Active };
        Ok(Self {
            original: graph.clone(),
            graph,
            tables,
            config,
            covers,
            phase,
        })
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Covers recorded so far, keyed by cluster count
    pub fn covers(&self) -> &CoverRegistry {
        &self.covers
    }

    /// Drive the loop to completion and rank the recorded covers
    pub fn run(mut self) -> Result<OverlapResult> {
        while self.phase == Phase::Active {
            self.step()?;
        }
        log::info!("decomposition finished with {} covers", self.covers.len());
        Ok(OverlapResult::new(self.original, self.covers))
    }

    /// One decision/mutation iteration.
    ///
    /// Splitting can only beat deleting when some vertex betweenness exceeds
    /// the maximum edge betweenness: the split betweenness of a vertex never
    /// exceeds its vertex betweenness, so vertices at or below the edge
    /// maximum are pruned without running the solver.
    pub fn step(&mut self) -> Result<()> {
        let Some((max_edge, max_eb)) = self.tables.max_edge(&self.graph) else {
            self.phase = Phase::Terminal;
            return Ok(());
        };

        let vertex_betweenness = self.tables.vertex_betweenness(&self.graph);
        let mut best: Option<SplitPlan> = None;
        for v in self.graph.vertex_ids() {
            if vertex_betweenness[v as usize] <= max_eb {
                continue;
            }
            if let Some(plan) = best_split(&self.graph, v, self.tables.pair_scores(v)) {
                if best.as_ref().map_or(true, |current| plan.score > current.score) {
                    best = Some(plan);
                }
            }
        }

        let (left, right) = match best {
            Some(plan) if plan.score > max_eb => self.split_vertex(plan)?,
            _ => self.delete_edge(max_edge)?,
        };

        match connectivity_probe(&self.graph, left, right) {
            Ok(true) => {}
            Ok(false) => self.record_cover(),
            // Conservative default: an undefined probe is reported but the
            // mutation is treated as non-splitting.
            Err(err) => log::warn!("{err}; treating mutation as non-splitting"),
        }

        if self.graph.edge_count() == 0 {
            self.phase = Phase::Terminal;
        }
        Ok(())
    }

    /// Delete the max-betweenness edge, repairing the statistics around it
    fn delete_edge(&mut self, edge: EdgeId) -> Result<(VertexId, VertexId)> {
        let (u, w) = self.graph.endpoints(edge);
        log::debug!(
            "deleting edge {}-{} (betweenness {:.4})",
            u,
            w,
            self.tables.edge[edge as usize]
        );
        match self.config.depth {
            Some(h) => {
                let region = edge_neighborhood(&self.graph, u, w, h);
                self.tables.recompute_local(&self.graph, &region, Some(h), -1.0);
                self.graph.remove_edge_between(u, w)?;
                self.tables.fix_attributes(&self.graph);
                self.tables.recompute_local(&self.graph, &region, Some(h), 1.0);
            }
            None => {
                self.graph.remove_edge_between(u, w)?;
                self.tables = BetweennessTables::compute(&self.graph, None);
            }
        }
        Ok((u, w))
    }

    /// Split a vertex along the solver's partition: a fresh vertex sharing
    /// the origin id takes over one side's edges
    fn split_vertex(&mut self, plan: SplitPlan) -> Result<(VertexId, VertexId)> {
        log::debug!(
            "splitting vertex {} (split betweenness {:.4}, moving {} of {} neighbors)",
            plan.vertex,
            plan.score,
            plan.migrate.len(),
            plan.migrate.len() + plan.keep.len()
        );
        match self.config.depth {
            Some(h) => {
                let mut region = neighborhood(&self.graph, plan.vertex, h);
                self.tables.recompute_local(&self.graph, &region, Some(h), -1.0);
                let fresh = self.apply_split(&plan)?;
                region.push(fresh);
                self.tables.fix_attributes(&self.graph);
                self.tables.recompute_local(&self.graph, &region, Some(h), 1.0);
                Ok((plan.vertex, fresh))
            }
            None => {
                let fresh = self.apply_split(&plan)?;
                self.tables = BetweennessTables::compute(&self.graph, None);
                Ok((plan.vertex, fresh))
            }
        }
    }

    fn apply_split(&mut self, plan: &SplitPlan) -> Result<VertexId> {
        let fresh = self.graph.add_vertex(self.graph.origin(plan.vertex));
        for &partner in &plan.migrate {
            self.graph.remove_edge_between(plan.vertex, partner)?;
            self.graph.add_edge(partner, fresh)?;
        }
        Ok(fresh)
    }

    /// A mutation produced a new connected piece: record the next cover
    fn record_cover(&mut self) {
        let components = connected_components(&self.graph);
        let cover = Cover::from_components(&self.graph, &components);
        let count = components.count();
        debug_assert!(!self.covers.contains_key(&count));
        log::info!("recorded cover with {} clusters", count);
        self.covers.insert(count, cover);
    }
}

/// Region affected by deleting an edge: the union of both endpoints'
/// `(h - 1)`-neighborhoods
fn edge_neighborhood(graph: &MutableGraph, u: VertexId, w: VertexId, h: usize) -> Vec<VertexId> {
    let mut region = neighborhood(graph, u, h - 1);
    for v in neighborhood(graph, w, h - 1) {
        if !region.contains(&v) {
            region.push(v);
        }
    }
    region
}

/// Run a full decomposition over a private copy of `graph`
pub fn detect(graph: MutableGraph, config: EngineConfig) -> Result<OverlapResult> {
    CommunityEngine::new(graph, config)?.run()
}
