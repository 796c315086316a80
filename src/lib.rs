//! Core library for overlapping community detection via iterative
//! betweenness-driven graph decomposition

pub mod config;
pub mod error;
pub mod graph;
pub mod betweenness;
pub mod split;
pub mod cluster;

pub use anyhow::{Result, anyhow};

pub use config::EngineConfig;
pub use error::EngineError;
pub use graph::MutableGraph;
pub use cluster::engine::CommunityEngine;
pub use cluster::modularity::OverlapResult;
