//! Mutable graph representation and traversal algorithms

pub mod mutable;
pub mod builder;
pub mod algorithms;

pub use mutable::{MutableGraph, VertexId, EdgeId};
pub use builder::GraphBuilder;
