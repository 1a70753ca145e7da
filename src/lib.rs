//! Graph editing session engine.
//!
//! - domain: the graph store, mutation rules and algorithm ports
//! - usecase: session, action scripts, progress events
//! - infrastructure: BFS/DFS/Tarjan, edge-list files, presentation records, NDJSON
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
