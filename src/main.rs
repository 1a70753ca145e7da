//! Binary entrypoint.
//!
//! The library is split into Clean Architecture layers:
//! - domain: the graph store and its invariants, pure and synchronous
//! - usecase: editing session + action scripts + progress events
//! - infrastructure: traversal algorithms, edge-list file I/O, NDJSON events
//! - interface: CLI wiring

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    graph_workbench::interface::cli::run().await
}
