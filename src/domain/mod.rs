//! Domain layer: the graph store, its mutation rules and the algorithm ports.
//! Pure and synchronous.

pub mod error;
pub mod graph;
pub mod model;
pub mod traits;
