// Infrastructure layer: algorithm implementations, file I/O, presentation records, eventing
pub mod edge_list;
pub mod elements;
pub mod event_ndjson;
pub mod scc_tarjan;
pub mod search;
