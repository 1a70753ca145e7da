use crate::usecase::stats::RunStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum GraphEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    ActionApplied {
        line: usize,
        action: String,
    },

    ActionRejected {
        line: usize,
        action: String,
        kind: String,
        message: String,
    },

    GraphLoaded {
        path: String,
        vertices: usize,
        edges: usize,
        weighted: bool,
    },

    GraphSaved {
        path: String,
        vertices: usize,
        edges: usize,
    },

    SearchCompleted {
        kind: String,
        start: String,
        edges: Vec<(String, String)>,
        reached: Vec<String>,
    },

    SccComputed {
        nodes: usize,
        edges: usize,
        components: Vec<Vec<String>>,
        cyclic_components: usize,
    },

    Finished {
        stats: RunStats,
    },
}
