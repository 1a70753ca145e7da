use serde::Serialize;
use std::fmt;

/// Weight given to edges that gain a weight without one being specified.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Edge {
    pub fn new(source: &str, target: &str, weight: Option<f64>) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        }
    }

    /// Whether this edge is the edge `u -> v` under the given directedness.
    pub fn connects(&self, u: &str, v: &str, directed: bool) -> bool {
        (self.source == u && self.target == v)
            || (!directed && self.source == v && self.target == u)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// Formats a weight so that parsing it back yields the same `f64`
/// (`1.0`, `2.5`, `0.1`).
pub fn format_weight(weight: f64) -> String {
    format!("{weight:?}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Bfs,
    Dfs,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Bfs => f.write_str("bfs"),
            SearchKind::Dfs => f.write_str("dfs"),
        }
    }
}

/// Outcome of a BFS or DFS: tree edges in discovery order and the reached
/// vertices in discovery order, start first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub kind: SearchKind,
    pub start: String,
    pub edges: Vec<(String, String)>,
    pub reached: Vec<String>,
}

/// Strongly connected components in root-finalization order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SccResult {
    pub components: Vec<Vec<String>>,
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }
}
