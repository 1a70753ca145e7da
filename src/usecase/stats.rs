use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub actions_seen: usize,
    pub actions_applied: usize,
    pub actions_rejected: usize,
    pub vertices: usize,
    pub edges: usize,
}
