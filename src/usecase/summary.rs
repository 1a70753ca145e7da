use crate::domain::graph::Graph;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacencyRow {
    pub vertex: String,
    pub neighbors: Vec<String>,
}

/// Counts, mode flags and a sorted adjacency listing of the session graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub weighted: bool,
    pub directed: bool,
    pub adjacency: Vec<AdjacencyRow>,
}

impl GraphSummary {
    pub fn of(graph: &Graph) -> Self {
        let names = graph.vertices();
        let adjacency = graph
            .adjacency()
            .edges
            .iter()
            .enumerate()
            .map(|(v, outs)| {
                let mut neighbors: Vec<String> = outs.iter().map(|&w| names[w].clone()).collect();
                neighbors.sort();
                AdjacencyRow {
                    vertex: names[v].clone(),
                    neighbors,
                }
            })
            .collect();

        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            weighted: graph.is_weighted(),
            directed: graph.is_directed(),
            adjacency,
        }
    }
}
