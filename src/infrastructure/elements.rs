//! Presentation records for a graph canvas. Styling, colours and layout are
//! left to the renderer; only ids, labels and the direction hint are given.

use crate::domain::graph::Graph;
use crate::domain::model::format_weight;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    pub label: String,
    pub directed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "group")]
pub enum Element {
    #[serde(rename = "nodes")]
    Node { data: NodeData },
    #[serde(rename = "edges")]
    Edge { data: EdgeData },
}

pub fn graph_elements(graph: &Graph) -> Vec<Element> {
    let nodes = graph.vertices().iter().map(|id| Element::Node {
        data: NodeData {
            id: id.clone(),
            label: id.clone(),
        },
    });

    let edges = graph.edges().iter().map(|edge| Element::Edge {
        data: EdgeData {
            source: edge.source.clone(),
            target: edge.target.clone(),
            label: edge.weight.map(format_weight).unwrap_or_default(),
            directed: graph.is_directed(),
        },
    });

    nodes.chain(edges).collect()
}
