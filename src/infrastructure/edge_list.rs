use crate::domain::error::GraphError;
use crate::domain::graph::Graph;
use crate::domain::model::{format_weight, Edge};
use std::path::Path;
use tokio::fs;

/// Parses the edge-list text format. The result is always a directed graph;
/// any three-token line makes the whole graph weighted.
pub fn parse_edge_list(raw: &str) -> Result<Graph, GraphError> {
    let mut lines = raw.lines();

    let Some(header) = lines.next() else {
        return Ok(Graph::from_edge_list(Vec::new(), false));
    };
    parse_header(header)?;

    let mut edges = Vec::new();
    let mut weighted = false;

    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        let malformed = || GraphError::MalformedEdgeLine {
            line: line_no,
            content: line.to_string(),
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [u, v] => edges.push(Edge::new(u, v, None)),
            [u, v, w] => {
                let weight: f64 = w.parse().map_err(|_| malformed())?;
                weighted = true;
                edges.push(Edge::new(u, v, Some(weight)));
            }
            _ => return Err(malformed()),
        }
    }

    Ok(Graph::from_edge_list(edges, weighted))
}

// The declared counts are informational only and are not checked against
// the edges that follow.
fn parse_header(line: &str) -> Result<(i64, i64), GraphError> {
    let malformed = || GraphError::MalformedHeaderLine(line.to_string());
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [vertices, edges] = tokens.as_slice() else {
        return Err(malformed());
    };
    let vertices = vertices.parse().map_err(|_| malformed())?;
    let edges = edges.parse().map_err(|_| malformed())?;
    Ok((vertices, edges))
}

pub fn format_edge_list(graph: &Graph) -> String {
    let mut out = format!("{} {}\n", graph.vertex_count(), graph.edge_count());
    for edge in graph.edges() {
        match edge.weight {
            Some(w) => out.push_str(&format!(
                "{} {} {}\n",
                edge.source,
                edge.target,
                format_weight(w)
            )),
            None => out.push_str(&format!("{} {}\n", edge.source, edge.target)),
        }
    }
    out
}

pub async fn read_graph_file(path: &str) -> Result<Graph, GraphError> {
    let raw = fs::read_to_string(path).await.map_err(|err| GraphError::Io {
        path: path.to_string(),
        err,
    })?;
    parse_edge_list(&raw)
}

pub async fn write_graph_file(path: &str, graph: &Graph) -> Result<(), GraphError> {
    let io_err = |err| GraphError::Io {
        path: path.to_string(),
        err,
    };

    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).await.map_err(io_err)?;
        }
    }

    fs::write(path, format_edge_list(graph))
        .await
        .map_err(io_err)
}
