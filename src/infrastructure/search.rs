use crate::domain::error::GraphError;
use crate::domain::graph::{Adjacency, Graph};
use crate::domain::model::{SearchKind, SearchResult};
use crate::domain::traits::GraphSearch;
use std::collections::VecDeque;

pub struct BreadthFirstSearch;

pub struct DepthFirstSearch;

impl GraphSearch for BreadthFirstSearch {
    fn search(&self, graph: &Graph, start: &str) -> Result<SearchResult, GraphError> {
        let start_idx = start_index(graph, start)?;
        let tree = bfs_tree(&graph.adjacency(), start_idx);
        Ok(named_result(graph, SearchKind::Bfs, start_idx, &tree))
    }
}

impl GraphSearch for DepthFirstSearch {
    fn search(&self, graph: &Graph, start: &str) -> Result<SearchResult, GraphError> {
        let start_idx = start_index(graph, start)?;
        let tree = dfs_tree(&graph.adjacency(), start_idx);
        Ok(named_result(graph, SearchKind::Dfs, start_idx, &tree))
    }
}

fn start_index(graph: &Graph, start: &str) -> Result<usize, GraphError> {
    graph
        .vertex_index(start)
        .ok_or_else(|| GraphError::UnknownVertex(start.to_string()))
}

fn bfs_tree(adj: &Adjacency, start: usize) -> Vec<(usize, usize)> {
    let mut seen = vec![false; adj.node_count()];
    let mut tree = Vec::new();
    let mut queue = VecDeque::from([start]);
    seen[start] = true;

    while let Some(u) = queue.pop_front() {
        for &v in adj.edges[u].iter() {
            if !seen[v] {
                seen[v] = true;
                tree.push((u, v));
                queue.push_back(v);
            }
        }
    }

    tree
}

// Pre-order DFS with an explicit stack of (vertex, next neighbour) frames.
fn dfs_tree(adj: &Adjacency, start: usize) -> Vec<(usize, usize)> {
    let mut seen = vec![false; adj.node_count()];
    let mut tree = Vec::new();
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    seen[start] = true;

    while let Some(frame) = stack.last_mut() {
        let (v, next_i) = *frame;
        if next_i < adj.edges[v].len() {
            frame.1 += 1;
            let to = adj.edges[v][next_i];
            if !seen[to] {
                seen[to] = true;
                tree.push((v, to));
                stack.push((to, 0));
            }
            continue;
        }
        stack.pop();
    }

    tree
}

fn named_result(
    graph: &Graph,
    kind: SearchKind,
    start: usize,
    tree: &[(usize, usize)],
) -> SearchResult {
    let names = graph.vertices();
    let mut reached = vec![names[start].clone()];
    reached.extend(tree.iter().map(|&(_, v)| names[v].clone()));

    SearchResult {
        kind,
        start: names[start].clone(),
        edges: tree
            .iter()
            .map(|&(u, v)| (names[u].clone(), names[v].clone()))
            .collect(),
        reached,
    }
}
