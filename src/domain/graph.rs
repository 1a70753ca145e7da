use crate::domain::error::GraphError;
use crate::domain::model::{Edge, DEFAULT_WEIGHT};
use std::collections::{HashMap, HashSet};

/// Index-based neighbour lists, one per vertex in vertex order. Neighbours
/// appear in edge insertion order.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    pub edges: Vec<Vec<usize>>,
}

impl Adjacency {
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|v| v.len()).sum()
    }
}

/// The session graph: ordered vertices, ordered edges and the two mode flags.
///
/// `snapshot` holds the edge list as it was when the graph was last turned
/// undirected. Any later change to the edge set or to a weight clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertices: Vec<String>,
    edges: Vec<Edge>,
    directed: bool,
    weighted: bool,
    snapshot: Option<Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directed graph from parsed edge lines. Vertices are taken from
    /// the edges in first-mention order; a repeated edge updates the earlier
    /// one instead of duplicating it.
    pub fn from_edge_list(edges: Vec<Edge>, weighted: bool) -> Self {
        let mut graph = Graph {
            directed: true,
            weighted,
            ..Graph::default()
        };
        let mut seen_vertices: HashSet<String> = HashSet::new();
        let mut edge_index: HashMap<(String, String), usize> = HashMap::new();

        for edge in edges {
            for id in [&edge.source, &edge.target] {
                if seen_vertices.insert(id.clone()) {
                    graph.vertices.push(id.clone());
                }
            }
            let key = (edge.source.clone(), edge.target.clone());
            match edge_index.get(&key) {
                Some(&i) => {
                    if edge.weight.is_some() {
                        graph.edges[i].weight = edge.weight;
                    }
                }
                None => {
                    edge_index.insert(key, graph.edges.len());
                    graph.edges.push(edge);
                }
            }
        }

        graph
    }

    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertices.iter().any(|v| v == id)
    }

    pub fn vertex_index(&self, id: &str) -> Option<usize> {
        self.vertices.iter().position(|v| v == id)
    }

    pub fn contains_edge(&self, u: &str, v: &str) -> bool {
        self.position(u, v).is_some()
    }

    pub fn weight_of(&self, u: &str, v: &str) -> Option<f64> {
        self.position(u, v).and_then(|i| self.edges[i].weight)
    }

    pub fn adjacency(&self) -> Adjacency {
        let index: HashMap<&str, usize> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.as_str(), i))
            .collect();

        let mut adj = Adjacency::new(self.vertices.len());
        for edge in &self.edges {
            let (Some(&s), Some(&t)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            adj.edges[s].push(t);
            if !self.directed && s != t {
                adj.edges[t].push(s);
            }
        }
        adj
    }

    pub fn add_vertex(&mut self, id: &str) -> Result<(), GraphError> {
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(GraphError::InvalidVertexId(id.to_string()));
        }
        if self.contains_vertex(id) {
            return Err(GraphError::DuplicateVertex(id.to_string()));
        }
        self.vertices.push(id.to_string());
        Ok(())
    }

    pub fn remove_vertex(&mut self, id: &str) -> Result<(), GraphError> {
        self.remove_vertices(&[id])
    }

    /// Removes every listed vertex with its incident edges. All ids are
    /// checked before anything is removed.
    pub fn remove_vertices<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), GraphError> {
        if let Some(missing) = ids.iter().find(|id| !self.contains_vertex(id.as_ref())) {
            return Err(GraphError::UnknownVertex(missing.as_ref().to_string()));
        }

        let edges_before = self.edges.len();
        self.vertices
            .retain(|v| !ids.iter().any(|id| id.as_ref() == v.as_str()));
        self.edges
            .retain(|e| !ids.iter().any(|id| e.touches(id.as_ref())));

        if self.edges.len() != edges_before {
            self.snapshot = None;
            self.recompute_weighted();
        }
        self.reset_modes_if_edgeless();
        Ok(())
    }

    /// Adds `u -> v` (or `u -- v`), or updates it if present. `u == v` makes
    /// a self-loop.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: Option<f64>) -> Result<(), GraphError> {
        for id in [u, v] {
            if !self.contains_vertex(id) {
                return Err(GraphError::UnknownVertex(id.to_string()));
            }
        }

        if weight.is_some() && !self.weighted {
            self.backfill_weights();
            self.weighted = true;
        }

        match self.position(u, v) {
            Some(i) => {
                let edge = &mut self.edges[i];
                if weight.is_some() {
                    edge.weight = weight;
                } else if self.weighted && edge.weight.is_none() {
                    edge.weight = Some(DEFAULT_WEIGHT);
                }
            }
            None => {
                let weight = weight.or(self.weighted.then_some(DEFAULT_WEIGHT));
                self.edges.push(Edge::new(u, v, weight));
            }
        }

        self.snapshot = None;
        Ok(())
    }

    pub fn remove_edge(&mut self, u: &str, v: &str) -> Result<(), GraphError> {
        self.remove_edges(&[(u, v)])
    }

    /// Removes every listed edge. Fails without changes if any is missing.
    pub fn remove_edges<S: AsRef<str>>(&mut self, pairs: &[(S, S)]) -> Result<(), GraphError> {
        self.require_edges(pairs)?;

        for (u, v) in pairs {
            if let Some(i) = self.position(u.as_ref(), v.as_ref()) {
                self.edges.remove(i);
            }
        }

        self.snapshot = None;
        self.recompute_weighted();
        self.reset_modes_if_edgeless();
        Ok(())
    }

    /// Assigns `weight` to every listed edge, turning the graph weighted
    /// first (existing edges get the default weight) if needed. An empty
    /// list changes nothing.
    pub fn set_edge_weights<S: AsRef<str>>(
        &mut self,
        pairs: &[(S, S)],
        weight: f64,
    ) -> Result<(), GraphError> {
        if pairs.is_empty() {
            return Ok(());
        }
        self.require_edges(pairs)?;

        if !self.weighted {
            self.backfill_weights();
            self.weighted = true;
        }
        for (u, v) in pairs {
            if let Some(i) = self.position(u.as_ref(), v.as_ref()) {
                self.edges[i].weight = Some(weight);
            }
        }

        self.snapshot = None;
        Ok(())
    }

    pub fn set_directed(&mut self, directed: bool) -> Result<(), GraphError> {
        match (self.directed, directed) {
            (true, true) => Err(GraphError::InvalidGraphMode("graph is already directed")),
            (false, false) => Err(GraphError::InvalidGraphMode("graph is already undirected")),
            (true, false) => {
                self.snapshot = Some(self.edges.clone());
                self.edges = collapse_reverse_pairs(&self.edges);
                self.directed = false;
                Ok(())
            }
            (false, true) => {
                if self.edges.is_empty() {
                    return Err(GraphError::InvalidGraphMode("graph has no edges to orient"));
                }
                if let Some(snapshot) = self.snapshot.take() {
                    self.edges = snapshot;
                }
                self.directed = true;
                Ok(())
            }
        }
    }

    pub fn set_weighted(&mut self, weighted: bool) -> Result<(), GraphError> {
        match (self.weighted, weighted) {
            (true, true) => return Err(GraphError::InvalidGraphMode("graph is already weighted")),
            (false, false) => {
                return Err(GraphError::InvalidGraphMode("graph is already unweighted"))
            }
            (false, true) => {
                if self.edges.is_empty() {
                    return Err(GraphError::InvalidGraphMode("graph has no edges to weight"));
                }
                self.backfill_weights();
            }
            (true, false) => {
                for edge in self.edges.iter_mut() {
                    edge.weight = None;
                }
            }
        }

        self.weighted = weighted;
        self.snapshot = None;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Graph::default();
    }

    fn position(&self, u: &str, v: &str) -> Option<usize> {
        self.edges
            .iter()
            .position(|e| e.connects(u, v, self.directed))
    }

    fn require_edges<S: AsRef<str>>(&self, pairs: &[(S, S)]) -> Result<(), GraphError> {
        match pairs
            .iter()
            .find(|(u, v)| self.position(u.as_ref(), v.as_ref()).is_none())
        {
            Some((u, v)) => Err(GraphError::unknown_edge(u.as_ref(), v.as_ref())),
            None => Ok(()),
        }
    }

    fn backfill_weights(&mut self) {
        for edge in self.edges.iter_mut() {
            edge.weight.get_or_insert(DEFAULT_WEIGHT);
        }
    }

    fn recompute_weighted(&mut self) {
        self.weighted = self.edges.iter().any(|e| e.weight.is_some());
    }

    fn reset_modes_if_edgeless(&mut self) {
        if self.edges.is_empty() {
            self.directed = false;
            self.weighted = false;
            self.snapshot = None;
        }
    }
}

/// Merges `(u,v)` and `(v,u)` into the first of the two; a later explicit
/// weight overwrites an earlier one.
fn collapse_reverse_pairs(edges: &[Edge]) -> Vec<Edge> {
    let mut out: Vec<Edge> = Vec::with_capacity(edges.len());
    for edge in edges {
        match out
            .iter_mut()
            .find(|e| e.connects(&edge.source, &edge.target, false))
        {
            Some(existing) => {
                if edge.weight.is_some() {
                    existing.weight = edge.weight;
                }
            }
            None => out.push(edge.clone()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_vertices(ids: &[&str]) -> Graph {
        let mut g = Graph::new();
        for id in ids {
            g.add_vertex(id).expect("add vertex");
        }
        g
    }

    fn directed_abc() -> Graph {
        Graph::from_edge_list(
            vec![
                Edge::new("a", "b", None),
                Edge::new("b", "a", Some(3.0)),
                Edge::new("b", "c", None),
            ],
            true,
        )
    }

    #[test]
    fn add_vertex_rejects_duplicates_and_bad_ids() {
        let mut g = with_vertices(&["a"]);
        assert!(matches!(g.add_vertex("a"), Err(GraphError::DuplicateVertex(id)) if id == "a"));
        assert!(matches!(g.add_vertex(""), Err(GraphError::InvalidVertexId(_))));
        assert!(matches!(g.add_vertex("x y"), Err(GraphError::InvalidVertexId(_))));
        assert_eq!(g.vertices(), ["a".to_string()]);
    }

    #[test]
    fn add_then_remove_vertex_restores_graph() {
        let mut g = with_vertices(&["a", "b"]);
        g.add_edge("a", "b", None).expect("edge");
        let before = g.clone();

        g.add_vertex("z").expect("add");
        g.remove_vertex("z").expect("remove");

        assert_eq!(g, before);
    }

    #[test]
    fn add_edge_never_creates_vertices() {
        let mut g = with_vertices(&["a"]);
        assert!(matches!(g.add_edge("a", "b", None), Err(GraphError::UnknownVertex(id)) if id == "b"));
        assert!(matches!(g.add_edge("q", "a", None), Err(GraphError::UnknownVertex(id)) if id == "q"));
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn self_loop_is_allowed() {
        let mut g = with_vertices(&["a"]);
        g.add_edge("a", "a", None).expect("loop");
        assert!(g.contains_edge("a", "a"));
        assert_eq!(g.adjacency().edges, vec![vec![0]]);
    }

    #[test]
    fn weighted_add_backfills_existing_edges() {
        let mut g = with_vertices(&["a", "b", "c"]);
        g.add_edge("a", "b", None).expect("ab");
        assert!(!g.is_weighted());

        g.add_edge("b", "c", Some(4.5)).expect("bc");
        assert!(g.is_weighted());
        assert_eq!(g.weight_of("a", "b"), Some(1.0));
        assert_eq!(g.weight_of("b", "c"), Some(4.5));

        g.add_edge("a", "c", None).expect("ac");
        assert_eq!(g.weight_of("a", "c"), Some(1.0));
    }

    #[test]
    fn re_adding_an_edge_updates_in_place() {
        let mut g = with_vertices(&["a", "b"]);
        g.add_edge("a", "b", Some(2.0)).expect("ab");
        g.add_edge("b", "a", None).expect("ba is the same undirected edge");
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight_of("a", "b"), Some(2.0));

        g.add_edge("b", "a", Some(7.0)).expect("reweight");
        assert_eq!(g.edges(), [Edge::new("a", "b", Some(7.0))]);
    }

    #[test]
    fn remove_edge_recomputes_weighted_and_resets_modes() {
        let mut g = directed_abc();
        g.remove_edge("b", "a").expect("remove weighted edge");
        assert!(!g.is_weighted());
        assert!(g.is_directed());

        assert!(matches!(
            g.remove_edge("c", "b"),
            Err(GraphError::UnknownEdge { .. })
        ));

        g.remove_edge("a", "b").expect("ab");
        g.remove_edge("b", "c").expect("bc");
        assert!(!g.is_directed());
        assert!(!g.is_weighted());
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn undirected_remove_matches_either_orientation() {
        let mut g = with_vertices(&["a", "b"]);
        g.add_edge("a", "b", None).expect("ab");
        g.remove_edge("b", "a").expect("ba");
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn batch_removal_with_a_missing_edge_changes_nothing() {
        let mut g = directed_abc();
        let before = g.clone();

        let err = g.remove_edges(&[("a", "b"), ("c", "a")]).unwrap_err();
        assert!(matches!(err, GraphError::UnknownEdge { ref from, ref to } if from == "c" && to == "a"));
        assert_eq!(g, before);

        g.remove_edges(&[("a", "b"), ("b", "c")]).expect("batch");
        assert_eq!(g.edges(), [Edge::new("b", "a", Some(3.0))]);
    }

    #[test]
    fn remove_vertex_drops_incident_edges() {
        let mut g = directed_abc();
        g.remove_vertex("b").expect("remove b");
        assert_eq!(g.vertices(), ["a".to_string(), "c".to_string()]);
        assert_eq!(g.edge_count(), 0);
        assert!(!g.is_directed());
        assert!(!g.is_weighted());

        assert!(matches!(g.remove_vertex("b"), Err(GraphError::UnknownVertex(_))));
    }

    #[test]
    fn remove_vertices_is_atomic() {
        let mut g = directed_abc();
        let before = g.clone();
        assert!(g.remove_vertices(&["a", "nope"]).is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn set_edge_weights_turns_graph_weighted() {
        let mut g = with_vertices(&["a", "b", "c"]);
        g.add_edge("a", "b", None).expect("ab");
        g.add_edge("b", "c", None).expect("bc");

        g.set_edge_weights(&[("c", "b")], 9.0).expect("weights");
        assert!(g.is_weighted());
        assert_eq!(g.weight_of("a", "b"), Some(1.0));
        assert_eq!(g.weight_of("b", "c"), Some(9.0));

        let before = g.clone();
        assert!(g.set_edge_weights(&[("a", "c")], 2.0).is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn set_weighted_round_trip() {
        let mut g = with_vertices(&["a", "b"]);
        g.add_edge("a", "b", None).expect("ab");

        g.set_weighted(true).expect("weighted");
        assert_eq!(g.weight_of("a", "b"), Some(1.0));
        assert!(matches!(g.set_weighted(true), Err(GraphError::InvalidGraphMode(_))));

        g.set_weighted(false).expect("unweighted");
        assert_eq!(g.weight_of("a", "b"), None);
        assert!(matches!(g.set_weighted(false), Err(GraphError::InvalidGraphMode(_))));
    }

    #[test]
    fn set_weighted_requires_edges() {
        let mut g = with_vertices(&["a"]);
        assert!(matches!(
            g.set_weighted(true),
            Err(GraphError::InvalidGraphMode("graph has no edges to weight"))
        ));
        assert_eq!(g.edge_count(), 0);
        assert!(!g.is_weighted());
    }

    #[test]
    fn empty_weight_batch_changes_nothing() {
        let mut g = with_vertices(&["a", "b"]);
        g.add_edge("a", "b", None).expect("ab");
        let before = g.clone();

        let none: [(&str, &str); 0] = [];
        g.set_edge_weights(&none, 4.0).expect("empty batch");

        assert_eq!(g, before);
        assert!(!g.is_weighted());
        assert_eq!(g.weight_of("a", "b"), None);
    }

    #[test]
    fn from_edge_list_handles_large_inputs_with_repeats() {
        let n = 50_000;
        let mut edges: Vec<Edge> = (0..n)
            .map(|i| Edge::new(&format!("v{i}"), &format!("v{}", i + 1), None))
            .collect();
        edges.push(Edge::new("v0", "v1", Some(7.0)));
        edges.push(Edge::new("v1", "v0", None));

        let g = Graph::from_edge_list(edges, true);

        assert_eq!(g.vertex_count(), n + 1);
        assert_eq!(g.edge_count(), n + 1);
        assert_eq!(g.edges()[0], Edge::new("v0", "v1", Some(7.0)));
        assert_eq!(g.edges()[n], Edge::new("v1", "v0", None));
    }

    #[test]
    fn to_undirected_collapses_pairs_with_last_weight_winning() {
        let mut g = directed_abc();
        g.set_directed(false).expect("undirected");

        assert!(!g.is_directed());
        assert_eq!(
            g.edges(),
            [Edge::new("a", "b", Some(3.0)), Edge::new("b", "c", None)]
        );
        assert!(g.has_snapshot());
        assert!(matches!(g.set_directed(false), Err(GraphError::InvalidGraphMode(_))));
    }

    #[test]
    fn untouched_round_trip_restores_directed_edges() {
        let mut g = directed_abc();
        let before = g.edges().to_vec();

        g.set_directed(false).expect("undirected");
        g.add_vertex("lonely").expect("vertex adds keep the snapshot");
        g.set_directed(true).expect("directed");

        assert_eq!(g.edges(), before.as_slice());
        assert!(!g.has_snapshot());
    }

    #[test]
    fn edit_while_undirected_keeps_current_edges() {
        let mut g = directed_abc();
        g.set_directed(false).expect("undirected");
        g.add_vertex("d").expect("d");
        g.add_edge("d", "c", None).expect("dc");
        assert!(!g.has_snapshot());

        g.set_directed(true).expect("directed");
        assert_eq!(
            g.edges(),
            [
                Edge::new("a", "b", Some(3.0)),
                Edge::new("b", "c", None),
                Edge::new("d", "c", Some(1.0)),
            ]
        );
        assert!(g.contains_edge("d", "c"));
        assert!(!g.contains_edge("c", "d"));
    }

    #[test]
    fn to_directed_requires_edges() {
        let mut g = with_vertices(&["a"]);
        assert!(matches!(
            g.set_directed(true),
            Err(GraphError::InvalidGraphMode("graph has no edges to orient"))
        ));
    }

    #[test]
    fn undirected_adjacency_lists_both_endpoints() {
        let mut g = with_vertices(&["a", "b", "c"]);
        g.add_edge("b", "a", None).expect("ba");
        g.add_edge("a", "c", None).expect("ac");
        g.add_edge("c", "c", None).expect("cc");

        assert_eq!(g.adjacency().edges, vec![vec![1, 2], vec![0], vec![0, 2]]);
        assert_eq!(g.adjacency().edge_count(), 5);
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = directed_abc();
        g.set_directed(false).expect("undirected");
        g.clear();
        assert_eq!(g, Graph::default());
    }
}
