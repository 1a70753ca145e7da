use crate::domain::error::GraphError;
use crate::domain::graph::Graph;
use crate::domain::model::{SccResult, SearchKind, SearchResult};
use crate::domain::traits::{GraphSearch, SccDetector};
use crate::infrastructure::edge_list::{read_graph_file, write_graph_file};
use crate::infrastructure::scc_tarjan::TarjanSccDetector;
use crate::infrastructure::search::{BreadthFirstSearch, DepthFirstSearch};
use crate::usecase::action::Action;
use crate::usecase::summary::GraphSummary;
use serde::Serialize;

pub const DEFAULT_TRAVERSAL_CEILING: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Largest `vertices + edges` a BFS, DFS or SCC run is allowed to walk.
    pub traversal_ceiling: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            traversal_ceiling: DEFAULT_TRAVERSAL_CEILING,
        }
    }
}

/// What an applied action produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Updated,
    Searched(SearchResult),
    Components(SccResult),
    Loaded { path: String },
    Saved { path: String },
    Summary(GraphSummary),
}

/// Owns the single live graph of an editing session. Every action goes
/// through `&mut Session`, so edits and traversals never interleave.
#[derive(Debug, Default)]
pub struct Session {
    graph: Graph,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            graph: Graph::new(),
            config,
        }
    }

    pub fn with_graph(graph: Graph, config: SessionConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub async fn apply(&mut self, action: &Action) -> Result<Outcome, GraphError> {
        match action {
            Action::AddVertex(id) => self.graph.add_vertex(id).map(|_| Outcome::Updated),
            Action::RemoveVertices(ids) => {
                self.graph.remove_vertices(ids).map(|_| Outcome::Updated)
            }
            Action::AddEdge { from, to, weight } => self
                .graph
                .add_edge(from, to, *weight)
                .map(|_| Outcome::Updated),
            Action::RemoveEdges(edges) => self.graph.remove_edges(edges).map(|_| Outcome::Updated),
            Action::SetWeight { weight, edges } => self
                .graph
                .set_edge_weights(edges, *weight)
                .map(|_| Outcome::Updated),
            Action::SetDirected(directed) => {
                self.graph.set_directed(*directed).map(|_| Outcome::Updated)
            }
            Action::SetWeighted(weighted) => {
                self.graph.set_weighted(*weighted).map(|_| Outcome::Updated)
            }
            Action::Search { kind, start } => self.search(*kind, start).map(Outcome::Searched),
            Action::Scc => self.scc().map(Outcome::Components),
            Action::Clear => {
                self.graph.clear();
                Ok(Outcome::Updated)
            }
            Action::Show => Ok(Outcome::Summary(GraphSummary::of(&self.graph))),
            Action::Load(path) => {
                self.load(path).await?;
                Ok(Outcome::Loaded { path: path.clone() })
            }
            Action::Save(path) => {
                self.save(path).await?;
                Ok(Outcome::Saved { path: path.clone() })
            }
        }
    }

    pub fn search(&self, kind: SearchKind, start: &str) -> Result<SearchResult, GraphError> {
        self.check_ceiling()?;
        match kind {
            SearchKind::Bfs => BreadthFirstSearch.search(&self.graph, start),
            SearchKind::Dfs => DepthFirstSearch.search(&self.graph, start),
        }
    }

    pub fn scc(&self) -> Result<SccResult, GraphError> {
        self.check_ceiling()?;
        TarjanSccDetector.compute_scc(&self.graph)
    }

    /// Replaces the session graph with the file's contents. On any failure
    /// the current graph stays in place.
    pub async fn load(&mut self, path: &str) -> Result<(), GraphError> {
        let graph = read_graph_file(path).await?;
        self.graph = graph;
        Ok(())
    }

    pub async fn save(&self, path: &str) -> Result<(), GraphError> {
        write_graph_file(path, &self.graph).await
    }

    fn check_ceiling(&self) -> Result<(), GraphError> {
        let elements = self.graph.vertex_count() + self.graph.edge_count();
        if elements > self.config.traversal_ceiling {
            return Err(GraphError::TraversalLimit {
                elements,
                ceiling: self.config.traversal_ceiling,
            });
        }
        Ok(())
    }
}
