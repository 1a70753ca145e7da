use crate::domain::error::GraphError;
use crate::domain::graph::Graph;
use crate::domain::model::{SccResult, SearchResult};

pub trait GraphSearch {
    fn search(&self, graph: &Graph, start: &str) -> Result<SearchResult, GraphError>;
}

pub trait SccDetector {
    fn compute_scc(&self, graph: &Graph) -> Result<SccResult, GraphError>;
}
