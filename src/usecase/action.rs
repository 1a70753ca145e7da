use crate::domain::model::{format_weight, SearchKind};
use anyhow::{anyhow, bail, Context, Result};
use std::fmt;

/// One user-triggered operation on the session graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddVertex(String),
    RemoveVertices(Vec<String>),
    AddEdge {
        from: String,
        to: String,
        weight: Option<f64>,
    },
    RemoveEdges(Vec<(String, String)>),
    SetWeight {
        weight: f64,
        edges: Vec<(String, String)>,
    },
    SetDirected(bool),
    SetWeighted(bool),
    Search {
        kind: SearchKind,
        start: String,
    },
    Scc,
    Clear,
    Show,
    Load(String),
    Save(String),
}

impl Action {
    /// Parses one script line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Action>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let action = match (verb, args.as_slice()) {
            ("add-vertex", [id]) => Action::AddVertex(id.clone()),
            ("remove-vertex", ids) if !ids.is_empty() => Action::RemoveVertices(ids.to_vec()),
            ("add-edge", [id]) => Action::AddEdge {
                from: id.clone(),
                to: id.clone(),
                weight: None,
            },
            ("add-edge", [from, to]) => Action::AddEdge {
                from: from.clone(),
                to: to.clone(),
                weight: None,
            },
            ("add-edge", [from, to, w]) => Action::AddEdge {
                from: from.clone(),
                to: to.clone(),
                weight: Some(parse_weight(w)?),
            },
            ("remove-edge", rest) => Action::RemoveEdges(parse_pairs(rest)?),
            ("set-weight", [w, rest @ ..]) => Action::SetWeight {
                weight: parse_weight(w)?,
                edges: parse_pairs(rest)?,
            },
            ("directed", []) => Action::SetDirected(true),
            ("undirected", []) => Action::SetDirected(false),
            ("weighted", []) => Action::SetWeighted(true),
            ("unweighted", []) => Action::SetWeighted(false),
            ("bfs", [start]) => Action::Search {
                kind: SearchKind::Bfs,
                start: start.clone(),
            },
            ("dfs", [start]) => Action::Search {
                kind: SearchKind::Dfs,
                start: start.clone(),
            },
            ("scc", []) => Action::Scc,
            ("clear", []) => Action::Clear,
            ("show", []) => Action::Show,
            ("load", [path]) => Action::Load(path.clone()),
            ("save", [path]) => Action::Save(path.clone()),
            _ => bail!("unrecognised action: {trimmed}"),
        };

        Ok(Some(action))
    }
}

fn parse_weight(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("weight is not a number: {raw}"))
}

fn parse_pairs(ids: &[String]) -> Result<Vec<(String, String)>> {
    if ids.is_empty() || ids.len() % 2 != 0 {
        return Err(anyhow!("expected one or more `from to` vertex pairs"));
    }
    Ok(ids
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

fn join_pairs(edges: &[(String, String)]) -> String {
    edges
        .iter()
        .map(|(u, v)| format!("{u} {v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a whole script up front, keeping 1-based line numbers.
pub fn parse_script(raw: &str) -> Result<Vec<(usize, Action)>> {
    let mut actions = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let line_no = i + 1;
        let parsed = Action::parse(line).with_context(|| format!("script line {line_no}"))?;
        if let Some(action) = parsed {
            actions.push((line_no, action));
        }
    }
    Ok(actions)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddVertex(id) => write!(f, "add-vertex {id}"),
            Action::RemoveVertices(ids) => write!(f, "remove-vertex {}", ids.join(" ")),
            Action::AddEdge {
                from,
                to,
                weight: Some(w),
            } => write!(f, "add-edge {from} {to} {}", format_weight(*w)),
            Action::AddEdge { from, to, .. } => write!(f, "add-edge {from} {to}"),
            Action::RemoveEdges(edges) => write!(f, "remove-edge {}", join_pairs(edges)),
            Action::SetWeight { weight, edges } => {
                write!(f, "set-weight {} {}", format_weight(*weight), join_pairs(edges))
            }
            Action::SetDirected(true) => f.write_str("directed"),
            Action::SetDirected(false) => f.write_str("undirected"),
            Action::SetWeighted(true) => f.write_str("weighted"),
            Action::SetWeighted(false) => f.write_str("unweighted"),
            Action::Search { kind, start } => write!(f, "{kind} {start}"),
            Action::Scc => f.write_str("scc"),
            Action::Clear => f.write_str("clear"),
            Action::Show => f.write_str("show"),
            Action::Load(path) => write!(f, "load {path}"),
            Action::Save(path) => write!(f, "save {path}"),
        }
    }
}
