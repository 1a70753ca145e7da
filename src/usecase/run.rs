use crate::usecase::action::Action;
use crate::usecase::event::GraphEvent;
use crate::usecase::session::{Outcome, Session};
use crate::usecase::stats::RunStats;
use anyhow::{Context, Result};
use tokio::sync::mpsc;

/// Applies `actions` in order. A rejected action is reported and skipped,
/// unless `strict` is set, in which case the run stops with that error.
///
/// Returns run counters and the outcomes of the actions that succeeded.
pub async fn run_actions(
    session: &mut Session,
    actions: &[(usize, Action)],
    strict: bool,
    sink: Option<mpsc::Sender<GraphEvent>>,
) -> Result<(RunStats, Vec<Outcome>)> {
    let mut stats = RunStats::default();
    let mut outcomes = Vec::new();

    emit(
        &sink,
        GraphEvent::PhaseStarted {
            name: "apply_actions".into(),
        },
    )
    .await;

    for (line, action) in actions {
        stats.actions_seen += 1;

        let outcome = match session.apply(action).await {
            Ok(outcome) => outcome,
            Err(err) => {
                stats.actions_rejected += 1;
                emit(
                    &sink,
                    GraphEvent::ActionRejected {
                        line: *line,
                        action: action.to_string(),
                        kind: err.kind().to_string(),
                        message: err.to_string(),
                    },
                )
                .await;

                if strict {
                    return Err(err).with_context(|| format!("line {line}: {action}"));
                }
                eprintln!("error: line {line}: {action}: {err}");
                continue;
            }
        };

        stats.actions_applied += 1;
        emit(
            &sink,
            GraphEvent::ActionApplied {
                line: *line,
                action: action.to_string(),
            },
        )
        .await;
        emit_outcome(&sink, session, &outcome).await;
        outcomes.push(outcome);
    }

    emit(
        &sink,
        GraphEvent::PhaseFinished {
            name: "apply_actions".into(),
        },
    )
    .await;

    stats.vertices = session.graph().vertex_count();
    stats.edges = session.graph().edge_count();

    emit(
        &sink,
        GraphEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;
    Ok((stats, outcomes))
}

async fn emit_outcome(
    sink: &Option<mpsc::Sender<GraphEvent>>,
    session: &Session,
    outcome: &Outcome,
) {
    let graph = session.graph();
    let ev = match outcome {
        Outcome::Searched(res) => GraphEvent::SearchCompleted {
            kind: res.kind.to_string(),
            start: res.start.clone(),
            edges: res.edges.clone(),
            reached: res.reached.clone(),
        },
        Outcome::Components(scc) => GraphEvent::SccComputed {
            nodes: graph.vertex_count(),
            edges: graph.edge_count(),
            components: scc.components.clone(),
            cyclic_components: scc.cyclic_count(),
        },
        Outcome::Loaded { path } => GraphEvent::GraphLoaded {
            path: path.clone(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            weighted: graph.is_weighted(),
        },
        Outcome::Saved { path } => GraphEvent::GraphSaved {
            path: path.clone(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        },
        Outcome::Updated | Outcome::Summary(_) => return,
    };
    emit(sink, ev).await;
}

async fn emit(sink: &Option<mpsc::Sender<GraphEvent>>, ev: GraphEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}
