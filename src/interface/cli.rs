use crate::domain::graph::Graph;
use crate::domain::model::SearchKind;
use crate::infrastructure::edge_list::{read_graph_file, write_graph_file};
use crate::infrastructure::elements::graph_elements;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::usecase::action::parse_script;
use crate::usecase::event::GraphEvent;
use crate::usecase::run::run_actions;
use crate::usecase::session::{Outcome, Session, SessionConfig, DEFAULT_TRAVERSAL_CEILING};
use crate::usecase::summary::GraphSummary;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::env;
use tokio::sync::mpsc;

pub const TRAVERSAL_CEILING_ENV: &str = "GRAPH_WORKBENCH_TRAVERSAL_CEILING";

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;
    let config = session_config_from_env()?;

    match cmd {
        Cli::GraphRun {
            script,
            input,
            output,
            emit_events,
            strict,
        } => {
            let raw = tokio::fs::read_to_string(&script)
                .await
                .with_context(|| format!("reading action script: {script}"))?;
            let actions =
                parse_script(&raw).with_context(|| format!("parsing action script: {script}"))?;

            let mut session = match input.as_deref() {
                Some(path) => Session::with_graph(load(path).await?, config),
                None => Session::new(config),
            };

            let (tx, rx) = mpsc::channel::<GraphEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let (stats, outcomes) = run_actions(&mut session, &actions, strict, Some(tx)).await?;

            if let Some(path) = output.as_deref() {
                write_graph_file(path, session.graph())
                    .await
                    .with_context(|| format!("writing output graph: {path}"))?;
            }

            if let Some(handle) = printer {
                handle.await.ok();
            } else {
                for outcome in outcomes.iter().filter(|o| is_query(o)) {
                    print_json(outcome)?;
                }
            }

            eprintln!(
                "summary: actions_seen={} actions_applied={} actions_rejected={} vertices={} edges={}",
                stats.actions_seen,
                stats.actions_applied,
                stats.actions_rejected,
                stats.vertices,
                stats.edges
            );

            Ok(())
        }

        Cli::GraphInfo { input, undirected } => {
            let session = open_session(&input, undirected, config).await?;
            print_json(&GraphSummary::of(session.graph()))
        }

        Cli::GraphSearch {
            input,
            kind,
            from,
            undirected,
        } => {
            let session = open_session(&input, undirected, config).await?;
            let result = session
                .search(kind, &from)
                .with_context(|| format!("{kind} from {from} in {input}"))?;
            eprintln!(
                "ok: {kind} from {from} reached {} vertices",
                result.reached.len()
            );
            print_json(&result)
        }

        Cli::GraphScc { input } => {
            let session = open_session(&input, false, config).await?;
            let scc = session
                .scc()
                .with_context(|| format!("strongly connected components of {input}"))?;
            eprintln!(
                "ok: components={} cyclic_components={}",
                scc.components.len(),
                scc.cyclic_count()
            );
            print_json(&scc)
        }

        Cli::GraphRender { input, undirected } => {
            let session = open_session(&input, undirected, config).await?;
            print_json(&graph_elements(session.graph()))
        }
    }
}

#[derive(Debug)]
enum Cli {
    GraphRun {
        script: String,
        input: Option<String>,
        output: Option<String>,
        emit_events: bool,
        strict: bool,
    },
    GraphInfo {
        input: String,
        undirected: bool,
    },
    GraphSearch {
        input: String,
        kind: SearchKind,
        from: String,
        undirected: bool,
    },
    GraphScc {
        input: String,
    },
    GraphRender {
        input: String,
        undirected: bool,
    },
}

#[derive(Debug, Default)]
struct Flags {
    script: Option<String>,
    input: Option<String>,
    output: Option<String>,
    algo: Option<String>,
    from: Option<String>,
    emit_events: bool,
    strict: bool,
    undirected: bool,
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> graph <run|info|search|scc|render> [flags]
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "graph" {
            return Err(anyhow!(usage()));
        }

        let sub = args[2].as_str();
        let allowed: &[&str] = match sub {
            "run" => &["--script", "--in", "--out", "--emit-events", "--strict"],
            "info" | "render" => &["--in", "--undirected"],
            "search" => &["--in", "--algo", "--from", "--undirected"],
            "scc" => &["--in"],
            _ => return Err(anyhow!(usage())),
        };
        let flags = Self::parse_flags(&args[3..], allowed)?;

        match sub {
            "run" => Ok(Cli::GraphRun {
                script: flags
                    .script
                    .ok_or_else(|| anyhow!(format!("missing --script\n\n{}", usage())))?,
                input: flags.input,
                output: flags.output,
                emit_events: flags.emit_events,
                strict: flags.strict,
            }),
            "info" => Ok(Cli::GraphInfo {
                input: require_input(flags.input)?,
                undirected: flags.undirected,
            }),
            "render" => Ok(Cli::GraphRender {
                input: require_input(flags.input)?,
                undirected: flags.undirected,
            }),
            "scc" => Ok(Cli::GraphScc {
                input: require_input(flags.input)?,
            }),
            _ => {
                let kind = match flags.algo.as_deref() {
                    Some("bfs") => SearchKind::Bfs,
                    Some("dfs") => SearchKind::Dfs,
                    Some(other) => {
                        return Err(anyhow!(format!("unknown --algo: {other}\n\n{}", usage())))
                    }
                    None => return Err(anyhow!(format!("missing --algo\n\n{}", usage()))),
                };
                Ok(Cli::GraphSearch {
                    input: require_input(flags.input)?,
                    kind,
                    from: flags
                        .from
                        .ok_or_else(|| anyhow!(format!("missing --from\n\n{}", usage())))?,
                    undirected: flags.undirected,
                })
            }
        }
    }

    fn parse_flags(args: &[String], allowed: &[&str]) -> Result<Flags> {
        let mut flags = Flags::default();

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            if arg == "-h" || arg == "--help" {
                return Err(anyhow!(usage()));
            }
            if !allowed.contains(&arg) {
                return Err(anyhow!(format!("unknown arg: {arg}\n\n{}", usage())));
            }

            match arg {
                "--script" | "--in" | "--out" | "--algo" | "--from" => {
                    i += 1;
                    let value = args.get(i).cloned();
                    match arg {
                        "--script" => flags.script = value,
                        "--in" => flags.input = value,
                        "--out" => flags.output = value,
                        "--algo" => flags.algo = value,
                        _ => flags.from = value,
                    }
                }
                "--emit-events" => flags.emit_events = true,
                "--strict" => flags.strict = true,
                _ => flags.undirected = true,
            }
            i += 1;
        }

        Ok(flags)
    }
}

fn require_input(input: Option<String>) -> Result<String> {
    input.ok_or_else(|| anyhow!(format!("missing --in\n\n{}", usage())))
}

fn usage() -> &'static str {
    "Usage:\n  graph run --script <actions.txt> [--in <graph.txt>] [--out <graph.txt>] [--emit-events] [--strict]\n  graph info --in <graph.txt> [--undirected]\n  graph search --in <graph.txt> --algo bfs|dfs --from <vertex> [--undirected]\n  graph scc --in <graph.txt>\n  graph render --in <graph.txt> [--undirected]\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr.\n\nConfig:\n  GRAPH_WORKBENCH_TRAVERSAL_CEILING caps vertices+edges for bfs/dfs/scc."
}

fn session_config_from_env() -> Result<SessionConfig> {
    session_config_from(env::var(TRAVERSAL_CEILING_ENV).ok().as_deref())
}

fn session_config_from(ceiling: Option<&str>) -> Result<SessionConfig> {
    let traversal_ceiling = match ceiling {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{TRAVERSAL_CEILING_ENV} must be a non-negative integer"))?,
        None => DEFAULT_TRAVERSAL_CEILING,
    };
    Ok(SessionConfig { traversal_ceiling })
}

async fn load(path: &str) -> Result<Graph> {
    read_graph_file(path)
        .await
        .with_context(|| format!("reading input graph: {path}"))
}

// Edge-list files always load directed; `--undirected` reinterprets them.
async fn open_session(input: &str, undirected: bool, config: SessionConfig) -> Result<Session> {
    let mut graph = load(input).await?;
    if undirected {
        graph
            .set_directed(false)
            .with_context(|| format!("converting {input} to undirected"))?;
    }
    Ok(Session::with_graph(graph, config))
}

fn is_query(outcome: &Outcome) -> bool {
    matches!(
        outcome,
        Outcome::Searched(_) | Outcome::Components(_) | Outcome::Summary(_)
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
