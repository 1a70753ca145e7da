use crate::usecase::event::GraphEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn graph_event_to_json(ev: &GraphEvent) -> serde_json::Value {
    match ev {
        GraphEvent::PhaseStarted { name } => json!({"type":"phase_started","name":name}),
        GraphEvent::PhaseFinished { name } => json!({"type":"phase_finished","name":name}),
        GraphEvent::ActionApplied { line, action } => {
            json!({"type":"action_applied","line":line,"action":action})
        }
        GraphEvent::ActionRejected {
            line,
            action,
            kind,
            message,
        } => {
            json!({"type":"action_rejected","line":line,"action":action,"kind":kind,"message":message})
        }
        GraphEvent::GraphLoaded {
            path,
            vertices,
            edges,
            weighted,
        } => {
            json!({"type":"graph_loaded","path":path,"vertices":vertices,"edges":edges,"weighted":weighted})
        }
        GraphEvent::GraphSaved {
            path,
            vertices,
            edges,
        } => json!({"type":"graph_saved","path":path,"vertices":vertices,"edges":edges}),
        GraphEvent::SearchCompleted {
            kind,
            start,
            edges,
            reached,
        } => {
            json!({"type":"search_completed","kind":kind,"start":start,"edges":edges,"reached":reached})
        }
        GraphEvent::SccComputed {
            nodes,
            edges,
            components,
            cyclic_components,
        } => {
            json!({"type":"scc_computed","nodes":nodes,"edges":edges,"components":components,"cyclic_components":cyclic_components})
        }
        GraphEvent::Finished { stats } => json!({"type":"finished","stats":stats}),
    }
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<GraphEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = graph_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}
