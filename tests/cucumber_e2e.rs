use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use cucumber::{given, then, when, World as _};
use tempfile::TempDir;

#[derive(Debug, Default, cucumber::World)]
struct TestWorld {
    dir: Option<TempDir>,
    input_path: Option<PathBuf>,
    script_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    last_cmd: Option<Output>,
}

fn exe() -> &'static str {
    env!("CARGO_BIN_EXE_graph-workbench")
}

fn run_cmd(args: Vec<String>) -> Output {
    Command::new(exe())
        .args(args)
        .output()
        .expect("failed to run graph binary")
}

fn stderr_string(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

fn stdout_json(out: &Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).expect("stdout is a single JSON document")
}

fn write_file(path: &Path, contents: &str) {
    // Feature files spell newlines as `\n` inside quoted strings.
    fs::write(path, contents.replace("\\n", "\n")).expect("write fixture")
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[given("a temp graph workspace")]
fn a_temp_graph_workspace(world: &mut TestWorld) {
    world.dir = Some(tempfile::tempdir().expect("tempdir"));
}

#[given(expr = "an input graph file containing {string}")]
fn an_input_graph_file_containing(world: &mut TestWorld, contents: String) {
    let dir = world.dir.as_ref().expect("temp dir");
    let input_path = dir.path().join("graph.txt");
    write_file(&input_path, &contents);
    world.input_path = Some(input_path);
}

#[given(expr = "an action script containing {string}")]
fn an_action_script_containing(world: &mut TestWorld, contents: String) {
    let dir = world.dir.as_ref().expect("temp dir");
    let script_path = dir.path().join("actions.txt");
    write_file(&script_path, &contents);
    world.script_path = Some(script_path);
}

#[when("I run the script to an output file")]
fn i_run_the_script_to_an_output_file(world: &mut TestWorld) {
    let dir = world.dir.as_ref().expect("temp dir");
    let script_path = world.script_path.as_ref().expect("script");
    let output_path = dir.path().join("out/graph.txt");

    let mut args = vec![
        "graph".to_string(),
        "run".to_string(),
        "--script".to_string(),
        path_arg(script_path),
        "--out".to_string(),
        path_arg(&output_path),
    ];
    if let Some(input_path) = world.input_path.as_ref() {
        args.push("--in".to_string());
        args.push(path_arg(input_path));
    }

    world.output_path = Some(output_path);
    world.last_cmd = Some(run_cmd(args));
}

#[when("I run the script strictly")]
fn i_run_the_script_strictly(world: &mut TestWorld) {
    let script_path = world.script_path.as_ref().expect("script");

    world.last_cmd = Some(run_cmd(vec![
        "graph".to_string(),
        "run".to_string(),
        "--script".to_string(),
        path_arg(script_path),
        "--strict".to_string(),
    ]));
}

#[when(expr = "I run {word} on the input graph")]
fn i_run_subcommand_on_the_input_graph(world: &mut TestWorld, sub: String) {
    let input_path = world.input_path.as_ref().expect("input");

    world.last_cmd = Some(run_cmd(vec![
        "graph".to_string(),
        sub,
        "--in".to_string(),
        path_arg(input_path),
    ]));
}

#[when(expr = "I run {word} from {word} on the input graph")]
fn i_run_search_from_on_the_input_graph(world: &mut TestWorld, algo: String, start: String) {
    let input_path = world.input_path.as_ref().expect("input");

    world.last_cmd = Some(run_cmd(vec![
        "graph".to_string(),
        "search".to_string(),
        "--in".to_string(),
        path_arg(input_path),
        "--algo".to_string(),
        algo,
        "--from".to_string(),
        start,
    ]));
}

#[then("the command succeeds")]
fn the_command_succeeds(world: &mut TestWorld) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    assert!(
        out.status.success(),
        "command failed (status={:?})\nstderr:\n{}\nstdout:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stderr),
        String::from_utf8_lossy(&out.stdout)
    );
}

#[then("the command fails")]
fn the_command_fails(world: &mut TestWorld) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    assert!(
        !out.status.success(),
        "expected failure but succeeded; stderr: {}",
        stderr_string(out)
    );
}

#[then(expr = "stderr mentions {string}")]
fn stderr_mentions(world: &mut TestWorld, needle: String) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    let stderr = stderr_string(out);
    assert!(
        stderr.contains(&needle),
        "stderr did not contain {needle:?}. stderr was:\n{stderr}"
    );
}

#[then(expr = "the output file contains {string}")]
fn the_output_file_contains(world: &mut TestWorld, expected: String) {
    let output_path = world.output_path.as_ref().expect("output");
    let raw = fs::read_to_string(output_path).expect("read output");
    assert_eq!(raw, expected.replace("\\n", "\n"));
}

#[then(expr = "the reached vertices are {string}")]
fn the_reached_vertices_are(world: &mut TestWorld, expected: String) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    let v = stdout_json(out);
    let reached: Vec<&str> = v["reached"]
        .as_array()
        .expect("reached array")
        .iter()
        .filter_map(|x| x.as_str())
        .collect();
    assert_eq!(reached.join(" "), expected);
}

#[then(expr = "there are {int} components")]
fn there_are_n_components(world: &mut TestWorld, n: usize) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    let v = stdout_json(out);
    assert_eq!(v["components"].as_array().expect("components").len(), n);
}

#[then(expr = "the summary reports {int} vertices and {int} edges")]
fn the_summary_reports(world: &mut TestWorld, vertices: usize, edges: usize) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    let v = stdout_json(out);
    assert_eq!(v["vertices"], vertices);
    assert_eq!(v["edges"], edges);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    TestWorld::cucumber()
        .max_concurrent_scenarios(Some(1))
        .fail_on_skipped()
        .run_and_exit("tests/features")
        .await;
}
