use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn edge_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn neuronet(graph: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("neuronet").unwrap();
    cmd.env_remove("NEURONET_GRAPH")
        .env_remove("NEURONET_MAX_MEMORY_MB")
        .env_remove("RUST_LOG")
        .arg("--quiet")
        .arg("--graph")
        .arg(graph.path());
    cmd
}

const TRIANGLE: &str = "# triangle\n0 1\n1 2\n0 2\n";

#[test]
fn test_stats() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes: 3"))
        .stdout(predicate::str::contains("edges: 3"))
        .stdout(predicate::str::contains("skipped_lines: 1"));
}

#[test]
fn test_bfs_default_start_and_depth() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .arg("bfs")
        .assert()
        .success()
        .stdout("visited 3 nodes from 0 within depth 2\n0\t0\n1\t1\n2\t1\n");
}

#[test]
fn test_bfs_depth_zero() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .args(["bfs", "--start", "1", "--depth", "0"])
        .assert()
        .success()
        .stdout("visited 1 nodes from 1 within depth 0\n1\t0\n");
}

#[test]
fn test_bfs_negative_depth_fails() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .args(["bfs", "--depth", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depth must be non-negative"));
}

#[test]
fn test_degree_and_neighbors() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .args(["degree", "--node", "0"])
        .assert()
        .success()
        .stdout("node 0 has degree 2\n");
    neuronet(&g)
        .args(["neighbors", "--node", "0"])
        .assert()
        .success()
        .stdout("1 2\n");
}

#[test]
fn test_negative_node_is_empty_not_error() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .args(["degree", "--node=-1"])
        .assert()
        .success()
        .stdout("node -1 has degree 0\n");
    neuronet(&g)
        .args(["bfs", "--start", "-5"])
        .assert()
        .success()
        .stdout("visited 0 nodes from -5 within depth 2\n");
}

#[test]
fn test_top_json() {
    let g = edge_file("0 1\n0 2\n0 3\n1 2\n");
    let output = neuronet(&g)
        .args(["--json", "top", "-n", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"node_id": 0, "degree": 3},
            {"node_id": 1, "degree": 1},
        ])
    );
}

#[test]
fn test_subgraph() {
    let g = edge_file("0 1\n1 2\n2 3\n3 0\n");
    neuronet(&g)
        .args(["subgraph", "--start", "0", "--depth", "1"])
        .assert()
        .success()
        .stdout("nodes: 2, edges: 1\n0 -> 1\n");
}

#[test]
fn test_shell_session() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .arg("shell")
        .write_stdin("degree 1\nnonsense\nneighbors 0\nquit\ndegree 0\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("node 1 has degree 1\nerror: unknown command"))
        .stdout(predicate::str::ends_with("1 2\n"));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    Command::cargo_bin("neuronet")
        .unwrap()
        .env_remove("NEURONET_GRAPH")
        .arg("--quiet")
        .arg("--graph")
        .arg(&missing)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load graph from"));
}

#[test]
fn test_graph_from_environment() {
    let g = edge_file(TRIANGLE);
    Command::cargo_bin("neuronet")
        .unwrap()
        .env("NEURONET_GRAPH", g.path())
        .args(["--quiet", "degree", "--node", "1"])
        .assert()
        .success()
        .stdout("node 1 has degree 1\n");
}

#[test]
fn test_no_graph_given() {
    Command::cargo_bin("neuronet")
        .unwrap()
        .env_remove("NEURONET_GRAPH")
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no graph file given"));
}

#[test]
fn test_memory_limit_out_of_range_rejected() {
    let g = edge_file(TRIANGLE);
    neuronet(&g)
        .args(["--max-memory-mb", "8", "stats"])
        .assert()
        .failure();
}
