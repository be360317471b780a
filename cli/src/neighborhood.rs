use std::io::Write;

use anyhow::Result;
use neuronet_core::CsrEngine;
use serde_json::json;

use crate::util::{check_non_negative, write_json, OutputFormat};

/// Bounded BFS from `start`, one line per discovered node with its distance.
pub fn render(
    engine: &CsrEngine,
    start: i64,
    max_depth: i64,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let max_depth = check_non_negative(max_depth, "depth")?;
    let result = engine.bfs_neighborhood(start, max_depth);

    match format {
        OutputFormat::Json => write_json(
            out,
            &json!({
                "start": start,
                "max_depth": max_depth,
                "visited": result.len(),
                "nodes": result
                    .nodes
                    .iter()
                    .map(|n| json!({ "node_id": n.node_id, "distance": n.distance }))
                    .collect::<Vec<_>>(),
            }),
        ),
        OutputFormat::Text => {
            writeln!(
                out,
                "visited {} nodes from {} within depth {}",
                result.len(),
                start,
                max_depth
            )?;
            for n in &result.nodes {
                writeln!(out, "{}\t{}", n.node_id, n.distance)?;
            }
            Ok(())
        }
    }
}
