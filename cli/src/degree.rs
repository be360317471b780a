use std::io::Write;

use anyhow::Result;
use neuronet_core::{degree_ranking, CsrEngine, GraphBackend};
use serde_json::json;

use crate::util::{join_ids, write_json, OutputFormat};

pub fn render_degree(
    engine: &CsrEngine,
    node: i64,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let degree = engine.degree(node);
    match format {
        OutputFormat::Json => write_json(out, &json!({ "node": node, "degree": degree })),
        OutputFormat::Text => {
            writeln!(out, "node {} has degree {}", node, degree)?;
            Ok(())
        }
    }
}

pub fn render_neighbors(
    engine: &CsrEngine,
    node: i64,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let neighbors = engine.neighbors(node);
    match format {
        OutputFormat::Json => write_json(out, &json!({ "node": node, "neighbors": neighbors })),
        OutputFormat::Text => {
            writeln!(out, "{}", join_ids(neighbors))?;
            Ok(())
        }
    }
}

/// Most connected nodes by out-degree; `top_n == 0` lists every node.
pub fn render_top(
    engine: &CsrEngine,
    top_n: usize,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let ranked = degree_ranking(engine.graph(), top_n);
    match format {
        OutputFormat::Json => write_json(
            out,
            &json!(ranked
                .iter()
                .map(|d| json!({ "node_id": d.node_id, "degree": d.degree }))
                .collect::<Vec<_>>()),
        ),
        OutputFormat::Text => {
            for d in &ranked {
                writeln!(out, "{}\t{}", d.node_id, d.degree)?;
            }
            Ok(())
        }
    }
}
