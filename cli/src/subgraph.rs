use std::io::Write;

use anyhow::Result;
use neuronet_core::{extract_subgraph, to_node_id, CsrEngine, SubgraphResult};
use serde_json::json;

use crate::util::{check_non_negative, write_json, OutputFormat};

/// Nodes within `max_depth` of `start` and the edges among them, the shape
/// a caller needs to draw the neighborhood.
pub fn render(
    engine: &CsrEngine,
    start: i64,
    max_depth: i64,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let max_depth = check_non_negative(max_depth, "depth")?;
    let sub = to_node_id(start)
        .map(|s| extract_subgraph(engine.graph(), s, max_depth))
        .unwrap_or_else(SubgraphResult::default);

    match format {
        OutputFormat::Json => write_json(
            out,
            &json!({
                "start": start,
                "max_depth": max_depth,
                "node_count": sub.node_count,
                "edges": sub
                    .edges
                    .iter()
                    .map(|e| [e.from_id, e.to_id])
                    .collect::<Vec<_>>(),
            }),
        ),
        OutputFormat::Text => {
            writeln!(out, "nodes: {}, edges: {}", sub.node_count, sub.edges.len())?;
            for e in &sub.edges {
                writeln!(out, "{} -> {}", e.from_id, e.to_id)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(start: i64, depth: i64, format: OutputFormat) -> String {
        let mut engine = CsrEngine::default();
        engine
            .load_reader(Cursor::new("0 1\n1 2\n0 2\n2 3\n3 0\n"), "g")
            .unwrap();
        let mut buf = Vec::new();
        render(&engine, start, depth, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_subgraph_text() {
        let text = run(0, 1, OutputFormat::Text);
        assert_eq!(text, "nodes: 3, edges: 3\n0 -> 1\n0 -> 2\n1 -> 2\n");
    }

    #[test]
    fn test_subgraph_json() {
        let value: serde_json::Value = serde_json::from_str(&run(2, 1, OutputFormat::Json)).unwrap();
        assert_eq!(value["node_count"], 2);
        assert_eq!(value["edges"], json!([[2, 3]]));
    }

    #[test]
    fn test_subgraph_unknown_start() {
        assert_eq!(run(-1, 2, OutputFormat::Text), "nodes: 0, edges: 0\n");
    }
}
