use std::io::Write;

use anyhow::Result;
use neuronet_core::{max_degree_node, CsrEngine, GraphBackend};
use serde_json::json;

use crate::util::{write_json, OutputFormat};

/// Summary of the loaded graph: counts, memory, timing, most connected node.
pub fn render(engine: &CsrEngine, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let Some(report) = engine.report() else {
        return match format {
            OutputFormat::Json => write_json(out, &json!({ "status": "not_loaded" })),
            OutputFormat::Text => {
                writeln!(out, "status: not_loaded")?;
                Ok(())
            }
        };
    };
    let hub = max_degree_node(engine.graph());

    match format {
        OutputFormat::Json => write_json(
            out,
            &json!({
                "status": "loaded",
                "source": report.source.display().to_string(),
                "node_count": engine.node_count(),
                "edge_count": engine.edge_count(),
                "max_id": report.max_id,
                "malformed_lines": report.malformed_lines,
                "skipped_lines": report.skipped_lines,
                "memory_bytes": report.memory_bytes,
                "load_time_ms": report.elapsed.as_secs_f64() * 1000.0,
                "max_degree_node": hub.map(|h| json!({ "node_id": h.node_id, "degree": h.degree })),
            }),
        ),
        OutputFormat::Text => {
            writeln!(out, "status: loaded")?;
            writeln!(out, "source: {}", report.source.display())?;
            writeln!(out, "nodes: {}", engine.node_count())?;
            writeln!(out, "edges: {}", engine.edge_count())?;
            writeln!(out, "max_id: {}", report.max_id)?;
            writeln!(out, "malformed_lines: {}", report.malformed_lines)?;
            writeln!(out, "skipped_lines: {}", report.skipped_lines)?;
            writeln!(out, "memory_mb: {:.2}", report.memory_mb())?;
            writeln!(out, "load_time_ms: {:.1}", report.elapsed.as_secs_f64() * 1000.0)?;
            if let Some(h) = hub {
                writeln!(out, "max_degree_node: {} (degree {})", h.node_id, h.degree)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn render_to_string(engine: &CsrEngine, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        render(engine, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_status_not_loaded() {
        let engine = CsrEngine::default();
        assert_eq!(render_to_string(&engine, OutputFormat::Text), "status: not_loaded\n");
    }

    #[test]
    fn test_status_not_loaded_json_has_no_hub() {
        let engine = CsrEngine::default();
        let text = render_to_string(&engine, OutputFormat::Json);
        assert_eq!(text, "{\"status\":\"not_loaded\"}\n");
    }

    #[test]
    fn test_status_text() {
        let mut engine = CsrEngine::default();
        engine
            .load_reader(Cursor::new("# c\n0 1\n1 2\n0 2\nbad\n"), "tri.txt")
            .unwrap();
        let text = render_to_string(&engine, OutputFormat::Text);
        assert!(text.contains("source: tri.txt\n"));
        assert!(text.contains("nodes: 3\n"));
        assert!(text.contains("edges: 3\n"));
        assert!(text.contains("malformed_lines: 1\n"));
        assert!(text.contains("skipped_lines: 1\n"));
        assert!(text.contains("max_degree_node: 0 (degree 2)\n"));
    }

    #[test]
    fn test_status_json() {
        let mut engine = CsrEngine::default();
        engine.load_reader(Cursor::new("0 1\n1 2\n0 2\n"), "tri.txt").unwrap();
        let text = render_to_string(&engine, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "loaded");
        assert_eq!(value["node_count"], 3);
        assert_eq!(value["edge_count"], 3);
        assert_eq!(value["max_degree_node"]["node_id"], 0);
    }
}
