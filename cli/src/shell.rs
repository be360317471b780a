//! Line-oriented query loop over a graph loaded once.
//!
//! Each input line is one command. Failures are reported inline and the
//! loop keeps going, so a bad query never costs a reload.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use neuronet_core::CsrEngine;
use tracing::debug;

use crate::util::OutputFormat;
use crate::{degree, neighborhood, status, subgraph};

const HELP: &str = "\
commands:
  stats                 summary of the loaded graph
  bfs <start> <depth>   nodes within <depth> hops of <start>
  degree <node>         out-degree of <node>
  neighbors <node>      direct successors of <node>
  top [n]               n most connected nodes (default 10, 0 = all)
  subgraph <start> <depth>
                        neighborhood of <start> with its edges
  help                  this text
  quit | exit           leave the shell";

const DEFAULT_TOP: usize = 10;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Stats,
    Bfs { start: i64, depth: i64 },
    Degree(i64),
    Neighbors(i64),
    Top(usize),
    Subgraph { start: i64, depth: i64 },
    Help,
    Quit,
}

fn parse_int<T: std::str::FromStr>(token: Option<&str>, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| anyhow!("missing {what}"))?;
    token
        .parse()
        .map_err(|_| anyhow!("invalid {what}: {token:?}"))
}

fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };

    let cmd = match word {
        "stats" | "status" => Command::Stats,
        "bfs" => Command::Bfs {
            start: parse_int(parts.next(), "start node")?,
            depth: parse_int(parts.next(), "depth")?,
        },
        "degree" => Command::Degree(parse_int(parts.next(), "node")?),
        "neighbors" => Command::Neighbors(parse_int(parts.next(), "node")?),
        "top" => match parts.next() {
            Some(n) => Command::Top(parse_int(Some(n), "count")?),
            None => Command::Top(DEFAULT_TOP),
        },
        "subgraph" => Command::Subgraph {
            start: parse_int(parts.next(), "start node")?,
            depth: parse_int(parts.next(), "depth")?,
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}, try `help`"),
    };

    if let Some(extra) = parts.next() {
        bail!("unexpected argument {extra:?}");
    }
    Ok(Some(cmd))
}

fn execute(
    engine: &CsrEngine,
    cmd: Command,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        Command::Stats => status::render(engine, format, out),
        Command::Bfs { start, depth } => neighborhood::render(engine, start, depth, format, out),
        Command::Degree(node) => degree::render_degree(engine, node, format, out),
        Command::Neighbors(node) => degree::render_neighbors(engine, node, format, out),
        Command::Top(n) => degree::render_top(engine, n, format, out),
        Command::Subgraph { start, depth } => subgraph::render(engine, start, depth, format, out),
        Command::Help => {
            writeln!(out, "{HELP}")?;
            Ok(())
        }
        Command::Quit => Ok(()),
    }
}

/// Serve queries from `input` until `quit`, `exit` or end of input.
pub fn run<R: BufRead, W: Write>(
    engine: &CsrEngine,
    format: OutputFormat,
    input: R,
    mut out: W,
    prompt: bool,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "neuronet> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read query")?;

        let cmd = match parse_command(line.trim()) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };
        if cmd == Command::Quit {
            break;
        }

        debug!(query = line.trim(), "shell query");
        if let Err(e) = execute(engine, cmd, format, &mut out) {
            writeln!(out, "error: {e:#}")?;
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn engine() -> CsrEngine {
        let mut engine = CsrEngine::default();
        engine
            .load_reader(Cursor::new("0 1\n1 2\n0 2\n2 3\n"), "g")
            .unwrap();
        engine
    }

    fn session(script: &str) -> String {
        let mut out = Vec::new();
        run(&engine(), OutputFormat::Text, Cursor::new(script), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(
            parse_command("bfs 0 2").unwrap(),
            Some(Command::Bfs { start: 0, depth: 2 })
        );
        assert_eq!(parse_command("top").unwrap(), Some(Command::Top(10)));
        assert_eq!(parse_command("top 0").unwrap(), Some(Command::Top(0)));
        assert_eq!(parse_command("degree -3").unwrap(), Some(Command::Degree(-3)));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("bfs 0").is_err());
        assert!(parse_command("degree x").is_err());
        assert!(parse_command("degree 1 2").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_session_queries() {
        let text = session("degree 0\nneighbors 0\nbfs 0 1\n");
        assert_eq!(
            text,
            "node 0 has degree 2\n1 2\nvisited 3 nodes from 0 within depth 1\n0\t0\n1\t1\n2\t1\n"
        );
    }

    #[test]
    fn test_session_errors_do_not_stop_loop() {
        let text = session("bogus\nbfs 0 -1\ndegree 3\n");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("error: unknown command"));
        assert_eq!(lines[1], "error: depth must be non-negative, got -1");
        assert_eq!(lines[2], "node 3 has degree 0");
    }

    #[test]
    fn test_session_quit_stops_reading() {
        let text = session("degree 0\nquit\ndegree 1\n");
        assert_eq!(text, "node 0 has degree 2\n");
    }

    #[test]
    fn test_session_blank_lines_ignored() {
        assert_eq!(session("\n   \n"), "");
    }
}
