use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, error};

use crate::error::{GraphError, Result};
use crate::graph::NodeId;

/// Directed edges in file order, plus what the parse observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    /// `(src, dst)` pairs in the order they appeared.
    pub edges: Vec<(NodeId, NodeId)>,
    /// Largest id seen on either end of any edge; 0 when there are no edges.
    pub max_id: NodeId,
    /// Data lines dropped because they did not hold two integer ids.
    pub malformed_lines: usize,
    /// Blank and `#` comment lines.
    pub skipped_lines: usize,
}

impl EdgeList {
    /// Rows the CSR will have: every id up to `max_id` gets one.
    pub fn num_nodes(&self) -> usize {
        self.max_id as usize + 1
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Open `path` and parse it as a whitespace-separated edge list.
///
/// An unopenable file is reported on the diagnostic channel and returned as
/// [`GraphError::SourceUnreadable`], so callers can tell it apart from a file
/// that simply holds no edges.
pub fn parse_edge_file(path: &Path) -> Result<EdgeList> {
    let file = File::open(path).map_err(|source| {
        error!(path = %path.display(), %source, "could not open edge list");
        GraphError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(parse_edge_list(BufReader::new(file))?)
}

/// Parse an edge list from any buffered reader.
///
/// Blank lines and lines starting with `#` are skipped. Every other line must
/// start with two non-negative integers `src dst`; anything after them is
/// ignored. Lines that fail to parse (including non-UTF-8 bytes) are dropped
/// without aborting the parse.
pub fn parse_edge_list<R: BufRead>(mut reader: R) -> io::Result<EdgeList> {
    let mut list = EdgeList::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            debug!(line = line_no, "dropping non-UTF-8 line");
            list.malformed_lines += 1;
            continue;
        };
        let line = line.trim_end_matches(['\n', '\r']);

        if line.is_empty() || line.starts_with('#') {
            list.skipped_lines += 1;
            continue;
        }

        match parse_edge_line(line) {
            Some((src, dst)) => {
                list.max_id = list.max_id.max(src).max(dst);
                list.edges.push((src, dst));
            }
            None => {
                debug!(line = line_no, content = line, "dropping malformed edge line");
                list.malformed_lines += 1;
            }
        }
    }

    Ok(list)
}

fn parse_edge_line(line: &str) -> Option<(NodeId, NodeId)> {
    let mut tokens = line.split_whitespace();
    let src = tokens.next()?.parse().ok()?;
    let dst = tokens.next()?.parse().ok()?;
    Some((src, dst))
}
