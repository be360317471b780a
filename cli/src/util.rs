use std::io::Write;

use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validate that a depth parameter is non-negative.
pub fn check_non_negative(value: i64, param_name: &str) -> Result<u32> {
    if value < 0 {
        bail!("{} must be non-negative, got {}", param_name, value);
    }
    u32::try_from(value).map_err(|_| anyhow::anyhow!("{} too large: {}", param_name, value))
}

/// Write one compact JSON document per line.
pub fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Space-separated ids, as printed for neighbor and BFS lists.
pub fn join_ids<T: ToString>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
