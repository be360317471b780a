use anyhow::{Context, Result};
use neuronet_core::{CsrEngine, GraphBackend};

use crate::config::Settings;

/// Build the engine for this run and load the configured edge list into it.
pub fn load_graph(settings: &Settings) -> Result<CsrEngine> {
    let mut engine = CsrEngine::new(settings.load_options);
    engine
        .load(&settings.graph)
        .with_context(|| format!("failed to load graph from {}", settings.graph.display()))?;
    Ok(engine)
}
