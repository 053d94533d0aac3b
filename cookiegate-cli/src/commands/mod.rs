pub mod check;
pub mod evaluate;
pub mod init;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use cookiegate_core::config::CookieGateConfig;
use cookiegate_core::diagnostics::MemorySink;
use cookiegate_core::engine::CookiePolicyEngine;

/// Load and validate a configuration, then build an engine that records diagnostics
pub fn load_engine(path: &Path) -> Result<(CookieGateConfig, CookiePolicyEngine, Arc<MemorySink>)> {
    let config = CookieGateConfig::load_from(path)?;
    config.validate()?;
    log::debug!("Loaded {} endpoint(s) from {}", config.endpoints.len(), path.display());

    let sink = Arc::new(MemorySink::new());
    let engine = CookiePolicyEngine::from_config(&config, sink.clone());
    Ok((config, engine, sink))
}
