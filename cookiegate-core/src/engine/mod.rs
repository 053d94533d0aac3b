//! Cookie policy engine
//!
//! The engine owns the active [`PolicySnapshot`]. Request workers load it
//! without locking and run every `Set-Cookie` of a response against that one
//! snapshot. Reconfiguration builds a complete new snapshot off to the side
//! and publishes it with a single atomic swap; requests already holding the
//! old snapshot finish with it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cookiegate_core::config::{CookieGateConfig, EndpointConfig, SameSiteConfig};
//! use cookiegate_core::diagnostics::LogSink;
//! use cookiegate_core::engine::CookiePolicyEngine;
//!
//! let mut config = CookieGateConfig::default();
//! config.endpoints.push(EndpointConfig::new("http").with_samesite(SameSiteConfig::default().none("*")));
//!
//! let engine = CookiePolicyEngine::from_config(&config, Arc::new(LogSink));
//! assert_eq!(engine.process("http", "a=b"), "a=b; Secure; SameSite=None");
//! ```

mod snapshot;

pub use snapshot::PolicySnapshot;

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use arc_swap::ArcSwap;

use crate::config::CookieGateConfig;
use crate::diagnostics::{DiagnosticSink, LogSink};

/// Endpoint id used when the caller does not name one
pub const DEFAULT_ENDPOINT: &str = "defaultHttpEndpoint";

pub struct CookiePolicyEngine {
    current: ArcSwap<PolicySnapshot>,
    sink: Arc<dyn DiagnosticSink>,
    // Serializes writers only; readers never touch it
    publish: Mutex<()>,
}

impl CookiePolicyEngine {
    /// Engine with an empty snapshot (generation 0)
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { current: ArcSwap::from_pointee(PolicySnapshot::empty()), sink, publish: Mutex::new(()) }
    }

    pub fn from_config(config: &CookieGateConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        let engine = Self::new(sink);
        engine.reconfigure(config);
        engine
    }

    /// Engine reporting diagnostics through the `log` facade
    pub fn with_log_sink(config: &CookieGateConfig) -> Self {
        Self::from_config(config, Arc::new(LogSink))
    }

    /// Build and publish a snapshot for `config`; returns its generation
    ///
    /// Diagnostics reach the sink after the new snapshot is visible and
    /// before the next writer can publish, so batches arrive in generation
    /// order.
    pub fn reconfigure(&self, config: &CookieGateConfig) -> u64 {
        let _guard = self.publish.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let generation = self.current.load().generation() + 1;
        let mut diagnostics = Vec::new();
        let snapshot = PolicySnapshot::build(config, generation, &mut diagnostics);
        self.current.store(Arc::new(snapshot));

        log::info!(
            "Published cookie policy generation {} ({} endpoints, {} diagnostics)",
            generation,
            config.endpoints.len(),
            diagnostics.len()
        );
        self.sink.emit_all(&diagnostics);
        generation
    }

    /// Load, validate and publish a configuration file
    ///
    /// On error the active snapshot is left in place.
    pub fn reload_from(&self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let config = CookieGateConfig::load_from(path).and_then(|config| {
            config.validate()?;
            Ok(config)
        });

        match config {
            Ok(config) => Ok(self.reconfigure(&config)),
            Err(e) => {
                log::error!(
                    "Keeping cookie policy generation {}: {} could not be loaded: {:#}",
                    self.generation(),
                    path.display(),
                    e
                );
                Err(e)
            }
        }
    }

    /// The active snapshot; hold it for the duration of one response
    pub fn snapshot(&self) -> Arc<PolicySnapshot> {
        self.current.load_full()
    }

    pub fn generation(&self) -> u64 {
        self.current.load().generation()
    }

    /// Classify and rewrite one raw `Set-Cookie` value with the active snapshot
    pub fn process(&self, endpoint: &str, raw: &str) -> String {
        self.current.load().process(endpoint, raw)
    }
}

impl std::fmt::Debug for CookiePolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookiePolicyEngine").field("generation", &self.generation()).finish()
    }
}
