#![allow(dead_code)]
use cookiegate_core::config::CookieGateConfig;
use cookiegate_core::diagnostics::MemorySink;
use cookiegate_core::engine::CookiePolicyEngine;
use cookiegate_core::http::HttpResponse;
use cucumber::World as CucumberWorld;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// State shared by the steps of one scenario
#[derive(Debug, CucumberWorld)]
#[world(init = Self::new)]
pub struct CookieGateWorld {
    pub config: CookieGateConfig,
    pub sink: Arc<MemorySink>,
    pub engine: Option<CookiePolicyEngine>,
    pub response: HttpResponse,
    pub output: Vec<String>,
    pub last_generation: u64,
    pub last_error: Option<String>,
    pub temp_dir: Option<TempDir>,
}

impl CookieGateWorld {
    pub fn new() -> Self {
        Self {
            config: CookieGateConfig::default(),
            sink: Arc::new(MemorySink::new()),
            engine: None,
            response: HttpResponse::ok(),
            output: Vec::new(),
            last_generation: 0,
            last_error: None,
            temp_dir: None,
        }
    }

    /// Engine built from the scenario's configuration, on first use
    pub fn engine(&mut self) -> &CookiePolicyEngine {
        let config = &self.config;
        let sink = self.sink.clone();
        self.engine.get_or_insert_with(|| CookiePolicyEngine::from_config(config, sink))
    }

    /// Replace the configuration with a TOML document
    pub fn load_toml(&mut self, toml: &str) {
        match CookieGateConfig::from_toml(toml) {
            Ok(config) => self.config = config,
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Write `content` to the scenario's temporary config file
    pub fn write_config_file(&mut self, content: &str) -> std::io::Result<PathBuf> {
        let dir = match self.temp_dir.take() {
            Some(dir) => dir,
            None => TempDir::new()?,
        };
        let path = dir.path().join("cookiegate.toml");
        self.temp_dir = Some(dir);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn diagnostic_codes(&self) -> Vec<String> {
        self.sink.entries().iter().map(|d| d.code.to_string()).collect()
    }
}
