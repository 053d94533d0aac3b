//! Configuration for the cookie policy engine
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Environment Variables** (`CG_*`)
//! 2. **Config File** (`cookiegate.toml`)
//! 3. **Defaults**
//!
//! Only structural problems fail [`CookieGateConfig::validate`]. Bad cookie
//! patterns or enum values are reported as diagnostics when the engine
//! resolves the configuration.
//!
//! # Example
//!
//! ```no_run
//! use cookiegate_core::config::CookieGateConfig;
//!
//! let config = CookieGateConfig::load_from("cookiegate.toml")?;
//! config.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod http;
pub mod logging;
pub mod samesite;
pub mod sessions;

pub use http::HttpConfig;
pub use logging::LoggingConfig;
pub use samesite::{EndpointConfig, SameSiteConfig};
pub use sessions::SessionsConfig;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "cookiegate.toml";

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieGateConfig {
    /// Named policies (`[[samesite]]`), referenced by endpoints
    pub samesite: Vec<SameSiteConfig>,
    /// Listener endpoints (`[[endpoint]]`)
    #[serde(rename = "endpoint")]
    pub endpoints: Vec<EndpointConfig>,
    pub session: SessionsConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl CookieGateConfig {
    /// Load `cookiegate.toml` from the working directory, then the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from TOML file only
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Merge another config into this one (other takes priority)
    ///
    /// Policy and endpoint lists are replaced as a whole when `other` has any.
    pub fn merge(&mut self, other: Self) {
        if !other.samesite.is_empty() {
            self.samesite = other.samesite;
        }
        if !other.endpoints.is_empty() {
            self.endpoints = other.endpoints;
        }
        self.session.merge(other.session);
        self.http.merge(other.http);
        self.logging.merge(other.logging);
    }

    pub fn apply_env_vars(&mut self) {
        self.session.apply_env_vars();
        self.http.apply_env_vars();
        self.logging.apply_env_vars();
    }

    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for (index, samesite) in self.samesite.iter().enumerate() {
            let Some(id) = samesite.id.as_deref() else {
                bail!("samesite entry #{} has no id; top-level samesite policies must be referenceable", index + 1);
            };
            if !ids.insert(id) {
                bail!("Duplicate samesite id: {}", id);
            }
        }

        let mut endpoints = HashSet::new();
        for endpoint in &self.endpoints {
            if endpoint.id.trim().is_empty() {
                bail!("Endpoint without id");
            }
            if !endpoints.insert(endpoint.id.as_str()) {
                bail!("Duplicate endpoint id: {}", endpoint.id);
            }
        }

        self.session.validate()?;
        self.http.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn samesite_by_id(&self, id: &str) -> Option<&SameSiteConfig> {
        self.samesite.iter().find(|s| s.id.as_deref() == Some(id))
    }
}
