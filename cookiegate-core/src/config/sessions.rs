//! Session cookie configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::session::{PartitionedSetting, SessionCookiePolicy, SessionSameSite, DEFAULT_SESSION_COOKIE_NAME};

/// `[session]` section
///
/// The enum settings stay strings here so a bad value in the file degrades to
/// the default with a diagnostic instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Name of the session cookie
    /// Env: CG_SESSION_COOKIE_NAME
    /// Default: "session_id"
    pub cookie_name: String,

    /// "Lax", "Strict", "None" or "Disabled" (case-insensitive)
    /// Env: CG_SESSION_COOKIE_SAMESITE
    /// Default: "Disabled"
    pub cookie_samesite: String,

    /// Add Secure to the session cookie
    /// Env: CG_SESSION_COOKIE_SECURE
    /// Default: false
    pub cookie_secure: bool,

    /// "true", "false" or "defer" (case-insensitive)
    /// Env: CG_SESSION_COOKIE_PARTITIONED
    /// Default: "defer"
    pub cookie_partitioned: String,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            cookie_samesite: SessionSameSite::default().to_string(),
            cookie_secure: false,
            cookie_partitioned: PartitionedSetting::default().to_string(),
        }
    }
}

impl SessionsConfig {
    pub fn merge(&mut self, other: Self) {
        self.cookie_name = other.cookie_name;
        self.cookie_samesite = other.cookie_samesite;
        self.cookie_secure = other.cookie_secure;
        self.cookie_partitioned = other.cookie_partitioned;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(name) = env::var("CG_SESSION_COOKIE_NAME") {
            self.cookie_name = name;
        }

        if let Ok(samesite) = env::var("CG_SESSION_COOKIE_SAMESITE") {
            self.cookie_samesite = samesite;
        }

        if let Ok(secure) = env::var("CG_SESSION_COOKIE_SECURE") {
            self.cookie_secure = secure.parse().unwrap_or(self.cookie_secure);
        }

        if let Ok(partitioned) = env::var("CG_SESSION_COOKIE_PARTITIONED") {
            self.cookie_partitioned = partitioned;
        }
    }

    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Build the session override, falling back to defaults for bad values
    pub fn resolve(&self, diagnostics: &mut Vec<Diagnostic>) -> SessionCookiePolicy {
        let same_site = self.cookie_samesite.parse::<SessionSameSite>().unwrap_or_else(|err| {
            diagnostics.push(invalid_value(err, SessionSameSite::default()));
            SessionSameSite::default()
        });

        let partitioned = self.cookie_partitioned.parse::<PartitionedSetting>().unwrap_or_else(|err| {
            diagnostics.push(invalid_value(err, PartitionedSetting::default()));
            PartitionedSetting::default()
        });

        let name = if self.cookie_name.trim().is_empty() {
            DEFAULT_SESSION_COOKIE_NAME
        } else {
            self.cookie_name.trim()
        };

        SessionCookiePolicy::new(name)
            .with_same_site(same_site)
            .with_secure(self.cookie_secure)
            .with_partitioned(partitioned)
    }
}

fn invalid_value(err: crate::error::CookieGateError, fallback: impl std::fmt::Display) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::InvalidEnumValue, format!("{}; using {}", err, fallback))
}
