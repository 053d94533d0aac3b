//! Response header handling configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Transmit only the newest `Set-Cookie` per cookie name
    /// Env: CG_HTTP_DEDUPE_SET_COOKIES
    /// Default: false
    pub dedupe_set_cookies: bool,

    /// Keep a SameSite value the application set itself
    /// Env: CG_HTTP_PRESERVE_EXPLICIT_SAMESITE
    /// Default: false
    pub preserve_explicit_samesite: bool,
}

impl HttpConfig {
    pub fn merge(&mut self, other: Self) {
        self.dedupe_set_cookies = other.dedupe_set_cookies;
        self.preserve_explicit_samesite = other.preserve_explicit_samesite;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(dedupe) = env::var("CG_HTTP_DEDUPE_SET_COOKIES") {
            self.dedupe_set_cookies = dedupe.parse().unwrap_or(self.dedupe_set_cookies);
        }

        if let Ok(preserve) = env::var("CG_HTTP_PRESERVE_EXPLICIT_SAMESITE") {
            self.preserve_explicit_samesite = preserve.parse().unwrap_or(self.preserve_explicit_samesite);
        }
    }

    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
