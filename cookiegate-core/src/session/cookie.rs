//! Session cookie writer

use chrono::{DateTime, Utc};

use super::DEFAULT_SESSION_COOKIE_NAME;
use crate::http::ResponseCookie;

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Cookie domain
    pub domain: Option<String>,

    /// Cookie path
    pub path: String,

    /// HttpOnly flag (no JavaScript access)
    pub http_only: bool,

    /// Max age in seconds
    pub max_age: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            domain: None,
            path: "/".to_string(),
            http_only: true, // XSS protection
            max_age: None,   // browser-session lifetime
        }
    }
}

/// Session cookie builder
///
/// SameSite, Secure and Partitioned are not set here; the engine applies them
/// from the session override when the header goes out.
pub struct SessionCookie {
    config: CookieConfig,
}

impl SessionCookie {
    /// Create a new session cookie builder
    pub fn new(config: CookieConfig) -> Self {
        Self { config }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Build the cookie carrying `session_id`
    pub fn build(&self, session_id: &str, expires_at: Option<DateTime<Utc>>) -> ResponseCookie {
        let mut cookie = ResponseCookie::new(&self.config.name, session_id).with_path(&self.config.path);

        if let Some(ref domain) = self.config.domain {
            cookie = cookie.with_domain(domain);
        }
        if let Some(max_age) = self.config.max_age {
            cookie = cookie.with_max_age(max_age);
        }
        if let Some(expires) = expires_at {
            cookie = cookie.with_expires(expires);
        }

        cookie.with_http_only(self.config.http_only)
    }

    /// Build a delete cookie (Max-Age=0)
    pub fn build_delete(&self) -> ResponseCookie {
        ResponseCookie::new(&self.config.name, "").with_path(&self.config.path).with_max_age(0)
    }
}
