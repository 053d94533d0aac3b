//! Session cookie policy
//!
//! The session cookie is the one cookie the server writes on its own behalf.
//! Its SameSite / Secure / Partitioned handling is configured separately from
//! the general `samesite` policy and takes priority over it:
//! - [`SessionCookiePolicy`] - the override consulted by the classifier
//! - [`SessionCookie`] - builds the session `Set-Cookie` before the engine sees it
//!
//! # Example
//!
//! ```no_run
//! use cookiegate_core::session::{PartitionedSetting, SessionCookiePolicy, SessionSameSite};
//!
//! let policy = SessionCookiePolicy::new("JSESSIONID")
//!     .with_same_site(SessionSameSite::None)
//!     .with_partitioned(PartitionedSetting::True);
//! ```

mod cookie;

pub use cookie::{CookieConfig, SessionCookie};

use std::fmt;
use std::str::FromStr;

use crate::error::CookieGateError;
use crate::policy::SameSite;

/// Name the session subsystem gives its cookie unless configured otherwise
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "session_id";

/// SameSite setting for the session cookie (`cookieSameSite`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionSameSite {
    Lax,
    Strict,
    None,
    /// The override is off; the session cookie is treated like any other cookie
    #[default]
    Disabled,
}

impl SessionSameSite {
    /// The attribute value, or `None` when disabled
    pub fn as_same_site(self) -> Option<SameSite> {
        match self {
            SessionSameSite::Lax => Some(SameSite::Lax),
            SessionSameSite::Strict => Some(SameSite::Strict),
            SessionSameSite::None => Some(SameSite::None),
            SessionSameSite::Disabled => None,
        }
    }
}

impl FromStr for SessionSameSite {
    type Err = CookieGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SessionSameSite::Lax),
            "strict" => Ok(SessionSameSite::Strict),
            "none" => Ok(SessionSameSite::None),
            "disabled" => Ok(SessionSameSite::Disabled),
            _ => Err(CookieGateError::InvalidEnumValue { property: "cookieSameSite", value: s.to_string() }),
        }
    }
}

impl fmt::Display for SessionSameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionSameSite::Lax => "Lax",
            SessionSameSite::Strict => "Strict",
            SessionSameSite::None => "None",
            SessionSameSite::Disabled => "Disabled",
        })
    }
}

/// Partitioned setting for the session cookie (`cookiePartitioned`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionedSetting {
    True,
    False,
    /// Use the general samesite policy's `partitioned` flag
    #[default]
    Defer,
}

impl FromStr for PartitionedSetting {
    type Err = CookieGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(PartitionedSetting::True),
            "false" => Ok(PartitionedSetting::False),
            "defer" => Ok(PartitionedSetting::Defer),
            _ => Err(CookieGateError::InvalidEnumValue { property: "cookiePartitioned", value: s.to_string() }),
        }
    }
}

impl fmt::Display for PartitionedSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PartitionedSetting::True => "true",
            PartitionedSetting::False => "false",
            PartitionedSetting::Defer => "defer",
        })
    }
}

/// Session cookie override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookiePolicy {
    /// Cookie name, matched case-sensitively
    pub cookie_name: String,
    pub same_site: SessionSameSite,
    pub secure: bool,
    pub partitioned: PartitionedSetting,
}

impl Default for SessionCookiePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE_NAME)
    }
}

impl SessionCookiePolicy {
    /// Disabled override for the given cookie name
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            same_site: SessionSameSite::Disabled,
            secure: false,
            partitioned: PartitionedSetting::Defer,
        }
    }

    pub fn with_same_site(mut self, same_site: SessionSameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_partitioned(mut self, partitioned: PartitionedSetting) -> Self {
        self.partitioned = partitioned;
        self
    }

    /// Whether this override decides the attributes of `name`
    pub fn applies_to(&self, name: &str) -> bool {
        self.same_site != SessionSameSite::Disabled && self.cookie_name == name
    }
}
