//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use cookiegate_core::prelude::*;
//! ```

// === Configuration ===
pub use crate::config::{CookieGateConfig, EndpointConfig, SameSiteConfig};
pub use crate::logging::{init_logging, LoggingConfig};

// === Engine ===
pub use crate::engine::{CookiePolicyEngine, PolicySnapshot, DEFAULT_ENDPOINT};
pub use crate::diagnostics::{DiagnosticSink, LogSink, MemorySink};

// === Policy model ===
pub use crate::classify::{classify, AttributeDecision};
pub use crate::policy::{SameSite, SameSitePolicy};
pub use crate::session::{PartitionedSetting, SessionCookiePolicy, SessionSameSite};

// === HTTP ===
pub use crate::header::{rewrite, RewriteOptions};
pub use crate::http::{HttpResponse, ResponseCookie};
