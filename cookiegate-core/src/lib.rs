//! cookiegate - SameSite / Secure / Partitioned policy for outgoing cookies
//!
//! The engine decides, for every `Set-Cookie` header a server is about to
//! send, whether to add `SameSite`, force `Secure` and add `Partitioned`,
//! and rewrites the header text without ever splitting it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cookiegate_core::prelude::*;
//!
//! let config = CookieGateConfig::load()?;
//! config.validate()?;
//!
//! let engine = CookiePolicyEngine::from_config(&config, Arc::new(LogSink));
//!
//! // Per response: take one snapshot and run every Set-Cookie through it
//! let snapshot = engine.snapshot();
//! let response = HttpResponse::ok()
//!     .add_header("Set-Cookie", "cookieOne=cookieOne")
//!     .apply_cookie_policy(&snapshot, DEFAULT_ENDPOINT);
//! ```
//!
//! # Architecture
//!
//! - [`policy`] - patterns, the conflict resolver and the immutable SameSite policy
//! - [`session`] - session cookie override and session cookie writer
//! - [`classify`] - cookie name to [`classify::AttributeDecision`]
//! - [`header`] - Set-Cookie tokenizer and rewriter
//! - [`engine`] - atomic snapshot publication and per-response processing
//! - [`config`] - TOML + environment configuration
//! - [`diagnostics`] - configuration warnings and their sinks
//! - [`logging`] - logger for the `log` facade
//! - [`http`] - response builder and structured cookies

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod header;
pub mod http;
pub mod logging;
pub mod policy;
pub mod prelude;
pub mod session;

pub use classify::{classify, AttributeDecision};
pub use config::CookieGateConfig;
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, LogSink, MemorySink};
pub use engine::{CookiePolicyEngine, PolicySnapshot, DEFAULT_ENDPOINT};
pub use error::{CookieGateError, Result};
pub use header::{rewrite, rewrite_with, RewriteOptions};
pub use policy::{Pattern, PatternKind, SameSite, SameSitePolicy};
pub use session::{PartitionedSetting, SessionCookiePolicy, SessionSameSite};
