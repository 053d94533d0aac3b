//! Error types for cookiegate
//!
//! None of these ever reach the request path: the engine degrades to
//! "leave the header alone" and reports through [`crate::diagnostics`].
//! They surface from the parsing helpers only; configuration loading reports
//! through `anyhow`.

use thiserror::Error;

/// Result type used by the parsing helpers
pub type Result<T> = std::result::Result<T, CookieGateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieGateError {
    /// An enumerated configuration property carried a value outside its range
    #[error("Unexpected value specified for property [{property}], value = [{value}]")]
    InvalidEnumValue { property: &'static str, value: String },

    /// A name pattern has a `*` somewhere other than its first or last character
    #[error("Unsupported wildcard pattern [{0}]: '*' is only allowed as the first or last character")]
    UnsupportedWildcard(String),

    /// A name pattern was empty after trimming
    #[error("Empty cookie name pattern")]
    EmptyPattern,
}
