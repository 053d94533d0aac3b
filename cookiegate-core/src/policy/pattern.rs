//! Cookie name patterns
//!
//! Supports exact names and a single `*` anchored at one edge:
//! - Exact: "cookieOne"
//! - Prefix wildcard: "cookie*"
//! - Suffix wildcard: "*One"
//! - Catch-all: "*"
//!
//! Matching is case-sensitive.

use std::fmt;

use crate::error::{CookieGateError, Result};

const WILDCARD: char = '*';

/// Shape of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Matches one name exactly
    Exact,
    /// `name*`: matches names starting with the literal
    PrefixWildcard,
    /// `*name`: matches names ending with the literal
    SuffixWildcard,
    /// `*`: matches every name
    Global,
}

/// A validated cookie name pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    kind: PatternKind,
    literal: String,
}

impl Pattern {
    /// Parse a single configured entry
    ///
    /// Surrounding whitespace is ignored. Anything with more than one `*`, or
    /// with a `*` away from the edges, is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CookieGateError::EmptyPattern);
        }

        let wildcards = raw.matches(WILDCARD).count();
        let (kind, literal) = match wildcards {
            0 => (PatternKind::Exact, raw),
            1 if raw.len() == 1 => (PatternKind::Global, ""),
            1 => {
                if let Some(prefix) = raw.strip_suffix(WILDCARD) {
                    (PatternKind::PrefixWildcard, prefix)
                } else if let Some(suffix) = raw.strip_prefix(WILDCARD) {
                    (PatternKind::SuffixWildcard, suffix)
                } else {
                    return Err(CookieGateError::UnsupportedWildcard(raw.to_string()));
                }
            }
            _ => return Err(CookieGateError::UnsupportedWildcard(raw.to_string())),
        };

        Ok(Self { raw: raw.to_string(), kind, literal: literal.to_string() })
    }

    /// Whether `name` is covered by this pattern
    pub fn matches(&self, name: &str) -> bool {
        match self.kind {
            PatternKind::Exact => self.literal == name,
            PatternKind::PrefixWildcard => name.starts_with(&self.literal),
            PatternKind::SuffixWildcard => name.ends_with(&self.literal),
            PatternKind::Global => true,
        }
    }

    /// Length of the literal part; longer literals are more specific
    pub fn specificity(&self) -> usize {
        self.literal.len()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind != PatternKind::Exact
    }
}

// Two patterns are the same when they match the same set of names.
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.literal == other.literal
    }
}

impl Eq for Pattern {}

impl std::hash::Hash for Pattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.literal.hash(state);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for Pattern {
    type Err = CookieGateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
