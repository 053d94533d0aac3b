//! Immutable SameSite policy
//!
//! A [`SameSitePolicy`] is built once by the resolver and never mutated; the
//! engine publishes it behind an `Arc` and every request reads it lock-free.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::pattern::{Pattern, PatternKind};
use crate::error::CookieGateError;

/// SameSite attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SameSite {
    /// Sent on top-level navigation
    Lax,

    /// Only sent to the same site
    Strict,

    /// Sent on all requests (requires Secure)
    None,
}

impl SameSite {
    /// All values, in tie-break priority order (highest first)
    pub const PRIORITY: [SameSite; 3] = [SameSite::None, SameSite::Strict, SameSite::Lax];

    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }

    /// Rank used when two wildcards of equal specificity disagree
    fn priority(self) -> u8 {
        match self {
            SameSite::None => 2,
            SameSite::Strict => 1,
            SameSite::Lax => 0,
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = CookieGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" => Ok(SameSite::None),
            _ => Err(CookieGateError::InvalidEnumValue { property: "SameSite", value: s.to_string() }),
        }
    }
}

/// Resolved SameSite policy for one endpoint (or one shared `id`)
#[derive(Debug, Clone, Default)]
pub struct SameSitePolicy {
    id: Option<String>,
    lax: Vec<Pattern>,
    strict: Vec<Pattern>,
    none: Vec<Pattern>,
    partitioned: bool,

    // Lookup tables derived from the buckets
    exact: HashMap<String, SameSite>,
    wildcards: Vec<(Pattern, SameSite)>,
}

impl SameSitePolicy {
    /// An empty policy: no cookie gets an attribute
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a policy from already de-duplicated, conflict-free buckets
    pub(crate) fn from_buckets(
        id: Option<String>,
        lax: Vec<Pattern>,
        strict: Vec<Pattern>,
        none: Vec<Pattern>,
        partitioned: bool,
    ) -> Self {
        let mut exact = HashMap::new();
        let mut wildcards = Vec::new();

        for (value, bucket) in [(SameSite::Lax, &lax), (SameSite::Strict, &strict), (SameSite::None, &none)] {
            for pattern in bucket {
                if pattern.kind() == PatternKind::Exact {
                    exact.insert(pattern.literal().to_string(), value);
                } else {
                    wildcards.push((pattern.clone(), value));
                }
            }
        }

        // Anchored wildcards by descending literal length, then bucket priority;
        // the catch-all has a zero-length literal so it always sorts last.
        wildcards.sort_by(|(a, va), (b, vb)| {
            b.specificity().cmp(&a.specificity()).then_with(|| vb.priority().cmp(&va.priority()))
        });

        Self { id, lax, strict, none, partitioned, exact, wildcards }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether `Partitioned` is added to cookies classified as `None`
    pub fn partitioned(&self) -> bool {
        self.partitioned
    }

    /// Patterns configured for one SameSite value
    pub fn patterns(&self, value: SameSite) -> &[Pattern] {
        match value {
            SameSite::Lax => &self.lax,
            SameSite::Strict => &self.strict,
            SameSite::None => &self.none,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lax.is_empty() && self.strict.is_empty() && self.none.is_empty()
    }

    /// SameSite value this policy assigns to `name`, if any
    ///
    /// Exact names win over wildcards; among wildcards the longest literal
    /// wins, `*` comes last, and equal lengths fall back to None > Strict > Lax.
    pub fn lookup(&self, name: &str) -> Option<SameSite> {
        if let Some(value) = self.exact.get(name) {
            return Some(*value);
        }

        self.wildcards
            .iter()
            .find(|(pattern, _)| pattern.matches(name))
            .map(|(_, value)| *value)
    }
}
