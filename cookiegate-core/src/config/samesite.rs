//! SameSite policy and endpoint configuration

use serde::{Deserialize, Serialize};

/// One `samesite` element
///
/// Each bucket is a comma separated list of cookie names or anchored
/// wildcards. Bad entries are not validation errors; the resolver drops them
/// with a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SameSiteConfig {
    /// Reference key; required for top-level `[[samesite]]` entries
    pub id: Option<String>,

    /// Cookies that get `SameSite=Lax`
    pub lax: String,

    /// Cookies that get `SameSite=Strict`
    pub strict: String,

    /// Cookies that get `SameSite=None` (and `Secure`)
    pub none: String,

    /// Add `Partitioned` to cookies classified as `None`
    pub partitioned: bool,
}

impl SameSiteConfig {
    pub fn lax(mut self, lax: impl Into<String>) -> Self {
        self.lax = lax.into();
        self
    }

    pub fn strict(mut self, strict: impl Into<String>) -> Self {
        self.strict = strict.into();
        self
    }

    pub fn none(mut self, none: impl Into<String>) -> Self {
        self.none = none.into();
        self
    }

    pub fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = partitioned;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One listener endpoint (`[[endpoint]]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub id: String,

    /// Id of a top-level `[[samesite]]` entry; wins over `samesite`
    pub samesite_ref: Option<String>,

    /// Inline policy for this endpoint only
    pub samesite: Option<SameSiteConfig>,
}

impl EndpointConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn with_ref(mut self, samesite_ref: impl Into<String>) -> Self {
        self.samesite_ref = Some(samesite_ref.into());
        self
    }

    pub fn with_samesite(mut self, samesite: SameSiteConfig) -> Self {
        self.samesite = Some(samesite);
        self
    }
}
