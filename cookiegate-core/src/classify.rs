//! Cookie classification
//!
//! `classify` is a pure function of the cookie name, the endpoint's
//! [`SameSitePolicy`] and the [`SessionCookiePolicy`]. It holds no state and
//! can be called from any number of request workers at once.

use crate::policy::{SameSite, SameSitePolicy};
use crate::session::{PartitionedSetting, SessionCookiePolicy};

/// Attributes the engine will enforce on one `Set-Cookie` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeDecision {
    /// SameSite value to set; `None` leaves the attribute alone
    pub same_site: Option<SameSite>,
    /// Add `Secure` if missing
    pub force_secure: bool,
    /// Add `Partitioned` if missing; only ever true with `SameSite=None`
    pub add_partitioned: bool,
}

impl AttributeDecision {
    /// Decision that leaves the header untouched
    pub fn none() -> Self {
        Self::default()
    }

    /// Decision for a value assigned by the general policy
    fn from_policy(value: SameSite, partitioned: bool) -> Self {
        Self::assign(value, value == SameSite::None, partitioned)
    }

    fn assign(value: SameSite, force_secure: bool, partitioned: bool) -> Self {
        Self {
            same_site: Some(value),
            force_secure,
            add_partitioned: partitioned && value == SameSite::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.same_site.is_none() && !self.force_secure && !self.add_partitioned
    }
}

/// Decide the attributes for the cookie called `name`
///
/// Priority: session override, then exact names, then wildcards (longest
/// literal first, `*` last). No match gives an empty decision.
pub fn classify(name: &str, policy: &SameSitePolicy, session: &SessionCookiePolicy) -> AttributeDecision {
    if session.applies_to(name) {
        if let Some(value) = session.same_site.as_same_site() {
            let partitioned = match session.partitioned {
                PartitionedSetting::True => true,
                PartitionedSetting::False => false,
                PartitionedSetting::Defer => {
                    policy.partitioned() && policy.lookup(name) == Some(SameSite::None)
                }
            };
            // SameSite=None is rejected by browsers without Secure
            let force_secure = session.secure || value == SameSite::None;
            return AttributeDecision::assign(value, force_secure, partitioned);
        }
    }

    match policy.lookup(name) {
        Some(value) => AttributeDecision::from_policy(value, policy.partitioned()),
        None => AttributeDecision::none(),
    }
}
