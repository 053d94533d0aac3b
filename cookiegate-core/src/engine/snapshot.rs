//! Everything one request needs, frozen at a single configuration generation

use std::collections::HashMap;
use std::sync::Arc;

use crate::classify::{classify, AttributeDecision};
use crate::config::CookieGateConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::header::{cookie_name, rewrite_with, RewriteOptions};
use crate::policy::{resolve, SameSitePolicy};
use crate::session::SessionCookiePolicy;

/// Immutable policy state published by [`super::CookiePolicyEngine`]
///
/// A response is processed against one snapshot from start to finish, so it
/// never mixes policies from two configuration generations.
#[derive(Debug, Clone, Default)]
pub struct PolicySnapshot {
    generation: u64,
    endpoints: HashMap<String, Arc<SameSitePolicy>>,
    fallback: Arc<SameSitePolicy>,
    session: SessionCookiePolicy,
    rewrite: RewriteOptions,
    dedupe_set_cookies: bool,
}

impl PolicySnapshot {
    /// Snapshot with no policies: every header passes through untouched
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve `config` into a snapshot
    ///
    /// Never fails. Everything that had to be dropped or defaulted is pushed
    /// onto `diagnostics`.
    pub fn build(config: &CookieGateConfig, generation: u64, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let named: HashMap<&str, Arc<SameSitePolicy>> = config
            .samesite
            .iter()
            .filter_map(|samesite| {
                let id = samesite.id.as_deref()?;
                Some((id, Arc::new(resolve(samesite, diagnostics))))
            })
            .collect();

        let mut endpoints = HashMap::new();
        for endpoint in &config.endpoints {
            let policy = if let Some(reference) = endpoint.samesite_ref.as_deref() {
                match named.get(reference) {
                    Some(policy) => Arc::clone(policy),
                    None => {
                        diagnostics.push(Diagnostic::new(
                            DiagnosticCode::UnknownSameSiteRef,
                            format!(
                                "The endpoint [{}] references the samesite id [{}], which is not configured; \
                                 no SameSite policy is applied on this endpoint",
                                endpoint.id, reference
                            ),
                        ));
                        Arc::new(SameSitePolicy::empty())
                    }
                }
            } else if let Some(inline) = &endpoint.samesite {
                Arc::new(resolve(inline, diagnostics))
            } else {
                Arc::new(SameSitePolicy::empty())
            };
            endpoints.insert(endpoint.id.clone(), policy);
        }

        Self {
            generation,
            endpoints,
            fallback: Arc::new(SameSitePolicy::empty()),
            session: config.session.resolve(diagnostics),
            rewrite: RewriteOptions { preserve_explicit_samesite: config.http.preserve_explicit_samesite },
            dedupe_set_cookies: config.http.dedupe_set_cookies,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> &SessionCookiePolicy {
        &self.session
    }

    pub fn rewrite_options(&self) -> &RewriteOptions {
        &self.rewrite
    }

    pub fn dedupe_set_cookies(&self) -> bool {
        self.dedupe_set_cookies
    }

    /// Configured endpoint ids, sorted
    pub fn endpoint_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.endpoints.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// SameSite policy of an endpoint; unknown endpoints get an empty policy
    pub fn policy_for(&self, endpoint: &str) -> &SameSitePolicy {
        self.endpoints.get(endpoint).unwrap_or(&self.fallback)
    }

    pub fn decide(&self, endpoint: &str, cookie_name: &str) -> AttributeDecision {
        classify(cookie_name, self.policy_for(endpoint), &self.session)
    }

    /// Classify and rewrite one raw `Set-Cookie` value
    ///
    /// Values without a cookie name are returned unchanged.
    pub fn process(&self, endpoint: &str, raw: &str) -> String {
        match cookie_name(raw) {
            Some(name) => {
                let decision = self.decide(endpoint, name);
                rewrite_with(name, raw, &decision, &self.rewrite)
            }
            None => raw.to_string(),
        }
    }

    /// Process every `Set-Cookie` value of one response, in order
    pub fn process_all<'a>(&self, endpoint: &str, values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let processed: Vec<(Option<String>, String)> = values
            .into_iter()
            .map(|raw| (cookie_name(raw).map(str::to_string), self.process(endpoint, raw)))
            .collect();

        if self.dedupe_set_cookies {
            dedupe_by_name(processed)
        } else {
            processed.into_iter().map(|(_, value)| value).collect()
        }
    }

    /// Rewrite the `Set-Cookie` entries of an `http::HeaderMap` in place
    ///
    /// A value that is not visible ASCII, or whose rewrite cannot be encoded
    /// again, is kept as it was.
    pub fn apply_to_header_map(&self, endpoint: &str, headers: &mut http::HeaderMap) {
        let originals: Vec<http::HeaderValue> = headers.get_all(http::header::SET_COOKIE).iter().cloned().collect();
        if originals.is_empty() {
            return;
        }
        headers.remove(http::header::SET_COOKIE);

        let processed: Vec<(Option<String>, http::HeaderValue)> = originals
            .into_iter()
            .map(|original| {
                let raw = match original.to_str() {
                    Ok(raw) => raw.to_string(),
                    Err(_) => return (None, original),
                };
                let name = cookie_name(&raw).map(str::to_string);
                let rewritten = self.process(endpoint, &raw);
                match http::HeaderValue::from_str(&rewritten) {
                    Ok(value) => (name, value),
                    Err(e) => {
                        log::warn!("Keeping original Set-Cookie for {:?}: rewritten value is not a valid header ({})", name, e);
                        (name, original)
                    }
                }
            })
            .collect();

        let values = if self.dedupe_set_cookies {
            dedupe_by_name(processed)
        } else {
            processed.into_iter().map(|(_, value)| value).collect()
        };

        for value in values {
            headers.append(http::header::SET_COOKIE, value);
        }
    }
}

/// Keep only the newest value per cookie name, at the newest one's position
///
/// Values without a name are always kept.
pub(crate) fn dedupe_by_name<T>(values: Vec<(Option<String>, T)>) -> Vec<T> {
    let mut last: HashMap<String, usize> = HashMap::new();
    for (index, (name, _)) in values.iter().enumerate() {
        if let Some(name) = name {
            last.insert(name.clone(), index);
        }
    }

    values
        .into_iter()
        .enumerate()
        .filter(|(index, (name, _))| name.as_ref().map_or(true, |n| last.get(n) == Some(index)))
        .map(|(_, (_, value))| value)
        .collect()
}
