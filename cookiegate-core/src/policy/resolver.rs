//! Conflict resolution: raw `samesite` configuration to [`SameSitePolicy`]
//!
//! Resolution never fails. Unsupported patterns and names claimed by more than
//! one bucket are dropped and reported as [`Diagnostic`]s.

use super::pattern::Pattern;
use super::snapshot::{SameSite, SameSitePolicy};
use crate::config::SameSiteConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::error::CookieGateError;

/// Build a policy from one `samesite` element
pub fn resolve(config: &SameSiteConfig, diagnostics: &mut Vec<Diagnostic>) -> SameSitePolicy {
    let mut lax = parse_bucket(SameSite::Lax, &config.lax, diagnostics);
    let mut strict = parse_bucket(SameSite::Strict, &config.strict, diagnostics);
    let mut none = parse_bucket(SameSite::None, &config.none, diagnostics);

    let conflicts = find_conflicts(&lax, &strict, &none);
    for (pattern, buckets) in &conflicts {
        if buckets.len() == 3 {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::DuplicateNameAll,
                format!(
                    "The cookie name [{}] is configured in the lax, strict and none samesite lists; \
                     no SameSite attribute is applied for it",
                    pattern
                ),
            ));
        } else {
            for bucket in buckets {
                let other = buckets.iter().find(|b| *b != bucket).copied().unwrap_or(*bucket);
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::DuplicateName,
                    format!(
                        "The cookie name [{}] in the samesite {} list is also configured in the {} list; \
                         it is removed from both",
                        pattern,
                        bucket_name(*bucket),
                        bucket_name(other)
                    ),
                ));
            }
        }
    }

    let conflicting: Vec<&Pattern> = conflicts.iter().map(|(p, _)| p).collect();
    for bucket in [&mut lax, &mut strict, &mut none] {
        bucket.retain(|p| !conflicting.contains(&p));
    }

    log::debug!(
        "Resolved samesite policy {:?}: {} lax, {} strict, {} none, partitioned={}",
        config.id,
        lax.len(),
        strict.len(),
        none.len(),
        config.partitioned
    );

    SameSitePolicy::from_buckets(config.id.clone(), lax, strict, none, config.partitioned)
}

/// Parse a comma separated list; repeats inside one list are silently merged
fn parse_bucket(value: SameSite, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<Pattern> {
    let mut patterns: Vec<Pattern> = Vec::new();

    for entry in raw.split(',') {
        match Pattern::parse(entry) {
            Ok(pattern) => {
                if !patterns.contains(&pattern) {
                    patterns.push(pattern);
                }
            }
            Err(CookieGateError::UnsupportedWildcard(pattern)) => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::UnsupportedWildcard,
                    format!(
                        "The samesite {} value [{}] uses an unsupported wildcard; \
                         only a leading or trailing '*' is allowed, the value is ignored",
                        bucket_name(value),
                        pattern
                    ),
                ));
            }
            Err(_) => {}
        }
    }

    patterns
}

/// Patterns present in more than one bucket, with the buckets that hold them
fn find_conflicts(lax: &[Pattern], strict: &[Pattern], none: &[Pattern]) -> Vec<(Pattern, Vec<SameSite>)> {
    let mut conflicts: Vec<(Pattern, Vec<SameSite>)> = Vec::new();

    for bucket in [lax, strict, none] {
        for pattern in bucket {
            if conflicts.iter().any(|(p, _)| p == pattern) {
                continue;
            }
            let holders: Vec<SameSite> = [(SameSite::Lax, lax), (SameSite::Strict, strict), (SameSite::None, none)]
                .into_iter()
                .filter(|(_, b)| b.contains(pattern))
                .map(|(v, _)| v)
                .collect();
            if holders.len() > 1 {
                conflicts.push((pattern.clone(), holders));
            }
        }
    }

    conflicts
}

fn bucket_name(value: SameSite) -> &'static str {
    match value {
        SameSite::Lax => "lax",
        SameSite::Strict => "strict",
        SameSite::None => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(lax: &str, strict: &str, none: &str) -> SameSiteConfig {
        SameSiteConfig {
            id: None,
            lax: lax.to_string(),
            strict: strict.to_string(),
            none: none.to_string(),
            partitioned: false,
        }
    }

    #[test]
    fn test_simple_resolution() {
        let mut diags = Vec::new();
        let policy = resolve(&config("cookieOne, cookieTwo", "*", ""), &mut diags);

        assert!(diags.is_empty());
        assert_eq!(policy.patterns(SameSite::Lax).len(), 2);
        assert_eq!(policy.patterns(SameSite::Strict).len(), 1);
        assert!(policy.patterns(SameSite::None).is_empty());
    }

    #[test]
    fn test_repeat_in_one_bucket_is_silent() {
        let mut diags = Vec::new();
        let policy = resolve(&config("cookieOne,cookieOne", "", ""), &mut diags);
        assert!(diags.is_empty());
        assert_eq!(policy.patterns(SameSite::Lax).len(), 1);

        let policy = resolve(&config("*,*", "", ""), &mut diags);
        assert!(diags.is_empty());
        assert_eq!(policy.lookup("cookieOne"), Some(SameSite::Lax));
    }

    #[test]
    fn test_unsupported_wildcard_dropped() {
        let mut diags = Vec::new();
        let policy = resolve(&config("co*kieOne", "", ""), &mut diags);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::UnsupportedWildcard);
        assert!(diags[0].detail.contains("co*kieOne"));
        assert!(policy.is_empty());
        assert_eq!(policy.lookup("cookieOne"), None);
    }

    #[test]
    fn test_duplicate_in_two_buckets() {
        let mut diags = Vec::new();
        let policy = resolve(&config("cookieOne", "cookieOne", ""), &mut diags);

        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.code == DiagnosticCode::DuplicateName));
        assert_eq!(policy.lookup("cookieOne"), None);
    }

    #[test]
    fn test_duplicate_wildcard_in_two_buckets() {
        let mut diags = Vec::new();
        let policy = resolve(&config("cookie*", "cookie*", ""), &mut diags);

        assert_eq!(diags.len(), 2);
        assert_eq!(policy.lookup("cookieOne"), None);
    }

    #[test]
    fn test_duplicate_in_all_buckets() {
        let mut diags = Vec::new();
        let policy = resolve(&config("cookieOne", "cookieOne", "cookieOne"), &mut diags);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::DuplicateNameAll);
        assert!(policy.is_empty());
    }

    #[test]
    fn test_duplicate_global_leaves_explicit_name() {
        let mut diags = Vec::new();
        let policy = resolve(&config("*", "*", "cookieOne"), &mut diags);

        assert_eq!(diags.len(), 2);
        assert_eq!(policy.lookup("cookieOne"), Some(SameSite::None));
        assert_eq!(policy.lookup("cookieTwo"), None);
    }

    #[test]
    fn test_partitioned_and_id_carried() {
        let mut diags = Vec::new();
        let mut cfg = config("", "", "*");
        cfg.id = Some("shared".to_string());
        cfg.partitioned = true;
        let policy = resolve(&cfg, &mut diags);

        assert_eq!(policy.id(), Some("shared"));
        assert!(policy.partitioned());
    }
}
