//! Set-Cookie header rewriting
//!
//! Every value, whether it came from a structured cookie or from a literal
//! header string, is tokenized into segments before it is edited. The result
//! is always one header value: CR and LF never survive, and the engine only
//! ever emits one `Secure`, one `SameSite` and one `Partitioned`.
//!
//! Once a value is rewritten the managed attributes sit at the end in a fixed
//! order: `...; Secure; SameSite=<value>; Partitioned`.

mod segments;

pub use segments::{cookie_name, Attribute, SetCookieSegments};

use crate::classify::AttributeDecision;

pub const SECURE: &str = "Secure";
pub const SAME_SITE: &str = "SameSite";
pub const PARTITIONED: &str = "Partitioned";

/// Rewriter switches (the `[http]` section)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Keep a SameSite value the caller already set; only fill in a missing one
    pub preserve_explicit_samesite: bool,
}

/// Apply `decision` to one raw `Set-Cookie` value
///
/// An empty decision returns `raw` unchanged, duplicate SameSite text included.
pub fn rewrite(cookie_name: &str, raw: &str, decision: &AttributeDecision) -> String {
    rewrite_with(cookie_name, raw, decision, &RewriteOptions::default())
}

pub fn rewrite_with(cookie_name: &str, raw: &str, decision: &AttributeDecision, options: &RewriteOptions) -> String {
    if decision.is_empty() {
        return raw.to_string();
    }

    let mut segments = SetCookieSegments::parse(raw);

    let explicit = segments.last_value(SAME_SITE).map(str::to_string);
    let policy = decision.same_site.map(|v| v.as_str().to_string());
    let same_site = if options.preserve_explicit_samesite {
        explicit.clone().or(policy)
    } else {
        policy.or(explicit.clone())
    };

    let is_none = same_site.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("none"));
    let secure = decision.force_secure || is_none || segments.has(SECURE);
    let partitioned = is_none && (decision.add_partitioned || segments.has(PARTITIONED));

    segments.remove_where(|a| a.is(SECURE) || a.is(SAME_SITE) || a.is(PARTITIONED));

    if secure {
        segments.push(SECURE);
    }
    if let Some(value) = &same_site {
        segments.push(&format!("{}={}", SAME_SITE, value));
    }
    if partitioned {
        segments.push(PARTITIONED);
    }

    let rewritten = segments.to_string();
    log::trace!(
        "Rewrote Set-Cookie for [{}]: samesite={:?} (caller {:?}) secure={} partitioned={}",
        cookie_name,
        same_site,
        explicit,
        secure,
        partitioned
    );
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SameSite;

    fn decision(same_site: SameSite, partitioned: bool) -> AttributeDecision {
        AttributeDecision {
            same_site: Some(same_site),
            force_secure: same_site == SameSite::None,
            add_partitioned: partitioned && same_site == SameSite::None,
        }
    }

    #[test]
    fn test_none_adds_secure() {
        let out = rewrite("cookieOne", "cookieOne=cookieOne", &decision(SameSite::None, false));
        assert_eq!(out, "cookieOne=cookieOne; Secure; SameSite=None");
    }

    #[test]
    fn test_lax_only() {
        let out = rewrite("cookieOne", "cookieOne=cookieOne; Path=/", &decision(SameSite::Lax, false));
        assert_eq!(out, "cookieOne=cookieOne; Path=/; SameSite=Lax");
    }

    #[test]
    fn test_partitioned_appended() {
        let out = rewrite("cookieOne", "cookieOne=cookieOne", &decision(SameSite::None, true));
        assert_eq!(out, "cookieOne=cookieOne; Secure; SameSite=None; Partitioned");
    }

    #[test]
    fn test_secure_not_duplicated() {
        let d = decision(SameSite::None, false);
        let once = rewrite("a", "a=b; secure; HttpOnly", &d);
        let twice = rewrite("a", &once, &d);

        assert_eq!(once, "a=b; HttpOnly; Secure; SameSite=None");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_existing_samesite_replaced() {
        let out = rewrite("a", "a=b; SameSite=Strict; Path=/", &decision(SameSite::Lax, false));
        assert_eq!(out, "a=b; Path=/; SameSite=Lax");
    }

    #[test]
    fn test_duplicate_samesite_collapsed() {
        let out = rewrite("a", "a=b; SameSite=Lax; SameSite=Strict; SameSite", &decision(SameSite::None, false));
        assert_eq!(out.matches("SameSite").count(), 1);
        assert!(out.ends_with("; Secure; SameSite=None"));
    }

    #[test]
    fn test_partitioned_removed_for_lax() {
        let out = rewrite("a", "a=b; Partitioned; Secure", &decision(SameSite::Lax, true));
        assert_eq!(out, "a=b; Secure; SameSite=Lax");
    }

    #[test]
    fn test_caller_partitioned_kept_for_none() {
        let out = rewrite("a", "a=b; Partitioned", &decision(SameSite::None, false));
        assert_eq!(out, "a=b; Secure; SameSite=None; Partitioned");
    }

    #[test]
    fn test_empty_decision_is_noop() {
        let raw = "a=b; SameSite=Lax; SameSite=Strict;;";
        assert_eq!(rewrite("a", raw, &AttributeDecision::none()), raw);
    }

    #[test]
    fn test_no_header_splitting() {
        let raw = "a=b\r\nSet-Cookie: SameSite=None; Path=/";
        let out = rewrite("a", raw, &decision(SameSite::Lax, false));

        assert!(!out.contains('\r') && !out.contains('\n'));
        assert!(out.ends_with("; SameSite=Lax"));
        let segments = SetCookieSegments::parse(&out);
        assert_eq!(segments.attributes().iter().filter(|a| a.is(SAME_SITE)).count(), 1);
    }

    #[test]
    fn test_preserve_explicit_samesite() {
        let options = RewriteOptions { preserve_explicit_samesite: true };

        let out = rewrite_with("a", "a=b; SameSite=Strict", &decision(SameSite::Lax, false), &options);
        assert_eq!(out, "a=b; SameSite=Strict");

        let out = rewrite_with("a", "a=b; SameSite", &decision(SameSite::Lax, false), &options);
        assert_eq!(out, "a=b; SameSite=Lax");

        // A caller None still gets Secure
        let out = rewrite_with("a", "a=b; SameSite=None", &decision(SameSite::Lax, false), &options);
        assert_eq!(out, "a=b; Secure; SameSite=None");
    }
}
