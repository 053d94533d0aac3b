//! End-to-end policy behaviour: configuration in, Set-Cookie lines out

use std::sync::Arc;

use cookiegate_core::config::{CookieGateConfig, EndpointConfig, SameSiteConfig};
use cookiegate_core::diagnostics::{DiagnosticCode, MemorySink};
use cookiegate_core::engine::{CookiePolicyEngine, DEFAULT_ENDPOINT};
use cookiegate_core::http::{HttpResponse, ResponseCookie};
use cookiegate_core::{classify, SameSite, SessionCookiePolicy};

fn engine_with(samesite: SameSiteConfig) -> (CookiePolicyEngine, Arc<MemorySink>) {
    let mut config = CookieGateConfig::default();
    config.endpoints.push(EndpointConfig::new(DEFAULT_ENDPOINT).with_samesite(samesite));
    engine_for(&config)
}

fn engine_for(config: &CookieGateConfig) -> (CookiePolicyEngine, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (CookiePolicyEngine::from_config(config, sink.clone()), sink)
}

/// A response written three ways: setHeader, addHeader and addCookie
fn servlet_response(prefix: &str) -> HttpResponse {
    HttpResponse::ok()
        .set_header("Set-Cookie", &format!("{prefix}_SetHeader={prefix}Value_SetHeader"))
        .add_header("Set-Cookie", &format!("{prefix}_AddHeader={prefix}Value_AddHeader"))
        .cookie(&ResponseCookie::new(format!("{prefix}_AddCookie"), format!("{prefix}Value_AddCookie")))
        .text("Welcome")
}

fn wire_set_cookies(engine: &CookiePolicyEngine, response: HttpResponse) -> Vec<String> {
    let response = response.apply_cookie_policy(&engine.snapshot(), DEFAULT_ENDPOINT);
    String::from_utf8(response.to_bytes())
        .unwrap()
        .split("\r\n")
        .filter_map(|line| line.strip_prefix("Set-Cookie: ").map(str::to_string))
        .collect()
}

#[test]
fn test_no_splitting_with_preexisting_attributes() {
    let (engine, _) = engine_with(SameSiteConfig::default().none("*"));

    let inputs = [
        "cookieOne=cookieOne; SameSite=Lax; SameSite=Strict",
        "cookieOne=cookieOne; Secure; Secure; Partitioned",
        "cookieOne=cookieOne; SameSite; Path=/",
        "cookieOne=cookieOne;SameSite=None;Secure;Partitioned",
    ];
    for raw in inputs {
        let response = HttpResponse::ok().add_header("Set-Cookie", raw);
        let lines = wire_set_cookies(&engine, response);

        assert_eq!(lines.len(), 1, "{raw} became {lines:?}");
        assert_eq!(lines[0].matches("SameSite").count(), 1);
        assert!(lines[0].matches("Secure").count() <= 1);
    }
}

#[test]
fn test_secure_is_idempotent() {
    let (engine, _) = engine_with(SameSiteConfig::default().none("cookieOne"));

    let once = engine.process(DEFAULT_ENDPOINT, "cookieOne=cookieOne");
    let twice = engine.process(DEFAULT_ENDPOINT, &once);
    assert_eq!(once, twice);
    assert_eq!(twice.matches("Secure").count(), 1);
}

#[test]
fn test_partitioned_never_on_lax() {
    let (engine, _) = engine_with(SameSiteConfig::default().lax("*").partitioned(true));

    assert_eq!(engine.process(DEFAULT_ENDPOINT, "cookieOne=cookieOne"), "cookieOne=cookieOne; SameSite=Lax");
    assert!(!engine.snapshot().decide(DEFAULT_ENDPOINT, "cookieOne").add_partitioned);
}

#[test]
fn test_exact_beats_wildcard() {
    let (engine, _) = engine_with(SameSiteConfig::default().lax("cookieOne").strict("*"));

    assert_eq!(engine.snapshot().decide(DEFAULT_ENDPOINT, "cookieOne").same_site, Some(SameSite::Lax));
    assert_eq!(engine.snapshot().decide(DEFAULT_ENDPOINT, "cookieTwo").same_site, Some(SameSite::Strict));
}

#[test]
fn test_duplicate_name_removed_from_both_buckets() {
    let (engine, sink) = engine_with(SameSiteConfig::default().lax("cookieOne").strict("cookieOne"));

    assert!(engine.snapshot().decide(DEFAULT_ENDPOINT, "cookieOne").is_empty());
    assert_eq!(sink.count(DiagnosticCode::DuplicateName), 2);
    assert_eq!(engine.process(DEFAULT_ENDPOINT, "cookieOne=cookieOne"), "cookieOne=cookieOne");
}

#[test]
fn test_duplicate_name_in_all_buckets() {
    let (engine, sink) =
        engine_with(SameSiteConfig::default().lax("cookieOne").strict("cookieOne").none("cookieOne"));

    assert_eq!(sink.entries().len(), 1);
    assert_eq!(sink.count(DiagnosticCode::DuplicateNameAll), 1);
    assert_eq!(engine.process(DEFAULT_ENDPOINT, "cookieOne=cookieOne"), "cookieOne=cookieOne");
}

#[test]
fn test_session_override_precedence() {
    let mut config = CookieGateConfig::default();
    config.endpoints.push(EndpointConfig::new(DEFAULT_ENDPOINT).with_samesite(SameSiteConfig::default().lax("*")));
    config.session.cookie_name = "JSESSIONID".to_string();
    config.session.cookie_samesite = "Strict".to_string();
    let (engine, _) = engine_for(&config);

    assert_eq!(engine.process(DEFAULT_ENDPOINT, "JSESSIONID=abc; Path=/"), "JSESSIONID=abc; Path=/; SameSite=Strict");
    assert_eq!(engine.process(DEFAULT_ENDPOINT, "cookieOne=cookieOne"), "cookieOne=cookieOne; SameSite=Lax");
}

#[test]
fn test_case_sensitive_names() {
    let (engine, _) = engine_with(SameSiteConfig::default().lax("cookieOne"));
    let snapshot = engine.snapshot();

    assert!(snapshot.decide(DEFAULT_ENDPOINT, "cookieone").is_empty());
    assert_eq!(snapshot.decide(DEFAULT_ENDPOINT, "cookieOne").same_site, Some(SameSite::Lax));
}

#[test]
fn test_unsupported_wildcard_ignored() {
    let (engine, sink) = engine_with(SameSiteConfig::default().lax("co*kieOne"));

    assert!(engine.snapshot().decide(DEFAULT_ENDPOINT, "cookieOne").is_empty());
    assert_eq!(sink.count(DiagnosticCode::UnsupportedWildcard), 1);
}

#[test]
fn test_none_forces_secure() {
    let (engine, _) = engine_with(SameSiteConfig::default().none("cookieOne"));
    assert_eq!(engine.process(DEFAULT_ENDPOINT, "cookieOne=cookieOne"), "cookieOne=cookieOne; Secure; SameSite=None");
}

#[test]
fn test_partitioned_on_every_origin() {
    let (engine, _) = engine_with(SameSiteConfig::default().none("*").partitioned(true));

    let lines = wire_set_cookies(&engine, servlet_response("PartitionedCookieName"));
    assert_eq!(
        lines,
        vec![
            "PartitionedCookieName_SetHeader=PartitionedCookieNameValue_SetHeader; Secure; SameSite=None; Partitioned",
            "PartitionedCookieName_AddHeader=PartitionedCookieNameValue_AddHeader; Secure; SameSite=None; Partitioned",
            "PartitionedCookieName_AddCookie=PartitionedCookieNameValue_AddCookie; Secure; SameSite=None; Partitioned",
        ]
    );
}

#[test]
fn test_partitioned_is_off_by_default() {
    let (engine, _) = engine_with(SameSiteConfig::default().none("*"));

    let lines = wire_set_cookies(&engine, servlet_response("PartitionedCookieName"));
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.ends_with("; Secure; SameSite=None")));
}

#[test]
fn test_partitioned_by_name() {
    let (engine, _) = engine_with(
        SameSiteConfig::default()
            .strict("PartitionedCookieName_AddHeader")
            .lax("PartitionedCookieName_SetHeader")
            .none("PartitionedCookieName_AddCookie")
            .partitioned(true),
    );

    let lines = wire_set_cookies(&engine, servlet_response("PartitionedCookieName"));
    assert!(lines[0].ends_with("_SetHeader; SameSite=Lax"));
    assert!(lines[1].ends_with("_AddHeader; SameSite=Strict"));
    assert!(lines[2].ends_with("_AddCookie; Secure; SameSite=None; Partitioned"));
}

#[test]
fn test_caller_partitioned_not_duplicated() {
    let (engine, _) = engine_with(SameSiteConfig::default().none("*").partitioned(true));

    let response = HttpResponse::ok().add_header("Set-Cookie", "name=value; SameSite=None; Partitioned");
    assert_eq!(wire_set_cookies(&engine, response), vec!["name=value; Secure; SameSite=None; Partitioned"]);
}

#[test]
fn test_untargeted_cookie_passes_through() {
    let (engine, _) = engine_with(SameSiteConfig::default().lax("cookieOne"));

    let raw = "SameSiteSetCookie=value; SameSite=Lax; SameSite=Strict";
    let response = HttpResponse::ok().add_header("Set-Cookie", raw);
    assert_eq!(wire_set_cookies(&engine, response), vec![raw]);
}

#[test]
fn test_wildcard_specificity() {
    let (engine, _) = engine_with(SameSiteConfig::default().lax("cookie*").strict("cook*").none("*"));
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.decide(DEFAULT_ENDPOINT, "cookieOne").same_site, Some(SameSite::Lax));
    assert_eq!(snapshot.decide(DEFAULT_ENDPOINT, "cookbook").same_site, Some(SameSite::Strict));
    assert_eq!(snapshot.decide(DEFAULT_ENDPOINT, "other").same_site, Some(SameSite::None));
}

#[test]
fn test_shared_policy_by_reference() {
    let config = CookieGateConfig::from_toml(
        r#"
[[samesite]]
id = "shared"
strict = "*"

[[endpoint]]
id = "defaultHttpEndpoint"
samesite_ref = "shared"

[[endpoint]]
id = "secure"
samesite_ref = "shared"
"#,
    )
    .unwrap();
    config.validate().unwrap();
    let (engine, sink) = engine_for(&config);

    assert!(sink.is_empty());
    assert_eq!(engine.process("secure", "a=b"), "a=b; SameSite=Strict");
    assert_eq!(engine.process(DEFAULT_ENDPOINT, "a=b"), "a=b; SameSite=Strict");
}

#[test]
fn test_session_cookie_writer_goes_through_policy() {
    use cookiegate_core::session::{CookieConfig, SessionCookie};

    let mut config = CookieGateConfig::default();
    config.endpoints.push(EndpointConfig::new(DEFAULT_ENDPOINT));
    config.session.cookie_name = "JSESSIONID".to_string();
    config.session.cookie_samesite = "None".to_string();
    config.session.cookie_partitioned = "true".to_string();
    let (engine, _) = engine_for(&config);

    let writer = SessionCookie::new(CookieConfig { name: "JSESSIONID".to_string(), ..CookieConfig::default() });
    let response = HttpResponse::ok().cookie(&writer.build("abc123", None));

    assert_eq!(
        wire_set_cookies(&engine, response),
        vec!["JSESSIONID=abc123; Path=/; HttpOnly; Secure; SameSite=None; Partitioned"]
    );
}

#[test]
fn test_session_partitioned_default_follows_policy() {
    // Session override None with defer, general policy does not assign None
    let mut config = CookieGateConfig::default();
    config.endpoints.push(EndpointConfig::new(DEFAULT_ENDPOINT));
    config.session.cookie_name = "JSESSIONID".to_string();
    config.session.cookie_samesite = "None".to_string();
    let (engine, _) = engine_for(&config);

    let out = engine.process(DEFAULT_ENDPOINT, "JSESSIONID=abc; Path=/; HttpOnly");
    assert_eq!(out, "JSESSIONID=abc; Path=/; HttpOnly; Secure; SameSite=None");
}

#[test]
fn test_invalid_session_values_are_reported() {
    let mut config = CookieGateConfig::default();
    config.session.cookie_samesite = "InvalideValue".to_string();
    config.session.cookie_partitioned = "InvalidValue".to_string();
    let (engine, sink) = engine_for(&config);

    assert_eq!(sink.count(DiagnosticCode::InvalidEnumValue), 2);
    assert_eq!(engine.snapshot().session(), &SessionCookiePolicy::default());
}

#[test]
fn test_classify_is_pure() {
    let (engine, _) = engine_with(SameSiteConfig::default().none("*").partitioned(true));
    let snapshot = engine.snapshot();
    let policy = snapshot.policy_for(DEFAULT_ENDPOINT);

    let first = classify("cookieOne", policy, snapshot.session());
    let second = classify("cookieOne", policy, snapshot.session());
    assert_eq!(first, second);
}

#[test]
fn test_dedupe_set_cookies() {
    let mut config = CookieGateConfig::default();
    config.endpoints.push(EndpointConfig::new(DEFAULT_ENDPOINT).with_samesite(SameSiteConfig::default().lax("*")));
    config.http.dedupe_set_cookies = true;
    let (engine, _) = engine_for(&config);

    let response = HttpResponse::ok()
        .add_header("Set-Cookie", "a=1")
        .add_header("Set-Cookie", "b=1")
        .add_header("Set-Cookie", "a=2; Path=/");

    assert_eq!(wire_set_cookies(&engine, response), vec!["b=1; SameSite=Lax", "a=2; Path=/; SameSite=Lax"]);
}

#[test]
fn test_preserve_explicit_samesite() {
    let mut config = CookieGateConfig::default();
    config.endpoints.push(EndpointConfig::new(DEFAULT_ENDPOINT).with_samesite(SameSiteConfig::default().lax("*")));
    config.http.preserve_explicit_samesite = true;
    let (engine, _) = engine_for(&config);

    assert_eq!(engine.process(DEFAULT_ENDPOINT, "a=1; SameSite=Strict"), "a=1; SameSite=Strict");
    assert_eq!(engine.process(DEFAULT_ENDPOINT, "a=1"), "a=1; SameSite=Lax");
}
