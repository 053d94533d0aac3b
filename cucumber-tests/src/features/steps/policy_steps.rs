use cookiegate_core::config::{EndpointConfig, SameSiteConfig};
use cookiegate_core::http::ResponseCookie;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use crate::features::world::CookieGateWorld;

#[given("the configuration:")]
async fn given_configuration(world: &mut CookieGateWorld, step: &Step) {
    let toml = step.docstring.as_deref().unwrap_or_default();
    world.load_toml(toml);
    assert!(world.last_error.is_none(), "configuration rejected: {:?}", world.last_error);
}

#[given(expr = "endpoint {string} with samesite lax {string}, strict {string} and none {string}")]
async fn given_endpoint(world: &mut CookieGateWorld, endpoint: String, lax: String, strict: String, none: String) {
    let samesite = SameSiteConfig::default().lax(lax).strict(strict).none(none);
    world.config.endpoints.push(EndpointConfig::new(endpoint).with_samesite(samesite));
}

#[given(expr = "endpoint {string} is partitioned")]
async fn given_partitioned(world: &mut CookieGateWorld, endpoint: String) {
    let entry = world.config.endpoints.iter_mut().find(|e| e.id == endpoint);
    match entry.and_then(|e| e.samesite.as_mut()) {
        Some(samesite) => samesite.partitioned = true,
        None => panic!("no inline samesite policy for endpoint {}", endpoint),
    }
}

#[given("Set-Cookie headers are deduplicated by name")]
async fn given_dedupe(world: &mut CookieGateWorld) {
    world.config.http.dedupe_set_cookies = true;
}

#[given("an explicit SameSite attribute is preserved")]
async fn given_preserve(world: &mut CookieGateWorld) {
    world.config.http.preserve_explicit_samesite = true;
}

#[when(expr = "the application sets header {string}")]
async fn when_set_header(world: &mut CookieGateWorld, value: String) {
    world.response = std::mem::take(&mut world.response).set_header("Set-Cookie", &value);
}

#[when(expr = "the application adds header {string}")]
async fn when_add_header(world: &mut CookieGateWorld, value: String) {
    world.response = std::mem::take(&mut world.response).add_header("Set-Cookie", &value);
}

#[when(expr = "the application adds cookie {string} with value {string}")]
async fn when_add_cookie(world: &mut CookieGateWorld, name: String, value: String) {
    let cookie = ResponseCookie::new(name, value).with_path("/");
    world.response = std::mem::take(&mut world.response).cookie(&cookie);
}

#[when(expr = "the response is sent from endpoint {string}")]
async fn when_response_sent(world: &mut CookieGateWorld, endpoint: String) {
    let snapshot = world.engine().snapshot();
    let response = std::mem::take(&mut world.response).apply_cookie_policy(&snapshot, &endpoint);
    world.output = response.set_cookies().into_iter().map(str::to_string).collect();
    world.response = response;
}

#[then(expr = "the response carries {int} Set-Cookie header(s)")]
async fn then_header_count(world: &mut CookieGateWorld, count: usize) {
    assert_eq!(world.output.len(), count, "headers: {:?}", world.output);
}

#[then(expr = "Set-Cookie header {int} is {string}")]
async fn then_header_is(world: &mut CookieGateWorld, index: usize, expected: String) {
    let actual = world.output.get(index - 1).unwrap_or_else(|| panic!("no header {} in {:?}", index, world.output));
    assert_eq!(actual, &expected);
}

#[then(expr = "the Set-Cookie header for {string} is {string}")]
async fn then_header_for(world: &mut CookieGateWorld, name: String, expected: String) {
    let prefix = format!("{}=", name);
    let matching: Vec<&String> = world.output.iter().filter(|h| h.starts_with(&prefix)).collect();
    assert_eq!(matching, vec![&expected], "headers: {:?}", world.output);
}

#[then(expr = "a {string} diagnostic is reported")]
async fn then_diagnostic(world: &mut CookieGateWorld, code: String) {
    world.engine();
    let codes = world.diagnostic_codes();
    assert!(codes.contains(&code), "diagnostics: {:?}", codes);
}

#[then(expr = "{int} {string} diagnostic(s) is/are reported")]
async fn then_diagnostic_count(world: &mut CookieGateWorld, count: usize, code: String) {
    world.engine();
    let codes = world.diagnostic_codes();
    assert_eq!(codes.iter().filter(|c| **c == code).count(), count, "diagnostics: {:?}", codes);
}

#[then("no diagnostics are reported")]
async fn then_no_diagnostics(world: &mut CookieGateWorld) {
    world.engine();
    assert!(world.sink.is_empty(), "diagnostics: {:?}", world.diagnostic_codes());
}
