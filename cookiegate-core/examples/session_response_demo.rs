//! cookiegate session response demo
//!
//! Builds a response the way an application handler would, with a session
//! cookie, a literal `Set-Cookie` header and a structured cookie, then runs it
//! through the policy of one endpoint and prints the wire form.

use cookiegate_core::http::{HttpResponse, ResponseCookie};
use cookiegate_core::logging::{init_logging, LoggingConfig};
use cookiegate_core::session::{CookieConfig, SessionCookie};
use cookiegate_core::{CookieGateConfig, CookiePolicyEngine};

const CONFIG: &str = r#"
[[samesite]]
id = "embedded"
lax = "prefs*"
none = "widget_*"
partitioned = true

[[endpoint]]
id = "defaultHttpEndpoint"
samesite_ref = "embedded"

[session]
cookie_name = "JSESSIONID"
cookie_samesite = "None"
cookie_partitioned = "true"
"#;

fn main() -> anyhow::Result<()> {
    init_logging(&LoggingConfig::development())?;

    let config = CookieGateConfig::from_toml(CONFIG)?;
    config.validate()?;
    let engine = CookiePolicyEngine::with_log_sink(&config);

    let session = SessionCookie::new(CookieConfig { name: "JSESSIONID".to_string(), ..CookieConfig::default() });
    let response = HttpResponse::ok()
        .cookie(&session.build("f3a9c1", None))
        .add_header("Set-Cookie", "prefs_theme=dark; Path=/")
        .cookie(&ResponseCookie::new("widget_state", "open").with_path("/embed"))
        .text("ok")
        .apply_cookie_policy(&engine.snapshot(), "defaultHttpEndpoint");

    println!("{}", String::from_utf8_lossy(&response.to_bytes()));
    Ok(())
}
