//! Embedded configuration templates rendered with simple `{{key}}` substitution.

const COOKIEGATE_TOML: &str = include_str!("cookiegate_toml.tmpl");
const ENV_EXAMPLE: &str = include_str!("env_example.tmpl");

fn render(template: &str, endpoint_id: &str, session_cookie: &str) -> String {
    template.replace("{{endpoint_id}}", endpoint_id).replace("{{session_cookie}}", session_cookie)
}

/// A file to write, with its name and rendered content.
pub struct TemplateFile {
    pub path: &'static str,
    pub content: String,
}

/// Starter configuration for one endpoint.
pub fn starter_config(endpoint_id: &str, session_cookie: &str) -> Vec<TemplateFile> {
    vec![
        TemplateFile { path: "cookiegate.toml", content: render(COOKIEGATE_TOML, endpoint_id, session_cookie) },
        TemplateFile { path: ".env.example", content: render(ENV_EXAMPLE, endpoint_id, session_cookie) },
    ]
}
