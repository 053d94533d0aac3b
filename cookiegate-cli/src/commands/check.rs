use std::path::Path;

use anyhow::{bail, Result};

use super::load_engine;

/// Report what a configuration resolves to and every diagnostic it produces.
///
/// With `strict`, any diagnostic makes the check fail.
pub fn run(path: &Path, strict: bool) -> Result<()> {
    let (config, engine, sink) = load_engine(path)?;
    let snapshot = engine.snapshot();

    println!("Configuration: {}", path.display());
    for id in snapshot.endpoint_ids() {
        let policy = snapshot.policy_for(id);
        let reference = config
            .endpoints
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.samesite_ref.as_deref())
            .map(|r| format!(" (samesite_ref = {})", r))
            .unwrap_or_default();
        println!("  endpoint {}{}", id, reference);
        for value in cookiegate_core::SameSite::PRIORITY.iter().rev() {
            let patterns: Vec<String> = policy.patterns(*value).iter().map(|p| p.to_string()).collect();
            if !patterns.is_empty() {
                println!("    {:<6} {}", value, patterns.join(", "));
            }
        }
        if policy.partitioned() {
            println!("    partitioned");
        }
    }

    let session = snapshot.session();
    println!(
        "  session cookie {}: samesite={} secure={} partitioned={}",
        session.cookie_name, session.same_site, session.secure, session.partitioned
    );

    let diagnostics = sink.entries();
    if diagnostics.is_empty() {
        println!("No diagnostics.");
        return Ok(());
    }

    println!("{} diagnostic(s):", diagnostics.len());
    for diagnostic in &diagnostics {
        println!("  {}", diagnostic);
    }

    if strict {
        bail!("{} configuration diagnostic(s)", diagnostics.len());
    }
    Ok(())
}
