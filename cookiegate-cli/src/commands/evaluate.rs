use std::path::Path;

use anyhow::Result;

use super::load_engine;

/// Print the decision for each cookie name.
pub fn classify(path: &Path, endpoint: &str, names: &[String]) -> Result<()> {
    let (_, engine, _) = load_engine(path)?;
    let snapshot = engine.snapshot();

    for name in names {
        let decision = snapshot.decide(endpoint, name);
        let same_site = decision.same_site.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{}: samesite={} secure={} partitioned={}",
            name, same_site, decision.force_secure, decision.add_partitioned
        );
    }
    Ok(())
}

/// Rewrite raw `Set-Cookie` values as one response would send them.
pub fn rewrite(path: &Path, endpoint: &str, values: &[String]) -> Result<()> {
    for line in rewrite_lines(path, endpoint, values)? {
        println!("Set-Cookie: {}", line);
    }
    Ok(())
}

fn rewrite_lines(path: &Path, endpoint: &str, values: &[String]) -> Result<Vec<String>> {
    let (_, engine, _) = load_engine(path)?;
    Ok(engine.snapshot().process_all(endpoint, values.iter().map(String::as_str)))
}
