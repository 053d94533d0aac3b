use cucumber::gherkin::Step;
use cucumber::{then, when};

use crate::features::world::CookieGateWorld;

#[when("the configuration file is replaced with:")]
async fn when_reload(world: &mut CookieGateWorld, step: &Step) {
    let content = step.docstring.as_deref().unwrap_or_default().to_string();
    world.engine();
    let path = world.write_config_file(&content).expect("write config file");

    let result = world.engine().reload_from(&path);
    match result {
        Ok(generation) => {
            world.last_generation = generation;
            world.last_error = None;
        }
        Err(e) => world.last_error = Some(format!("{:#}", e)),
    }
}

#[then(expr = "the engine is at generation {int}")]
async fn then_generation(world: &mut CookieGateWorld, generation: u64) {
    assert_eq!(world.engine().generation(), generation);
}

#[then("the reload is rejected")]
async fn then_rejected(world: &mut CookieGateWorld) {
    assert!(world.last_error.is_some(), "reload unexpectedly succeeded");
}
