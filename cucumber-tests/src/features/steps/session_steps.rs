use cucumber::{given, then};

use crate::features::world::CookieGateWorld;

#[given(expr = "the session cookie {string} with samesite {string}")]
async fn given_session_cookie(world: &mut CookieGateWorld, name: String, samesite: String) {
    world.config.session.cookie_name = name;
    world.config.session.cookie_samesite = samesite;
}

#[given("the session cookie is secure")]
async fn given_session_secure(world: &mut CookieGateWorld) {
    world.config.session.cookie_secure = true;
}

#[given(expr = "the session cookie partitioned setting is {string}")]
async fn given_session_partitioned(world: &mut CookieGateWorld, setting: String) {
    world.config.session.cookie_partitioned = setting;
}

#[then(expr = "the session override resolves to samesite {string} and partitioned {string}")]
async fn then_session_resolved(world: &mut CookieGateWorld, samesite: String, partitioned: String) {
    let session = world.engine().snapshot().session().clone();
    assert_eq!(session.same_site.to_string(), samesite);
    assert_eq!(session.partitioned.to_string(), partitioned);
}
