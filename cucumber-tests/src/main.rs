use cucumber::{cli, World};
mod features;

#[tokio::main]
async fn main() {
    features::world::CookieGateWorld::cucumber()
        .fail_on_skipped()
        .with_cli::<()>(cli::Opts::parsed())
        .run_and_exit("features/")
        .await;
}
