mod api_doc;
mod auth;
mod error;
mod extract;
mod handlers;
mod services;
mod setup;
mod state;

use atelier_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    setup::init_tracing();

    // Load configuration; missing required values fail here, not later
    let config = Config::from_env()?;

    // Initialize the application (database, storage, routes)
    let (_state, router) = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
