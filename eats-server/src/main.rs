use eats_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("Eats server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Server state (work dir, database, services)
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server (registers background tasks itself)
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
