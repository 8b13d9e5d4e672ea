use std::sync::Arc;

use cotchat_api::agents::{ModelClient, SequentialChain};
use cotchat_api::api::{build_router, AppState};
use cotchat_api::config::AppConfig;
use cotchat_api::infrastructure::repositories::InMemoryConversationRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Missing credentials are fatal
    let config = AppConfig::from_env()?;

    tracing::info!(model = %config.model, "Initializing Gemini model...");
    let client = config.initialize_model_client().await?;

    let client: Arc<dyn ModelClient> = Arc::new(client);
    let chain = SequentialChain::with_default_agents(client)?;
    tracing::info!(agents = chain.len(), "Agent chain ready");

    let state = AppState::new(
        Arc::new(chain),
        Arc::new(InMemoryConversationRepository::new()),
    );
    let app = build_router(state);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
