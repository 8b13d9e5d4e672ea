use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{agents, conversations, health_check, ui};
use super::state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Chat UI
        .route("/", get(ui::index))
        .route("/health", get(health_check))
        // Conversation routes
        .route("/api/conversations", post(conversations::create_conversation))
        .route(
            "/api/conversations/:id",
            get(conversations::get_conversation).delete(conversations::delete_conversation),
        )
        .route(
            "/api/conversations/:id/messages",
            post(conversations::send_message),
        )
        // Agent customization routes
        .route("/api/agents", get(agents::list_agents))
        .route("/api/agents/restore-defaults", post(agents::restore_defaults))
        .route("/api/agents/:index", get(agents::get_agent))
        .route("/api/agents/:index/prompt", put(agents::update_prompt))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
