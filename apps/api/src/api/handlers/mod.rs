// HTTP handlers, grouped by resource

pub mod agents;
pub mod conversations;
pub mod ui;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
