use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Chat page: conversation view, inference trace and agent prompt editors
///
/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
