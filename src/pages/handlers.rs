use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tracing::instrument;

use crate::state::AppState;

const LANDING_TEMPLATE: &str = include_str!("../../assets/landing.html");

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_page))
        .route("/robots.txt", get(robots_txt))
}

pub(crate) fn render_landing(site_url: &str) -> String {
    LANDING_TEMPLATE.replace("{{SITE_URL}}", site_url)
}

pub(crate) fn render_robots(site_url: &str) -> String {
    [
        "User-agent: *".to_string(),
        "Allow: /".to_string(),
        format!("Sitemap: {}/sitemap.xml", site_url),
    ]
    .join("\n")
}

#[instrument(skip(state))]
pub async fn landing_page(State(state): State<AppState>) -> Html<String> {
    Html(render_landing(&state.config.site_url))
}

#[instrument(skip(state))]
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        render_robots(&state.config.site_url),
    )
}
