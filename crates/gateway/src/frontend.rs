//! Embedded chat page.
//!
//! The HTML is compiled into the binary with `include_str!`, so the server
//! ships as a single file.

use axum::{Router, response::Html, routing::get};

const INDEX_HTML: &str = include_str!("../../../frontend/index.html");

/// Build a router that serves the embedded page at `/`.
pub fn frontend_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index_handler))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
