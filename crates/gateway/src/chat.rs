//! `POST /chat`: answer one message, streaming the reply as plain text.

use crate::SharedState;
use alterego_core::Error;
use alterego_core::message::Message;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use std::convert::Infallible;
use tracing::{error, info, warn};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,

    /// Prior turns, oldest first
    #[serde(default)]
    pub history: Vec<Message>,
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    if payload.message.trim().is_empty() {
        return plain_text(StatusCode::BAD_REQUEST, "message must not be empty".into());
    }

    info!(history = payload.history.len(), "Chat request");

    // Run on its own task so a client hanging up doesn't cancel the round in flight
    let driver = state.driver.clone();
    let task =
        tokio::spawn(async move { driver.reply(payload.history, payload.message).await });

    match task.await {
        Ok(Ok(reply)) => {
            let stream = futures::stream::once(async move { Ok::<_, Infallible>(reply) });
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, TEXT_PLAIN)],
                Body::from_stream(stream),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Chat request failed");
            plain_text(status_for(&e), e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Chat task panicked");
            plain_text(StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
        }
    }
}

/// Upstream provider failures are a bad gateway; everything else is ours.
fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Provider(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}
