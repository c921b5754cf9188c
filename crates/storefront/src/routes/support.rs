//! Support chat route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::services::chat::{Agent, ChatMessage, Exchange, SendReceipt};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewMessage {
    pub text: String,
}

/// A random online agent.
#[instrument(skip(state))]
pub async fn agent(State(state): State<AppState>) -> Result<Json<Agent>> {
    Ok(Json(state.chat().random_agent().await?))
}

#[instrument(skip(state))]
pub async fn messages(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.chat().messages().await)
}

/// Post a message; responds once the agent has replied.
#[instrument(skip(state, body))]
pub async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<NewMessage>,
) -> Result<Json<Exchange>> {
    let exchange = state.chat().post_message(&body.text).await?;
    Ok(Json(exchange))
}

/// Deliver a message without adding it to the conversation.
#[instrument(skip(state, body))]
pub async fn send(
    State(state): State<AppState>,
    Json(body): Json<NewMessage>,
) -> Json<SendReceipt> {
    Json(state.chat().send_message(&body.text).await)
}

#[derive(Debug, Serialize)]
pub struct AutoReply {
    pub reply: &'static str,
}

/// A canned agent reply to `text`.
#[instrument(skip(state, body))]
pub async fn auto_reply(
    State(state): State<AppState>,
    Json(body): Json<NewMessage>,
) -> Json<AutoReply> {
    Json(AutoReply {
        reply: state.chat().automated_response(&body.text).await,
    })
}
