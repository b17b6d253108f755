use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use cbot_core::chat::{
    ChatMessage, ChatRequest, ChatResponse, CONNECTION_FAILED, UNREACHABLE,
};
use tracing::instrument;

use crate::{error::ApiError, AppState};

/// Forwards a chat message to the webhook. Always answers with a reply; a
/// failed round trip yields a fallback text.
#[instrument(skip_all)]
pub async fn post_message(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = request?;
    let message = ChatMessage::try_from(request)?;
    let reply = forward(&state.client, state.config.webhook_url(), &message).await;
    Ok(Json(ChatResponse::new(reply)))
}

async fn forward(client: &reqwest::Client, url: &str, message: &ChatMessage) -> String {
    let result = client.post(url).json(&ChatRequest::from(message)).send().await;

    let response = match result {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(%url, "chat webhook request failed: {error}");
            return CONNECTION_FAILED.to_string();
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, %status, "chat webhook returned an error status");
        return UNREACHABLE.to_string();
    }

    match response.json::<ChatResponse>().await {
        Ok(body) => body.reply_or_default(),
        Err(error) => {
            tracing::error!(%url, "chat webhook returned an unreadable body: {error}");
            CONNECTION_FAILED.to_string()
        }
    }
}
