use std::time::Duration;

use anyhow::Context;
use cbot_core::chat::{ChatMessage, ChatRequest, ChatResponse, CLIENT_CONNECTION_ERROR};
use tracing::instrument;

const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The question to ask
    message: String,

    /// Base URL of the CBOT service
    #[arg(long, value_name = "URL", default_value = "http://localhost:5000")]
    server: String,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(server = %self.server))]
    pub fn run(self) -> anyhow::Result<()> {
        let message = ChatMessage::new(&self.message)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?;
        let reply = runtime.block_on(ask(&self.server, &message));

        println!("{reply}");
        Ok(())
    }
}

/// Posts the message to the service and returns its reply, or the
/// connection-error text if the service could not be reached.
async fn ask(server: &str, message: &ChatMessage) -> String {
    match post(server, message).await {
        Ok(response) => response.reply_or_default(),
        Err(error) => {
            tracing::warn!("chat request failed: {error:#}");
            CLIENT_CONNECTION_ERROR.to_string()
        }
    }
}

async fn post(server: &str, message: &ChatMessage) -> anyhow::Result<ChatResponse> {
    let url = format!("{}/api/chatbot/message", server.trim_end_matches('/'));
    let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;

    let response = client
        .post(&url)
        .json(&ChatRequest::from(message))
        .send()
        .await
        .with_context(|| format!("failed to reach {url}"))?
        .error_for_status()?;

    Ok(response.json().await?)
}
