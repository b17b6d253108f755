//! Shared state of the HTTP service.

use std::sync::Arc;

use anyhow::Context;
use cbot_core::admin::ModuleCards;
use tokio::sync::RwLock;

use crate::{registry::Registry, Config};

/// Shared state for the HTTP handlers.
///
/// Mutable parts are wrapped in `Arc<RwLock>` for access across requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Arc<Config>,
    /// Generated documents.
    pub registry: Arc<RwLock<Registry>>,
    /// Module specification cards.
    pub cards: Arc<RwLock<ModuleCards>>,
    /// Client for the chat webhook.
    pub client: reqwest::Client,
}

impl AppState {
    /// Create the state for the given configuration, with seeded module cards
    /// and an empty registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.webhook_timeout())
            .build()
            .context("failed to build webhook client")?;

        Ok(Self {
            registry: Arc::new(RwLock::new(Registry::new(config.max_documents()))),
            cards: Arc::new(RwLock::new(ModuleCards::default())),
            config: Arc::new(config),
            client,
        })
    }
}
