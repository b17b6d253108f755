use std::{
    net::{Ipv4Addr, SocketAddr},
    path::Path,
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CBOT_CONFIG";

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding the chat webhook URL.
pub const WEBHOOK_ENV: &str = "N8N_WEBHOOK_URL";

/// Configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Address to listen on.
    bind: SocketAddr,

    /// URL chat messages are forwarded to.
    webhook_url: String,

    /// How long to wait for the webhook before answering with a fallback.
    webhook_timeout_secs: u64,

    /// How many generated documents to keep. The oldest is evicted first.
    max_documents: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            webhook_url: default_webhook_url(),
            webhook_timeout_secs: default_webhook_timeout_secs(),
            max_documents: default_max_documents(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))?;
        config.validate()
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Builds the configuration from the process environment: the file named
    /// by `CBOT_CONFIG` (defaults when unset), then `PORT` and
    /// `N8N_WEBHOOK_URL` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or an override is
    /// malformed.
    pub fn from_env() -> Result<Self, String> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let config = match lookup(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        config.with_overrides(lookup)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        if let Some(port) = lookup(PORT_ENV) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("Invalid {PORT_ENV} '{port}': {e}"))?;
            self.bind.set_port(port);
        }
        if let Some(url) = lookup(WEBHOOK_ENV) {
            self.webhook_url = url;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self, String> {
        if self.webhook_url.trim().is_empty() {
            return Err("webhook_url must not be empty".to_string());
        }
        if self.webhook_timeout_secs == 0 {
            return Err("webhook_timeout_secs must be positive".to_string());
        }
        if self.max_documents == 0 {
            return Err("max_documents must be positive".to_string());
        }
        Ok(self)
    }

    /// Address to listen on.
    #[must_use]
    pub const fn bind(&self) -> SocketAddr {
        self.bind
    }

    /// URL chat messages are forwarded to.
    #[must_use]
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Timeout of a webhook round trip.
    #[must_use]
    pub const fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    /// How many generated documents to keep.
    #[must_use]
    pub const fn max_documents(&self) -> usize {
        self.max_documents
    }

    /// Sets the listening address.
    #[must_use]
    pub const fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Sets the webhook URL.
    #[must_use]
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = url.into();
        self
    }

    /// Sets the document capacity.
    #[must_use]
    pub const fn with_max_documents(mut self, max_documents: usize) -> Self {
        self.max_documents = max_documents;
        self
    }
}

const fn default_bind() -> SocketAddr {
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5000)
}

fn default_webhook_url() -> String {
    "http://n8n:5678/webhook/cbot-chatbot".to_string()
}

const fn default_webhook_timeout_secs() -> u64 {
    5
}

const fn default_max_documents() -> usize {
    500
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_bind")]
        bind: SocketAddr,

        #[serde(default = "default_webhook_url")]
        webhook_url: String,

        /// Seconds.
        #[serde(default = "default_webhook_timeout_secs")]
        webhook_timeout_secs: u64,

        #[serde(default = "default_max_documents")]
        max_documents: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                bind,
                webhook_url,
                webhook_timeout_secs,
                max_documents,
            } => Self {
                bind,
                webhook_url,
                webhook_timeout_secs,
                max_documents,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            bind: config.bind,
            webhook_url: config.webhook_url,
            webhook_timeout_secs: config.webhook_timeout_secs,
            max_documents: config.max_documents,
        }
    }
}
