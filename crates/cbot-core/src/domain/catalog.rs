use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Error returned when an identifier is not part of the fixed catalog.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct CatalogError {
    kind: &'static str,
    value: String,
}

impl CatalogError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// The catalog the identifier was looked up in, e.g. "core module".
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A primary product component the customer can opt into.
///
/// Declaration order is catalog order; sets of modules iterate in this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CoreModule {
    /// Management panel.
    Panel,
    /// Integration module.
    Fusion,
    /// The CBOT core.
    Core,
    /// Live support chat.
    Livechat,
    /// Classification module. Requires MSSQL.
    Classifier,
    /// AI flow orchestration.
    Aiflow,
    /// Analytics.
    Analytics,
}

impl CoreModule {
    /// Every core module, in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Panel,
        Self::Fusion,
        Self::Core,
        Self::Livechat,
        Self::Classifier,
        Self::Aiflow,
        Self::Analytics,
    ];

    /// The wire identifier, e.g. `aiflow`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Fusion => "fusion",
            Self::Core => "core",
            Self::Livechat => "livechat",
            Self::Classifier => "classifier",
            Self::Aiflow => "aiflow",
            Self::Analytics => "analytics",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Panel => "Panel",
            Self::Fusion => "Fusion",
            Self::Core => "Core",
            Self::Livechat => "Live Chat",
            Self::Classifier => "Classifier",
            Self::Aiflow => "AI Flow",
            Self::Analytics => "Analytics",
        }
    }

    /// Name of the container image shipping this module.
    #[must_use]
    pub fn image_name(self) -> String {
        image_name(self.id())
    }
}

impl fmt::Display for CoreModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CoreModule {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|module| module.id() == s)
            .ok_or_else(|| CatalogError::new("core module", s))
    }
}

/// An optional add-on capability layered on top of the core modules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AuxiliaryService {
    /// Optical character recognition.
    Ocr,
    /// Data masking.
    Masking,
    /// File to Markdown conversion.
    FileToMd,
    /// Website crawler.
    Crawler,
    /// Hosted Hugging Face model serving. Requires a GPU.
    HfModelHosting,
}

impl AuxiliaryService {
    /// Every auxiliary service, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Ocr,
        Self::Masking,
        Self::FileToMd,
        Self::Crawler,
        Self::HfModelHosting,
    ];

    /// The wire identifier, e.g. `hf_model_hosting`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Ocr => "ocr",
            Self::Masking => "masking",
            Self::FileToMd => "file_to_md",
            Self::Crawler => "crawler",
            Self::HfModelHosting => "hf_model_hosting",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ocr => "OCR",
            Self::Masking => "Masking",
            Self::FileToMd => "File to Markdown",
            Self::Crawler => "Crawler",
            Self::HfModelHosting => "HF Model Hosting",
        }
    }

    /// Name of the container image shipping this service.
    #[must_use]
    pub fn image_name(self) -> String {
        image_name(self.id())
    }
}

impl fmt::Display for AuxiliaryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AuxiliaryService {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service| service.id() == s)
            .ok_or_else(|| CatalogError::new("auxiliary service", s))
    }
}

/// Supported database engines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    /// `MongoDB`.
    Mongodb,
    /// Microsoft SQL Server.
    Mssql,
    /// `PostgreSQL`.
    Postgresql,
}

impl Database {
    /// Every supported database, in catalog order.
    pub const ALL: [Self; 3] = [Self::Mongodb, Self::Mssql, Self::Postgresql];

    /// The wire identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Mongodb => "mongodb",
            Self::Mssql => "mssql",
            Self::Postgresql => "postgresql",
        }
    }

    /// Display name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mongodb => "MongoDB",
            Self::Mssql => "Microsoft SQL Server",
            Self::Postgresql => "PostgreSQL",
        }
    }

    /// The port the database must be reachable on.
    #[must_use]
    pub const fn port(self) -> u16 {
        match self {
            Self::Mongodb => 27017,
            Self::Mssql => 1433,
            Self::Postgresql => 5432,
        }
    }

    /// Required server collation, if the engine needs one.
    #[must_use]
    pub const fn collation(self) -> Option<&'static str> {
        match self {
            Self::Mssql => Some("SQL_Latin1_General_CP1_CI_AS"),
            Self::Mongodb | Self::Postgresql => None,
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Database {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|database| database.id() == s)
            .ok_or_else(|| CatalogError::new("database", s))
    }
}

fn image_name(id: &str) -> String {
    format!("cbot-{}", id.replace('_', "-"))
}
