use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{CoreModule, Database, Environment, FormSelections},
    report::ReportDocument,
};

/// Listing entry for a generated requirements document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Document identifier.
    pub id: Uuid,
    /// When the document was generated.
    pub created_at: DateTime<Utc>,
    /// Requested environment.
    pub environment: Environment,
    /// Selected core modules, in catalog order.
    pub modules: Vec<CoreModule>,
    /// Selected database engine.
    pub database: Database,
    /// Fingerprint of the selections.
    pub fingerprint: String,
}

impl DocumentSummary {
    /// Summarises a compiled report.
    #[must_use]
    pub fn new(id: Uuid, selections: &FormSelections, report: &ReportDocument) -> Self {
        Self {
            id,
            created_at: report.generated_at,
            environment: selections.environment(),
            modules: selections.core_modules().iter().copied().collect(),
            database: selections.database(),
            fingerprint: report.fingerprint.clone(),
        }
    }

    fn mentions(&self, needle: &str) -> bool {
        let haystacks = [
            self.id.to_string(),
            self.environment.label().to_string(),
            self.database.name().to_string(),
        ];
        haystacks
            .iter()
            .map(String::as_str)
            .chain(self.modules.iter().map(|m| m.name()))
            .any(|haystack| haystack.to_lowercase().contains(needle))
    }
}

/// Creation window of the documents to list, relative to the current time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    /// No restriction.
    #[default]
    All,
    /// Created on the current UTC calendar day.
    Today,
    /// Created within the last seven days.
    Week,
}

/// The date range is not one of `all`, `today` or `week`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown date range '{0}', expected one of all, today, week")]
pub struct DateRangeError(String);

impl FromStr for DateRange {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            other => Err(DateRangeError(other.to_string())),
        }
    }
}

impl DateRange {
    fn contains(self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Today => created_at.date_naive() == now.date_naive(),
            Self::Week => created_at > now - Duration::days(7) && created_at <= now,
        }
    }
}

/// Criteria for the generated-document listing. Every criterion must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    search: Option<String>,
    date: DateRange,
    module: Option<CoreModule>,
}

impl DocumentFilter {
    /// A filter matching every document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive text search. Blank text matches everything.
    #[must_use]
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_lowercase());
        self
    }

    /// Restricts the creation date.
    #[must_use]
    pub const fn date(mut self, range: DateRange) -> Self {
        self.date = range;
        self
    }

    /// Only documents that include the given module.
    #[must_use]
    pub const fn module(mut self, module: CoreModule) -> Self {
        self.module = Some(module);
        self
    }

    /// Whether the summary satisfies every criterion.
    #[must_use]
    pub fn matches(&self, summary: &DocumentSummary, now: DateTime<Utc>) -> bool {
        self.search
            .as_deref()
            .is_none_or(|needle| summary.mentions(needle))
            && self.date.contains(summary.created_at, now)
            && self
                .module
                .is_none_or(|module| summary.modules.contains(&module))
    }

    /// The matching summaries, newest first.
    pub fn apply<'a>(
        &self,
        summaries: impl IntoIterator<Item = &'a DocumentSummary>,
        now: DateTime<Utc>,
    ) -> Vec<&'a DocumentSummary> {
        let mut matching: Vec<_> = summaries
            .into_iter()
            .filter(|summary| self.matches(summary, now))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}
