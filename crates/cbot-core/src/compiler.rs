use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::{domain::FormSelections, report::ReportDocument};

mod database;
pub use database::{AIFLOW_POSTGRESQL_DISK, CLASSIFIER_REQUIRES_MSSQL};

mod docker;
pub use docker::{image_names, REGISTRY, REGISTRY_PORT};

mod hardware;
pub use hardware::{MODEL_HOSTING_VRAM_GB, SUPPORTED_OS};

mod network;
pub use network::WEBSOCKET_PORT;

mod sections;

/// Title of every compiled report.
pub const REPORT_TITLE: &str = "CBOT Installation Requirements";

const FOOTER: &str = "This document was generated automatically by CBOT. \
                      Please contact the technical team for details.";

/// Compiles a report for the given selections, stamped with the current
/// time.
#[must_use]
pub fn compile(selections: &FormSelections) -> ReportDocument {
    compile_at(selections, Utc::now())
}

/// Compiles a report for the given selections.
///
/// The output depends only on the selections and the timestamp.
#[must_use]
#[instrument(skip(selections), fields(fingerprint = tracing::field::Empty))]
pub fn compile_at(selections: &FormSelections, generated_at: DateTime<Utc>) -> ReportDocument {
    let fingerprint = selections.fingerprint();
    tracing::Span::current().record("fingerprint", fingerprint.as_str());

    let sections = sections::build(selections);
    tracing::debug!(sections = sections.len(), "compiled report");

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        generated_at,
        fingerprint,
        sections,
        footer: FOOTER.to_string(),
    }
}
