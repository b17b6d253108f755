//! Output formats for compiled reports.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::report::{DnsRecord, HardwareRow, ReportDocument};

mod html;
pub use html::{escape_html, Html};

mod markdown;
pub use markdown::{escape_markdown, Markdown};

/// Prefix of every downloaded report file name.
pub const FILE_STEM: &str = "CBOT_Installation_Requirements";

/// A supported report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// A standalone, printable HTML page.
    #[default]
    Html,
    /// A Markdown document.
    #[serde(alias = "md")]
    Markdown,
    /// The report structure as JSON.
    Json,
}

/// The requested format is not supported.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unsupported format '{0}', expected one of html, markdown, json")]
pub struct FormatError(String);

impl Format {
    /// Every supported format.
    pub const ALL: [Self; 3] = [Self::Html, Self::Markdown, Self::Json];

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    /// MIME type to serve the rendered report with.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    /// Download file name for the report with the given identifier.
    #[must_use]
    pub fn file_name(self, id: impl fmt::Display) -> String {
        format!("{FILE_STEM}_{id}.{}", self.extension())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Json => "json",
        })
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(FormatError(s.to_string())),
        }
    }
}

/// Renders a report as a standalone HTML page.
#[must_use]
pub fn html(document: &ReportDocument) -> String {
    Html(document).to_string()
}

/// Renders a report as Markdown.
#[must_use]
pub fn markdown(document: &ReportDocument) -> String {
    Markdown(document).to_string()
}

/// Renders a report in the given format.
///
/// # Panics
///
/// Panics if JSON serialization fails, which cannot happen for a report.
#[must_use]
pub fn render(document: &ReportDocument, format: Format) -> String {
    match format {
        Format::Html => html(document),
        Format::Markdown => markdown(document),
        Format::Json => {
            serde_json::to_string_pretty(document).expect("this should never fail")
        }
    }
}

const HARDWARE_HEADERS: [&str; 6] = [
    "Environment",
    "CPU",
    "RAM",
    "Disk",
    "GPU",
    "Operating System",
];

const DNS_HEADERS: [&str; 3] = ["Service", "Hostname", "Port"];

fn hardware_cells(row: &HardwareRow) -> [String; 6] {
    [
        row.stage.label().to_string(),
        format!("{} cores", row.cpu_cores),
        format!("{} GB", row.ram_gb),
        format!("{} GB", row.disk_gb),
        row.gpu.to_string(),
        row.os.to_string(),
    ]
}

fn dns_cells(record: &DnsRecord) -> [String; 3] {
    let port = if record.websocket {
        format!("{} (WebSocket)", record.port)
    } else {
        record.port.to_string()
    };
    [record.service.clone(), record.hostname.clone(), port]
}

fn generated_on(document: &ReportDocument) -> String {
    document
        .generated_at
        .format("%Y-%m-%d %H:%M UTC")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use test_case::test_case;

    use super::*;
    use crate::{
        compile_at,
        domain::{CoreModule, Database, Environment, EnvironmentType, FormSelections},
    };

    fn report() -> ReportDocument {
        let selections =
            FormSelections::new(Environment::Both, EnvironmentType::Cloud, Database::Mssql)
                .with_module(CoreModule::Core);
        compile_at(&selections, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    #[test_case("html", Format::Html; "html")]
    #[test_case("MD", Format::Markdown; "md uppercase")]
    #[test_case(" markdown ", Format::Markdown; "markdown padded")]
    #[test_case("json", Format::Json; "json")]
    fn parse(input: &str, expected: Format) {
        assert_eq!(input.parse::<Format>(), Ok(expected));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "pdf".parse::<Format>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported format 'pdf', expected one of html, markdown, json"
        );
    }

    #[test]
    fn file_name_uses_extension() {
        assert_eq!(
            Format::Markdown.file_name("abc"),
            "CBOT_Installation_Requirements_abc.md"
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for format in Format::ALL {
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn json_carries_section_ordinals() {
        let rendered = render(&report(), Format::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["title"], "CBOT Installation Requirements");
        assert_eq!(value["sections"][0]["ordinal"], 1);
        assert_eq!(value["sections"][0]["kind"], "environment");
        assert_eq!(value["generatedAt"], "2024-01-02T03:04:05Z");
    }

    #[test]
    fn identical_reports_render_identically() {
        for format in Format::ALL {
            assert_eq!(render(&report(), format), render(&report(), format));
        }
    }

    #[test]
    fn websocket_ports_are_marked() {
        let report = report();
        let cells: Vec<_> = report.dns_records().iter().map(dns_cells).collect();
        assert_eq!(cells[2][2], "5000 (WebSocket)");
        assert_eq!(cells[0][2], "5351");
    }
}
