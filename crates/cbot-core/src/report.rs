//! The compiled requirements report.
//!
//! A [`ReportDocument`] is an ordered list of numbered [`Section`]s. Each
//! section is made of presentation-neutral [`Block`]s so the same document can
//! be rendered as HTML, Markdown or JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Stage;

/// Sections a report can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Environment and hosting type.
    Environment,
    /// Selected modules and auxiliary services.
    Modules,
    /// Hardware sizing table.
    Hardware,
    /// Database engine, port and warnings.
    Database,
    /// Network, firewall and DNS records.
    Network,
    /// Container registry and image list.
    Docker,
    /// LDAP integration. Conditional.
    Ldap,
    /// Additional requirements of AI services. Conditional.
    AiServices,
    /// Installation topology.
    Topology,
}

impl SectionKind {
    /// Section heading without its ordinal.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Environment => "Environment Information",
            Self::Modules => "Selected Modules",
            Self::Hardware => "Hardware Requirements",
            Self::Database => "Database Requirements",
            Self::Network => "Network / Firewall Requirements",
            Self::Docker => "Docker Images and Registry",
            Self::Ldap => "LDAP Requirements",
            Self::AiServices => "Additional AI Service Requirements",
            Self::Topology => "Installation Topology",
        }
    }
}

/// GPU requirement of a hardware row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum GpuRequirement {
    /// No GPU needed.
    NotRequired,
    /// A GPU with at least this much video memory, in GB.
    MinimumVram(u32),
}

impl fmt::Display for GpuRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRequired => f.write_str("not required"),
            Self::MinimumVram(gb) => write!(f, "minimum {gb}GB VRAM"),
        }
    }
}

impl From<GpuRequirement> for String {
    fn from(gpu: GpuRequirement) -> Self {
        gpu.to_string()
    }
}

/// Sizing of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareRow {
    /// The stage this row sizes.
    pub stage: Stage,
    /// CPU cores.
    pub cpu_cores: u32,
    /// Memory in GB.
    pub ram_gb: u32,
    /// Disk in GB.
    pub disk_gb: u32,
    /// GPU requirement.
    pub gpu: GpuRequirement,
    /// Supported operating systems.
    pub os: &'static str,
}

/// One DNS record the customer must create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Service label, e.g. `Core (Test)`.
    pub service: String,
    /// Host name, e.g. `cbot-core-test`.
    pub hostname: String,
    /// Port the service listens on.
    pub port: u16,
    /// Whether the port carries WebSocket traffic.
    pub websocket: bool,
}

/// Severity of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteLevel {
    /// Additional information.
    Info,
    /// A conflict in the selections the customer must resolve.
    Warning,
}

/// A labelled value, e.g. `Port: 1433`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// The label.
    pub label: String,
    /// The value.
    pub value: String,
}

impl Field {
    pub(crate) fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A unit of section content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A list of labelled values.
    Fields {
        /// The entries.
        items: Vec<Field>,
    },
    /// A bullet list.
    List {
        /// The entries.
        items: Vec<String>,
    },
    /// A paragraph of text.
    Paragraph {
        /// The text.
        text: String,
    },
    /// A heading inside a section.
    Subheading {
        /// The text.
        text: String,
    },
    /// An informational note or a warning.
    Note {
        /// How serious the note is.
        level: NoteLevel,
        /// The text.
        text: String,
    },
    /// The hardware sizing table.
    Hardware {
        /// One row per stage.
        rows: Vec<HardwareRow>,
    },
    /// The DNS record table.
    Dns {
        /// The records, in emission order.
        records: Vec<DnsRecord>,
    },
    /// Content not available in this version.
    Placeholder {
        /// The text.
        text: String,
    },
}

/// A numbered report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// 1-based position among the sections present in the report.
    pub ordinal: usize,
    /// What the section describes.
    pub kind: SectionKind,
    /// The section's content.
    pub blocks: Vec<Block>,
}

impl Section {
    /// The section heading including its ordinal, e.g. `7. LDAP Requirements`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{}. {}", self.ordinal, self.kind.title())
    }

    /// Notes in this section with the given level.
    pub fn notes(&self, level: NoteLevel) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(move |block| match block {
            Block::Note { level: l, text } if *l == level => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A compiled installation requirements report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    /// Document title.
    pub title: String,
    /// When the report was compiled.
    pub generated_at: DateTime<Utc>,
    /// Fingerprint of the selections the report was compiled from.
    pub fingerprint: String,
    /// Sections in order.
    pub sections: Vec<Section>,
    /// Closing remark.
    pub footer: String,
}

impl ReportDocument {
    /// The section of the given kind, if present.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// The ordinal of the section of the given kind, if present.
    #[must_use]
    pub fn ordinal(&self, kind: SectionKind) -> Option<usize> {
        self.section(kind).map(|section| section.ordinal)
    }

    /// Rows of the hardware table.
    #[must_use]
    pub fn hardware_rows(&self) -> &[HardwareRow] {
        self.blocks()
            .find_map(|block| match block {
                Block::Hardware { rows } => Some(rows.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Records of the DNS table.
    #[must_use]
    pub fn dns_records(&self) -> &[DnsRecord] {
        self.blocks()
            .find_map(|block| match block {
                Block::Dns { records } => Some(records.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Warnings across all sections.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.notes(NoteLevel::Warning))
    }

    fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|section| &section.blocks)
    }
}
