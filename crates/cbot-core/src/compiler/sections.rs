use super::{database, docker, hardware, network};
use crate::{
    domain::{AuxiliaryService, CoreModule, Database, FormSelections},
    report::{Block, Field, Section, SectionKind},
};

/// Value shown for an LDAP field the customer left empty.
const NOT_SPECIFIED: &str = "not specified";

struct Entry {
    kind: SectionKind,
    active: fn(&FormSelections) -> bool,
    build: fn(&FormSelections) -> Vec<Block>,
}

/// Every section in document order.
const LAYOUT: [Entry; 9] = [
    Entry {
        kind: SectionKind::Environment,
        active: always,
        build: environment,
    },
    Entry {
        kind: SectionKind::Modules,
        active: always,
        build: modules,
    },
    Entry {
        kind: SectionKind::Hardware,
        active: always,
        build: hardware_table,
    },
    Entry {
        kind: SectionKind::Database,
        active: always,
        build: database::blocks,
    },
    Entry {
        kind: SectionKind::Network,
        active: always,
        build: network::blocks,
    },
    Entry {
        kind: SectionKind::Docker,
        active: always,
        build: docker::blocks,
    },
    Entry {
        kind: SectionKind::Ldap,
        active: FormSelections::ldap_enabled,
        build: ldap,
    },
    Entry {
        kind: SectionKind::AiServices,
        active: needs_ai_services,
        build: ai_services,
    },
    Entry {
        kind: SectionKind::Topology,
        active: always,
        build: topology,
    },
];

/// Builds the active sections, numbered by their position among the sections
/// that are present.
pub(super) fn build(selections: &FormSelections) -> Vec<Section> {
    LAYOUT
        .iter()
        .filter(|entry| (entry.active)(selections))
        .zip(1..)
        .map(|(entry, ordinal)| Section {
            ordinal,
            kind: entry.kind,
            blocks: (entry.build)(selections),
        })
        .collect()
}

const fn always(_: &FormSelections) -> bool {
    true
}

fn needs_ai_services(selections: &FormSelections) -> bool {
    selections.has_module(CoreModule::Aiflow)
        || selections.has_service(AuxiliaryService::HfModelHosting)
}

fn list<I>(items: I) -> Block
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Block::List {
        items: items.into_iter().map(Into::into).collect(),
    }
}

fn subheading(text: &str) -> Block {
    Block::Subheading {
        text: text.to_string(),
    }
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph {
        text: text.to_string(),
    }
}

fn environment(selections: &FormSelections) -> Vec<Block> {
    vec![Block::Fields {
        items: vec![
            Field::new("Environment Type", selections.environment_type().label()),
            Field::new("Installation Environment", selections.environment().label()),
        ],
    }]
}

fn modules(selections: &FormSelections) -> Vec<Block> {
    let mut blocks = if selections.core_modules().is_empty() {
        vec![paragraph("No core modules selected.")]
    } else {
        vec![list(selections.core_modules().iter().map(|m| m.name()))]
    };

    if !selections.auxiliary_services().is_empty() {
        blocks.push(subheading("Auxiliary Services"));
        blocks.push(list(
            selections.auxiliary_services().iter().map(|s| s.name()),
        ));
    }

    blocks
}

fn hardware_table(selections: &FormSelections) -> Vec<Block> {
    vec![Block::Hardware {
        rows: hardware::size(selections),
    }]
}

fn ldap(selections: &FormSelections) -> Vec<Block> {
    let Some(details) = selections.ldap() else {
        return Vec::new();
    };
    let value = |v: Option<&str>| v.unwrap_or(NOT_SPECIFIED).to_string();

    vec![
        Block::Fields {
            items: vec![
                Field::new("LDAP URL", value(details.url())),
                Field::new("BIND DN", value(details.bind_dn())),
                Field::new("SEARCH BASE", value(details.search_base())),
                Field::new("SEARCH FILTER", value(details.search_filter())),
            ],
        },
        paragraph("The Email, Role and Name attributes must be mapped to LDAP fields."),
        paragraph("Roles defined in the panel must match LDAP roles one to one."),
    ]
}

fn ai_services(selections: &FormSelections) -> Vec<Block> {
    let mut blocks = Vec::new();

    if selections.has_module(CoreModule::Aiflow) {
        let mut items = vec!["Minimum 10 CPU cores, 8 GB RAM"];
        if selections.database() == Database::Postgresql {
            items.push("4 GB disk space (PostgreSQL)");
        }
        blocks.push(subheading("AI Flow Requirements"));
        blocks.push(list(items));
    }

    if selections.has_service(AuxiliaryService::HfModelHosting) {
        blocks.push(subheading("HF Model Hosting Requirements"));
        blocks.push(list([
            "GPU-enabled server".to_string(),
            format!("Minimum {} GB VRAM", hardware::MODEL_HOSTING_VRAM_GB),
            "Minimum 32 GB system RAM".to_string(),
        ]));
    }

    blocks
}

fn topology(_: &FormSelections) -> Vec<Block> {
    vec![
        paragraph(
            "A visual representation of the installation topology is produced by the AI assistant.",
        ),
        Block::Placeholder {
            text: "The topology diagram is not available in this version.".to_string(),
        },
    ]
}
