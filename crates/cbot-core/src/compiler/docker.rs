use crate::{domain::FormSelections, report::Block};

/// Registry every CBOT image is pulled from.
pub const REGISTRY: &str = "registry.cbot.ai";

/// Port servers must reach the registry on.
pub const REGISTRY_PORT: u16 = 443;

/// Container images for the selected modules, then the selected services.
#[must_use]
pub fn image_names(selections: &FormSelections) -> Vec<String> {
    let modules = selections.core_modules().iter().map(|m| m.image_name());
    let services = selections
        .auxiliary_services()
        .iter()
        .map(|s| s.image_name());
    modules.chain(services).collect()
}

pub(crate) fn blocks(selections: &FormSelections) -> Vec<Block> {
    vec![
        Block::List {
            items: vec![
                format!("All service images are pulled from {REGISTRY}"),
                format!("Servers must be able to reach this address on port {REGISTRY_PORT}"),
            ],
        },
        Block::Subheading {
            text: "Required Containers".to_string(),
        },
        Block::List {
            items: image_names(selections),
        },
    ]
}
