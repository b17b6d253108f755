use serde::Serialize;

use crate::{
    compiler::MODEL_HOSTING_VRAM_GB,
    domain::{AuxiliaryService, Database},
};

/// Descriptive resource figures for one auxiliary service. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    /// The service this card describes.
    pub id: AuxiliaryService,
    /// Display name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// CPU cores on the test stage.
    pub cpu_test: u32,
    /// CPU cores on the live stage.
    pub cpu_live: u32,
    /// Memory in GB on the test stage.
    pub ram_test: u32,
    /// Memory in GB on the live stage.
    pub ram_live: u32,
    /// Disk in GB on the test stage.
    pub disk_test: u32,
    /// Disk in GB on the live stage.
    pub disk_live: u32,
    /// Whether the service needs a GPU.
    pub requires_gpu: bool,
    /// Minimum GPU memory in GB, for services that need a GPU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu_ram: Option<u32>,
}

impl ServiceCard {
    const fn new(service: AuxiliaryService) -> Self {
        // [cpu_test, cpu_live, ram_test, ram_live, disk_test, disk_live]
        let (description, figures, gpu_ram) = match service {
            AuxiliaryService::Ocr => ("Optical character recognition", [4, 8, 8, 16, 10, 20], None),
            AuxiliaryService::Masking => ("Data masking", [2, 4, 4, 8, 5, 10], None),
            AuxiliaryService::FileToMd => (
                "Converts file contents to Markdown",
                [2, 4, 4, 8, 5, 10],
                None,
            ),
            AuxiliaryService::Crawler => ("Website crawler", [4, 8, 8, 16, 15, 30], None),
            AuxiliaryService::HfModelHosting => (
                "Hosts Hugging Face models",
                [8, 16, 16, 32, 30, 60],
                Some(MODEL_HOSTING_VRAM_GB),
            ),
        };
        let [cpu_test, cpu_live, ram_test, ram_live, disk_test, disk_live] = figures;
        Self {
            id: service,
            name: service.name(),
            description,
            cpu_test,
            cpu_live,
            ram_test,
            ram_live,
            disk_test,
            disk_live,
            requires_gpu: gpu_ram.is_some(),
            gpu_ram,
        }
    }
}

/// Connection facts for one supported database engine. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseCard {
    /// The engine this card describes.
    pub id: Database,
    /// Display name.
    pub name: &'static str,
    /// Port the database must be reachable on.
    pub port: u16,
    /// Required server collation, `null` when the engine has none.
    pub collation: Option<&'static str>,
}

impl DatabaseCard {
    const fn new(database: Database) -> Self {
        Self {
            id: database,
            name: database.name(),
            port: database.port(),
            collation: database.collation(),
        }
    }
}

/// One card per auxiliary service, in catalog order.
pub fn service_cards() -> impl Iterator<Item = ServiceCard> {
    AuxiliaryService::ALL.into_iter().map(ServiceCard::new)
}

/// One card per supported database, in catalog order.
pub fn database_cards() -> impl Iterator<Item = DatabaseCard> {
    Database::ALL.into_iter().map(DatabaseCard::new)
}
