use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogError, CoreModule};

/// Error returned when a module card update is rejected.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CardError {
    /// No card exists for the module.
    #[error(transparent)]
    UnknownModule(#[from] CatalogError),

    /// The description would be blank.
    #[error("description must not be blank")]
    BlankDescription,

    /// A resource figure would be zero.
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
}

/// Descriptive resource figures for one core module.
///
/// Cards are informational. The compiler sizes hardware from its own fixed
/// table and never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleCard {
    /// The module this card describes.
    pub id: CoreModule,
    /// Display name.
    pub name: &'static str,
    /// Free-text description.
    pub description: String,
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
    /// Port the module listens on.
    pub port: u16,
}

impl ModuleCard {
    const fn seed(module: CoreModule) -> (&'static str, [u32; 6], u16) {
        // [cpu_test, cpu_live, ram_test, ram_live, disk_test, disk_live]
        match module {
            CoreModule::Core => ("Main CBOT core module", [4, 8, 8, 16, 20, 40], 5351),
            CoreModule::Panel => ("Administration panel interface", [2, 4, 4, 8, 10, 20], 3000),
            CoreModule::Livechat => ("Live support module", [2, 4, 4, 8, 10, 20], 3200),
            CoreModule::Fusion => ("Integration module", [2, 6, 6, 12, 15, 30], 9600),
            CoreModule::Classifier => (
                "Classification module (requires MS SQL Server)",
                [8, 16, 16, 32, 30, 60],
                9100,
            ),
            CoreModule::Aiflow => ("AI flow module", [10, 20, 16, 32, 40, 80], 8500),
            CoreModule::Analytics => ("Analytics module", [4, 8, 8, 16, 20, 40], 7500),
        }
    }

    fn new(module: CoreModule) -> Self {
        let (description, [cpu_test, cpu_live, ram_test, ram_live, disk_test, disk_live], port) =
            Self::seed(module);
        Self {
            id: module,
            name: module.name(),
            description: description.to_string(),
            cpu_test,
            cpu_live,
            ram_test,
            ram_live,
            disk_test,
            disk_live,
            port,
        }
    }
}

/// A partial update of a module card. Absent fields are left unchanged and
/// fields that cannot be edited are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModuleCardUpdate {
    /// New description.
    pub description: Option<String>,
    /// New CPU cores on the test stage.
    pub cpu_test: Option<u32>,
    /// New CPU cores on the live stage.
    pub cpu_live: Option<u32>,
    /// New memory in GB on the test stage.
    pub ram_test: Option<u32>,
    /// New memory in GB on the live stage.
    pub ram_live: Option<u32>,
    /// New disk in GB on the test stage.
    pub disk_test: Option<u32>,
    /// New disk in GB on the live stage.
    pub disk_live: Option<u32>,
}

impl ModuleCardUpdate {
    fn validate(&self) -> Result<(), CardError> {
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(CardError::BlankDescription);
        }

        let figures = [
            ("cpu_test", self.cpu_test),
            ("cpu_live", self.cpu_live),
            ("ram_test", self.ram_test),
            ("ram_live", self.ram_live),
            ("disk_test", self.disk_test),
            ("disk_live", self.disk_live),
        ];
        match figures.into_iter().find(|(_, value)| *value == Some(0)) {
            Some((field, _)) => Err(CardError::NotPositive(field)),
            None => Ok(()),
        }
    }

    fn apply(self, card: &mut ModuleCard) {
        if let Some(description) = self.description {
            card.description = description.trim().to_string();
        }
        let targets = [
            (&mut card.cpu_test, self.cpu_test),
            (&mut card.cpu_live, self.cpu_live),
            (&mut card.ram_test, self.ram_test),
            (&mut card.ram_live, self.ram_live),
            (&mut card.disk_test, self.disk_test),
            (&mut card.disk_live, self.disk_live),
        ];
        for (target, value) in targets {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

/// The module specification cards, one per core module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCards {
    cards: BTreeMap<CoreModule, ModuleCard>,
}

impl Default for ModuleCards {
    fn default() -> Self {
        Self {
            cards: CoreModule::ALL
                .into_iter()
                .map(|module| (module, ModuleCard::new(module)))
                .collect(),
        }
    }
}

impl ModuleCards {
    /// All cards, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleCard> {
        self.cards.values()
    }

    /// The card of the given module.
    #[must_use]
    pub fn get(&self, module: CoreModule) -> Option<&ModuleCard> {
        self.cards.get(&module)
    }

    /// Applies a partial update to the card with the given module id.
    ///
    /// The update is all-or-nothing: an invalid field leaves the card
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::UnknownModule`] for an id outside the catalog, or
    /// a validation error for a blank description or a zero figure.
    pub fn update(&mut self, id: &str, update: ModuleCardUpdate) -> Result<&ModuleCard, CardError> {
        let module: CoreModule = id.parse()?;
        update.validate()?;

        let card = self
            .cards
            .entry(module)
            .or_insert_with(|| ModuleCard::new(module));
        update.apply(card);
        tracing::info!(module = %module, "updated module card");
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn seeded_with_every_module() {
        let cards = ModuleCards::default();
        assert_eq!(cards.iter().count(), CoreModule::ALL.len());

        let fusion = cards.get(CoreModule::Fusion).unwrap();
        assert_eq!(fusion.name, "Fusion");
        assert_eq!(
            (fusion.cpu_test, fusion.cpu_live, fusion.ram_test, fusion.ram_live),
            (2, 6, 6, 12)
        );
        assert_eq!((fusion.disk_test, fusion.disk_live), (15, 30));
        assert_eq!(cards.get(CoreModule::Livechat).unwrap().port, 3200);
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut cards = ModuleCards::default();
        let update = ModuleCardUpdate {
            description: Some("  Orchestrates AI flows ".to_string()),
            ram_live: Some(48),
            ..ModuleCardUpdate::default()
        };

        let card = cards.update("aiflow", update).unwrap();

        assert_eq!(card.description, "Orchestrates AI flows");
        assert_eq!(card.ram_live, 48);
        assert_eq!(card.ram_test, 16);
        assert_eq!(card.cpu_live, 20);
    }

    #[test]
    fn unknown_module_is_rejected() {
        let mut cards = ModuleCards::default();
        let err = cards
            .update("billing", ModuleCardUpdate::default())
            .unwrap_err();
        assert!(matches!(err, CardError::UnknownModule(_)));
    }

    #[test_case(ModuleCardUpdate { description: Some("   ".into()), ..Default::default() }, CardError::BlankDescription; "blank description")]
    #[test_case(ModuleCardUpdate { disk_test: Some(0), ..Default::default() }, CardError::NotPositive("disk_test"); "zero disk")]
    fn invalid_update_leaves_card_untouched(update: ModuleCardUpdate, expected: CardError) {
        let mut cards = ModuleCards::default();
        let before = cards.get(CoreModule::Core).cloned();

        assert_eq!(cards.update("core", update), Err(expected));
        assert_eq!(cards.get(CoreModule::Core).cloned(), before);
    }

    #[test]
    fn update_deserializes_from_admin_payload() {
        let update: ModuleCardUpdate =
            serde_json::from_str(r#"{"cpu_test": 6, "description": "Core"}"#).unwrap();
        assert_eq!(update.cpu_test, Some(6));
        assert_eq!(update.description.as_deref(), Some("Core"));
        assert!(update.cpu_live.is_none());
    }
}
