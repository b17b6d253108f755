use std::{collections::BTreeSet, fmt, str::FromStr};

use borsh::BorshSerialize;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{
    catalog::{AuxiliaryService, CatalogError, CoreModule, Database},
    ldap::{LdapDetails, LdapError},
};

/// Deployment target requested by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// A test installation only.
    Test,
    /// A live installation only.
    Live,
    /// Both a test and a live installation.
    Both,
}

impl Environment {
    /// The stages covered by this environment, test first.
    #[must_use]
    pub const fn stages(self) -> &'static [Stage] {
        match self {
            Self::Test => &[Stage::Test],
            Self::Live => &[Stage::Live],
            Self::Both => &[Stage::Test, Stage::Live],
        }
    }

    /// Whether the given stage is part of this environment.
    #[must_use]
    pub fn includes(self, stage: Stage) -> bool {
        self.stages().contains(&stage)
    }

    /// The wire identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
            Self::Both => "both",
        }
    }

    /// Display label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::Live => "Live",
            Self::Both => "Test and Live",
        }
    }
}

impl FromStr for Environment {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "live" => Ok(Self::Live),
            "both" => Ok(Self::Both),
            _ => Err(CatalogError::new("environment", s)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single deployment target with its own hardware sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The test installation.
    Test,
    /// The live installation.
    Live,
}

impl Stage {
    /// Display label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::Live => "Live",
        }
    }
}

/// Where the installation is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentType {
    /// Customer-operated hardware.
    #[serde(rename = "on-prem")]
    OnPrem,
    /// A cloud provider.
    #[serde(rename = "cloud")]
    Cloud,
}

impl EnvironmentType {
    /// The wire identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::OnPrem => "on-prem",
            Self::Cloud => "cloud",
        }
    }

    /// Display label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnPrem => "On-Premise",
            Self::Cloud => "Cloud",
        }
    }
}

impl FromStr for EnvironmentType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-prem" => Ok(Self::OnPrem),
            "cloud" => Ok(Self::Cloud),
            _ => Err(CatalogError::new("environment type", s)),
        }
    }
}

/// Reasons a questionnaire submission cannot be compiled.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A required single-choice field was not answered.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// An identifier is not part of the fixed catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// LDAP is enabled but no connection details were supplied.
    #[error("LDAP is enabled but no connection details were supplied")]
    LdapDetailsMissing,

    /// LDAP connection details were supplied while LDAP is disabled.
    #[error("LDAP details were supplied but LDAP is not enabled")]
    UnexpectedLdapDetails,

    /// The LDAP connection details are malformed.
    #[error(transparent)]
    Ldap(#[from] LdapError),
}

/// A validated questionnaire submission.
///
/// Values of this type always satisfy the catalog and LDAP invariants: every
/// module and service is a catalog entry, and LDAP details exist exactly when
/// LDAP is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSelections {
    environment: Environment,
    environment_type: EnvironmentType,
    core_modules: BTreeSet<CoreModule>,
    auxiliary_services: BTreeSet<AuxiliaryService>,
    database: Database,
    ldap: Option<LdapDetails>,
}

impl FormSelections {
    /// Starts a submission with no modules, no services and LDAP disabled.
    #[must_use]
    pub const fn new(
        environment: Environment,
        environment_type: EnvironmentType,
        database: Database,
    ) -> Self {
        Self {
            environment,
            environment_type,
            core_modules: BTreeSet::new(),
            auxiliary_services: BTreeSet::new(),
            database,
            ldap: None,
        }
    }

    /// Adds a core module.
    #[must_use]
    pub fn with_module(mut self, module: CoreModule) -> Self {
        self.core_modules.insert(module);
        self
    }

    /// Adds an auxiliary service.
    #[must_use]
    pub fn with_service(mut self, service: AuxiliaryService) -> Self {
        self.auxiliary_services.insert(service);
        self
    }

    /// Enables LDAP with the given connection details.
    #[must_use]
    pub fn with_ldap(mut self, details: LdapDetails) -> Self {
        self.ldap = Some(details);
        self
    }

    /// The requested environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// The requested hosting type.
    #[must_use]
    pub const fn environment_type(&self) -> EnvironmentType {
        self.environment_type
    }

    /// Selected core modules, in catalog order.
    #[must_use]
    pub const fn core_modules(&self) -> &BTreeSet<CoreModule> {
        &self.core_modules
    }

    /// Selected auxiliary services, in catalog order.
    #[must_use]
    pub const fn auxiliary_services(&self) -> &BTreeSet<AuxiliaryService> {
        &self.auxiliary_services
    }

    /// The selected database engine.
    #[must_use]
    pub const fn database(&self) -> Database {
        self.database
    }

    /// LDAP connection details, present iff LDAP is enabled.
    #[must_use]
    pub const fn ldap(&self) -> Option<&LdapDetails> {
        self.ldap.as_ref()
    }

    /// Whether LDAP integration is enabled.
    #[must_use]
    pub const fn ldap_enabled(&self) -> bool {
        self.ldap.is_some()
    }

    /// Whether the given core module is selected.
    #[must_use]
    pub fn has_module(&self, module: CoreModule) -> bool {
        self.core_modules.contains(&module)
    }

    /// Whether the given auxiliary service is selected.
    #[must_use]
    pub fn has_service(&self, service: AuxiliaryService) -> bool {
        self.auxiliary_services.contains(&service)
    }

    /// Calculate the fingerprint of these selections.
    ///
    /// The fingerprint is a SHA256 hash of the Borsh-serialized canonical
    /// selections. Equal selections always share a fingerprint, regardless of
    /// the order modules were submitted in.
    ///
    /// # Panics
    ///
    /// Panics if borsh serialization fails (which should never happen for this
    /// data structure).
    #[must_use]
    pub fn fingerprint(&self) -> String {
        #[derive(BorshSerialize)]
        struct LdapData<'a> {
            url: &'a str,
            bind_dn: &'a str,
            search_base: &'a str,
            search_filter: &'a str,
        }

        #[derive(BorshSerialize)]
        struct FingerprintData<'a> {
            environment: &'a str,
            environment_type: &'a str,
            core_modules: Vec<&'a str>,
            auxiliary_services: Vec<&'a str>,
            database: &'a str,
            ldap: Option<LdapData<'a>>,
        }

        let data = FingerprintData {
            environment: self.environment.id(),
            environment_type: self.environment_type.id(),
            core_modules: self.core_modules.iter().map(|m| m.id()).collect(),
            auxiliary_services: self.auxiliary_services.iter().map(|s| s.id()).collect(),
            database: self.database.id(),
            ldap: self.ldap.as_ref().map(|ldap| LdapData {
                url: ldap.url().unwrap_or_default(),
                bind_dn: ldap.bind_dn().unwrap_or_default(),
                search_base: ldap.search_base().unwrap_or_default(),
                search_filter: ldap.search_filter().unwrap_or_default(),
            }),
        };

        let encoded = borsh::to_vec(&data).expect("this should never fail");
        let hash = Sha256::digest(encoded);
        format!("{hash:x}")
    }
}

/// LDAP fields as submitted by the questionnaire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapDetailsRequest {
    /// Directory URL.
    #[serde(default)]
    pub url: String,
    /// Bind DN.
    #[serde(default)]
    pub bind_dn: String,
    /// Search base.
    #[serde(default)]
    pub search_base: String,
    /// Search filter.
    #[serde(default)]
    pub search_filter: String,
}

/// The questionnaire submission as it arrives over the wire (camelCase JSON).
///
/// Convert into [`FormSelections`] with `TryFrom` to validate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionsRequest {
    /// `test`, `live` or `both`.
    #[serde(default)]
    pub environment: Option<String>,
    /// `on-prem` or `cloud`.
    #[serde(default)]
    pub environment_type: Option<String>,
    /// Core module identifiers.
    #[serde(default)]
    pub core_modules: Vec<String>,
    /// Auxiliary service identifiers.
    #[serde(default)]
    pub auxiliary_services: Vec<String>,
    /// `mongodb`, `mssql` or `postgresql`.
    #[serde(default)]
    pub database: Option<String>,
    /// Whether LDAP integration is requested.
    #[serde(default)]
    pub ldap_enabled: bool,
    /// LDAP connection details; required iff `ldap_enabled`.
    #[serde(default)]
    pub ldap_details: Option<LdapDetailsRequest>,
}

impl TryFrom<SelectionsRequest> for FormSelections {
    type Error = SelectionError;

    fn try_from(request: SelectionsRequest) -> Result<Self, Self::Error> {
        let environment: Environment = required(request.environment, "environment")?.parse()?;
        let environment_type: EnvironmentType =
            required(request.environment_type, "environmentType")?.parse()?;
        let database: Database = required(request.database, "database")?.parse()?;

        let mut selections = Self::new(environment, environment_type, database);
        for id in &request.core_modules {
            selections = selections.with_module(id.parse()?);
        }
        for id in &request.auxiliary_services {
            selections = selections.with_service(id.parse()?);
        }

        match (request.ldap_enabled, request.ldap_details) {
            (true, Some(details)) => {
                let details = LdapDetails::new(
                    &details.url,
                    &details.bind_dn,
                    &details.search_base,
                    &details.search_filter,
                )?;
                Ok(selections.with_ldap(details))
            }
            (true, None) => Err(SelectionError::LdapDetailsMissing),
            (false, Some(_)) => Err(SelectionError::UnexpectedLdapDetails),
            (false, None) => Ok(selections),
        }
    }
}

impl From<&FormSelections> for SelectionsRequest {
    fn from(selections: &FormSelections) -> Self {
        Self {
            environment: Some(selections.environment.id().to_string()),
            environment_type: Some(selections.environment_type.id().to_string()),
            core_modules: selections
                .core_modules
                .iter()
                .map(|m| m.id().to_string())
                .collect(),
            auxiliary_services: selections
                .auxiliary_services
                .iter()
                .map(|s| s.id().to_string())
                .collect(),
            database: Some(selections.database.id().to_string()),
            ldap_enabled: selections.ldap_enabled(),
            ldap_details: selections.ldap.as_ref().map(|ldap| LdapDetailsRequest {
                url: ldap.url().unwrap_or_default().to_string(),
                bind_dn: ldap.bind_dn().unwrap_or_default().to_string(),
                search_base: ldap.search_base().unwrap_or_default().to_string(),
                search_filter: ldap.search_filter().unwrap_or_default().to_string(),
            }),
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, SelectionError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(SelectionError::MissingField(field))
}
