//! Domain models for the requirements questionnaire.
//!
//! This module contains the fixed catalog of modules, services and databases,
//! and the validated questionnaire submission built from them.

/// The fixed catalog and its lookup tables.
pub mod catalog;
pub use catalog::{AuxiliaryService, CatalogError, CoreModule, Database};

mod ldap;
pub use ldap::{LdapDetails, LdapError};

/// Questionnaire submissions, in wire and validated form.
pub mod selections;
pub use selections::{
    Environment, EnvironmentType, FormSelections, LdapDetailsRequest, SelectionError,
    SelectionsRequest, Stage,
};
