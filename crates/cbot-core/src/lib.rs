//! Core types and logic for the CBOT requirements assistant.
//!
//! This crate turns a customer's installation questionnaire into a structured
//! installation requirements report, and renders that report for download.

/// Catalog, questionnaire and validation types.
pub mod domain;
pub use domain::{
    AuxiliaryService, CatalogError, CoreModule, Database, Environment, EnvironmentType,
    FormSelections, LdapDetails, LdapError, SelectionError, SelectionsRequest, Stage,
};

mod compiler;
pub use compiler::{
    compile, compile_at, image_names, AIFLOW_POSTGRESQL_DISK, CLASSIFIER_REQUIRES_MSSQL,
    MODEL_HOSTING_VRAM_GB, REGISTRY, REGISTRY_PORT, REPORT_TITLE, SUPPORTED_OS, WEBSOCKET_PORT,
};

pub mod report;
pub use report::ReportDocument;

pub mod render;
pub use render::Format;

pub mod admin;

pub mod chat;
