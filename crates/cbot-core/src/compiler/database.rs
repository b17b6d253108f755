use crate::{
    domain::{CoreModule, Database, FormSelections},
    report::{Block, Field, NoteLevel},
};

/// Warning emitted when the classifier is paired with a database other than
/// MSSQL.
pub const CLASSIFIER_REQUIRES_MSSQL: &str = "The Classifier module only works with MSSQL";

/// Note emitted when AI Flow runs on `PostgreSQL`.
pub const AIFLOW_POSTGRESQL_DISK: &str =
    "AI Flow on PostgreSQL requires a minimum of 4 GB of disk space";

pub(crate) fn blocks(selections: &FormSelections) -> Vec<Block> {
    let database = selections.database();

    let mut items = vec![
        Field::new("Database Type", database.name()),
        Field::new("User", "OWNER-privileged user"),
    ];
    if let Some(collation) = database.collation() {
        items.push(Field::new("Collation", collation));
    }
    items.push(Field::new("Port", database.port().to_string()));

    let mut blocks = vec![
        Block::Fields { items },
        Block::List {
            items: vec!["IP address and port must be shared".to_string()],
        },
    ];

    if selections.has_module(CoreModule::Classifier) && database != Database::Mssql {
        tracing::debug!(%database, "classifier selected without MSSQL");
        blocks.push(Block::Note {
            level: NoteLevel::Warning,
            text: CLASSIFIER_REQUIRES_MSSQL.to_string(),
        });
    }

    if selections.has_module(CoreModule::Aiflow) && database == Database::Postgresql {
        blocks.push(Block::Note {
            level: NoteLevel::Info,
            text: AIFLOW_POSTGRESQL_DISK.to_string(),
        });
    }

    blocks
}
