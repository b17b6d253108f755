//! Administrative views: editable module specification cards, read-only
//! service and database cards, and the generated-document listing.

mod cards;
pub use cards::{CardError, ModuleCard, ModuleCardUpdate, ModuleCards};

mod reference;
pub use reference::{database_cards, service_cards, DatabaseCard, ServiceCard};

mod documents;
pub use documents::{DateRange, DateRangeError, DocumentFilter, DocumentSummary};
