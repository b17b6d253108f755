use std::collections::VecDeque;

use cbot_core::{admin::DocumentSummary, FormSelections, ReportDocument};
use uuid::Uuid;

/// A generated report and its listing entry.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Listing entry.
    pub summary: DocumentSummary,
    /// The compiled report.
    pub report: ReportDocument,
}

/// Generated documents held in memory, oldest first.
///
/// Holds at most `capacity` documents. Inserting into a full registry evicts
/// the oldest document.
#[derive(Debug)]
pub struct Registry {
    capacity: usize,
    documents: VecDeque<StoredDocument>,
}

impl Registry {
    /// An empty registry holding at most `capacity` documents (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            documents: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    /// Stores a report under a fresh identifier.
    pub fn insert(&mut self, selections: &FormSelections, report: ReportDocument) -> Uuid {
        let id = Uuid::new_v4();
        let summary = DocumentSummary::new(id, selections, &report);

        while self.documents.len() >= self.capacity {
            if let Some(evicted) = self.documents.pop_front() {
                tracing::debug!(id = %evicted.summary.id, "evicted oldest document");
            }
        }
        self.documents.push_back(StoredDocument { summary, report });
        id
    }

    /// The document with the given identifier.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&StoredDocument> {
        self.documents.iter().find(|doc| doc.summary.id == id)
    }

    /// Deletes the document with the given identifier. Returns whether it
    /// existed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        match self.documents.iter().position(|doc| doc.summary.id == id) {
            Some(index) => {
                self.documents.remove(index);
                true
            }
            None => false,
        }
    }

    /// Listing entries, oldest first.
    pub fn summaries(&self) -> impl Iterator<Item = &DocumentSummary> {
        self.documents.iter().map(|doc| &doc.summary)
    }

    /// Number of documents held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
