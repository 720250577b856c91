//! Point-in-time view of the loaded catalog.

use std::sync::Arc;

use crate::record::Record;

/// An immutable point-in-time sequence of catalog records.
///
/// Produced by one successful index fetch and replaced wholesale on refresh;
/// never mutated in place. Record order is the source document's order; the
/// query engine re-sorts explicitly and never relies on it. Cloning is cheap
/// (shared allocation).
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    records: Arc<[Record]>,
    loaded_at: i64,
}

impl CatalogSnapshot {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records: records.into(), loaded_at: chrono::Utc::now().timestamp_millis() }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Epoch milliseconds at which this snapshot was created.
    pub fn loaded_at(&self) -> i64 {
        self.loaded_at
    }
}
