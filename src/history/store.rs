// The in-memory history store
//
// Append-only and insertion-ordered. Populated once at startup by the
// ingestion pass, then appended to by the execution gateway. Nothing is
// ever mutated, removed or deduplicated - two adapters may legitimately
// emit equivalent-looking records and both are kept.

use super::HistoryRecord;

/// Append-only collection of all ingested and execution-time records
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, preserving insertion order.
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// The full ordered sequence, for read-only consumption by the query
    /// engine and the protocol front-end.
    pub fn snapshot(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
