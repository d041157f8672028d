/// History data model
///
/// Contains the normalized record shape and the append-only in-memory
/// store that holds the merged result of all source adapters.
pub mod record;
pub mod store;

pub use record::HistoryRecord;
pub use store::HistoryStore;
