/// clihist - unified CLI history over MCP
///
/// Pulls command history out of shell, REPL, and git sources into one
/// in-memory store, classifies each entry by tool, and serves it to MCP
/// clients as queryable tools and resources.
pub mod classify;
pub mod error;
pub mod exec;
pub mod history;
pub mod ingest;
pub mod query;
pub mod server;

pub use error::{HistoryError, Result};
pub use history::{HistoryRecord, HistoryStore};
pub use server::HistoryServer;
