/// The normalized unit of command history
///
/// Every source adapter and the execution gateway produce this same shape;
/// the store and query engine never see source-specific formats.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded command, normalized across all origins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Canonical tool identifier ("git", "docker", "bash", "shell", ...)
    pub tool: String,
    /// The literal command text, trimmed of surrounding whitespace
    pub command: String,
    /// When this record was created - ingestion/execution time, not the
    /// original run time (history files carry no reliable timestamps)
    pub recorded_at: DateTime<Utc>,
    /// Directory associated with the record's origin
    pub working_directory: String,
    /// Reserved: no adapter currently reports an exit code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl HistoryRecord {
    /// Create a record stamped with the current time.
    ///
    /// The command is trimmed here; callers are still responsible for
    /// filtering out lines that are empty after trimming.
    pub fn new(
        tool: impl Into<String>,
        command: &str,
        working_directory: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            command: command.trim().to_string(),
            recorded_at: Utc::now(),
            working_directory: working_directory.into(),
            exit_code: None,
        }
    }
}
