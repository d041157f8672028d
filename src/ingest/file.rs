// File-backed history adapter
//
// Covers both shell histories (.bash_history, .zsh_history, ...) and
// REPL histories (.node_repl_history, .python_history): read the whole
// file, one record per non-blank line, tool fixed to the origin name.

use super::HistorySource;
use crate::history::HistoryRecord;
use async_trait::async_trait;
use std::path::PathBuf;

pub struct FileHistorySource {
    tool: String,
    path: PathBuf,
    working_directory: String,
}

impl FileHistorySource {
    pub fn new(
        tool: impl Into<String>,
        path: PathBuf,
        working_directory: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            path,
            working_directory: working_directory.into(),
        }
    }
}

#[async_trait]
impl HistorySource for FileHistorySource {
    fn origin(&self) -> &str {
        &self.tool
    }

    async fn collect(&self) -> Vec<HistoryRecord> {
        // Missing or unreadable file: this origin simply has no history.
        let Ok(content) = tokio::fs::read_to_string(&self.path).await else {
            return Vec::new();
        };

        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| HistoryRecord::new(&self.tool, line, &self.working_directory))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bash_history");
        std::fs::write(&path, "ls -la\ngit status\ncargo build\n").unwrap();

        let source = FileHistorySource::new("bash", path, "/home/user");
        let records = source.collect().await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].command, "ls -la");
        assert_eq!(records[2].command, "cargo build");
        assert!(records.iter().all(|r| r.tool == "bash"));
        assert!(records.iter().all(|r| r.working_directory == "/home/user"));
    }

    #[tokio::test]
    async fn test_blank_lines_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".zsh_history");
        std::fs::write(&path, "echo one\n\n   \n\techo two\n").unwrap();

        let source = FileHistorySource::new("zsh", path, "/home/user");
        let records = source.collect().await;

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.command.trim().is_empty()));
        assert_eq!(records[1].command, "echo two");
    }

    #[tokio::test]
    async fn test_missing_file_yields_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let source =
            FileHistorySource::new("fish", dir.path().join("does-not-exist"), "/home/user");
        assert!(source.collect().await.is_empty());
    }
}
