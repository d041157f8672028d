// Filtered-subset adapter
//
// Re-reads a primary history file and keeps only the most recent lines
// starting with a fixed prefix. Used for the docker view over bash
// history: the same lines also surface through the bash adapter, and
// keeping both is intentional.

use super::HistorySource;
use crate::history::HistoryRecord;
use async_trait::async_trait;
use std::path::PathBuf;

pub struct PrefixFilteredSource {
    tool: String,
    prefix: String,
    path: PathBuf,
    keep: usize,
    working_directory: String,
}

impl PrefixFilteredSource {
    pub fn new(
        tool: impl Into<String>,
        prefix: impl Into<String>,
        path: PathBuf,
        keep: usize,
        working_directory: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            prefix: prefix.into(),
            path,
            keep,
            working_directory: working_directory.into(),
        }
    }
}

#[async_trait]
impl HistorySource for PrefixFilteredSource {
    fn origin(&self) -> &str {
        &self.tool
    }

    async fn collect(&self) -> Vec<HistoryRecord> {
        let Ok(content) = tokio::fs::read_to_string(&self.path).await else {
            return Vec::new();
        };

        let matching: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with(&self.prefix))
            .collect();

        // Most recent K, preserving their original order
        let start = matching.len().saturating_sub(self.keep);
        matching[start..]
            .iter()
            .map(|line| HistoryRecord::new(&self.tool, line, &self.working_directory))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keeps_only_prefixed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bash_history");
        std::fs::write(
            &path,
            "ls -la\ndocker ps\ngit status\ndocker build -t app .\n",
        )
        .unwrap();

        let source = PrefixFilteredSource::new("docker", "docker", path, 20, "/home/user");
        let records = source.collect().await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].command, "docker ps");
        assert_eq!(records[1].command, "docker build -t app .");
        assert!(records.iter().all(|r| r.tool == "docker"));
    }

    #[tokio::test]
    async fn test_keeps_most_recent_k() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bash_history");
        let lines: Vec<String> = (0..30).map(|i| format!("docker run app-{}", i)).collect();
        std::fs::write(&path, lines.join("\n")).unwrap();

        let source = PrefixFilteredSource::new("docker", "docker", path, 20, "/home/user");
        let records = source.collect().await;

        assert_eq!(records.len(), 20);
        assert_eq!(records[0].command, "docker run app-10");
        assert_eq!(records[19].command, "docker run app-29");
    }

    #[tokio::test]
    async fn test_prefix_matches_trimmed_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bash_history");
        std::fs::write(&path, "   docker ps\nmydocker ps\n").unwrap();

        let source = PrefixFilteredSource::new("docker", "docker", path, 20, "/home/user");
        let records = source.collect().await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].command, "docker ps");
    }

    #[tokio::test]
    async fn test_missing_file_yields_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let source = PrefixFilteredSource::new(
            "docker",
            "docker",
            dir.path().join("missing"),
            20,
            "/home/user",
        );
        assert!(source.collect().await.is_empty());
    }
}
