/// Execution gateway
///
/// Runs an external command and captures its output, but only after
/// unconditionally appending an audit record to the store. The record of
/// intent survives even when the command fails to start or exits
/// non-zero - callers can always see that the command was attempted.
use crate::classify::ToolClassifier;
use crate::history::{HistoryRecord, HistoryStore};
use std::env;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone)]
pub struct ExecutionGateway {
    store: Arc<RwLock<HistoryStore>>,
    classifier: ToolClassifier,
}

impl ExecutionGateway {
    pub fn new(store: Arc<RwLock<HistoryStore>>, classifier: ToolClassifier) -> Self {
        Self { store, classifier }
    }

    /// Record the command, then run it.
    ///
    /// The tool label is the explicit one when given, otherwise the
    /// classifier's verdict. Returns the captured stdout, or None when the
    /// command cannot start or exits non-zero; the appended record is not
    /// rolled back in either case.
    pub async fn execute(&self, command: &str, tool: Option<&str>) -> Option<String> {
        let tool = match tool {
            Some(label) => label.to_string(),
            None => self.classifier.classify(command).to_string(),
        };
        let cwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        // Append first: the audit trail must exist regardless of outcome.
        self.store
            .write()
            .await
            .append(HistoryRecord::new(&tool, command, cwd));

        let output = run_shell(command).await;
        debug!(tool, command, captured = output.is_some(), "executed command");
        output
    }
}

// One shot through the platform shell, stdout captured, no timeout.
// Failure to spawn and a non-zero exit both collapse to None.
async fn run_shell(command: &str) -> Option<String> {
    #[cfg(windows)]
    let output = Command::new("cmd").args(["/C", command]).output().await;
    #[cfg(not(windows))]
    let output = Command::new("sh").args(["-c", command]).output().await;

    match output {
        Ok(out) if out.status.success() => {
            Some(String::from_utf8_lossy(&out.stdout).into_owned())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> (ExecutionGateway, Arc<RwLock<HistoryStore>>) {
        let store = Arc::new(RwLock::new(HistoryStore::new()));
        (
            ExecutionGateway::new(store.clone(), ToolClassifier::default()),
            store,
        )
    }

    #[tokio::test]
    async fn test_execute_captures_output() {
        let (gateway, store) = gateway();
        let output = gateway.execute("echo hello", None).await;
        assert_eq!(output.as_deref(), Some("hello\n"));
        assert_eq!(store.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_command_still_appends_record() {
        let (gateway, store) = gateway();
        // "false" is guaranteed to exit non-zero
        let output = gateway.execute("false", None).await;
        assert!(output.is_none());

        let store = store.read().await;
        assert_eq!(store.len(), 1);
        let record = &store.snapshot()[0];
        assert_eq!(record.command, "false");
        // "false" is not in the table, so classification falls back
        assert_eq!(record.tool, "shell");
    }

    #[tokio::test]
    async fn test_unspawnable_command_still_appends_record() {
        let (gateway, store) = gateway();
        let output = gateway
            .execute("/definitely/not/a/real/binary-xyz", None)
            .await;
        assert!(output.is_none());
        assert_eq!(store.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_explicit_tool_label_wins_over_classification() {
        let (gateway, store) = gateway();
        gateway.execute("echo hi", Some("custom")).await;
        assert_eq!(store.read().await.snapshot()[0].tool, "custom");
    }

    #[tokio::test]
    async fn test_classifier_resolves_tool_when_unlabeled() {
        let (gateway, store) = gateway();
        gateway.execute("git --version", None).await;
        assert_eq!(store.read().await.snapshot()[0].tool, "git");
    }
}
