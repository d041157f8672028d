/// Source adapters
///
/// Each adapter reads one specific on-disk or repository origin and
/// produces zero or more normalized records. Adapters are independent and
/// failure-isolated: a missing history file or absent git repository
/// yields zero records and never blocks the other sources.
pub mod classified;
pub mod file;
pub mod filtered;
pub mod git;

pub use classified::ClassifiedSource;
pub use file::FileHistorySource;
pub use filtered::PrefixFilteredSource;
pub use git::GitLogSource;

use crate::classify::ToolClassifier;
use crate::history::{HistoryRecord, HistoryStore};
use async_trait::async_trait;
use std::env;
use std::path::Path;
use tracing::debug;

/// Shell history files under the home directory, one adapter each
const SHELL_HISTORIES: &[(&str, &str)] = &[
    ("bash", ".bash_history"),
    ("zsh", ".zsh_history"),
    ("fish", ".local/share/fish/fish_history"),
    (
        "powershell",
        "AppData/Roaming/Microsoft/Windows/PowerShell/PSReadLine/ConsoleHost_history.txt",
    ),
];

/// Language-REPL history files, same per-line rule as shells
const REPL_HISTORIES: &[(&str, &str)] = &[
    ("node", ".node_repl_history"),
    ("python", ".python_history"),
];

/// How many commits the version-control log adapter reads
const GIT_LOG_LIMIT: usize = 50;
/// How many docker commands the filtered-subset adapter keeps
const DOCKER_TAIL: usize = 20;
/// How many recent lines the classification pass examines
const CLASSIFIED_TAIL: usize = 100;

/// One origin of history records.
///
/// `collect` never fails: any read error is absorbed into an empty result.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Origin name, for diagnostics only.
    fn origin(&self) -> &str;

    /// Read the source and produce normalized records.
    async fn collect(&self) -> Vec<HistoryRecord>;
}

/// The full adapter set for this process: shell histories, the git log of
/// the current directory, REPL histories, the docker subset, and the
/// classification pass over recent bash history.
pub fn default_sources(classifier: &ToolClassifier) -> Vec<Box<dyn HistorySource>> {
    let mut sources: Vec<Box<dyn HistorySource>> = Vec::new();

    if let Some(home) = dirs::home_dir() {
        let home_dir = home.display().to_string();

        for (shell, file) in SHELL_HISTORIES {
            sources.push(Box::new(FileHistorySource::new(
                *shell,
                home.join(file),
                &home_dir,
            )));
        }

        sources.push(git_source());

        for (repl, file) in REPL_HISTORIES {
            sources.push(Box::new(FileHistorySource::new(
                *repl,
                home.join(file),
                &home_dir,
            )));
        }

        let bash_history = home.join(".bash_history");
        sources.push(Box::new(PrefixFilteredSource::new(
            "docker",
            "docker",
            bash_history.clone(),
            DOCKER_TAIL,
            &home_dir,
        )));
        sources.push(Box::new(ClassifiedSource::new(
            bash_history,
            classifier.clone(),
            CLASSIFIED_TAIL,
            &home_dir,
        )));
    } else {
        // No home directory: file-backed adapters have nothing to read,
        // but the git log of the working directory still applies.
        sources.push(git_source());
    }

    sources
}

fn git_source() -> Box<dyn HistorySource> {
    let cwd = env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    Box::new(GitLogSource::new(cwd, GIT_LOG_LIMIT))
}

/// Run every adapter sequentially and append its records to the store.
///
/// Returns the number of records ingested. Ingestion completes before the
/// server accepts requests, so no locking is needed here.
pub async fn ingest_all(sources: &[Box<dyn HistorySource>], store: &mut HistoryStore) -> usize {
    let mut total = 0;
    for source in sources {
        let records = source.collect().await;
        debug!(
            origin = source.origin(),
            count = records.len(),
            "collected history records"
        );
        total += records.len();
        for record in records {
            store.append(record);
        }
    }
    total
}
