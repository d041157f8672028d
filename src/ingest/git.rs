// Version-control log adapter
//
// Reads the most recent commits of the repository containing the working
// directory and records them as "git <short-id> <summary>" entries, the
// same shape `git log --oneline` prints. Uses libgit2 directly instead of
// spawning a git process; the walk is strictly read-only.

use super::HistorySource;
use crate::error::Result;
use crate::history::HistoryRecord;
use async_trait::async_trait;
use git2::Repository;
use std::path::PathBuf;

pub struct GitLogSource {
    workdir: PathBuf,
    limit: usize,
}

impl GitLogSource {
    pub fn new(workdir: PathBuf, limit: usize) -> Self {
        Self { workdir, limit }
    }

    fn read_log(&self) -> Result<Vec<HistoryRecord>> {
        let repo = Repository::discover(&self.workdir)?;
        let mut walk = repo.revwalk()?;
        walk.push_head()?;

        let working_directory = self.workdir.display().to_string();
        let mut records = Vec::new();

        for oid in walk.take(self.limit) {
            let oid = oid?;
            let commit = repo.find_commit(oid)?;
            let id = oid.to_string();
            // 7-hex short id, matching the oneline format
            let line = format!("git {} {}", &id[..7], commit.summary().unwrap_or(""));
            records.push(HistoryRecord::new("git", &line, &working_directory));
        }

        Ok(records)
    }
}

#[async_trait]
impl HistorySource for GitLogSource {
    fn origin(&self) -> &str {
        "git"
    }

    async fn collect(&self) -> Vec<HistoryRecord> {
        // No repository here, bare repo, unborn HEAD: all absorbed.
        self.read_log().unwrap_or_default()
    }
}
