/// Query engine
///
/// Stateless read-only operations over a store snapshot: list, substring
/// search, and per-tool usage statistics. None of these mutate anything.
use crate::history::HistoryRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many records `list` returns when no limit is given
pub const DEFAULT_LIST_LIMIT: usize = 50;

// Case-insensitive substring match against the record's tool name, so
// "git" also matches a hypothetical "git-lfs" label.
fn tool_matches(record: &HistoryRecord, filter: Option<&str>) -> bool {
    match filter {
        Some(f) => record.tool.to_lowercase().contains(&f.to_lowercase()),
        None => true,
    }
}

/// List records, optionally tool-filtered and tail-limited.
///
/// Returns the last `limit` matching records (default 50), preserving
/// their original append order.
pub fn list<'a>(
    records: &'a [HistoryRecord],
    tool: Option<&str>,
    limit: Option<usize>,
) -> Vec<&'a HistoryRecord> {
    let filtered: Vec<&HistoryRecord> = records
        .iter()
        .filter(|r| tool_matches(r, tool))
        .collect();

    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let start = filtered.len().saturating_sub(limit);
    filtered[start..].to_vec()
}

/// Search commands for a case-insensitive substring, optionally
/// tool-filtered first. No ranking: matches come back in store order.
pub fn search<'a>(
    records: &'a [HistoryRecord],
    query: &str,
    tool: Option<&str>,
) -> Vec<&'a HistoryRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| tool_matches(r, tool))
        .filter(|r| r.command.to_lowercase().contains(&needle))
        .collect()
}

/// Aggregate usage statistics.
///
/// Serialized field names match the resource payload shape
/// (`totalCommands`, `tools`, `mostUsedTool`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolStats {
    pub total_commands: usize,
    pub tools: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_used_tool: Option<String>,
}

/// Compute per-tool counts and the most-used tool.
///
/// Ties on the maximum count resolve to the lexicographically smallest
/// tool name: counts live in a BTreeMap and the scan only replaces the
/// leader on a strictly greater count, so the result is deterministic.
pub fn stats(records: &[HistoryRecord]) -> ToolStats {
    let mut tools: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *tools.entry(record.tool.clone()).or_default() += 1;
    }

    let mut most_used: Option<(String, usize)> = None;
    for (tool, count) in &tools {
        if most_used.as_ref().is_none_or(|(_, best)| count > best) {
            most_used = Some((tool.clone(), *count));
        }
    }

    ToolStats {
        total_commands: records.len(),
        tools,
        most_used_tool: most_used.map(|(tool, _)| tool),
    }
}
