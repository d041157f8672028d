/// Tool classification
///
/// Maps a raw command string to a canonical tool identifier by looking up
/// its first token in a fixed table. Pure and total - unknown commands fall
/// back to the generic "shell" category rather than failing.
use std::collections::HashMap;

/// Fallback identifier for commands whose first token is not in the table
pub const FALLBACK_TOOL: &str = "shell";

// First token -> canonical tool name. Identity mappings today, but the
// table shape allows aliases (e.g. "g" -> "git") without touching callers.
const DEFAULT_TABLE: &[(&str, &str)] = &[
    ("git", "git"),
    ("docker", "docker"),
    ("npm", "npm"),
    ("yarn", "yarn"),
    ("node", "node"),
    ("python", "python"),
    ("pip", "pip"),
    ("apt", "apt"),
    ("brew", "brew"),
    ("curl", "curl"),
    ("wget", "wget"),
    ("ssh", "ssh"),
    ("scp", "scp"),
    ("rsync", "rsync"),
];

/// Classifies commands by their first token
#[derive(Debug, Clone)]
pub struct ToolClassifier {
    table: HashMap<String, String>,
    fallback: String,
}

impl ToolClassifier {
    /// Build a classifier from an explicit lookup table.
    pub fn new<I, S>(table: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            table: table
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fallback: fallback.into(),
        }
    }

    /// Classify a raw command string.
    ///
    /// Splits on the first whitespace boundary, looks up the first token,
    /// and falls back to the generic category when nothing matches. Always
    /// returns a non-empty identifier.
    pub fn classify(&self, command: &str) -> &str {
        let first_token = command.trim().split_whitespace().next().unwrap_or("");
        self.table
            .get(first_token)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for ToolClassifier {
    /// The canonical table used by the server.
    fn default() -> Self {
        Self::new(DEFAULT_TABLE.iter().copied(), FALLBACK_TOOL)
    }
}
