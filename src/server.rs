/// MCP front-end
///
/// Exposes the store as four tools (list_history, search_history,
/// get_tool_stats, execute_command) and two read-only resources
/// (cli-history://all, cli-history://stats) over the rmcp server handler.
use crate::classify::ToolClassifier;
use crate::error::HistoryError;
use crate::exec::ExecutionGateway;
use crate::history::{HistoryRecord, HistoryStore};
use crate::ingest;
use crate::query::{self, ToolStats};
use rmcp::handler::server::{router::tool::ToolRouter, wrapper::Parameters};
use rmcp::model::*;
use rmcp::schemars::JsonSchema;
use rmcp::service::RequestContext;
use rmcp::{schemars, tool, tool_handler, tool_router, RoleServer, ServerHandler};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

const ALL_HISTORY_URI: &str = "cli-history://all";
const STATS_URI: &str = "cli-history://stats";

/// What execute_command returns when the command produced nothing
const EMPTY_OUTPUT_PLACEHOLDER: &str = "Command completed with no output";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// -- Tool parameter types --

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListHistoryParams {
    /// Tool name to filter by (git, docker, npm, node, python, shell, ...)
    pub tool: Option<String>,
    /// Maximum number of commands to return (default 50)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchHistoryParams {
    /// Text to search for in recorded commands
    pub query: String,
    /// Tool name to filter by
    pub tool: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExecuteCommandParams {
    /// The command to execute
    pub command: String,
    /// Tool label for the history record; classified from the command
    /// when omitted
    pub tool: Option<String>,
}

/// The unified CLI history MCP server
#[derive(Clone)]
pub struct HistoryServer {
    tool_router: ToolRouter<Self>,
    store: Arc<RwLock<HistoryStore>>,
    gateway: ExecutionGateway,
}

impl HistoryServer {
    pub fn new(store: Arc<RwLock<HistoryStore>>, classifier: ToolClassifier) -> Self {
        Self {
            tool_router: Self::tool_router(),
            gateway: ExecutionGateway::new(store.clone(), classifier),
            store,
        }
    }

    /// Ingest every configured source, then build the server around the
    /// populated store. Ingestion runs to completion before the transport
    /// is attached, so startup never races query traffic.
    pub async fn bootstrap() -> Self {
        let classifier = ToolClassifier::default();
        let sources = ingest::default_sources(&classifier);
        let mut store = HistoryStore::new();
        let ingested = ingest::ingest_all(&sources, &mut store).await;
        info!(ingested, "history ingestion complete");

        Self::new(Arc::new(RwLock::new(store)), classifier)
    }
}

#[tool_router(router = tool_router)]
impl HistoryServer {
    #[tool(
        name = "list_history",
        description = "List recorded CLI commands, optionally filtered by tool and limited to the most recent N (default 50)."
    )]
    pub async fn list_history(
        &self,
        params: Parameters<ListHistoryParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let store = self.store.read().await;
        let text = render_listing(store.snapshot(), p.tool.as_deref(), p.limit);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "search_history",
        description = "Search recorded commands for a case-insensitive substring, optionally filtered by tool."
    )]
    pub async fn search_history(
        &self,
        params: Parameters<SearchHistoryParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let store = self.store.read().await;
        let text = render_search(store.snapshot(), &p.query, p.tool.as_deref());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "get_tool_stats",
        description = "Usage statistics across all recorded commands: total count, most used tool, per-tool counts."
    )]
    pub async fn get_tool_stats(&self) -> Result<CallToolResult, ErrorData> {
        let store = self.store.read().await;
        let text = render_stats(&query::stats(store.snapshot()));
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "execute_command",
        description = "Record a command in the history, then execute it and return its output. The record is kept even if execution fails."
    )]
    pub async fn execute_command(
        &self,
        params: Parameters<ExecuteCommandParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        if p.command.trim().is_empty() {
            return Err(
                HistoryError::InvalidArgument("'command' must not be empty".to_string()).into(),
            );
        }

        let output = self.gateway.execute(&p.command, p.tool.as_deref()).await;
        let output = match output {
            Some(text) if !text.is_empty() => text,
            _ => EMPTY_OUTPUT_PLACEHOLDER.to_string(),
        };

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Executed: {}\n\nOutput:\n{}",
            p.command, output
        ))]))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for HistoryServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = "Unified CLI history. Tools: list_history (tool?, limit?), \
             search_history (query, tool?), get_tool_stats, execute_command (command, tool?). \
             Resources: cli-history://all and cli-history://stats."
            .to_string();

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(instructions),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let mut all = RawResource::new(ALL_HISTORY_URI, "All CLI History");
        all.description = Some("Every recorded command across all sources".to_string());
        all.mime_type = Some("application/json".to_string());

        let mut stats = RawResource::new(STATS_URI, "CLI Usage Statistics");
        stats.description = Some("Per-tool usage counts and totals".to_string());
        stats.mime_type = Some("application/json".to_string());

        Ok(ListResourcesResult {
            resources: vec![all.no_annotation(), stats.no_annotation()],
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let json = match request.uri.as_str() {
            ALL_HISTORY_URI => {
                let store = self.store.read().await;
                serde_json::to_string_pretty(store.snapshot())
                    .map_err(HistoryError::from)?
            }
            STATS_URI => {
                let store = self.store.read().await;
                serde_json::to_string_pretty(&query::stats(store.snapshot()))
                    .map_err(HistoryError::from)?
            }
            other => {
                return Err(ErrorData::new(
                    ErrorCode::RESOURCE_NOT_FOUND,
                    format!("Unknown resource: {}", other),
                    None,
                ))
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(json, request.uri)],
        })
    }
}

// -- Text rendering for tool responses --

fn render_listing(records: &[HistoryRecord], tool: Option<&str>, limit: Option<usize>) -> String {
    let entries = query::list(records, tool, limit);
    let mut out = format!("Found {} commands:\n\n", entries.len());
    out.push_str(
        &entries
            .iter()
            .map(|r| {
                format!(
                    "[{}] {} ({})",
                    r.tool,
                    r.command,
                    r.recorded_at.format(TIMESTAMP_FORMAT)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    );
    out
}

fn render_search(records: &[HistoryRecord], query_text: &str, tool: Option<&str>) -> String {
    let matches = query::search(records, query_text, tool);
    let mut out = format!(
        "Found {} commands matching \"{}\":\n\n",
        matches.len(),
        query_text
    );
    out.push_str(
        &matches
            .iter()
            .map(|r| format!("[{}] {}", r.tool, r.command))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    out
}

fn render_stats(stats: &ToolStats) -> String {
    let mut out = String::from("CLI tool usage:\n");
    out.push_str(&format!("Total commands: {}\n", stats.total_commands));
    out.push_str(&format!(
        "Most used tool: {}\n",
        stats.most_used_tool.as_deref().unwrap_or("none")
    ));
    out.push_str("\nPer-tool counts:\n");
    for (tool, count) in &stats.tools {
        out.push_str(&format!("- {}: {}\n", tool, count));
    }
    out
}
