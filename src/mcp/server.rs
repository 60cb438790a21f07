//! MCP server implementation.

use super::protocol::*;
use super::tools::{SEARCH_TOOL, TRANSCRIPT_TOOL, get_tools};
use crate::search::SearchBackend;
use crate::service::{DEFAULT_NUM_VIDEOS, YouTubeService};
use crate::youtube::CaptionProvider;
use eyre::Result;
use log::{debug, info, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "youtube";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP server wrapping the YouTube tools.
pub struct McpServer<S, C> {
    service: YouTubeService<S, C>,
}

impl<S: SearchBackend, C: CaptionProvider> McpServer<S, C> {
    pub fn new(service: YouTubeService<S, C>) -> Self {
        Self { service }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> Result<()> {
        info!("MCP server starting on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
    }

    /// Handle line-delimited JSON-RPC until the reader is exhausted.
    ///
    /// Undecodable lines are answered with a parse error; only I/O errors end the loop.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim()).await,
                Err(e) => {
                    warn!("Dropping request that is not valid UTF-8: {e}");
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse request: {e}");
                return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
            }
        };

        // well-formed JSON that is not a request still gets its id back
        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Invalid request: {e}");
                Some(JsonRpcResponse::error(id, INVALID_REQUEST, &format!("Invalid Request: {e}")))
            }
        }
    }

    /// Handle a single JSON-RPC message. Notifications (no `id` member) get no response;
    /// an explicit `"id": null` is answered.
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.id.is_none() {
            debug!("Notification: {}", request.method);
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                &format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        match params.map(serde_json::from_value::<InitializeParams>) {
            Some(Ok(params)) => {
                let client = params
                    .client_info
                    .map(|c| format!("{} {}", c.name, c.version.unwrap_or_default()))
                    .unwrap_or_else(|| "unknown client".to_string());
                info!(
                    "Initialize from {client} (protocol {})",
                    params.protocol_version.as_deref().unwrap_or("unspecified")
                );
            }
            Some(Err(e)) => debug!("Ignoring malformed initialize params: {e}"),
            None => debug!("Initialize without params"),
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::from_result(id, &result)
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult { tools: get_tools() };
        JsonRpcResponse::from_result(id, &result)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {e}")),
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let result = match params.name.as_str() {
            SEARCH_TOOL => self.tool_search(params.arguments).await,
            TRANSCRIPT_TOOL => self.tool_transcript(params.arguments).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        JsonRpcResponse::from_result(id, &result)
    }

    async fn tool_search(&self, args: Option<Value>) -> ToolCallResult {
        let args = match args {
            Some(a) => a,
            None => return ToolCallResult::error("Missing arguments".to_string()),
        };

        let search_term = match args.get("search_term").and_then(|v| v.as_str()) {
            Some(s) => s,
            None => return ToolCallResult::error("Missing 'search_term' argument".to_string()),
        };

        let num_videos = match args.get("num_videos") {
            None | Some(Value::Null) => DEFAULT_NUM_VIDEOS,
            Some(v) => match integer(v) {
                Some(n) => n,
                None => {
                    return ToolCallResult::error("Invalid 'num_videos' argument: expected an integer".to_string());
                }
            },
        };

        let hits = self.service.search_youtube_videos(search_term, num_videos).await;
        ToolCallResult::json(&hits)
    }

    async fn tool_transcript(&self, args: Option<Value>) -> ToolCallResult {
        let args = match args {
            Some(a) => a,
            None => return ToolCallResult::error("Missing arguments".to_string()),
        };

        let input = match args.get("video_url_or_title").and_then(|v| v.as_str()) {
            Some(i) => i,
            None => return ToolCallResult::error("Missing 'video_url_or_title' argument".to_string()),
        };

        let outcome = self.service.get_youtube_transcript(input).await;
        ToolCallResult::json(&outcome)
    }
}

// Accepts 7 and 7.0; anything fractional or non-numeric is rejected
fn integer(v: &Value) -> Option<i64> {
    v.as_i64()
        .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}
