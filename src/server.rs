use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use crate::config::Config;
use crate::error::RelayError;
use crate::relay::ChatRelay;
use crate::tools::chat::ChatRequest;
use crate::tools::compare::CompareRequest;

#[derive(Clone)]
pub struct RelayServer {
    relay: Arc<ChatRelay>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RelayServer {
    pub fn new(config: Config) -> Result<Self, RelayError> {
        let relay = ChatRelay::from_config(&config.provider)?;
        tracing::info!(
            default_model = relay.default_model(),
            api_url = %config.provider.api_url,
            "relay ready"
        );
        Ok(Self {
            relay: Arc::new(relay),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(
        name = "chat",
        description = "Send one message to the configured text-generation provider. Returns JSON with reply, latencyMs, token usage and truncation status.",
        annotations(read_only_hint = true)
    )]
    async fn chat(
        &self,
        Parameters(req): Parameters<ChatRequest>,
    ) -> Result<CallToolResult, McpError> {
        req.validate()
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        let result = self.relay.generate_reply(&req.into()).await;
        Ok(result.into_call_tool_result())
    }

    #[tool(
        name = "compare",
        description = "Send one message under two settings (model, temperature, maxOutputTokens) in parallel. Returns JSON {a, b}, each shaped like a `chat` result; one side failing does not affect the other.",
        annotations(read_only_hint = true)
    )]
    async fn compare(
        &self,
        Parameters(req): Parameters<CompareRequest>,
    ) -> Result<CallToolResult, McpError> {
        req.validate()
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        let (a, b) = req.into_requests();
        let comparison = self.relay.compare(&a, &b).await;
        Ok(comparison.into_call_tool_result())
    }

    #[tool(
        name = "ping",
        description = "Liveness check. Returns \"pong\" without contacting the provider.",
        annotations(read_only_hint = true)
    )]
    async fn ping(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text("pong")]))
    }
}

#[tool_handler]
impl ServerHandler for RelayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "chatrelay".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "chatrelay: relays one chat message to a text-generation provider.\n\n\
                 Call `chat` with `message` (required) and optional `model`, `temperature`, \
                 `maxOutputTokens`. Call `compare` with `message` plus settings `a` and `b` to \
                 run both side by side. Failures are reported inside `reply`; check `truncated` \
                 to see whether the provider stopped at the token ceiling."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
