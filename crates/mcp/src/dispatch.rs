//! Tool-call dispatch.
//!
//! Validates an incoming tool call, builds a fresh Zoom client for
//! it, runs the matching facade operation, and renders the outcome as
//! exactly one text reply segment. Every failure mode (unknown tool,
//! missing arguments, upstream error) resolves to a reply; nothing
//! escapes to the transport as a fault.

use crate::protocol::{CallToolParams, CallToolResult, ListToolsResult};
use crate::tools::{ArgShapeRepair, BacktickKeyRepair, ZoomTool};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};
use zoomcp_client::{ClientConfig, Credentials, ZoomClient, ZoomResult};

/// Validation failures surfaced before a tool executes.
#[derive(Debug, thiserror::Error)]
enum ValidationError {
    #[error("Missing arguments for {0}")]
    MissingArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument: {field} for {tool}")]
    MissingField {
        field: &'static str,
        tool: &'static str,
    },
}

/// Maps tool calls onto Zoom client operations.
///
/// Stateless across calls: each call constructs its own credentials
/// and client from the per-call arguments. The held `ClientConfig` is
/// only an endpoint template (tests point it at a mock server).
pub struct Dispatcher {
    config: ClientConfig,
    repairs: Vec<Box<dyn ArgShapeRepair>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            repairs: vec![Box::new(BacktickKeyRepair::new())],
        }
    }

    /// Replace the repair strategies (pass an empty vec to disable
    /// argument-shape recovery entirely).
    pub fn repairs(mut self, repairs: Vec<Box<dyn ArgShapeRepair>>) -> Self {
        self.repairs = repairs;
        self
    }

    pub fn list_tools(&self) -> ListToolsResult {
        ZoomTool::list_schemas()
    }

    /// Handle one tool call. Always yields exactly one text segment
    /// whose body is a JSON document.
    pub async fn dispatch(&self, params: CallToolParams) -> CallToolResult {
        let tool_name = params.name.clone();
        debug!(tool = %tool_name, "tool call received");

        match self.try_dispatch(params).await {
            Ok(value) => {
                let failed = value.get("status").map_or(false, |status| status == "error");
                let body = value.to_string();
                if failed {
                    CallToolResult::error_text(body)
                } else {
                    CallToolResult::text(body)
                }
            }
            Err(err) => {
                warn!(tool = %tool_name, error = %err, "tool call rejected");
                let body = json!({"error": err.to_string(), "status": "error"});
                CallToolResult::error_text(body.to_string())
            }
        }
    }

    async fn try_dispatch(&self, params: CallToolParams) -> Result<Value, ValidationError> {
        let mut args = match params.arguments {
            Some(Value::Object(map)) if !map.is_empty() => map,
            _ => return Err(ValidationError::MissingArguments(params.name)),
        };

        let tool = ZoomTool::from_name(&params.name)
            .ok_or(ValidationError::UnknownTool(params.name))?;

        for strategy in &self.repairs {
            if let Some(repaired) = strategy.repair(tool, &args) {
                args = repaired;
                break;
            }
        }

        for field in tool.required_args() {
            if !args.get(*field).is_some_and(is_present) {
                return Err(ValidationError::MissingField {
                    field,
                    tool: tool.name(),
                });
            }
        }

        Ok(self.execute(tool, &args).await)
    }

    async fn execute(&self, tool: ZoomTool, args: &Map<String, Value>) -> Value {
        match tool {
            ZoomTool::RefreshToken => {
                let client_id = string_arg(args, "zoom_client_id").unwrap_or_default();
                let client_secret = string_arg(args, "zoom_client_secret").unwrap_or_default();
                let credentials = Credentials::new(
                    string_arg(args, "zoom_access_token"),
                    string_arg(args, "zoom_refresh_token"),
                    None,
                    None,
                );

                match credentials.and_then(|creds| self.client(creds)) {
                    Ok(mut client) => {
                        client.refresh_access_token(&client_id, &client_secret).await
                    }
                    Err(err) => err.into_envelope(),
                }
            }
            ZoomTool::ListRecordings => {
                let from_date = string_arg(args, "from_date");
                let to_date = string_arg(args, "to_date");
                let page_size = integer_arg(args, "page_size", 30);
                let page_number = integer_arg(args, "page_number", 1);

                match self.access_client(args) {
                    Ok(client) => {
                        client
                            .list_recordings(
                                from_date.as_deref(),
                                to_date.as_deref(),
                                page_size,
                                page_number,
                            )
                            .await
                    }
                    Err(err) => err.into_envelope(),
                }
            }
            ZoomTool::RecordingDetails => {
                let meeting_id = string_arg(args, "meeting_id").unwrap_or_default();
                match self.access_client(args) {
                    Ok(client) => client.get_recording_details(&meeting_id).await,
                    Err(err) => err.into_envelope(),
                }
            }
            ZoomTool::MeetingTranscript => {
                let meeting_id = string_arg(args, "meeting_id").unwrap_or_default();
                match self.access_client(args) {
                    Ok(client) => client.get_meeting_transcript(&meeting_id).await,
                    Err(err) => err.into_envelope(),
                }
            }
        }
    }

    fn client(&self, credentials: Credentials) -> ZoomResult<ZoomClient> {
        ZoomClient::new(self.config.clone(), credentials)
    }

    /// Client authenticated with just the per-call access token.
    fn access_client(&self, args: &Map<String, Value>) -> ZoomResult<ZoomClient> {
        let access_token = string_arg(args, "zoom_access_token").unwrap_or_default();
        self.client(Credentials::with_access_token(access_token))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments are untrusted: a required field counts as present only
/// when it is a non-empty string or a number.
fn is_present(value: &Value) -> bool {
    match value {
        Value::String(text) => !text.is_empty(),
        Value::Number(_) => true,
        _ => false,
    }
}

fn string_arg(args: &Map<String, Value>, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn integer_arg(args: &Map<String, Value>, key: &str, default: u32) -> u32 {
    match args.get(key) {
        Some(Value::Number(number)) => number.as_u64().map_or(default, |n| n as u32),
        Some(Value::String(text)) => text.parse().unwrap_or(default),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn call(name: &str, arguments: Value) -> CallToolParams {
        CallToolParams {
            name: name.to_string(),
            arguments: Some(arguments),
        }
    }

    fn single_key(key: &str) -> Value {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(String::new()));
        Value::Object(map)
    }

    fn body_json(result: &CallToolResult) -> Value {
        assert_eq!(result.content.len(), 1, "exactly one reply segment");
        serde_json::from_str(result.content[0].as_text()).expect("reply body is valid JSON")
    }

    fn mock_dispatcher(server: &MockServer) -> Dispatcher {
        Dispatcher::with_config(ClientConfig::new(
            url::Url::parse(&format!("{}/v2/", server.uri())).unwrap(),
            url::Url::parse(&format!("{}/oauth/token", server.uri())).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = Dispatcher::new()
            .dispatch(call("zoom_delete_everything", json!({"x": "y"})))
            .await;

        let body = body_json(&result);
        assert_eq!(body["error"], "Unknown tool: zoom_delete_everything");
        assert_eq!(body["status"], "error");
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let params = CallToolParams {
            name: "zoom_list_recordings".to_string(),
            arguments: None,
        };
        let result = Dispatcher::new().dispatch(params).await;

        let body = body_json(&result);
        assert_eq!(body["error"], "Missing arguments for zoom_list_recordings");
    }

    #[tokio::test]
    async fn test_empty_arguments_count_as_missing() {
        let result = Dispatcher::new()
            .dispatch(call("zoom_list_recordings", json!({})))
            .await;

        let body = body_json(&result);
        assert_eq!(body["error"], "Missing arguments for zoom_list_recordings");
    }

    #[tokio::test]
    async fn test_missing_required_field() {
        let result = Dispatcher::new()
            .dispatch(call("zoom_get_recording_details", json!({
                "zoom_access_token": "tok",
            })))
            .await;

        let body = body_json(&result);
        assert_eq!(
            body["error"],
            "Missing required argument: meeting_id for zoom_get_recording_details"
        );
    }

    #[tokio::test]
    async fn test_empty_string_field_counts_as_missing() {
        let result = Dispatcher::new()
            .dispatch(call("zoom_list_recordings", json!({"zoom_access_token": ""})))
            .await;

        let body = body_json(&result);
        assert_eq!(
            body["error"],
            "Missing required argument: zoom_access_token for zoom_list_recordings"
        );
    }

    #[tokio::test]
    async fn test_refresh_requires_all_three_fields() {
        let result = Dispatcher::new()
            .dispatch(call("zoom_refresh_token", json!({
                "zoom_refresh_token": "abc",
                "zoom_client_id": "id1",
            })))
            .await;

        let body = body_json(&result);
        assert_eq!(
            body["error"],
            "Missing required argument: zoom_client_secret for zoom_refresh_token"
        );
    }

    #[tokio::test]
    async fn test_backtick_collapsed_arguments_are_repaired() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("refresh_token=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh",
                "refresh_token": "next",
                "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let collapsed =
            "`zoom_refresh_token`: `abc`, `zoom_client_id`: `id1`, `zoom_client_secret`: `sec1`";
        let result = mock_dispatcher(&server)
            .dispatch(call("zoom_refresh_token", single_key(collapsed)))
            .await;

        let body = body_json(&result);
        assert_eq!(body["status"], "success");
        assert_eq!(body["access_token"], "fresh");
        assert_eq!(result.is_error, None);
    }

    #[tokio::test]
    async fn test_repair_failure_falls_through_to_validation() {
        // Only two of the three fields in the collapsed key: repair
        // declines, and the single bogus key fails validation.
        let result = Dispatcher::new()
            .dispatch(call(
                "zoom_refresh_token",
                single_key("`zoom_refresh_token`: `abc`, `zoom_client_id`: `id1`"),
            ))
            .await;

        let body = body_json(&result);
        assert_eq!(
            body["error"],
            "Missing required argument: zoom_refresh_token for zoom_refresh_token"
        );
    }

    #[tokio::test]
    async fn test_list_recordings_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/users/me/recordings"))
            .and(query_param("page_size", "50"))
            .and(query_param("page_number", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_records": 1,
                "meetings": [{"topic": "standup"}],
            })))
            .mount(&server)
            .await;

        // page_size arrives as a string, page_number as a number;
        // both shapes are accepted.
        let result = mock_dispatcher(&server)
            .dispatch(call("zoom_list_recordings", json!({
                "zoom_access_token": "tok",
                "page_size": "50",
                "page_number": 2,
            })))
            .await;

        let body = body_json(&result);
        assert_eq!(body["total_records"], 1);
        assert_eq!(result.is_error, None);
    }

    #[tokio::test]
    async fn test_upstream_error_is_flagged() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/meetings/99/recordings"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let result = mock_dispatcher(&server)
            .dispatch(call("zoom_get_recording_details", json!({
                "zoom_access_token": "tok",
                "meeting_id": "99",
            })))
            .await;

        let body = body_json(&result);
        assert_eq!(body["status"], "error");
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_numeric_meeting_id_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/meetings/12345/recordings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"topic": "t"})))
            .mount(&server)
            .await;

        let result = mock_dispatcher(&server)
            .dispatch(call("zoom_get_recording_details", json!({
                "zoom_access_token": "tok",
                "meeting_id": 12345,
            })))
            .await;

        let body = body_json(&result);
        assert_eq!(body["topic"], "t");
    }

    #[tokio::test]
    async fn test_repairs_can_be_disabled() {
        let collapsed =
            "`zoom_refresh_token`: `abc`, `zoom_client_id`: `id1`, `zoom_client_secret`: `sec1`";
        let result = Dispatcher::new()
            .repairs(vec![])
            .dispatch(call("zoom_refresh_token", single_key(collapsed)))
            .await;

        let body = body_json(&result);
        assert_eq!(body["status"], "error");
        assert_eq!(
            body["error"],
            "Missing required argument: zoom_refresh_token for zoom_refresh_token"
        );
    }
}
