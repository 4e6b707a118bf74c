use std::io::{self, BufRead, Write};
use std::time::Instant;

use adi_catalog::{resource_text, resources};
use adi_core::{compute_score, diagnose};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::framing::{write_response, FrameReader, Incoming};
use crate::input::{resolve_input, ScoreArgs};
use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::render::{catalog_json, diagnosis_json, score_json, score_summary};

const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub struct AdiServer {
    config: ServiceConfig,
}

impl AdiServer {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::from_env())
    }

    pub const fn with_config(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "invalid jsonrpc version",
            ));
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification ignored");
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => {
                let protocol_version = request
                    .params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_PROTOCOL_VERSION);
                JsonRpcResponse::success(
                    id,
                    json!({
                        "protocolVersion": protocol_version,
                        "serverInfo": {
                            "name": self.config.server_name,
                            "version": env!("CARGO_PKG_VERSION")
                        },
                        "capabilities": {
                            "tools": {"listChanged": false},
                            "resources": {"subscribe": false, "listChanged": false}
                        }
                    }),
                )
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, tools_list_result()),
            "tools/call" => self.handle_tools_call(id, request.params),
            "resources/list" => JsonRpcResponse::success(id, resources_list_result()),
            "resources/read" => handle_resources_read(id, request.params),
            other => {
                tracing::debug!(method = other, "method not found");
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, "method not found")
            }
        };

        Some(response)
    }

    fn handle_tools_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let parsed: ToolsCallParams = match serde_json::from_value(params) {
            Ok(v) => v,
            Err(err) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid params: {err}"));
            }
        };

        let start = Instant::now();
        let response = match parsed.name.as_str() {
            "adi_score" => self.exec_score(id, parsed.arguments),
            "adi_diagnose" => self.exec_diagnose(id, parsed.arguments),
            "adi_catalog" => exec_catalog(id),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "unknown tool"),
        };
        tracing::debug!(
            tool = %parsed.name,
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            is_error = response.is_error(),
            "tool call handled"
        );
        response
    }

    fn exec_score(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: ScoreArgs = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let input = match resolve_input(&args, self.config.input_policy) {
            Ok(v) => v,
            Err(err) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid input: {err}"))
            }
        };

        let result = compute_score(&input);
        JsonRpcResponse::success(
            id,
            json!({
                "content": [{"type": "text", "text": score_summary(&result)}],
                "structuredContent": score_json(&input, &result)
            }),
        )
    }

    fn exec_diagnose(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: ScoreArgs = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let input = match resolve_input(&args, self.config.input_policy) {
            Ok(v) => v,
            Err(err) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid input: {err}"))
            }
        };

        let diagnosis = diagnose(&input);
        JsonRpcResponse::success(
            id,
            json!({
                "content": [{
                    "type": "text",
                    "text": format!(
                        "{}, {} lever(s) open",
                        score_summary(&diagnosis.result),
                        diagnosis.levers.len()
                    )
                }],
                "structuredContent": diagnosis_json(&diagnosis)
            }),
        )
    }

    pub fn serve_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        tracing::info!(
            server = %self.config.server_name,
            policy = %self.config.input_policy,
            "serving json-rpc on stdio"
        );
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Answers every request read from `reader`, echoing the framing each
    /// request arrived in. Returns at end of input.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> io::Result<()> {
        let mut frames = FrameReader::new(reader);

        while let Some(incoming) = frames.next_message()? {
            let (payload, frame) = match incoming {
                Incoming::Message { payload, frame } => (payload, frame),
                Incoming::Malformed { error, frame } => {
                    tracing::warn!(error = %error, "malformed stdio frame");
                    let response = JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("invalid stdio frame: {error}"),
                    );
                    write_response(&mut writer, &response, frame)?;
                    continue;
                }
            };

            let request: JsonRpcRequest = match serde_json::from_slice(&payload) {
                Ok(v) => v,
                Err(err) => {
                    tracing::warn!(error = %err, "unparseable request");
                    let response =
                        JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("parse error: {err}"));
                    write_response(&mut writer, &response, frame)?;
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request) {
                write_response(&mut writer, &response, frame)?;
            }
        }

        Ok(())
    }
}

impl Default for AdiServer {
    fn default() -> Self {
        Self::new()
    }
}

fn tools_list_result() -> Value {
    let metric_schema = json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "organic_emv": {"type": "number", "minimum": 0, "maximum": 100},
            "founder_content_freq": {"type": "number", "minimum": 0, "maximum": 100},
            "repeat_purchase_rate": {"type": "number", "minimum": 0, "maximum": 60},
            "review_sentiment": {"type": "number", "minimum": 1, "maximum": 5},
            "founder_ownership_pct": {"type": "number", "minimum": 0, "maximum": 100},
            "governance_score": {"type": "integer", "minimum": 1, "maximum": 5}
        }
    });
    json!({
        "tools": [
            {
                "name": "adi_score",
                "description": "Compute the ADI longevity score (0-100) and verdict for a creator brand. Omitted metrics use the calculator defaults.",
                "inputSchema": metric_schema
            },
            {
                "name": "adi_diagnose",
                "description": "Score a brand and list the metrics that still have points to give, largest first.",
                "inputSchema": metric_schema
            },
            {
                "name": "adi_catalog",
                "description": "List calculator metrics, pillar descriptions and verdict bands.",
                "inputSchema": {"type": "object", "properties": {}}
            }
        ]
    })
}

fn exec_catalog(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "content": [{"type": "text", "text": "adi catalog ready"}],
            "structuredContent": catalog_json()
        }),
    )
}

fn resources_list_result() -> Value {
    json!({
        "resources": resources()
            .iter()
            .map(|resource| json!({
                "uri": resource.uri,
                "name": resource.name,
                "description": resource.description,
                "mimeType": resource.mime_type
            }))
            .collect::<Vec<_>>()
    })
}

fn handle_resources_read(id: Value, params: Value) -> JsonRpcResponse {
    let parsed: ResourceReadParams = match serde_json::from_value(params) {
        Ok(v) => v,
        Err(err) => {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid params: {err}"));
        }
    };
    let Some(text) = resource_text(&parsed.uri) else {
        return JsonRpcResponse::error_with_data(
            id,
            INVALID_PARAMS,
            "resource not found",
            Some(json!({"uri": parsed.uri})),
        );
    };
    let mime_type = resources()
        .iter()
        .find(|resource| resource.uri == parsed.uri)
        .map_or("text/plain", |resource| resource.mime_type);

    JsonRpcResponse::success(
        id,
        json!({
            "contents": [{
                "uri": parsed.uri,
                "mimeType": mime_type,
                "text": text
            }]
        }),
    )
}

fn parse_args<T: for<'de> Deserialize<'de> + Default>(
    arguments: Option<Value>,
) -> Result<T, JsonRpcResponse> {
    match arguments {
        Some(Value::Null) | None => Ok(T::default()),
        Some(v) => serde_json::from_value(v).map_err(|err| {
            JsonRpcResponse::error(
                Value::Null,
                INVALID_PARAMS,
                format!("invalid tool arguments: {err}"),
            )
        }),
    }
}

#[derive(Debug, Deserialize)]
struct ToolsCallParams {
    name: String,
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ResourceReadParams {
    uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn server() -> AdiServer {
        AdiServer::with_config(ServiceConfig::default())
    }

    fn run(input: &str) -> String {
        let mut out = Vec::new();
        let served = server().serve(Cursor::new(input.as_bytes().to_vec()), &mut out);
        assert!(served.is_ok());
        String::from_utf8(out).unwrap_or_default()
    }

    #[test]
    fn line_delimited_ping_round_trips() {
        let out = run("{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n");
        let response: Value = serde_json::from_str(out.trim()).unwrap_or_default();
        assert_eq!(response["id"], json!(7));
        assert_eq!(response["result"], json!({}));
    }

    #[test]
    fn framed_request_gets_framed_response() {
        let body = "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}";
        let input = format!("Content-Length: {}\r\n\r\n{body}", body.len());
        let out = run(&input);
        assert!(out.starts_with("Content-Length: "));
        assert!(out.contains("\"result\":{}"));
    }

    #[test]
    fn garbage_line_yields_parse_error() {
        let out = run("not json\n");
        let response: Value = serde_json::from_str(out.trim()).unwrap_or_default();
        assert_eq!(response["error"]["code"], json!(PARSE_ERROR));
    }

    #[test]
    fn notifications_are_silent() {
        let out = run("{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n");
        assert!(out.is_empty());
    }

    #[test]
    fn missing_frame_length_is_reported() {
        let out = run("Content-Type: application/json\r\n\r\n");
        assert!(out.contains("missing content-length header"));
    }

    #[test]
    fn oversized_frame_length_gets_parse_error() {
        let out = run("Content-Length: 18446744073709551615\r\n\r\n{}");
        let response: Value = serde_json::from_str(out.trim()).unwrap_or_default();
        assert_eq!(response["error"]["code"], json!(PARSE_ERROR));
        let message = response["error"]["message"].as_str().unwrap_or_default();
        assert!(message.contains("frame too large"), "{message}");
    }

    #[test]
    fn serving_continues_after_a_bad_frame() {
        let out = run(concat!(
            "Content-Type: application/json\r\n\r\n",
            "{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n"
        ));
        let replies = out
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .collect::<Vec<_>>();
        assert!(matches!(
            replies.as_slice(),
            [bad, ping] if bad["error"]["code"] == json!(PARSE_ERROR) && ping["id"] == json!(3)
        ));
    }
}
