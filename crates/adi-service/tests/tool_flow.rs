use adi_service::protocol::JsonRpcRequest;
use adi_service::{AdiServer, InputPolicy, ServiceConfig};
use serde_json::{json, Value};

fn server(policy: InputPolicy) -> AdiServer {
    AdiServer::with_config(ServiceConfig::default().with_input_policy(policy))
}

fn call_tool(server: &AdiServer, id: u64, name: &str, arguments: Value) -> Value {
    let req = JsonRpcRequest::new(
        id,
        "tools/call",
        json!({"name": name, "arguments": arguments}),
    );
    let resp = server.handle_request(req).expect("tool response");
    serde_json::to_value(resp).expect("serialize response")
}

#[test]
fn score_with_defaults_is_sustainable_niche() {
    let out = call_tool(&server(InputPolicy::Clamp), 1, "adi_score", json!({}));
    let structured = &out["result"]["structuredContent"];
    assert_eq!(structured["total_score"], json!(53));
    assert_eq!(structured["verdict"], json!("sustainable_niche"));
    assert_eq!(
        structured["caption"],
        json!("Sustainable Niche (e.g., Fenty)")
    );
    assert_eq!(
        out["result"]["content"][0]["text"],
        json!("score=53 verdict=Sustainable Niche (e.g., Fenty)")
    );
}

#[test]
fn saturated_brand_is_institutional_grade() {
    let out = call_tool(
        &server(InputPolicy::Reject),
        2,
        "adi_score",
        json!({
            "organic_emv": 100,
            "founder_content_freq": 30,
            "repeat_purchase_rate": 35,
            "review_sentiment": 5,
            "founder_ownership_pct": 0,
            "governance_score": 5
        }),
    );
    let structured = &out["result"]["structuredContent"];
    assert_eq!(structured["total_score"], json!(100));
    assert_eq!(structured["verdict"], json!("institutional_grade"));
    assert_eq!(structured["tone"], json!("strong"));
}

#[test]
fn floor_brand_is_hype_cycle() {
    let out = call_tool(
        &server(InputPolicy::Clamp),
        3,
        "adi_score",
        json!({
            "organic_emv": 0,
            "founder_content_freq": 0,
            "repeat_purchase_rate": 0,
            "review_sentiment": 1,
            "founder_ownership_pct": 100,
            "governance_score": 1
        }),
    );
    assert_eq!(out["result"]["structuredContent"]["total_score"], json!(3));
    assert_eq!(
        out["result"]["structuredContent"]["verdict"],
        json!("hype_cycle_high_risk")
    );
}

#[test]
fn clamp_policy_scores_out_of_range_input() {
    let out = call_tool(
        &server(InputPolicy::Clamp),
        4,
        "adi_score",
        json!({"organic_emv": 250, "founder_ownership_pct": -30}),
    );
    let structured = &out["result"]["structuredContent"];
    assert!(out["error"].is_null());
    assert_eq!(structured["input"]["organic_emv"], json!(100.0));
    assert_eq!(structured["input"]["founder_ownership_pct"], json!(0.0));
}

#[test]
fn reject_policy_returns_invalid_params() {
    let srv = server(InputPolicy::Reject);
    assert_eq!(srv.config().input_policy, InputPolicy::Reject);
    let out = call_tool(
        &srv,
        5,
        "adi_score",
        json!({"review_sentiment": 0}),
    );
    assert_eq!(out["id"], json!(5));
    assert_eq!(out["error"]["code"], json!(-32602));
    let message = out["error"]["message"].as_str().unwrap_or_default();
    assert!(message.contains("review_sentiment"), "{message}");
}

#[test]
fn unknown_argument_is_invalid_params() {
    let out = call_tool(
        &server(InputPolicy::Clamp),
        6,
        "adi_score",
        json!({"follower_count": 10}),
    );
    assert_eq!(out["id"], json!(6));
    assert_eq!(out["error"]["code"], json!(-32602));
}

#[test]
fn diagnose_lists_levers_largest_first() {
    let out = call_tool(&server(InputPolicy::Clamp), 7, "adi_diagnose", json!({}));
    let structured = &out["result"]["structuredContent"];
    assert_eq!(structured["key_person_risk"], json!(true));
    assert_eq!(structured["points_to_next_tier"], json!(27));
    assert_eq!(structured["next_verdict"], json!("institutional_grade"));

    let levers = structured["levers"].as_array().expect("levers array");
    assert_eq!(levers.len(), 6);
    assert_eq!(levers[0]["metric"], json!("founder_ownership_pct"));
    let points = levers
        .iter()
        .filter_map(|lever| lever["available_points"].as_f64())
        .collect::<Vec<_>>();
    assert!(points.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn catalog_lists_metrics_pillars_and_verdicts() {
    let out = call_tool(&server(InputPolicy::Clamp), 8, "adi_catalog", Value::Null);
    let structured = &out["result"]["structuredContent"];
    assert_eq!(structured["metrics"].as_array().map(Vec::len), Some(6));
    assert_eq!(structured["pillars"].as_array().map(Vec::len), Some(3));
    assert_eq!(structured["verdicts"][0]["examples"], json!(["SKIMS", "Casamigos"]));
}

#[test]
fn unknown_tool_and_method_are_reported() {
    let srv = server(InputPolicy::Clamp);
    let out = call_tool(&srv, 9, "adi_forecast", json!({}));
    assert_eq!(out["error"]["code"], json!(-32601));

    let resp = srv
        .handle_request(JsonRpcRequest::new(10, "brands/list", json!({})))
        .expect("response");
    assert_eq!(resp.error.map(|e| e.code), Some(-32601));
}

#[test]
fn wrong_jsonrpc_version_is_rejected() {
    let mut req = JsonRpcRequest::new(11, "ping", json!({}));
    req.jsonrpc = "1.0".to_string();
    let resp = server(InputPolicy::Clamp)
        .handle_request(req)
        .expect("response");
    assert_eq!(resp.error.map(|e| e.code), Some(-32600));
}

#[test]
fn initialize_advertises_configured_name() {
    let config = ServiceConfig {
        server_name: "brand-lab".to_string(),
        ..ServiceConfig::default()
    };
    let resp = AdiServer::with_config(config)
        .handle_request(JsonRpcRequest::new(
            12,
            "initialize",
            json!({"protocolVersion": "2025-03-26"}),
        ))
        .and_then(|r| r.result)
        .expect("initialize result");
    assert_eq!(resp["serverInfo"]["name"], json!("brand-lab"));
    assert_eq!(resp["protocolVersion"], json!("2025-03-26"));
}

#[test]
fn framework_resource_can_be_read() {
    let srv = server(InputPolicy::Clamp);
    let listed = srv
        .handle_request(JsonRpcRequest::new(13, "resources/list", json!({})))
        .and_then(|r| r.result)
        .expect("resources list");
    let uri = listed["resources"][0]["uri"]
        .as_str()
        .expect("resource uri")
        .to_string();

    let read = srv
        .handle_request(JsonRpcRequest::new(14, "resources/read", json!({"uri": uri})))
        .and_then(|r| r.result)
        .expect("resource contents");
    let text = read["contents"][0]["text"].as_str().unwrap_or_default();
    assert!(text.contains("Key-person") || text.contains("key-person"));

    let missing = srv
        .handle_request(JsonRpcRequest::new(
            15,
            "resources/read",
            json!({"uri": "adi://nowhere"}),
        ))
        .expect("response");
    assert_eq!(missing.error.map(|e| e.code), Some(-32602));
}
