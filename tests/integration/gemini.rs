//! Content generation proxy tests
//!
//! - POST /api/gemini

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, GatewayTestHarness};
use crate::mocks::GeminiTestData;

#[tokio::test]
async fn test_missing_prompt_is_rejected_without_upstream_call() {
    let harness = GatewayTestHarness::new().await;

    let response = harness.server.post("/api/gemini").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Prompt is required" })
    );
    assert!(harness.gemini.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_empty_prompt_is_rejected() {
    let harness = GatewayTestHarness::new().await;

    let response = harness
        .server
        .post("/api/gemini")
        .json(&json!({ "prompt": "", "functionCalling": true }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(harness.gemini.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_treated_as_missing_prompt() {
    let harness = GatewayTestHarness::new().await;

    let response = harness.server.post("/api/gemini").text("hello").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Prompt is required");
    assert!(harness.gemini.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_plain_generation() {
    let harness = GatewayTestHarness::new().await;
    harness
        .gemini
        .mock_generate_success(
            constants::TEST_GEMINI_MODEL,
            constants::TEST_GEMINI_API_KEY,
            GeminiTestData::text_response(),
        )
        .await;

    let response = harness
        .server
        .post("/api/gemini")
        .json(&json!({ "prompt": "How do I get to the ferry building?" }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), GeminiTestData::text_response());

    let bodies = harness.gemini.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({
            "contents": [{ "parts": [{ "text": "How do I get to the ferry building?" }] }]
        })
    );
}

#[tokio::test]
async fn test_function_calling_false_sends_plain_body() {
    let harness = GatewayTestHarness::new().await;
    harness
        .gemini
        .mock_generate_success(
            constants::TEST_GEMINI_MODEL,
            constants::TEST_GEMINI_API_KEY,
            GeminiTestData::text_response(),
        )
        .await;

    harness
        .server
        .post("/api/gemini")
        .json(&json!({ "prompt": "Hi", "functionCalling": false }))
        .await
        .assert_status(StatusCode::OK);

    let bodies = harness.gemini.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].get("tools").is_none());
    assert!(bodies[0].get("generationConfig").is_none());
}

#[tokio::test]
async fn test_structured_extraction() {
    let harness = GatewayTestHarness::new().await;
    harness
        .gemini
        .mock_generate_success(
            constants::TEST_GEMINI_MODEL,
            constants::TEST_GEMINI_API_KEY,
            GeminiTestData::function_call_response(),
        )
        .await;

    let response = harness
        .server
        .post("/api/gemini")
        .json(&json!({
            "prompt": "Cycle from Paris to Lyon avoiding highways",
            "functionCalling": true
        }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        GeminiTestData::function_call_response()
    );

    let bodies = harness.gemini.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Extract routing information from this text: \"Cycle from Paris to Lyon avoiding highways\""
    );
    assert_eq!(body["generationConfig"]["temperature"], json!(0.1));

    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    let declarations = tools[0]["functionDeclarations"].as_array().unwrap();
    assert_eq!(declarations.len(), 1);
    let params = &declarations[0]["parameters"];
    assert_eq!(params["required"], json!(["locations"]));
    assert_eq!(
        params["properties"]["preferences"]["properties"]["transportMode"]["enum"],
        json!(["driving", "walking", "cycling", "transit"])
    );
}

#[tokio::test]
async fn test_upstream_failure_becomes_500() {
    let harness = GatewayTestHarness::new().await;
    harness
        .gemini
        .mock_generate_status(constants::TEST_GEMINI_MODEL, 503)
        .await;

    let response = harness
        .server
        .post("/api/gemini")
        .json(&json!({ "prompt": "Hello" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Gemini API error: 503 Service Unavailable" })
    );
    assert_eq!(harness.gemini.received_requests().await.len(), 1);
}

#[tokio::test]
async fn test_upstream_404_becomes_500() {
    let harness = GatewayTestHarness::new().await;
    harness
        .gemini
        .mock_generate_status(constants::TEST_GEMINI_MODEL, 404)
        .await;

    let response = harness
        .server
        .post("/api/gemini")
        .json(&json!({ "prompt": "Hello", "functionCalling": true }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_null_function_calling_sends_plain_body() {
    let harness = GatewayTestHarness::new().await;
    harness
        .gemini
        .mock_generate_success(
            constants::TEST_GEMINI_MODEL,
            constants::TEST_GEMINI_API_KEY,
            GeminiTestData::text_response(),
        )
        .await;

    let response = harness
        .server
        .post("/api/gemini")
        .json(&json!({ "prompt": "Hi", "functionCalling": null }))
        .await;

    response.assert_status(StatusCode::OK);
    let bodies = harness.gemini.received_bodies().await;
    assert_eq!(
        bodies,
        vec![json!({ "contents": [{ "parts": [{ "text": "Hi" }] }] })]
    );
}

#[tokio::test]
async fn test_truthy_non_bool_function_calling_extracts() {
    for flag in [json!("yes"), json!(1)] {
        let harness = GatewayTestHarness::new().await;
        harness
            .gemini
            .mock_generate_success(
                constants::TEST_GEMINI_MODEL,
                constants::TEST_GEMINI_API_KEY,
                GeminiTestData::function_call_response(),
            )
            .await;

        let response = harness
            .server
            .post("/api/gemini")
            .json(&json!({ "prompt": "Hi", "functionCalling": flag }))
            .await;

        response.assert_status(StatusCode::OK);
        let bodies = harness.gemini.received_bodies().await;
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["generationConfig"]["temperature"], json!(0.1));
        assert_eq!(bodies[0]["tools"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_numeric_prompt_is_forwarded() {
    let harness = GatewayTestHarness::new().await;
    harness
        .gemini
        .mock_generate_success(
            constants::TEST_GEMINI_MODEL,
            constants::TEST_GEMINI_API_KEY,
            GeminiTestData::text_response(),
        )
        .await;

    let response = harness
        .server
        .post("/api/gemini")
        .json(&json!({ "prompt": 123 }))
        .await;

    response.assert_status(StatusCode::OK);
    let bodies = harness.gemini.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["contents"][0]["parts"][0]["text"], "123");
}
