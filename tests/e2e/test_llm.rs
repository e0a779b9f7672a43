use crate::e2e::helpers;

use helpers::assertions::assert_error_kind;
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_narrative_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/v1/llm/generate",
            &json!({
                "poi_name": "Плотинка",
                "poi_description": "Плотина городского пруда",
                "poi_facts": ["Построена в 1723 году"]
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let text = response
        .body
        .as_ref()
        .and_then(|b| b.get("poi_generated_text"))
        .and_then(|v| v.as_str())
        .unwrap();

    // Blank-line paragraph breaks are collapsed
    assert!(!text.contains("\n\n"));
    assert_eq!(text.lines().count(), 3);

    let requests = ctx.text_generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].name, "Плотинка");
    assert_eq!(requests[0].facts, vec!["Построена в 1723 году"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_default_missing_facts_to_empty(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/v1/llm/generate",
            &json!({ "poi_name": "Плотинка", "poi_description": "" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert!(ctx.text_generator.requests()[0].facts.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_request_without_name_or_description(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/v1/llm/generate",
            &json!({ "poi_name": "", "poi_description": "  " }),
        )
        .await
        .unwrap();

    assert_error_kind(&response, StatusCode::BAD_REQUEST, "invalid_argument");
    assert_eq!(ctx.text_generator.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/v1/llm/generate", "application/json", "{not json")
        .await
        .unwrap();

    assert_error_kind(&response, StatusCode::BAD_REQUEST, "invalid_argument");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_provider_failure_as_bad_gateway(ctx: &TestContext) {
    ctx.text_generator.fail_with("401 Unauthorized");

    let response = ctx
        .client
        .post(
            "/api/v1/llm/generate",
            &json!({ "poi_name": "Плотинка", "poi_description": "Плотина" }),
        )
        .await
        .unwrap();

    assert_error_kind(&response, StatusCode::BAD_GATEWAY, "text_generation_failed");
    response.assert_error_message("401 Unauthorized");
}
