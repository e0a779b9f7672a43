use crate::e2e::helpers;

use helpers::assertions::{assert_error_kind, assert_ranked_poi};
use helpers::TestContext;
use hyper::StatusCode;
use poi_narrator::domain::poi::AssetKind;
use test_context::test_context;

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .expect("Expected an array of POIs")
        .iter()
        .map(|p| p.get("id").and_then(|v| v.as_i64()).unwrap())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_rank_nearby_pois_by_relevance_then_distance(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/v1/poi/nearby?x=0&y=0&interests=architecture")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    for poi in body.as_array().unwrap() {
        assert_ranked_poi(poi);
    }

    // 1 and 3 both match architecture, 1 is closer; 2 and 4 score zero
    assert_eq!(ids(body), vec![1, 3, 2, 4]);
    assert_eq!(body[2].get("distance").and_then(|v| v.as_f64()), Some(5.0));
    assert_eq!(body[3].get("relevance").and_then(|v| v.as_f64()), Some(0.0));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_nearby_pois(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/v1/poi/nearby?x=0&y=0&interests=nature,music&radius=10&min_relevance=0.3")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    // Both score 0.5; 3 is closer. 1 scores zero, 4 is outside the radius
    assert_eq!(ids(response.body.as_ref().unwrap()), vec![3, 2]);

    let response = ctx
        .client
        .get("/api/v1/poi/nearby?x=0&y=0&limit=1")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ids(response.body.as_ref().unwrap()).len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_interest(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/v1/poi/nearby?x=0&y=0&interests=shopping")
        .await
        .unwrap();

    assert_error_kind(&response, StatusCode::BAD_REQUEST, "invalid_argument");
    response.assert_error_message("shopping");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_nearby_without_position(ctx: &TestContext) {
    let response = ctx.client.get("/api/v1/poi/nearby?interests=nature").await.unwrap();

    assert_error_kind(&response, StatusCode::BAD_REQUEST, "invalid_argument");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_poi_details(ctx: &TestContext) {
    ctx.fixtures.seed_asset(2, AssetKind::Fact(1), b"RIFF");

    let response = ctx.client.get("/api/v1/poi/2").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("name").and_then(|v| v.as_str()), Some("Озеро Шарташ"));
    assert_eq!(
        body.get("categories").unwrap(),
        &serde_json::json!(["forest_hiking", "nature"])
    );
    assert_eq!(body.get("facts").unwrap().as_array().unwrap().len(), 2);
    assert_eq!(
        body.get("audio_assets").unwrap(),
        &serde_json::json!(["fact_1"])
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_poi(ctx: &TestContext) {
    let response = ctx.client.get("/api/v1/poi/999").await.unwrap();

    assert_error_kind(&response, StatusCode::NOT_FOUND, "not_found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_numeric_poi_id(ctx: &TestContext) {
    let response = ctx.client.get("/api/v1/poi/abc").await.unwrap();

    assert_error_kind(&response, StatusCode::BAD_REQUEST, "invalid_argument");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_compute_distance_to_poi(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/v1/poi/2/distance?x=0&y=0")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("poi_id").and_then(|v| v.as_i64()), Some(2));
    assert_eq!(body.get("distance").and_then(|v| v.as_f64()), Some(5.0));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_compute_relevance_to_poi(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/v1/poi/1/relevance?interests=architecture,history")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let relevance = response
        .body
        .as_ref()
        .and_then(|b| b.get("relevance"))
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!((relevance - 1.0).abs() < 1e-9);

    let response = ctx
        .client
        .get("/api/v1/poi/1/relevance?interests=gastronomy")
        .await
        .unwrap();
    assert_eq!(
        response.body.as_ref().and_then(|b| b.get("relevance")).and_then(|v| v.as_f64()),
        Some(0.0)
    );

    // No interests at all scores zero rather than failing
    let response = ctx.client.get("/api/v1/poi/1/relevance").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().and_then(|b| b.get("relevance")).and_then(|v| v.as_f64()),
        Some(0.0)
    );
}
