use super::api_client::ApiResponse;
use hyper::StatusCode;
use serde_json::Value;

/// Assert the `{kind, message}` error body and its status
pub fn assert_error_kind(response: &ApiResponse, status: StatusCode, expected_kind: &str) {
    response.assert_status(status);
    let body = response.body.as_ref().expect("Missing error body");
    assert_eq!(
        body.get("kind").and_then(|v| v.as_str()),
        Some(expected_kind),
        "Error kind mismatch, body: {}",
        body
    );
    assert!(
        body.get("message").and_then(|v| v.as_str()).is_some(),
        "Missing error message"
    );
}

pub fn assert_ranked_poi(poi: &Value) {
    assert!(poi.get("id").and_then(|v| v.as_i64()).is_some());
    assert!(poi.get("name").and_then(|v| v.as_str()).is_some());
    assert!(poi.get("x").and_then(|v| v.as_f64()).is_some());
    assert!(poi.get("y").and_then(|v| v.as_f64()).is_some());
    assert!(poi.get("categories").and_then(|v| v.as_array()).is_some());
    assert!(poi.get("distance").and_then(|v| v.as_f64()).is_some());
    assert!(poi.get("relevance").and_then(|v| v.as_f64()).is_some());
}

/// File names (not full paths) listed in an audio response
pub fn file_names(body: &Value) -> Vec<String> {
    body.get("files")
        .and_then(|v| v.as_array())
        .expect("Missing files array")
        .iter()
        .map(|f| {
            let path = f.as_str().expect("File path is not a string");
            std::path::Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        })
        .collect()
}
