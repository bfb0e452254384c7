use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use ngb_mock_server::{app, app_with, seed_references, Reference};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- references ---

#[tokio::test]
async fn load_all_returns_seeded_references() {
    let resp = app()
        .oneshot(get("/catgenome/restapi/reference/loadAll"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    let refs: Vec<Reference> = serde_json::from_value(body["payload"].clone()).unwrap();
    assert_eq!(refs, seed_references());
}

#[tokio::test]
async fn load_all_with_no_references_has_empty_payload() {
    let resp = app_with(Vec::new())
        .oneshot(get("/catgenome/restapi/reference/loadAll"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["payload"], serde_json::json!([]));
}

#[tokio::test]
async fn load_reference_by_id() {
    let resp = app()
        .oneshot(get("/catgenome/restapi/reference/2/load"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["payload"]["name"], "hg38");
}

#[tokio::test]
async fn load_unknown_reference_is_error_envelope() {
    let resp = app()
        .oneshot(get("/catgenome/restapi/reference/99/load"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["message"], "Reference genome with id 99 not found");
}

#[tokio::test]
async fn load_reference_bad_id_returns_400() {
    let resp = app()
        .oneshot(get("/catgenome/restapi/reference/abc/load"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- echo ---

#[tokio::test]
async fn echo_reports_verb_and_body() {
    let resp = app()
        .oneshot(json_request("PUT", "/catgenome/restapi/echo", r#"{"name":"hg38"}"#))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["payload"]["method"], "PUT");
    assert_eq!(body["payload"]["body"]["name"], "hg38");
}

#[tokio::test]
async fn echo_without_body_reports_null() {
    let resp = app().oneshot(get("/catgenome/restapi/echo")).await.unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["payload"]["method"], "GET");
    assert!(body["payload"]["body"].is_null());
}

#[tokio::test]
async fn verb_named_route_accepts_any_verb() {
    let resp = app()
        .oneshot(json_request("DELETE", "/catgenome/restapi/delete", ""))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["payload"]["method"], "DELETE");
}

// --- misbehaving endpoints ---

#[tokio::test]
async fn malformed_is_not_json() {
    let resp = app()
        .oneshot(get("/catgenome/restapi/malformed"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn unstatused_has_no_status_field() {
    let resp = app()
        .oneshot(get("/catgenome/restapi/unstatused"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn routes_outside_prefix_are_404() {
    let resp = app().oneshot(get("/reference/loadAll")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
