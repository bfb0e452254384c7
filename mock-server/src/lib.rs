//! In-process stand-in for the catgenome REST API.
//!
//! Serves the `{status, message, payload}` envelope under
//! `/catgenome/restapi`, plus a few endpoints that misbehave on purpose so
//! clients can be tested against malformed answers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Prefix every route lives under, matching a default catgenome deployment.
pub const API_PREFIX: &str = "/catgenome/restapi";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub id: u64,
    pub name: String,
    pub bio_data_item_id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    pub source: String,
    pub format: String,
    pub created_date: String,
    pub size: u64,
}

impl Reference {
    fn fasta(id: u64, name: &str, created_date: &str, size: u64) -> Self {
        let path = format!("/refs/{name}.fa");
        Self {
            id,
            name: name.to_string(),
            bio_data_item_id: id + 10,
            kind: "REFERENCE".to_string(),
            source: path.clone(),
            path,
            format: "FASTA".to_string(),
            created_date: created_date.to_string(),
            size,
        }
    }
}

/// The references a fresh server starts with.
pub fn seed_references() -> Vec<Reference> {
    vec![
        Reference::fasta(1, "hg19", "2024-01-02", 3_137_161_264),
        Reference::fasta(2, "hg38", "2024-03-04", 3_209_286_105),
    ]
}

pub type Db = Arc<Vec<Reference>>;

pub fn app() -> Router {
    app_with(seed_references())
}

pub fn app_with(references: Vec<Reference>) -> Router {
    let db: Db = Arc::new(references);
    let api = Router::new()
        .route("/reference/loadAll", get(load_all))
        .route("/reference/{id}/load", get(load_reference))
        .route("/echo", any(echo))
        .route("/get", any(echo))
        .route("/post", any(echo))
        .route("/put", any(echo))
        .route("/delete", any(echo))
        .route("/malformed", get(malformed))
        .route("/unstatused", get(unstatused))
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, seed_references()).await
}

pub async fn run_with(listener: TcpListener, references: Vec<Reference>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(references)).await
}

fn ok(payload: Value) -> Json<Value> {
    Json(json!({ "status": "OK", "payload": payload }))
}

fn error(message: String) -> Json<Value> {
    Json(json!({ "status": "ERROR", "message": message }))
}

async fn load_all(State(db): State<Db>) -> Json<Value> {
    ok(json!(db.as_slice()))
}

// catgenome reports lookup failures in the envelope, with HTTP 200.
async fn load_reference(State(db): State<Db>, Path(id): Path<u64>) -> Json<Value> {
    match db.iter().find(|r| r.id == id) {
        Some(reference) => ok(json!(reference)),
        None => error(format!("Reference genome with id {id} not found")),
    }
}

/// Answers with the verb and body it received.
async fn echo(method: Method, body: Bytes) -> Json<Value> {
    let body: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    ok(json!({ "method": method.as_str(), "body": body }))
}

async fn malformed() -> impl IntoResponse {
    (StatusCode::OK, "<html>not an envelope</html>")
}

async fn unstatused() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "payload": null, "error": "Internal Server Error" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_serializes_with_api_field_names() {
        let json = serde_json::to_value(Reference::fasta(1, "hg19", "2024-01-02", 10)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["bioDataItemId"], 11);
        assert_eq!(json["type"], "REFERENCE");
        assert_eq!(json["path"], "/refs/hg19.fa");
        assert_eq!(json["source"], "/refs/hg19.fa");
        assert_eq!(json["createdDate"], "2024-01-02");
    }

    #[test]
    fn seed_has_distinct_ids() {
        let seed = seed_references();
        assert_eq!(seed.len(), 2);
        assert_ne!(seed[0].id, seed[1].id);
    }

    #[test]
    fn error_envelope_carries_message() {
        let Json(body) = error("nope".to_string());
        assert_eq!(body, json!({"status": "ERROR", "message": "nope"}));
    }
}
