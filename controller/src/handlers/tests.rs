//! Router-level tests, driven in-process through `tower::ServiceExt`

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState, Controller};

const BOUNDARY: &str = "amanq-test-boundary";

fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let vault_dir: PathBuf = dir.path().join("vault");
    let config = Config {
        port: 0,
        vault_dir: vault_dir.clone(),
        max_upload_bytes: 1024 * 1024,
        environment: "test".to_string(),
    };
    let state = AppState {
        controller: Arc::new(Controller::new(vault_dir).unwrap()),
        config,
    };
    (dir, create_router(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder().method(Method::POST).uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload(filename: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/upload_backup")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["nodes"], 0);
    assert_eq!(body["vault_reachable"], true);

    send(&app, post_json("/metrics", json!({ "server": "server1", "cpu": 5.0, "ram": 6.0, "status": "UP" }))).await;
    let (_, body) = send(&app, get("/health")).await;
    assert_eq!(body["nodes"], 1);
}

#[tokio::test]
async fn test_missing_vault_dir() {
    let (dir, app) = test_app();
    std::fs::remove_dir_all(dir.path().join("vault")).unwrap();

    let (status, body) = send(&app, get("/vault_files")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "files": [] }));

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["vault_reachable"], false);
}

#[tokio::test]
async fn test_command_is_consumed_once() {
    let (_dir, app) = test_app();

    let (_, body) = send(&app, get("/get_command")).await;
    assert_eq!(body, json!({ "cmd": "IDLE" }));

    let (status, _) = send(&app, post_empty("/trigger_attack")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/get_command")).await;
    assert_eq!(body, json!({ "cmd": "ATTACK" }));

    let (_, body) = send(&app, get("/get_command")).await;
    assert_eq!(body, json!({ "cmd": "IDLE" }));
}

#[tokio::test]
async fn test_metrics_last_write_wins() {
    let (_dir, app) = test_app();

    let first = json!({ "server": "server1", "cpu": 12.5, "ram": 40.0, "status": "UP" });
    let second = json!({ "server": "server1", "cpu": 100.0, "ram": 41.0, "status": "CRITICAL" });

    let (status, body) = send(&app, post_json("/metrics", first)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "received");
    send(&app, post_json("/metrics", second)).await;

    let (_, state) = send(&app, get("/state")).await;
    let node = &state["servers"]["server1"];
    assert_eq!(node["server"], "server1");
    assert_eq!(node["cpu"], 100.0);
    assert_eq!(node["status"], "CRITICAL");
    assert!(node["received_at"].is_string());
    assert_eq!(state["servers"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_metrics_out_of_range_rejected() {
    let (_dir, app) = test_app();
    let report = json!({ "server": "server1", "cpu": 180.0, "ram": 40.0, "status": "UP" });

    let (status, _) = send(&app, post_json("/metrics", report)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, state) = send(&app, get("/state")).await;
    assert!(state["servers"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_log_event_newest_first() {
    let (_dir, app) = test_app();

    send(&app, post_json("/log_event", json!({ "msg": "first" }))).await;
    let (status, body) =
        send(&app, post_json("/log_event", json!({ "msg": "movie.mp4", "type": "dropped" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "logged");

    let (_, state) = send(&app, get("/state")).await;
    let logs = state["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["msg"], "movie.mp4");
    assert_eq!(logs[0]["type"], "dropped");
    assert_eq!(logs[1]["msg"], "first");
    assert_eq!(logs[1]["type"], "info");
    assert_eq!(logs[0]["time"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_upload_list_inspect() {
    let (_dir, app) = test_app();
    let blob: Vec<u8> = (0..700u32).map(|i| (i % 256) as u8).collect();

    let (status, body) = send(&app, upload("master_key.pem.enc", &blob)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "saved");

    let (_, files) = send(&app, get("/vault_files")).await;
    assert_eq!(files, json!({ "files": ["master_key.pem.enc"] }));

    let (status, info) = send(&app, get("/inspect_file/master_key.pem.enc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["name"], "master_key.pem.enc");
    assert_eq!(info["size"], 700);
    assert_eq!(info["hex"], hex::encode(&blob[..500]));

    let (_, state) = send(&app, get("/state")).await;
    assert_eq!(state["logs"][0]["msg"], "master_key.pem.enc [CLOUD SYNC]");
    assert_eq!(state["logs"][0]["type"], "success");
}

#[tokio::test]
async fn test_upload_rejects_traversal() {
    let (_dir, app) = test_app();
    let (status, _) = send(&app, upload("../escape.enc", b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, files) = send(&app, get("/vault_files")).await;
    assert_eq!(files, json!({ "files": [] }));
}

#[tokio::test]
async fn test_inspect_missing() {
    let (_dir, app) = test_app();
    let (status, body) = send(&app, get("/inspect_file/ghost.enc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn test_reset_clears_everything_but_nodes() {
    let (_dir, app) = test_app();

    send(&app, post_json("/metrics", json!({ "server": "edge-7", "cpu": 5.0, "ram": 9.0, "status": "UP" }))).await;
    send(&app, upload("id_rsa.enc", b"ciphertext")).await;
    send(&app, post_json("/log_event", json!({ "msg": "hello" }))).await;
    send(&app, post_empty("/trigger_attack")).await;

    let (status, body) = send(&app, post_empty("/reset_system")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cleared");

    let (_, files) = send(&app, get("/vault_files")).await;
    assert_eq!(files, json!({ "files": [] }));

    let (_, state) = send(&app, get("/state")).await;
    assert!(state["logs"].as_array().unwrap().is_empty());
    assert!(state["servers"].get("edge-7").is_some());

    let (_, cmd) = send(&app, get("/get_command")).await;
    assert_eq!(cmd, json!({ "cmd": "IDLE" }));
}
