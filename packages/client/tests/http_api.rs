//! HttpDocumentApi against a local axum server

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use potatopay_client::{AuthSession, HttpDocumentApi};
use potatopay_editor::{ApiError, AutosaveConfig, AutosaveController, BlockCollection, BlockMutation, DocumentApi};
use potatopay_schema::{Block, BlockPart, BlockType, Surface};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct ServerState {
    documents: Arc<Mutex<HashMap<String, Value>>>,
    puts: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

async fn get_surface(
    State(state): State<ServerState>,
    Path(surface): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid token" })),
        );
    }
    if surface == "link-tree" {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("boom")));
    }

    let documents = state.documents.lock().unwrap();
    match documents.get(&surface) {
        Some(blocks) => (StatusCode::OK, Json(json!({ "success": true, "data": { "blocks": blocks } }))),
        None => (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "Surface not configured" })),
        ),
    }
}

async fn put_surface(
    State(state): State<ServerState>,
    Path(surface): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid token" })),
        );
    }

    state.puts.lock().unwrap().push(body.clone());
    state
        .documents
        .lock()
        .unwrap()
        .insert(surface, body["blocks"].clone());
    (StatusCode::OK, Json(json!({ "success": true, "data": null })))
}

async fn spawn_server(state: ServerState) -> String {
    let app = Router::new()
        .route("/v1/:surface", get(get_surface).put(put_surface))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1", addr)
}

fn seeded_state() -> ServerState {
    let state = ServerState::default();
    let blocks = serde_json::to_value(vec![Block::new_default(BlockType::Tip)]).unwrap();
    state.documents.lock().unwrap().insert("overlay".to_string(), blocks);
    state
}

#[tokio::test]
async fn test_fetch_overlay() {
    let base = spawn_server(seeded_state()).await;
    let api = HttpDocumentApi::new(base, AuthSession::new(TOKEN)).unwrap();

    let blocks = api.fetch(Surface::Overlay).await.unwrap();

    assert_eq!(blocks.types(), vec![BlockType::Tip]);
}

#[tokio::test]
async fn test_store_sends_blocks_payload() {
    let state = seeded_state();
    let base = spawn_server(state.clone()).await;
    let api = HttpDocumentApi::new(base, AuthSession::new(TOKEN)).unwrap();

    let blocks = BlockCollection::new(vec![Block::new_default(BlockType::Socials)]);
    api.store(Surface::LinkTree, &blocks).await.unwrap();

    let puts = state.puts.lock().unwrap().clone();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0]["blocks"][0]["type"], "socials");
    assert!(state.documents.lock().unwrap().contains_key("link-tree"));
}

#[tokio::test]
async fn test_bad_token_is_rejected_with_server_message() {
    let base = spawn_server(seeded_state()).await;
    let api = HttpDocumentApi::new(base, AuthSession::new("wrong")).unwrap();

    let error = api.fetch(Surface::Overlay).await.unwrap_err();

    assert_eq!(
        error,
        ApiError::Rejected {
            message: Some("Invalid token".to_string())
        }
    );
    assert_eq!(error.user_message(), "Invalid token");
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_a_failure() {
    let base = spawn_server(ServerState::default()).await;
    let api = HttpDocumentApi::new(base, AuthSession::new(TOKEN)).unwrap();

    let error = api.fetch(Surface::TipPage).await.unwrap_err();
    assert_eq!(error.user_message(), "Surface not configured");
}

#[tokio::test]
async fn test_error_status_without_envelope() {
    let base = spawn_server(seeded_state()).await;
    let api = HttpDocumentApi::new(base, AuthSession::new(TOKEN)).unwrap();

    let error = api.fetch(Surface::LinkTree).await.unwrap_err();
    assert_eq!(error, ApiError::Rejected { message: None });
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let api = HttpDocumentApi::new("http://127.0.0.1:9", AuthSession::new(TOKEN)).unwrap();

    let error = api.fetch(Surface::Overlay).await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_controller_saves_through_http() {
    let state = seeded_state();
    let base = spawn_server(state.clone()).await;
    let api = HttpDocumentApi::new(base, AuthSession::new(TOKEN)).unwrap();

    let controller = AutosaveController::load(api, Surface::Overlay, AutosaveConfig::default())
        .await
        .unwrap();
    controller.set_autosave(false);
    controller
        .apply(&BlockMutation::SetData {
            block_type: BlockType::Tip,
            part: BlockPart::Root,
            key: "primary_color".to_string(),
            value: json!("#FF0000"),
        })
        .unwrap();
    controller.save_now().await.unwrap();

    let stored = state.documents.lock().unwrap()["overlay"].clone();
    assert_eq!(stored[0]["data"]["primary_color"], "#FF0000");
    assert!(!controller.is_dirty());
}
