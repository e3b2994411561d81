//! End-to-end synchronization scenarios against mock upstream registries.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mcphub_core::network::RetryConfig;
use mcphub_core::{register_registry, EntryKind, HubStore, RegistryClient, Synchronizer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn create_test_store() -> (HubStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = HubStore::open_at(&temp_dir.path().join("hub.db")).expect("Failed to open store");
    (store, temp_dir)
}

fn test_client() -> RegistryClient {
    RegistryClient::new().unwrap().with_retry(
        RetryConfig::new()
            .with_max_attempts(2)
            .with_base_delay(Duration::from_millis(5))
            .with_jitter(false),
    )
}

fn server_item(name: &str, status: Option<&str>) -> Value {
    let mut server = json!({
        "name": name,
        "description": format!("{} tools", name),
        "version": "1.0.0"
    });
    if let Some(status) = status {
        server["status"] = json!(status);
    }
    json!({ "server": server })
}

/// Serve canned pages keyed by cursor (`page-<n>`).
async fn spawn_paged_upstream(pages: Vec<Value>) -> String {
    async fn serve(
        State(pages): State<Arc<Vec<Value>>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        let idx = params
            .get("cursor")
            .and_then(|c| c.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        Json(pages[idx].clone())
    }

    let app = Router::new()
        .route("/", get(serve))
        .with_state(Arc::new(pages));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_failing_upstream() -> String {
    async fn serve() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    let app = Router::new().route("/", get(serve));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_two_page_sync_stores_exactly_the_active_set() {
    let (store, _temp) = create_test_store();

    // Page 1: 100 active entries and a continuation cursor. Page 2: 5
    // active plus 2 deprecated entries, end of listing.
    let page1_items: Vec<Value> = (0..100)
        .map(|i| server_item(&format!("io.example/server-{:03}", i), Some("active")))
        .collect();
    let mut page2_items: Vec<Value> = (100..105)
        .map(|i| server_item(&format!("io.example/server-{:03}", i), Some("active")))
        .collect();
    page2_items.push(server_item("io.example/old-1", Some("deprecated")));
    page2_items.push(server_item("io.example/old-2", Some("deprecated")));

    let url = spawn_paged_upstream(vec![
        json!({ "servers": page1_items, "metadata": { "count": 100, "nextCursor": "page-1" } }),
        json!({ "servers": page2_items, "metadata": { "count": 7, "nextCursor": "" } }),
    ])
    .await;

    let r1 = register_registry(&store, "r1", &url, "public").unwrap();
    let other = register_registry(&store, "other", "http://127.0.0.1:9/", "public").unwrap();

    let client = test_client();
    let outcome = Synchronizer::new(&store, &client).sync_registry(&r1).await;

    assert!(outcome.error.is_none());
    assert_eq!(outcome.fetched, 105);
    assert_eq!(outcome.stored, 105);
    assert_eq!(outcome.failed_entries, 0);

    let r1_entries = store.list_entries(EntryKind::Server, Some(&r1.id)).unwrap();
    assert_eq!(r1_entries.len(), 105);
    assert!(r1_entries.iter().all(|e| !e.name.contains("old")));
    assert!(store
        .list_entries(EntryKind::Server, Some(&other.id))
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_failing_registry_does_not_block_the_healthy_one() {
    let (store, _temp) = create_test_store();

    let broken_url = spawn_failing_upstream().await;
    let healthy_url = spawn_paged_upstream(vec![json!({
        "servers": [server_item("io.example/files", None), server_item("io.example/git", None)],
        "metadata": { "count": 2 }
    })])
    .await;

    // Registration order puts the broken registry first in the sync loop.
    register_registry(&store, "zz-healthy", &healthy_url, "public").unwrap();
    std::thread::sleep(Duration::from_millis(5));
    register_registry(&store, "aa-broken", &broken_url, "private").unwrap();

    let client = test_client();
    let summary = Synchronizer::new(&store, &client).sync_all().await.unwrap();

    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.failed_registries(), 1);
    assert_eq!(summary.total_stored(), 2);

    let broken = summary
        .outcomes
        .iter()
        .find(|o| o.registry == "aa-broken")
        .unwrap();
    assert!(broken.error.is_some());
    assert_eq!(broken.stored, 0);

    let healthy = store.get_registry("zz-healthy").unwrap().unwrap();
    assert_eq!(
        store
            .list_entries(EntryKind::Server, Some(&healthy.id))
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_upstream_duplicates_collapse_to_later_entry() {
    let (store, _temp) = create_test_store();

    let mut duplicate = server_item("io.example/files", Some("active"));
    duplicate["server"]["description"] = json!("second edition");

    let url = spawn_paged_upstream(vec![json!({
        "servers": [server_item("io.example/files", Some("active")), duplicate],
        "metadata": { "count": 2 }
    })])
    .await;

    let registry = register_registry(&store, "upstream", &url, "public").unwrap();
    let client = test_client();
    Synchronizer::new(&store, &client)
        .sync_registry(&registry)
        .await;

    let entries = store
        .list_entries(EntryKind::Server, Some(&registry.id))
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].description, "second edition");
}
