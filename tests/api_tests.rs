use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use gamedex::config::Config;
use gamedex::db::Store;
use gamedex::models::NewGame;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = gamedex::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    gamedex::api::router(state)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

fn game_body(name: &str, platform: &str) -> serde_json::Value {
    serde_json::json!({
        "publisherId": "pub-1",
        "name": name,
        "platform": platform,
        "storeId": "store-1",
        "bundleId": "com.example.game",
        "appVersion": "1.0.0",
        "isPublished": true,
    })
}

#[tokio::test]
async fn test_list_games_starts_empty() {
    let app = spawn_app().await;

    let (status, body) = send_json(&app, "GET", "/api/games", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_games_crud() {
    let app = spawn_app().await;

    // Create
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/games",
        Some(game_body("Helix Jump", "android")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_i64().expect("created game has an id");
    assert_eq!(body["data"]["name"], "Helix Jump");
    assert_eq!(body["data"]["publisherId"], "pub-1");
    assert_eq!(body["data"]["platform"], "android");
    assert_eq!(body["data"]["storeId"], "store-1");
    assert_eq!(body["data"]["bundleId"], "com.example.game");
    assert_eq!(body["data"]["appVersion"], "1.0.0");
    assert_eq!(body["data"]["isPublished"], true);

    // Created game shows up in the list
    let (status, body) = send_json(&app, "GET", "/api/games", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Update replaces the full field set; omitted fields become null
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/games/{id}"),
        Some(serde_json::json!({
            "name": "Helix Jump 2",
            "platform": "ios",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Helix Jump 2");
    assert_eq!(body["data"]["platform"], "ios");
    assert_eq!(body["data"]["publisherId"], serde_json::Value::Null);
    assert_eq!(body["data"]["appVersion"], serde_json::Value::Null);
    assert_eq!(body["data"]["isPublished"], false);

    // Delete returns the id and actually removes the row
    let (status, body) = send_json(&app, "DELETE", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (status, body) = send_json(&app, "GET", "/api/games", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_update_missing_game_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/games/9999",
        Some(game_body("Ghost", "ios")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_delete_missing_game_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = send_json(&app, "DELETE", "/api/games/9999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_game_rejects_empty_name() {
    let app = spawn_app().await;

    let (status, body) = send_json(&app, "POST", "/api/games", Some(game_body("  ", "ios"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_store_create_then_get_returns_submitted_fields() {
    let store = Store::new("sqlite::memory:").await.unwrap();

    let fields = NewGame {
        publisher_id: Some("pub-1".to_string()),
        name: "Helix Jump".to_string(),
        platform: Some("android".to_string()),
        store_id: Some("store-1".to_string()),
        bundle_id: Some("com.example.game".to_string()),
        app_version: Some("1.0.0".to_string()),
        is_published: true,
    };
    let created = store.create_game(&fields).await.unwrap();
    assert!(created.id >= 1);

    let fetched = store
        .get_game(created.id)
        .await
        .unwrap()
        .expect("created game is readable by id");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Helix Jump");
    assert_eq!(fetched.publisher_id.as_deref(), Some("pub-1"));
    assert_eq!(fetched.platform.as_deref(), Some("android"));
    assert_eq!(fetched.store_id.as_deref(), Some("store-1"));
    assert_eq!(fetched.bundle_id.as_deref(), Some("com.example.game"));
    assert_eq!(fetched.app_version.as_deref(), Some("1.0.0"));
    assert!(fetched.is_published);
    assert!(fetched.created_at.is_some());

    // An id that was never assigned reads back as absent
    assert!(store.get_game(created.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_games() {
    let app = spawn_app().await;

    for (name, platform) in [
        ("Candy Crush Saga", "ios"),
        ("Candy Blast Mania", "android"),
        ("Solitaire", "ios"),
    ] {
        let (status, _) = send_json(&app, "POST", "/api/games", Some(game_body(name, platform))).await;
        assert_eq!(status, StatusCode::OK);
    }

    // Substring match on name
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/games/search",
        Some(serde_json::json!({ "name": "Candy" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Platform narrows by exact match
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/games/search",
        Some(serde_json::json!({ "name": "Candy", "platform": "ios" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Candy Crush Saga");

    // Empty platform applies no platform filter
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/games/search",
        Some(serde_json::json!({ "name": "Candy", "platform": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // No matches is an empty list, not an error
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/games/search",
        Some(serde_json::json!({ "name": "Tetris" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
}
