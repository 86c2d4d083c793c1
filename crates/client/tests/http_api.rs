//! Integration tests for [`HttpEpisodeApi`] against a local axum server.
//!
//! Each test binds a fixture router on `127.0.0.1:0` so requests go
//! over real HTTP, including query strings and status handling.

use std::collections::HashMap;
use std::net::SocketAddr;

use assert_matches::assert_matches;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Url;
use serde_json::{json, Value};

use rickdex_client::{ApiError, EpisodeApi, HttpEpisodeApi};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn episode_json(id: i64, code: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Episode {id}"),
        "air_date": "December 2, 2013",
        "episode": code,
        "image": "https://example.test/episode.jpg",
        "url": format!("https://example.test/api/episode/{id}"),
        "created": "2017-11-10T12:56:33.798Z"
    })
}

async fn list_episodes(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let take: u32 = params.get("take").and_then(|p| p.parse().ok()).unwrap_or(0);
    Json(json!({
        "data": [episode_json(i64::from(page) * 100, "S02E01")],
        "meta": {
            "page": page,
            "take": take,
            "itemCount": 51,
            "pageCount": 6,
            "hasPreviousPage": page > 1,
            "hasNextPage": page < 6
        }
    }))
}

async fn episode_detail(Path(id): Path<String>) -> Result<Json<Value>, (StatusCode, String)> {
    match id.as_str() {
        "1" => Ok(Json(json!({
            "episode": episode_json(1, "S01E01"),
            "characters": [{
                "id": 1,
                "name": "Rick Sanchez",
                "status": "Alive",
                "species": "Human",
                "type": "",
                "gender": "Male",
                "origin": { "name": "Earth (C-137)", "url": "" },
                "location": { "name": "Citadel of Ricks", "url": "" },
                "image": "https://example.test/character/1.jpeg",
                "url": "https://example.test/character/1",
                "created": "2017-11-04T18:48:46.250Z"
            }],
            "locations": [{
                "id": 1,
                "name": "Earth (C-137)",
                "type": "Planet",
                "dimension": "Dimension C-137",
                "url": "https://example.test/location/1",
                "created": "2017-11-10T12:42:04.162Z"
            }]
        }))),
        "garbled" => Ok(Json(json!({ "episode": "not an object" }))),
        "boom" => Err((StatusCode::INTERNAL_SERVER_ERROR, "database offline".into())),
        _ => Err((StatusCode::NOT_FOUND, "Episode not found".into())),
    }
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/integrations/episodes", get(list_episodes))
        .route("/api/integrations/episode/{id}", get(episode_detail));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

async fn client() -> HttpEpisodeApi {
    let addr = spawn_server().await;
    let base = Url::parse(&format!("http://{addr}/api")).expect("base url");
    HttpEpisodeApi::new(base)
}

// ---------------------------------------------------------------------------
// Test: page requests carry page and take as query parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_episodes_sends_page_and_take() {
    let api = client().await;

    let page = api.list_episodes(3, 10).await.expect("page 3");

    assert_eq!(page.meta.page, 3);
    assert_eq!(page.meta.take, 10);
    assert_eq!(page.meta.page_count, 6);
    assert!(page.meta.has_previous_page);
    assert!(page.meta.has_next_page);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, 300);
}

// ---------------------------------------------------------------------------
// Test: detail bundle decodes episode, characters and locations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn episode_detail_decodes_full_bundle() {
    let api = client().await;

    let bundle = api.episode_detail("1").await.expect("episode 1");

    assert_eq!(bundle.episode.episode, "S01E01");
    assert_eq!(bundle.characters.len(), 1);
    assert_eq!(bundle.characters[0].location.name, "Citadel of Ricks");
    assert_eq!(bundle.locations.len(), 1);
    assert_eq!(bundle.locations[0].kind, "Planet");
}

// ---------------------------------------------------------------------------
// Test: status and decode failures map to distinct variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_episode_is_not_found() {
    let api = client().await;

    let err = api.episode_detail("999").await.expect_err("missing episode");

    assert!(err.is_not_found());
    assert_matches!(err, ApiError::Status { status: 404, ref body } if body == "Episode not found");
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let api = client().await;

    let err = api.episode_detail("boom").await.expect_err("server error");

    assert!(!err.is_not_found());
    assert_matches!(err, ApiError::Status { status: 500, .. });
    assert!(err.to_string().contains("database offline"));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let api = client().await;

    let err = api.episode_detail("garbled").await.expect_err("bad body");

    assert_matches!(err, ApiError::Decode(_));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpEpisodeApi::new(Url::parse(&format!("http://{addr}/api")).expect("url"));
    let err = api.list_episodes(1, 10).await.expect_err("connection refused");

    assert_matches!(err, ApiError::Transport(_));
}
