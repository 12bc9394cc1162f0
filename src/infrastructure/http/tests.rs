//! Router 集成测试

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

use super::{build_router, AppState, StateSettings};
use crate::application::AudioCachePort;
use crate::infrastructure::adapters::{FakeTtsClient, WsPlaybackSink};
use crate::infrastructure::events::{EventPublisher, WsEvent};
use crate::infrastructure::memory::{DebugLog, InMemoryAudioCache, InMemoryVoicePreference};

struct TestApp {
    router: Router,
    cache: Arc<InMemoryAudioCache>,
    publisher: Arc<EventPublisher>,
}

fn test_app_with(cache: InMemoryAudioCache) -> TestApp {
    let cache = cache.arc();
    let publisher = EventPublisher::new().arc();
    let settings = StateSettings::default();
    let state = AppState::new(
        cache.clone(),
        Arc::new(FakeTtsClient::instant()),
        Arc::new(WsPlaybackSink::new(publisher.clone(), settings.sample_rate)),
        Arc::new(InMemoryVoicePreference::new()),
        publisher.clone(),
        DebugLog::default().arc(),
        settings,
    );

    TestApp {
        router: build_router(Arc::new(state), None),
        cache,
        publisher,
    }
}

fn test_app() -> TestApp {
    test_app_with(InMemoryAudioCache::new())
}

async fn get_json(router: &Router, uri: &str) -> Value {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn post_json(router: &Router, uri: &str, payload: Value) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_ping() {
    let app = test_app();
    let body = get_json(&app.router, "/api/ping").await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_speak_miss_then_hit() {
    let app = test_app();
    let mut events = app.publisher.subscribe();

    let first = post_json(
        &app.router,
        "/api/speak",
        json!({"text": "Could you repeat that?", "voice": "Charon"}),
    )
    .await;
    assert_eq!(first["errno"], 0);
    assert_eq!(first["data"]["source"], "generated");
    assert_eq!(first["data"]["normalized_text"], "could you repeat that");
    assert_eq!(first["data"]["played"], true);

    match events.recv().await.unwrap() {
        WsEvent::PlaybackStarted { text, voice, .. } => {
            assert_eq!(text, "Could you repeat that?");
            assert_eq!(voice, "Charon");
        }
        other => panic!("unexpected event: {:?}", other),
    }

    let second = post_json(
        &app.router,
        "/api/speak",
        json!({"text": "could you REPEAT that"}),
    )
    .await;
    assert_eq!(second["data"]["source"], "cache");
    assert_eq!(second["data"]["voice"], "Charon");
    assert_eq!(second["data"]["audio"], first["data"]["audio"]);

    let history = get_json(&app.router, "/api/history").await;
    let items = history["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "could you REPEAT that");
}

#[tokio::test]
async fn test_speak_validation() {
    let app = test_app();

    let body = post_json(&app.router, "/api/speak", json!({"text": "Hi", "voice": "Nobody"})).await;
    assert_eq!(body["errno"], 400);

    let body = post_json(&app.router, "/api/speak", json!({"text": "  "})).await;
    assert_eq!(body["errno"], 400);
    assert_eq!(app.cache.len().await, 0);
}

#[tokio::test]
async fn test_generate_speech_requires_text_and_voice() {
    let app = test_app();

    let body = post_json(&app.router, "/api/generate-speech", json!({"text": "Hi"})).await;
    assert_eq!(body["errno"], 400);
    assert_eq!(body["error"], "Text and voice are required");

    let body = post_json(
        &app.router,
        "/api/generate-speech",
        json!({"text": "Hi", "voice": "Puck"}),
    )
    .await;
    assert_eq!(body["errno"], 0);
    assert!(!body["data"]["audio"].as_str().unwrap().is_empty());
    assert_eq!(app.cache.len().await, 0);
}

#[tokio::test]
async fn test_audio_download_as_wav() {
    let app = test_app();
    post_json(&app.router, "/api/speak", json!({"text": "Thank you."})).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/audio")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"text": "THANK YOU"}).to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..4], b"RIFF");
    assert_eq!(&body[8..12], b"WAVE");

    let missing = post_json(&app.router, "/api/audio", json!({"text": "never spoken"})).await;
    assert_eq!(missing["errno"], 404);
}

#[tokio::test]
async fn test_symbol_only_text_speak_and_audio_agree() {
    let app = test_app();

    let spoken = post_json(&app.router, "/api/speak", json!({"text": "!!!"})).await;
    assert_eq!(spoken["errno"], 0);
    assert_eq!(spoken["data"]["normalized_text"], "");

    let request = Request::builder()
        .method("POST")
        .uri("/api/audio")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"text": "?!"}).to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");

    let blank = post_json(&app.router, "/api/audio", json!({"text": "  "})).await;
    assert_eq!(blank["errno"], 400);
}

#[tokio::test]
async fn test_history_limit_and_clear() {
    let app = test_app();
    for i in 0..5 {
        app.cache
            .put(&format!("item {}", i), &format!("Item {}", i), "AAAA", "Orus")
            .await
            .unwrap();
    }
    let mut events = app.publisher.subscribe();

    let history = get_json(&app.router, "/api/history?limit=2").await;
    let items = history["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["text"], "Item 4");

    let cleared = post_json(&app.router, "/api/history/clear", json!({})).await;
    assert_eq!(cleared["errno"], 0);
    assert!(matches!(events.recv().await.unwrap(), WsEvent::HistoryCleared));

    let history = get_json(&app.router, "/api/history").await;
    assert!(history["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_failure_reported() {
    let app = test_app_with(InMemoryAudioCache::unavailable());

    let cleared = post_json(&app.router, "/api/history/clear", json!({})).await;
    assert_eq!(cleared["errno"], 500);

    let status = get_json(&app.router, "/api/cache/status").await;
    assert_eq!(status["data"]["state"], "failed");

    // 缓存不可用时仍可朗读
    let spoken = post_json(&app.router, "/api/speak", json!({"text": "Yes, please."})).await;
    assert_eq!(spoken["errno"], 0);
    assert_eq!(spoken["data"]["source"], "generated");
}

#[tokio::test]
async fn test_voice_selection() {
    let app = test_app();

    let selected = get_json(&app.router, "/api/voice/selected").await;
    assert_eq!(selected["data"]["voice"], "Orus");

    let saved = post_json(&app.router, "/api/voice/select", json!({"voice": "Umbriel"})).await;
    assert_eq!(saved["data"]["voice"], "Umbriel");
    assert_eq!(saved["data"]["persisted"], true);

    let selected = get_json(&app.router, "/api/voice/selected").await;
    assert_eq!(selected["data"]["voice"], "Umbriel");

    let spoken = post_json(&app.router, "/api/speak", json!({"text": "Just a sec."})).await;
    assert_eq!(spoken["data"]["voice"], "Umbriel");

    let unknown = post_json(&app.router, "/api/voice/select", json!({"voice": "Zephyr"})).await;
    assert_eq!(unknown["errno"], 400);
}

#[tokio::test]
async fn test_catalog_and_debug_endpoints() {
    let app = test_app();

    let voices = get_json(&app.router, "/api/voice/list").await;
    assert_eq!(voices["data"].as_array().unwrap().len(), 7);
    assert_eq!(voices["data"][0]["id"], "Orus");

    let phrases = get_json(&app.router, "/api/phrases").await;
    assert_eq!(phrases["data"].as_array().unwrap().len(), 7);

    post_json(&app.router, "/api/speak", json!({"text": "No, thanks."})).await;
    let logs = get_json(&app.router, "/api/debug/logs").await;
    let logs = logs["data"].as_array().unwrap();
    assert!(logs
        .iter()
        .any(|entry| entry["message"] == "✗ Cache MISS - Generating new audio"));
    assert!(logs.iter().all(|entry| entry["type"].is_string()));
}
