use amigo_api::types::ChatMessage;
use amigo_api::AppConfig;
use amigo_client::repl::Repl;
use amigo_client::AppState;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const POLL_MS: u64 = 300;

async fn start_backend(transcript: Arc<Mutex<Vec<ChatMessage>>>) -> SocketAddr {
    let read_side = transcript.clone();
    let write_side = transcript.clone();
    let router = Router::new()
        .route(
            "/users/login",
            post(|| async { Json(serde_json::json!({"username": "maya", "user_id": "u-1"})) }),
        )
        .route(
            "/trips",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["trip_name"], "Bali Squad");
                assert_eq!(body["user_id"], "u-1");
                Json(serde_json::json!({
                    "trip_id": "t-77",
                    "trip_name": "Bali Squad",
                    "invite_code": "BALI42"
                }))
            }),
        )
        .route(
            "/chats/{trip_id}",
            get(move |Path(trip_id): Path<String>| {
                let transcript = read_side.clone();
                async move {
                    assert_eq!(trip_id, "t-77");
                    Json(transcript.lock().unwrap().clone())
                }
            }),
        )
        .route(
            "/chats",
            post(move |Json(body): Json<ChatMessage>| {
                let transcript = write_side.clone();
                async move {
                    transcript.lock().unwrap().push(body);
                    Json(serde_json::json!({"ok": true}))
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_create_trip_chat_and_send() {
    let transcript = Arc::new(Mutex::new(vec![ChatMessage {
        trip_id: "t-77".to_string(),
        username: "ravi".to_string(),
        message: "Flights look cheap for Nov".to_string(),
        time: "10:02".to_string(),
        consensus: None,
    }]));
    let addr = start_backend(transcript.clone()).await;

    let mut config = AppConfig::with_base_url(format!("http://{}", addr));
    config.chat.poll_interval_ms = POLL_MS;
    let mut repl = Repl::new(AppState::new(config).unwrap());

    let output = repl.handle_line("/login maya secret").await;
    assert_eq!(output.lines, vec!["Signed in as maya".to_string()]);

    let output = repl.handle_line("/create Bali Squad").await;
    assert!(output.lines[0].contains("Bali Squad"));
    assert!(output.lines[0].contains("t-77"));
    assert!(output.lines[1].contains("BALI42"));

    let output = repl.handle_line("/open t-77").await;
    assert!(output.lines[0].contains("Opened trip t-77"));

    // First poll tick brings the existing transcript in.
    tokio::time::sleep(Duration::from_millis(POLL_MS * 2)).await;
    let lines = repl.render_updates().await;
    assert_eq!(lines.len(), 1);
    // Peer messages are left-aligned.
    assert!(lines[0].starts_with("ravi [10:02]:"));

    // Send: the message shows up right-aligned immediately, before any tick.
    let output = repl.handle_line("Hello").await;
    assert!(output.lines.is_empty());
    let lines = repl.render_updates().await;
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(' '), "own messages are right-aligned");
    assert!(lines[0].contains("Hello"));

    // The backend received the POST.
    tokio::time::sleep(Duration::from_millis(POLL_MS * 2)).await;
    assert_eq!(transcript.lock().unwrap().len(), 2);

    // The echo reconciles into the same entry: clearing the pending marker
    // repaints the transcript, still with exactly one "Hello".
    let lines = repl.render_updates().await;
    let hellos: Vec<_> = lines.iter().filter(|l| l.contains("Hello")).collect();
    assert!(hellos.len() <= 1, "echo must not duplicate Hello");
    for hello in hellos {
        assert!(!hello.contains('…'), "echoed send is no longer pending");
    }
}

#[tokio::test]
async fn test_refetched_consensus_payload_reaches_the_screen() {
    let transcript = Arc::new(Mutex::new(vec![ChatMessage {
        trip_id: "t-77".to_string(),
        username: "TripBot".to_string(),
        message: "Here are some options".to_string(),
        time: "10:10".to_string(),
        consensus: None,
    }]));
    let addr = start_backend(transcript.clone()).await;

    let mut config = AppConfig::with_base_url(format!("http://{}", addr));
    config.chat.poll_interval_ms = POLL_MS;
    let mut repl = Repl::new(AppState::new(config).unwrap());

    repl.handle_line("/login maya secret").await;
    repl.handle_line("/open t-77").await;

    tokio::time::sleep(Duration::from_millis(POLL_MS * 2)).await;
    let lines = repl.render_updates().await;
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("TripBot [10:10]:"));

    // The backend fills in the AI payload on a later fetch: same author,
    // time and text, so the entry keeps its identity but changes body.
    transcript.lock().unwrap()[0].consensus = Some(serde_json::from_value(serde_json::json!({
        "status": "single_candidate",
        "candidates": [{"place_name": "Bali", "image_url": "https://x/bali.jpg"}]
    }))
    .unwrap());

    tokio::time::sleep(Duration::from_millis(POLL_MS * 2)).await;
    let lines = repl.render_updates().await;
    assert!(
        lines.iter().any(|l| l.contains("suggests 1 destination")),
        "enriched message must repaint as a carousel, got {:?}",
        lines
    );
}
