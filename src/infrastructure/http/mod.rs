//! Webhook server
//!
//! One POST endpoint receives LINE webhook calls. The signature is checked
//! against the raw body before anything else runs; a request that fails
//! verification is rejected with 400 and never reaches the command handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::services::FridgeService;
use crate::domain::traits::Bot;
use crate::infrastructure::adapters::line::{self, WebhookPayload};
use crate::infrastructure::storage::JsonFileStore;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Application state shared across handlers, built once at startup.
/// Generic over the reply-delivery seam so the handler can be exercised
/// without a live platform client.
pub struct AppState<B: Bot> {
    pub service: Arc<FridgeService<JsonFileStore>>,
    pub bot: Arc<B>,
    pub channel_secret: String,
}

impl<B: Bot> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            bot: self.bot.clone(),
            channel_secret: self.channel_secret.clone(),
        }
    }
}

/// Start the webhook server
pub async fn serve<B: Bot + 'static>(addr: SocketAddr, state: AppState<B>) -> Result<(), BotError> {
    let app = Router::new()
        .route("/callback", post(callback::<B>))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BotError::Network(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Webhook server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| BotError::Network(e.to_string()))?;

    Ok(())
}

async fn callback<B: Bot>(
    State(state): State<AppState<B>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !line::verify_signature(&state.channel_secret, &body, signature) {
        tracing::error!("Invalid webhook signature");
        return (StatusCode::BAD_REQUEST, "invalid signature");
    }

    tracing::info!("Received body: {}", String::from_utf8_lossy(&body));

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Unparseable webhook payload: {}", e);
            return (StatusCode::BAD_REQUEST, "bad payload");
        }
    };

    for event in payload.events {
        let Some(message) = event.into_message() else {
            continue;
        };

        tracing::info!(
            "Handling message {} from {:?}",
            message.id,
            message.sender_id
        );

        // A save failure is fatal to this request; there is no retry.
        let reply = match state.service.handle(&message.text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Failed to persist fridge: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "storage failure");
            }
        };

        if let Err(e) = state.bot.reply(&message.reply_token, &reply).await {
            tracing::error!("Failed to deliver reply: {}", e);
        }
    }

    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::{BotInfo, FridgeStore};
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Captures replies instead of delivering them to a platform.
    struct RecordingBot {
        replies: Mutex<Vec<(String, String)>>,
    }

    impl RecordingBot {
        fn new() -> Self {
            Self {
                replies: Mutex::new(Vec::new()),
            }
        }

        fn replies(&self) -> Vec<(String, String)> {
            self.replies.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn start(&self) -> Result<(), BotError> {
            Ok(())
        }

        async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError> {
            self.replies
                .lock()
                .unwrap()
                .push((reply_token.to_string(), text.to_string()));
            Ok(())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo {
                name: "fridge-bot".to_string(),
                platform: "test".to_string(),
            }
        }
    }

    const SECRET: &str = "channel-secret";

    fn temp_state(dir: &TempDir) -> AppState<RecordingBot> {
        AppState {
            service: Arc::new(FridgeService::new(JsonFileStore::new(
                dir.path().join("fridge.json"),
            ))),
            bot: Arc::new(RecordingBot::new()),
            channel_secret: SECRET.to_string(),
        }
    }

    fn signed_headers(body: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&line::sign(SECRET, body.as_bytes())).unwrap(),
        );
        headers
    }

    fn text_event_body(text: &str) -> String {
        format!(
            r#"{{"events":[{{"type":"message","replyToken":"tok-1",
                "source":{{"type":"user","userId":"U1"}},
                "message":{{"type":"text","id":"1","text":"{}"}}}}]}}"#,
            text
        )
    }

    #[tokio::test]
    async fn missing_signature_is_rejected_before_core_logic() {
        let dir = TempDir::new().unwrap();
        let state = temp_state(&dir);
        let body = text_event_body("add milk 2 2025-01-01");

        let (status, _) =
            callback(State(state.clone()), HeaderMap::new(), Bytes::from(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.bot.replies().is_empty());
        assert!(state.service.store().load().await.is_empty());
        assert!(!dir.path().join("fridge.json").exists());
    }

    #[tokio::test]
    async fn wrong_signature_is_rejected_and_state_is_untouched() {
        let dir = TempDir::new().unwrap();
        let state = temp_state(&dir);
        state.service.handle("add egg 6 2025-01-05").await.unwrap();
        let before = std::fs::read_to_string(dir.path().join("fridge.json")).unwrap();

        let body = text_event_body("delete egg");
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static("bogus"));

        let (status, _) = callback(State(state.clone()), headers, Bytes::from(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.bot.replies().is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("fridge.json")).unwrap(),
            before
        );
    }

    #[tokio::test]
    async fn signed_text_message_is_handled_and_replied_once() {
        let dir = TempDir::new().unwrap();
        let state = temp_state(&dir);
        let body = text_event_body("add milk 2 2025-01-01");

        let (status, _) = callback(
            State(state.clone()),
            signed_headers(&body),
            Bytes::from(body.clone()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let replies = state.bot.replies();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].0, "tok-1");
        assert_eq!(replies[0].1, "Added milk 2, expires 2025-01-01");

        let fridge = state.service.store().load().await;
        assert_eq!(fridge.len(), 1);
        assert_eq!(fridge.items()[0].name, "milk");
    }

    #[tokio::test]
    async fn signed_payload_without_text_events_is_ok_and_silent() {
        let dir = TempDir::new().unwrap();
        let state = temp_state(&dir);
        let body = r#"{"events":[{"type":"follow","replyToken":"tok-1"}]}"#.to_string();

        let (status, _) = callback(
            State(state.clone()),
            signed_headers(&body),
            Bytes::from(body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(state.bot.replies().is_empty());
    }

    #[tokio::test]
    async fn signed_garbage_payload_is_a_bad_request() {
        let dir = TempDir::new().unwrap();
        let state = temp_state(&dir);
        let body = "{not json".to_string();

        let (status, _) = callback(
            State(state.clone()),
            signed_headers(&body),
            Bytes::from(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.bot.replies().is_empty());
    }
}
