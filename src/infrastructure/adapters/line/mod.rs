//! LINE adapter
//!
//! Webhook payload types, request signature verification and the Reply
//! API client. One inbound text message event gets exactly one reply,
//! addressed by the reply token carried on the event.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::application::errors::BotError;
use crate::domain::entities::Message;
use crate::domain::traits::{Bot, BotInfo};

/// LINE Messaging API base URL
const API_BASE: &str = "https://api.line.me";

type HmacSha256 = Hmac<Sha256>;

/// Compute the webhook signature for a raw request body:
/// Base64(HMAC-SHA256(channel secret, body)).
pub fn sign(channel_secret: &str, body: &[u8]) -> String {
    // HMAC-SHA256 accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify the `X-Line-Signature` header value against the raw body.
/// Comparison goes through `Mac::verify_slice`, which is constant-time.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(provided) = STANDARD.decode(signature) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}

/// Webhook request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub message: Option<EventMessage>,
    #[serde(default)]
    pub source: Option<EventSource>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl WebhookEvent {
    /// Convert a webhook event into a domain message. Only `message`
    /// events carrying a text message and a reply token qualify;
    /// everything else is ignored.
    pub fn into_message(self) -> Option<Message> {
        if self.event_type != "message" {
            return None;
        }
        let reply_token = self.reply_token?;
        let message = self.message?;
        if message.message_type != "text" {
            return None;
        }
        let text = message.text?;
        let sender_id = self.source.and_then(|s| s.user_id);

        Some(
            Message::inbound(reply_token, text)
                .with_sender(sender_id)
                .with_platform("line"),
        )
    }
}

/// LINE bot adapter
pub struct LineAdapter {
    access_token: String,
    client: Client,
    info: BotInfo,
}

impl LineAdapter {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client: Client::new(),
            info: BotInfo {
                name: "fridge-bot".to_string(),
                platform: "line".to_string(),
            },
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/v2/bot/{}", API_BASE, method)
    }

    /// First few characters of the access token, safe for logging.
    fn token_preview(&self) -> String {
        self.access_token.chars().take(8).collect()
    }
}

#[async_trait]
impl Bot for LineAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting LINE bot (token: {}...)", self.token_preview());
        Ok(())
    }

    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct TextMessage<'a> {
            #[serde(rename = "type")]
            message_type: &'a str,
            text: &'a str,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ReplyRequest<'a> {
            reply_token: &'a str,
            messages: Vec<TextMessage<'a>>,
        }

        let url = self.api_url("message/reply");
        let request = ReplyRequest {
            reply_token,
            messages: vec![TextMessage {
                message_type: "text",
                text,
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!(
                "LINE API error {}: {}",
                status, error
            )));
        }

        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signature_verifies() {
        let body = br#"{"events":[]}"#;
        let signature = sign("channel-secret", body);
        assert!(verify_signature("channel-secret", body, &signature));
    }

    #[test]
    fn tampered_body_or_wrong_secret_fails() {
        let body = br#"{"events":[]}"#;
        let signature = sign("channel-secret", body);

        assert!(!verify_signature("channel-secret", br#"{"events":[1]}"#, &signature));
        assert!(!verify_signature("other-secret", body, &signature));
        assert!(!verify_signature("channel-secret", body, "bogus"));
    }

    #[test]
    fn non_base64_signature_header_fails_cleanly() {
        assert!(!verify_signature("channel-secret", b"body", "%%% not base64 %%%"));
        assert!(!verify_signature("channel-secret", b"body", ""));
    }

    #[test]
    fn token_preview_handles_multibyte_tokens() {
        let adapter = LineAdapter::new("αβγδεζηθικλ");
        assert_eq!(adapter.token_preview(), "αβγδεζηθ");

        let short = LineAdapter::new("abc");
        assert_eq!(short.token_preview(), "abc");
    }

    #[test]
    fn parses_text_message_event() {
        let json = r#"{
            "destination": "U1234",
            "events": [{
                "type": "message",
                "replyToken": "abcdef",
                "source": {"type": "user", "userId": "U5678"},
                "message": {"type": "text", "id": "42", "text": "add milk 2 2025-01-01"}
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.events.len(), 1);

        let msg = payload.events[0].clone().into_message().unwrap();
        assert_eq!(msg.reply_token, "abcdef");
        assert_eq!(msg.text, "add milk 2 2025-01-01");
        assert_eq!(msg.sender_id.as_deref(), Some("U5678"));
        assert_eq!(msg.platform, "line");
    }

    #[test]
    fn non_text_events_are_ignored() {
        let sticker = r#"{
            "events": [{
                "type": "message",
                "replyToken": "abcdef",
                "message": {"type": "sticker", "id": "42"}
            }]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(sticker).unwrap();
        assert!(payload.events[0].clone().into_message().is_none());

        let follow = r#"{"events": [{"type": "follow", "replyToken": "abcdef"}]}"#;
        let payload: WebhookPayload = serde_json::from_str(follow).unwrap();
        assert!(payload.events[0].clone().into_message().is_none());
    }
}
