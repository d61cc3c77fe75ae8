use chrono::{DateTime, Utc};

/// An inbound text message event.
///
/// Carries the opaque reply handle supplied by the platform; the adapter
/// that received the event uses it to deliver exactly one reply.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub reply_token: String,
    pub text: String,
    pub sender_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn inbound(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            reply_token: reply_token.into(),
            text: text.into(),
            sender_id: None,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn with_sender(mut self, sender_id: Option<String>) -> Self {
        self.sender_id = sender_id;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }
}
