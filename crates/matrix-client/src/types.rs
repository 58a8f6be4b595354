//! Matrix client-server API types.

use crate::markdown::render_html;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// `m.room.message` event type.
pub const ROOM_MESSAGE: &str = "m.room.message";

/// Response of `GET /account/whoami`.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoAmI {
    pub user_id: String,
}

/// Response of `GET /sync`.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncResponse {
    pub next_batch: String,
    #[serde(default)]
    pub rooms: Rooms,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rooms {
    #[serde(default)]
    pub join: HashMap<String, JoinedRoom>,
    #[serde(default)]
    pub invite: HashMap<String, InvitedRoom>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinedRoom {
    #[serde(default)]
    pub timeline: Timeline,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvitedRoom {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Timeline {
    #[serde(default, deserialize_with = "skip_malformed_events")]
    pub events: Vec<RoomEvent>,
}

/// Decode timeline events one by one, dropping any that do not parse so a
/// single bad event cannot fail the whole sync.
fn skip_malformed_events<'de, D>(deserializer: D) -> Result<Vec<RoomEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Skipping malformed timeline event: {}", e);
                None
            }
        })
        .collect())
}

/// A timeline event. Only the fields the bot reads are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub event_id: String,
    pub sender: String,
    #[serde(default)]
    pub origin_server_ts: i64,
    #[serde(default)]
    pub content: EventContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventContent {
    pub msgtype: Option<String>,
    pub body: Option<String>,
}

/// Outgoing `m.room.message` content.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub msgtype: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_body: Option<String>,
    #[serde(rename = "m.relates_to", skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<RelatesTo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatesTo {
    #[serde(rename = "m.in_reply_to")]
    pub in_reply_to: InReplyTo,
}

#[derive(Debug, Clone, Serialize)]
pub struct InReplyTo {
    pub event_id: String,
}

impl SendMessageRequest {
    /// Bot notice. `body` is sent as typed; `formatted_body` is the same
    /// text rendered from markdown, with inline HTML kept.
    pub fn notice(body: impl Into<String>, in_reply_to: Option<&str>) -> Self {
        let body = body.into();
        Self {
            msgtype: "m.notice".into(),
            formatted_body: Some(render_html(&body)),
            body,
            format: Some("org.matrix.custom.html".into()),
            relates_to: in_reply_to.map(|event_id| RelatesTo {
                in_reply_to: InReplyTo {
                    event_id: event_id.to_string(),
                },
            }),
        }
    }
}

/// Send message response.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub event_id: String,
}

/// Parsed message for bot processing.
#[derive(Debug, Clone)]
pub struct BotMessage {
    /// Room the message was posted in.
    pub room_id: String,
    /// Event ID of the message, used for threading replies.
    pub event_id: String,
    /// Matrix user ID of the sender.
    pub sender: String,
    /// The message text.
    pub text: String,
    /// Server timestamp in milliseconds.
    pub timestamp: i64,
}

impl BotMessage {
    /// Extract a bot message from a timeline event; `None` unless it is an
    /// `m.text` room message.
    pub fn from_event(room_id: &str, event: &RoomEvent) -> Option<Self> {
        if event.event_type != ROOM_MESSAGE || event.content.msgtype.as_deref() != Some("m.text") {
            return None;
        }
        let text = event.content.body.clone()?;

        Some(Self {
            room_id: room_id.to_string(),
            event_id: event.event_id.clone(),
            sender: event.sender.clone(),
            text,
            timestamp: event.origin_server_ts,
        })
    }

    /// Get the reply target (the originating room).
    pub fn reply_target(&self) -> &str {
        &self.room_id
    }
}
