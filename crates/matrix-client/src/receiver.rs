//! Message receiver built on repeated `/sync` long-polls.

use crate::client::MatrixClient;
use crate::types::*;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error, info, warn};

/// Message receiver that long-polls the homeserver for new messages.
pub struct MessageReceiver {
    client: MatrixClient,
    user_id: String,
    sync_timeout: Duration,
    auto_join: bool,
}

impl MessageReceiver {
    /// Create a new message receiver. `user_id` is the bot's own ID; its
    /// messages are never yielded.
    pub fn new(
        client: MatrixClient,
        user_id: impl Into<String>,
        sync_timeout: Duration,
        auto_join: bool,
    ) -> Self {
        Self {
            client,
            user_id: user_id.into(),
            sync_timeout,
            auto_join,
        }
    }

    /// Collect the text messages of one sync batch, skipping our own.
    pub fn extract_messages(&self, sync: &SyncResponse) -> Vec<BotMessage> {
        sync.rooms
            .join
            .iter()
            .flat_map(|(room_id, room)| {
                room.timeline
                    .events
                    .iter()
                    .filter_map(move |event| BotMessage::from_event(room_id, event))
            })
            .filter(|msg| msg.sender != self.user_id)
            .collect()
    }

    /// Start receiving messages as an async stream.
    ///
    /// The backlog returned by the first sync is skipped so the bot does not
    /// answer commands sent while it was offline.
    pub fn stream(self) -> impl Stream<Item = BotMessage> {
        async_stream::stream! {
            let mut since: Option<String> = None;

            loop {
                let timeout = if since.is_some() { self.sync_timeout } else { Duration::ZERO };

                match self.client.sync(since.as_deref(), timeout).await {
                    Ok(sync) => {
                        if self.auto_join {
                            for room_id in sync.rooms.invite.keys() {
                                info!("Joining {} after invite", room_id);
                                if let Err(e) = self.client.join_room(room_id).await {
                                    warn!("Failed to join {}: {}", room_id, e);
                                }
                            }
                        }

                        if since.is_some() {
                            for msg in self.extract_messages(&sync) {
                                debug!("Received: {} from {}",
                                    msg.text.chars().take(50).collect::<String>(),
                                    msg.sender
                                );
                                yield msg;
                            }
                        }

                        since = Some(sync.next_batch);
                    }
                    Err(e) => {
                        error!("Sync error: {}", e);
                        // Back off on error
                        sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        }
    }
}
