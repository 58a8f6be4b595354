//! Matrix HTTP client.

use crate::error::MatrixError;
use crate::types::*;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

const API_PREFIX: &str = "/_matrix/client/v3";

/// Extra time allowed on top of the sync long-poll before the request fails.
const SYNC_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Matrix client-server API client.
///
/// Clones share the transaction counter, so transaction IDs stay unique
/// across tasks.
#[derive(Clone)]
pub struct MatrixClient {
    client: Client,
    homeserver_url: String,
    access_token: SecretString,
    txn_counter: Arc<AtomicU64>,
}

impl MatrixClient {
    /// Create a new Matrix client.
    pub fn new(
        homeserver_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MatrixError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            homeserver_url: homeserver_url.into().trim_end_matches('/').to_string(),
            access_token: SecretString::new(access_token.into()),
            txn_counter: Arc::new(AtomicU64::new(0)),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.homeserver_url, API_PREFIX, endpoint)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(
            "Authorization",
            format!("Bearer {}", self.access_token.expose_secret()),
        )
    }

    fn next_txn_id(&self) -> String {
        let n = self.txn_counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", chrono::Utc::now().timestamp_millis(), n)
    }

    /// Resolve the user ID owning the access token.
    #[instrument(skip(self))]
    pub async fn whoami(&self) -> Result<String, MatrixError> {
        let response = self
            .authorized(self.client.get(self.url("/account/whoami")))
            .send()
            .await?;

        let whoami: WhoAmI = self.handle_response(response).await?;
        Ok(whoami.user_id)
    }

    /// Long-poll for new events.
    #[instrument(skip(self))]
    pub async fn sync(
        &self,
        since: Option<&str>,
        timeout: Duration,
    ) -> Result<SyncResponse, MatrixError> {
        let mut query = vec![("timeout", timeout.as_millis().to_string())];
        if let Some(since) = since {
            query.push(("since", since.to_string()));
        }

        let response = self
            .authorized(self.client.get(self.url("/sync")))
            .query(&query)
            .timeout(timeout + SYNC_TIMEOUT_MARGIN)
            .send()
            .await?;

        let sync: SyncResponse = self.handle_response(response).await?;
        debug!(
            "Synced {} joined rooms, {} invites",
            sync.rooms.join.len(),
            sync.rooms.invite.len()
        );
        Ok(sync)
    }

    /// Send a notice to a room, optionally as a reply to an event.
    #[instrument(skip(self, message))]
    pub async fn send_message(
        &self,
        room_id: &str,
        message: &str,
        in_reply_to: Option<&str>,
    ) -> Result<String, MatrixError> {
        let request = SendMessageRequest::notice(message, in_reply_to);
        let endpoint = format!(
            "/rooms/{}/send/{}/{}",
            encode(room_id),
            ROOM_MESSAGE,
            encode(&self.next_txn_id())
        );

        let response = self
            .authorized(self.client.put(self.url(&endpoint)))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {}", msg);
            return Err(MatrixError::SendFailed(msg));
        }

        let sent: SendMessageResponse = response.json().await?;
        debug!("Sent message {} to {}", sent.event_id, room_id);
        Ok(sent.event_id)
    }

    /// Reply to a message in its room.
    pub async fn reply(&self, original: &BotMessage, message: &str) -> Result<String, MatrixError> {
        self.send_message(original.reply_target(), message, Some(&original.event_id))
            .await
    }

    /// Join a room the bot was invited to.
    #[instrument(skip(self))]
    pub async fn join_room(&self, room_id: &str) -> Result<(), MatrixError> {
        let response = self
            .authorized(
                self.client
                    .post(self.url(&format!("/join/{}", encode(room_id)))),
            )
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let _: serde_json::Value = self.handle_response(response).await?;
        debug!("Joined {}", room_id);
        Ok(())
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, MatrixError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(MatrixError::from)
        } else if status == StatusCode::UNAUTHORIZED {
            warn!("Access token rejected");
            Err(MatrixError::Unauthorized)
        } else {
            let msg = response.text().await.unwrap_or_default();
            Err(MatrixError::Api(format!("{} - {}", status.as_u16(), msg)))
        }
    }
}
