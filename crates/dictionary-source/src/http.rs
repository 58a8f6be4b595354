//! Response handling shared by the HTTP backends.

use crate::error::SourceError;
use reqwest::StatusCode;
use tracing::{debug, warn};

/// Decode a successful response body, or map the status to a [`SourceError`].
pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    word: &str,
) -> Result<T, SourceError> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        debug!("Response body: {}", &body[..floor_char_boundary(&body, 200)]);
        serde_json::from_str(&body).map_err(SourceError::from)
    } else {
        Err(extract_error(response, word).await)
    }
}

async fn extract_error(response: reqwest::Response, word: &str) -> SourceError {
    let status = response.status();

    match status {
        StatusCode::NOT_FOUND => SourceError::not_found(word),
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("Rate limit exceeded");
            SourceError::Other("Rate limit exceeded".into())
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!("Authentication failed");
            SourceError::Other("Authentication failed".into())
        }
        _ => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            SourceError::Other(format!("API error: {} - {}", status.as_u16(), message))
        }
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}
