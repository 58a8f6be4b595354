//! Common test utilities for integration tests.

use dictionary_source::FreeDictionarySource;
use matrix_client::{BotMessage, MatrixClient};
use std::time::Duration;
use wiremock::MockServer;

/// Create a Free Dictionary backend pointed at a mock server.
pub fn test_dictionary_source(mock_server: &MockServer) -> FreeDictionarySource {
    FreeDictionarySource::new(mock_server.uri(), "en", Duration::from_secs(5)).unwrap()
}

/// Create a Matrix client pointed at a mock homeserver.
pub fn test_matrix_client(mock_server: &MockServer) -> MatrixClient {
    MatrixClient::new(mock_server.uri(), "test-token", Duration::from_secs(5)).unwrap()
}

/// A command typed by a user in a room.
pub fn incoming(text: &str) -> BotMessage {
    BotMessage {
        room_id: "!room:example.org".to_string(),
        event_id: "$command".to_string(),
        sender: "@alice:example.org".to_string(),
        text: text.to_string(),
        timestamp: 1677652288000,
    }
}
