use anyhow::{anyhow, Result};
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::models::Message;

pub struct MessageService {
    backend: BackendClient,
}

impl MessageService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Send a message. The sender id always comes from the authenticated
    /// caller, never from the request body.
    pub async fn send(
        &self,
        sender_id: i64,
        recipient_id: i64,
        body: &str,
        auth_token: &str,
    ) -> Result<Message> {
        let body = body.trim();
        if body.is_empty() {
            return Err(anyhow!("Message body must not be empty"));
        }
        if sender_id == recipient_id {
            return Err(anyhow!("Cannot send a message to yourself"));
        }

        debug!("Sending message from {} to {}", sender_id, recipient_id);

        self.backend
            .request(
                Method::POST,
                "/messages",
                Some(auth_token),
                Some(json!({
                    "sender_id": sender_id,
                    "recipient_id": recipient_id,
                    "body": body,
                })),
            )
            .await
    }

    /// Messages exchanged between the caller and one peer, oldest first.
    pub async fn conversation(&self, peer_id: i64, auth_token: &str) -> Result<Vec<Message>> {
        let peer_id = peer_id.to_string();
        self.backend
            .request_with_query(
                Method::GET,
                "/messages",
                &[("peer_id", peer_id.as_str())],
                Some(auth_token),
                None,
            )
            .await
    }
}
