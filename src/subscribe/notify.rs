use crate::error::SubscribeError;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Serialize)]
struct SubscribeRequest<'a> {
    email: &'a str,
}

/// Posts `{"email": ...}` to the configured subscription endpoint.
#[derive(Clone, Debug)]
pub struct SubscribeClient {
    client: reqwest::Client,
    url: String,
}

impl SubscribeClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SubscribeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubscribeError::Notify(e.to_string()))?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub async fn subscribe(&self, email: &str) -> Result<(), SubscribeError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SubscribeRequest { email })
            .send()
            .await
            .map_err(|e| {
                warn!("Subscription request failed: {}", e);
                SubscribeError::Notify(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Subscription rejected with status: {}", status);
            return Err(SubscribeError::Notify(format!("server returned {}", status)));
        }

        info!("Subscribed {}", email);
        Ok(())
    }
}
