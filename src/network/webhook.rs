// src/network/webhook.rs

//! Discord webhook delivery
//!
//! Messages are posted as `{"content": ...}`; Discord answers 204 on
//! success. Anything outside 2xx is reported as a delivery failure.
use crate::utils::error::{NotifierError, Result};
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// Fire-and-forget delivery of text to a named destination
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Posts `text` to `destination`
    async fn send(&self, destination: &str, text: &str) -> Result<()>;
}

/// Webhook request body
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Notifier that posts to Discord webhook URLs
#[derive(Default)]
pub struct DiscordWebhook {
    client: Client,
}

impl DiscordWebhook {
    /// Creates a webhook notifier with a fresh HTTP client
    pub fn new() -> Self {
        DiscordWebhook {
            client: Client::new(),
        }
    }
}

impl Notifier for DiscordWebhook {
    async fn send(&self, destination: &str, text: &str) -> Result<()> {
        let url = Url::parse(destination)?;
        // Token is part of the path, so only the host goes to the log
        log::debug!("posting {} bytes to {}", text.len(), url.host_str().unwrap_or("?"));

        let response = self
            .client
            .post(url)
            .json(&WebhookMessage { content: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::DeliveryError(format!(
                "webhook returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
