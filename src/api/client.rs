//! Authenticated HTTP client for the Zulip API
//!
//! Wraps reqwest::Client with basic-auth credential injection.

use async_trait::async_trait;
use serde::Deserialize;

use super::transport::{ApiRequest, ApiResponse, ApiTransport};
use crate::config::Config;
use crate::error::{BotError, Result};

/// Authenticated client for a Zulip site. Implements [`ApiTransport`] for
/// message posting and carries the event-queue plumbing used for polling.
pub struct ZulipClient {
    http: reqwest::Client,
    site: String,
    email: String,
    api_key: String,
}

/// A registered event queue and its read cursor.
#[derive(Debug, Deserialize)]
pub struct EventQueue {
    pub queue_id: String,
    pub last_event_id: i64,
}

impl ZulipClient {
    /// Build a client from stored credentials.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            site: config.site.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Resolve a relative API path against the site's API root.
    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.site, path)
    }

    /// Register an event queue limited to message events.
    pub async fn register_message_queue(&self) -> Result<EventQueue> {
        let url = self.api_url("register");
        tracing::debug!("POST {}", url);

        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.email, Some(&self.api_key))
            .form(&[("event_types", r#"["message"]"#)])
            .send()
            .await?;
        let resp = check_response(resp, &url).await?;

        Ok(resp.json::<EventQueue>().await?)
    }

    /// Long-poll the queue once, advancing the cursor past any events
    /// seen. Returns the raw body for event parsing.
    pub async fn poll_events(&self, queue: &mut EventQueue) -> Result<Vec<u8>> {
        let url = self.api_url("events");
        tracing::debug!("GET {} (last_event_id={})", url, queue.last_event_id);

        let last_event_id = queue.last_event_id.to_string();
        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_key))
            .query(&[
                ("queue_id", queue.queue_id.as_str()),
                ("last_event_id", last_event_id.as_str()),
            ])
            .send()
            .await?;
        let resp = check_response(resp, &url).await?;
        let raw = resp.bytes().await?;

        // Advance the cursor from the event ids, regardless of whether the
        // batch later parses as messages
        #[derive(Deserialize)]
        struct EventIds {
            #[serde(default)]
            events: Vec<EventId>,
        }
        #[derive(Deserialize)]
        struct EventId {
            id: i64,
        }
        if let Ok(ids) = serde_json::from_slice::<EventIds>(&raw) {
            if let Some(max) = ids.events.iter().map(|event| event.id).max() {
                queue.last_event_id = queue.last_event_id.max(max);
            }
        }

        Ok(raw.to_vec())
    }
}

#[async_trait]
impl ApiTransport for ZulipClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.api_url(&request.path);
        tracing::debug!("{} {}", request.method, url);

        let resp = self
            .http
            .request(request.method, &url)
            .basic_auth(&self.email, Some(&self.api_key))
            .form(&request.form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Check HTTP response status and return a clear error on failure. Used by
/// the queue plumbing only; `execute` hands responses back uninterpreted.
async fn check_response(resp: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(BotError::Api(format!(
            "HTTP {} for {}: {}",
            status.as_u16(),
            url,
            body
        )));
    }
    Ok(resp)
}
