//! Transport seam between the bot and the HTTP layer

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::error::Result;

/// A request against the Zulip API, before URL resolution and auth.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. "messages".
    pub path: String,
    /// Form fields; the transport form-encodes them into the body.
    pub form: Vec<(String, String)>,
}

/// A completed HTTP exchange.
///
/// Handed back uninterpreted: a non-2xx status is not an error at this
/// layer, the caller decides what to do with it.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Opaque transport the bot delegates sends to. Credential attachment is
/// the implementation's concern.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}
