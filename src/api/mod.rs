//! API client module for the Zulip service

mod client;
mod transport;

pub use client::{EventQueue, ZulipClient};
pub use transport::{ApiRequest, ApiResponse, ApiTransport};
