//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! `Transport` sends one request and hands back the raw status and body;
//! it never interprets either. Interpretation lives in `net::request` so the
//! fakes used in tests exercise the same status/JSON handling as production.
//!
//! Credential inclusion mirrors a browser `credentials: 'include'` fetch:
//! credentialed requests go through a client with a shared cookie jar, so the
//! session cookie set by `login` is replayed on later admin calls. Anonymous
//! requests use a separate client with no cookie store at all.

use std::sync::Arc;

use reqwest::Method;
use reqwest::cookie::Jar;
use serde_json::Value;

/// One outgoing HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpExchange {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub with_credentials: bool,
}

/// Raw response: status code plus the undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Failure to complete an exchange at all (DNS, connect, reset, ...).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends a single HTTP exchange. Enables fakes in tests.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    async fn execute(&self, exchange: HttpExchange) -> Result<RawResponse, TransportError>;
}

// =============================================================================
// REQWEST TRANSPORT
// =============================================================================

pub struct HttpTransport {
    credentialed: reqwest::Client,
    anonymous: reqwest::Client,
}

impl HttpTransport {
    /// Build both clients. The cookie jar starts empty; the console never
    /// restores a session from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if either HTTP client fails to build.
    pub fn new() -> Result<Self, TransportError> {
        let jar = Arc::new(Jar::default());
        let credentialed = reqwest::Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(|e| TransportError(e.to_string()))?;
        let anonymous = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(Self { credentialed, anonymous })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, exchange: HttpExchange) -> Result<RawResponse, TransportError> {
        let client = if exchange.with_credentials { &self.credentialed } else { &self.anonymous };

        let request = client.request(exchange.method, &exchange.url);
        let request = if let Some(json) = exchange.body {
            request.json(&json)
        } else {
            request
        };

        let response = request
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;
