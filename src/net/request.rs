//! Shared request helper.
//!
//! ERROR HANDLING
//! ==============
//! The body is parsed as JSON whatever the status, so server error messages
//! survive. A 401 is *not* an error here: it comes back as a normal
//! [`ApiResponse`] and each caller decides what "unauthorized" means for it.
//! Every other non-2xx status becomes a [`RequestError`].

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use super::transport::{HttpExchange, RawResponse, Transport, TransportError};
use super::types::error_field;

pub const STATUS_UNAUTHORIZED: u16 = 401;

/// A response the caller must inspect: 2xx or 401.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `None` when the body was empty or not JSON.
    pub data: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == STATUS_UNAUTHORIZED
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    Transport(#[from] TransportError),
    #[error("Request failed with status {status} and non-JSON response.")]
    NonJson { status: u16 },
    #[error("{message}")]
    Server { status: u16, message: String },
}

#[derive(Clone)]
pub struct RequestHelper {
    transport: Arc<dyn Transport>,
}

impl RequestHelper {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Issue a request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] on transport failure or on any non-2xx
    /// status other than 401.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        needs_auth: bool,
    ) -> Result<ApiResponse, RequestError> {
        tracing::debug!(%method, url, needs_auth, has_body = body.is_some(), "making request");

        let raw = self
            .transport
            .execute(HttpExchange { method: method.clone(), url: url.to_owned(), body, with_credentials: needs_auth })
            .await
            .inspect_err(|e| tracing::warn!(%method, url, error = %e, "request did not complete"))?;

        tracing::debug!(url, status = raw.status, "response received");
        interpret(raw)
    }
}

/// Classify a raw response. Pure, so status handling is testable without I/O.
///
/// # Errors
///
/// See [`RequestHelper::send`].
pub fn interpret(raw: RawResponse) -> Result<ApiResponse, RequestError> {
    let status = raw.status;
    let data = serde_json::from_str::<Value>(&raw.body).ok();
    let response = ApiResponse { status, data };

    if response.ok() || response.is_unauthorized() {
        return Ok(response);
    }

    match response.data {
        None => Err(RequestError::NonJson { status }),
        Some(ref data) => Err(RequestError::Server {
            status,
            message: error_field(Some(data)).unwrap_or_else(|| format!("Request failed with status {status}")),
        }),
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;
