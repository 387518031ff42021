//! The single configured HTTP client for the price-tracking backend.
//!
//! Every backend call goes through [`Connection`], which normalizes failures
//! into [`PriceTrackerError`] and reports unexpected ones to the configured
//! [`Notifier`]. Responses with status 404 or 422 are expected outcomes the
//! caller handles itself, so they are returned without a notification.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{PriceTrackerError, Result};
use crate::notify::Notifier;

/// Shown when neither the backend nor the transport gave a usable message.
pub const GENERIC_ERROR: &str = "Could not process request";
const VALIDATION_FALLBACK: &str = "Validation error";

pub struct Connection {
    client: Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

impl Connection {
    /// Create a connection to `base_url` (e.g. `http://localhost:8000/api`).
    ///
    /// When `timeout` is `None` the transport's default applies.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            notifier,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // -- Verbs -------------------------------------------------------------

    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let response = self.execute(self.client.get(&url).query(query))?;
        self.decode(response)
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.execute(request)?;
        self.decode(response)
    }

    pub fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let response = self.execute(self.client.put(&url).json(body))?;
        self.decode(response)
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        self.execute(self.client.delete(&url))?;
        Ok(())
    }

    // -- Failure normalization ---------------------------------------------

    fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(|e| self.fail(e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = error_message(&body, status);
        match status {
            StatusCode::NOT_FOUND => Err(PriceTrackerError::NotFound(message)),
            StatusCode::UNPROCESSABLE_ENTITY => Err(PriceTrackerError::Validation(message)),
            _ => {
                self.notifier.error(&message);
                Err(PriceTrackerError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let body = response.text().map_err(|e| self.fail(e))?;
        // Empty bodies decode as JSON null so unit-like responses still work.
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| self.fail(e))
    }

    fn fail<E>(&self, e: E) -> PriceTrackerError
    where
        E: Into<PriceTrackerError> + fmt::Display,
    {
        let text = e.to_string();
        self.notifier
            .error(if text.is_empty() { GENERIC_ERROR } else { text.as_str() });
        e.into()
    }
}

/// Pick the most specific message from an error response body.
///
/// `detail` as a string wins; a list of validation errors yields the first
/// entry's `msg`; otherwise a message naming the status code.
pub fn error_message(body: &str, status: StatusCode) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());

    match detail {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Array(errors)) => errors
            .first()
            .and_then(|e| e.get("msg"))
            .and_then(|m| m.as_str())
            .unwrap_or(VALIDATION_FALLBACK)
            .to_string(),
        _ => format!("Request failed with status code {}", status.as_u16()),
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
