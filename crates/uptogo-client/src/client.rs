//! HTTP client for the Uptogo REST API.
//!
//! Wraps `reqwest` with Uptogo's authentication scheme and JSON handling.
//! Every request carries `Content-Type: application/json` and the stored API
//! key as a `Basic` credential. Requests are never retried.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;
use uptogo_core::Environment;

use crate::error::UptogoError;
use crate::types::Customer;

/// Client for the Uptogo REST API.
///
/// Use [`UptogoClient::new`] for production or [`UptogoClient::with_base_url`]
/// for the development endpoint or a mock server in tests.
pub struct UptogoClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl UptogoClient {
    /// Creates a new client pointed at the production Uptogo API.
    ///
    /// # Errors
    ///
    /// Returns [`UptogoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, UptogoError> {
        Self::with_base_url(api_key, timeout_secs, Environment::Production.api_base_url())
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`UptogoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`UptogoError::InvalidBaseUrl`] if
    /// `base_url` cannot be parsed or cannot carry a path.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, UptogoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("uptogo-shipping/0.1")
            .build()?;

        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            UptogoError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(UptogoError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Looks up the store account that owns `api_key`.
    ///
    /// Unlike the other endpoints, the key under test is passed as a query
    /// parameter; the stored key still authenticates the request. Returns
    /// `None` when the API answers with an empty body.
    ///
    /// # Errors
    ///
    /// - [`UptogoError::Http`] on network failure or non-2xx HTTP status.
    /// - [`UptogoError::Deserialize`] if the response is not a customer.
    pub async fn customer_by_api_key(
        &self,
        api_key: &str,
    ) -> Result<Option<Customer>, UptogoError> {
        let body = self
            .request(
                Method::GET,
                &["Cliente.php", "by_api_key"],
                &[("api_key", api_key)],
                None::<&()>,
            )
            .await?;
        Self::decode_non_empty(body, "customer by api key")
    }

    /// Issues a request and parses the response body as JSON.
    ///
    /// `segments` are appended to the base URL path and percent-encoded
    /// individually, so remote identifiers can be passed straight through.
    ///
    /// # Errors
    ///
    /// Returns [`UptogoError::Http`] on network failure or a non-2xx status.
    /// Returns [`UptogoError::Deserialize`] if the body is not valid JSON.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value, UptogoError> {
        let url = self.build_url(segments, query);
        tracing::debug!(%method, path = url.path(), "uptogo request");

        let mut request = self
            .client
            .request(method, url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Basic {}", self.api_key));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?.error_for_status()?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| UptogoError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }

    /// Builds the request URL from path segments and percent-encoded query
    /// parameters.
    pub(crate) fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Deserializes `body` unless it is an empty result (`null`, `[]`, `{}`).
    pub(crate) fn decode_non_empty<T: serde::de::DeserializeOwned>(
        body: Value,
        context: &str,
    ) -> Result<Option<T>, UptogoError> {
        if is_empty_result(&body) {
            return Ok(None);
        }
        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| UptogoError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
    }
}

/// `null`, an empty array, or an empty object: the API's way of saying
/// "nothing found".
pub(crate) fn is_empty_result(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
