//! HTTP client for the HubSpot CRM, Forms and Files APIs.
//!
//! This module provides a synchronous client that can be used from async contexts
//! via [`AsyncHubspotClient`]. The client handles authentication, status mapping
//! and response decoding; every operation issues one request (the submission
//! search issues one per page) and nothing is retried.
//!
//! Operations are grouped by API area:
//!
//! - `crm`: association lookups, searches, generic object create/update
//! - `deals`: deal associations and the deal-flow card workflow
//! - `forms`: form submission paging and key/value search
//! - `files`: file upload and visibility

mod async_wrapper;
mod crm;
mod deals;
mod files;
mod forms;
pub mod multipart;
pub mod transport;

pub use async_wrapper::{AsyncHubspotClient, AsyncHubspotClientImpl};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

use crate::config::{AuthMode, Config};
use crate::error::{HubspotError, HubspotResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

/// A request body: content type and encoded bytes.
type Payload = (String, Vec<u8>);

/// Client for the HubSpot API.
///
/// Configuration and transport are fixed at construction; the client can be
/// cloned cheaply and shared across threads.
#[derive(Clone)]
pub struct HubspotClient {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
    metrics: Metrics,
}

impl HubspotClient {
    /// Create a client that talks to HubSpot through `ureq`.
    pub fn new(config: Config) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(config.request_timeout));
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            metrics: Metrics::new(),
        }
    }

    /// Create a client with every base URL pointing at `base_url` (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, config: Config) -> Self {
        let config = Config {
            api_base_url: base_url.clone(),
            app_base_url: base_url,
            ..config
        };
        Self::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full API URL from a path and query parameters.
    ///
    /// The API key is appended as `hapikey` in query-parameter auth mode.
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let base = self.config.api_base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = format!("{}/{}", base, path);

        let mut params: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();

        if self.config.auth_mode == AuthMode::QueryParam {
            params.push(format!("hapikey={}", urlencoding::encode(&self.config.api_key)));
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    /// Send an authenticated request and require a 2xx response.
    fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Option<Payload>,
    ) -> HubspotResult<HttpResponse> {
        let mut request = HttpRequest::new(method, self.build_url(path, query));

        if self.config.auth_mode == AuthMode::Bearer {
            request = request.header("Authorization", format!("Bearer {}", self.config.api_key));
        }

        if let Some((content_type, body)) = payload {
            request = request.body(content_type, body);
        }

        // Log the path only: the query string may carry the API key
        tracing::debug!("{} {}", method, path);

        let timer = HttpTimer::new(self.metrics.clone());
        match self.transport.send(&request) {
            Ok(response) if response.is_success() => {
                timer.complete();
                tracing::debug!("{} {} - Success (status: {})", method, path, response.status);
                Ok(response)
            }
            Ok(response) => {
                timer.complete_with_error();
                tracing::warn!("{} {} - Status {}: {}", method, path, response.status, response.body);
                Err(HubspotError::UpstreamStatus {
                    status: response.status,
                    body: response.body,
                })
            }
            Err(e) => {
                timer.complete_with_error();
                tracing::error!("{} {} - Error: {}", method, path, e);
                Err(e)
            }
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> HubspotResult<T> {
        let response = self.execute(Method::Get, path, query, None)?;
        decode(&response)
    }

    fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> HubspotResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, &[], Some(json_payload(body)?))?;
        decode(&response)
    }

    /// Send a JSON body and ignore the response body.
    fn send_json_discard<B>(&self, method: Method, path: &str, body: &B) -> HubspotResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, &[], Some(json_payload(body)?))?;
        Ok(())
    }
}

fn json_payload<B: Serialize + ?Sized>(body: &B) -> HubspotResult<Payload> {
    let bytes = serde_json::to_vec(body)?;
    tracing::trace!("Request body: {}", String::from_utf8_lossy(&bytes));
    Ok(("application/json".to_string(), bytes))
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> HubspotResult<T> {
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!("Unexpected response shape: {} (body: {})", e, response.body);
        HubspotError::Decode(e)
    })
}

/// Percent-encode an id for use as a path segment.
fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
