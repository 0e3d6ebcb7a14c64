//! HTTP transport for the Zoom client.
//!
//! Thin wrapper over `reqwest` that returns the raw status and body,
//! leaving status interpretation and JSON decoding to the facade.
//! Single attempt per request: failures are never retried.

use crate::config::ClientConfig;
use crate::error::ZoomResult;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{header, Client};
use tracing::debug;
use url::Url;

/// Raw response from a Zoom endpoint.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport for making Zoom API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport with the configured timeout.
    pub fn new(config: &ClientConfig) -> ZoomResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client })
    }

    /// Execute a bearer-authenticated GET with query parameters.
    pub async fn get(
        &self,
        url: Url,
        bearer_token: &str,
        query: &[(&str, String)],
    ) -> ZoomResult<RawResponse> {
        debug!(url = %url, "GET request");

        let response = self
            .client
            .get(url)
            .bearer_auth(bearer_token)
            .query(query)
            .send()
            .await?;

        Self::into_raw(response).await
    }

    /// Execute a bearer-authenticated GET against an absolute URL
    /// (transcript download links carry their own host).
    pub async fn get_url(&self, url: &str, bearer_token: &str) -> ZoomResult<RawResponse> {
        debug!(url = %url, "GET request (absolute)");

        let response = self
            .client
            .get(url)
            .bearer_auth(bearer_token)
            .send()
            .await?;

        Self::into_raw(response).await
    }

    /// Execute a form-encoded POST with HTTP Basic auth (the OAuth2
    /// token endpoint expects `base64(client_id:client_secret)`).
    pub async fn post_form(
        &self,
        url: Url,
        username: &str,
        password: &str,
        form: &[(&str, &str)],
    ) -> ZoomResult<RawResponse> {
        debug!(url = %url, "POST request (form)");

        let basic = BASE64.encode(format!("{username}:{password}"));
        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Basic {basic}"))
            .form(form)
            .send()
            .await?;

        Self::into_raw(response).await
    }

    async fn into_raw(response: reqwest::Response) -> ZoomResult<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
