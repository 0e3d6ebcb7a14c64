//! Configuration for the Zoom client.

use std::time::Duration;
use url::Url;

/// Configuration for a [`ZoomClient`](crate::ZoomClient).
///
/// The defaults point at the production Zoom endpoints; tests override
/// both URLs to aim at a mock server. There is deliberately no retry
/// configuration: every operation performs a single attempt and
/// reports the outcome as-is.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for resource calls (`users/me/recordings`, ...).
    pub api_base_url: Url,
    /// OAuth2 token endpoint for refresh-token exchanges.
    pub oauth_token_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with custom endpoints.
    pub fn new(api_base_url: Url, oauth_token_url: Url) -> Self {
        Self {
            api_base_url,
            oauth_token_url,
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Trailing slash matters: Url::join treats the last
            // segment as a file otherwise.
            api_base_url: Url::parse("https://api.zoom.us/v2/").unwrap(),
            oauth_token_url: Url::parse("https://zoom.us/oauth/token").unwrap(),
            timeout: Duration::from_secs(30),
        }
    }
}
