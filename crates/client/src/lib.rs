//! # zoomcp-client
//!
//! Async client for the Zoom Cloud API, covering the small surface the
//! zoomcp MCP server exposes: OAuth2 token refresh, cloud recording
//! listing, per-meeting recording details, and meeting transcripts.
//!
//! Credentials are supplied per call and never persisted. Every
//! operation resolves to a JSON envelope: success payloads carry
//! `status: "success"` where the upstream contract defines one, and
//! every failure becomes `{"error": ..., "status": "error"}` instead
//! of propagating past the client boundary.
//!
//! ```rust,no_run
//! use zoomcp_client::{ClientConfig, Credentials, ZoomClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::with_access_token("zoom-access-token");
//!     let client = ZoomClient::new(ClientConfig::default(), creds)?;
//!
//!     let recordings = client.list_recordings(None, None, 30, 1).await;
//!     println!("{}", serde_json::to_string_pretty(&recordings)?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod normalize;
pub mod transport;
pub mod types;

pub use client::ZoomClient;
pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::{ZoomError, ZoomResult};
pub use normalize::normalize;
