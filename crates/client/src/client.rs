//! Zoom API facade.
//!
//! Four operations over the Zoom Cloud API. Each one builds its
//! request, performs one or more HTTP calls through the transport,
//! and resolves to a JSON envelope, errors included. Nothing here
//! returns `Err` to the caller: a `ZoomClient` operation always
//! produces a serializable result, so one bad upstream response can
//! never take down the server loop above it.

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{ZoomError, ZoomResult};
use crate::normalize::normalize;
use crate::transport::HttpTransport;
use crate::types::{MeetingRecording, TokenResponse};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Zoom API pagination cap.
const MAX_PAGE_SIZE: u32 = 300;

/// Default token lifetime when the refresh response omits
/// `expires_in`.
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Client for the Zoom Cloud API, scoped to one tool call.
///
/// Holds the credential material for the call and a fresh HTTP
/// transport; constructed per call, never shared across calls.
pub struct ZoomClient {
    config: ClientConfig,
    credentials: Credentials,
    transport: HttpTransport,
}

impl ZoomClient {
    pub fn new(config: ClientConfig, credentials: Credentials) -> ZoomResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            config,
            credentials,
            transport,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Exchange the held refresh token for a new access token.
    ///
    /// Fails without touching the network when no refresh token is
    /// held. On success the held tokens are updated and the reply
    /// carries the new pair plus an absolute `expires_at`.
    pub async fn refresh_access_token(&mut self, client_id: &str, client_secret: &str) -> Value {
        self.try_refresh_access_token(client_id, client_secret)
            .await
            .unwrap_or_else(log_and_wrap)
    }

    async fn try_refresh_access_token(
        &mut self,
        client_id: &str,
        client_secret: &str,
    ) -> ZoomResult<Value> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .ok_or_else(|| ZoomError::Config("No refresh token provided".to_string()))?
            .to_string();

        self.credentials
            .set_client(client_id.to_string(), client_secret.to_string());

        debug!("POST to OAuth token endpoint");
        let raw = self
            .transport
            .post_form(
                self.config.oauth_token_url.clone(),
                client_id,
                client_secret,
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", &refresh_token),
                ],
            )
            .await?;

        if raw.status != 200 {
            return Err(ZoomError::api("Failed to refresh token", raw.status, raw.body));
        }

        let token: TokenResponse = serde_json::from_str(&raw.body)?;
        self.credentials.set_access_token(token.access_token.clone());
        if let Some(new_refresh) = token.refresh_token {
            self.credentials.set_refresh_token(new_refresh);
        }

        let expires_in = token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
        let expires_at = (Utc::now() + Duration::seconds(expires_in)).to_rfc3339();

        Ok(json!({
            "access_token": token.access_token,
            "refresh_token": self.credentials.refresh_token(),
            "expires_at": expires_at,
            "expires_in": expires_in,
            "status": "success",
        }))
    }

    /// List the authenticated user's cloud recordings (single page).
    pub async fn list_recordings(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
        page_size: u32,
        page_number: u32,
    ) -> Value {
        self.try_list_recordings(from_date, to_date, page_size, page_number)
            .await
            .unwrap_or_else(log_and_wrap)
    }

    async fn try_list_recordings(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
        page_size: u32,
        page_number: u32,
    ) -> ZoomResult<Value> {
        let bearer = self.bearer()?.to_string();
        let url = self.config.api_base_url.join("users/me/recordings")?;

        let mut query = vec![
            ("page_size", page_size.min(MAX_PAGE_SIZE).to_string()),
            ("page_number", page_number.to_string()),
        ];
        if let Some(from) = from_date {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to_date {
            query.push(("to", to.to_string()));
        }

        let raw = self.transport.get(url, &bearer, &query).await?;
        if raw.status != 200 {
            return Err(ZoomError::api(
                "Failed to retrieve recordings",
                raw.status,
                raw.body,
            ));
        }

        let payload: Value = serde_json::from_str(&raw.body)?;
        Ok(normalize(payload))
    }

    /// Fetch the full recording metadata for one meeting, file list
    /// included.
    pub async fn get_recording_details(&self, meeting_id: &str) -> Value {
        self.try_get_recording_details(meeting_id)
            .await
            .unwrap_or_else(log_and_wrap)
    }

    async fn try_get_recording_details(&self, meeting_id: &str) -> ZoomResult<Value> {
        let bearer = self.bearer()?.to_string();
        let url = self.meeting_recordings_url(meeting_id)?;

        let raw = self.transport.get(url, &bearer, &[]).await?;
        if raw.status != 200 {
            return Err(ZoomError::api(
                "Failed to retrieve recording details",
                raw.status,
                raw.body,
            ));
        }

        let payload: Value = serde_json::from_str(&raw.body)?;
        Ok(normalize(payload))
    }

    /// Fetch every transcript file attached to a meeting's recording.
    ///
    /// Looks up the recording first; when no TRANSCRIPT-typed file
    /// exists the call stops there; no download is attempted.
    /// Downloads that come back non-200 land in a `skipped` list
    /// rather than disappearing from the result.
    pub async fn get_meeting_transcript(&self, meeting_id: &str) -> Value {
        self.try_get_meeting_transcript(meeting_id)
            .await
            .unwrap_or_else(log_and_wrap)
    }

    async fn try_get_meeting_transcript(&self, meeting_id: &str) -> ZoomResult<Value> {
        let bearer = self.bearer()?.to_string();
        let url = self.meeting_recordings_url(meeting_id)?;

        let raw = self.transport.get(url, &bearer, &[]).await?;
        if raw.status != 200 {
            return Err(ZoomError::api(
                "Failed to retrieve recording information",
                raw.status,
                raw.body,
            ));
        }

        let meeting: MeetingRecording = serde_json::from_str(&raw.body)?;
        let transcript_files: Vec<_> = meeting
            .recording_files
            .iter()
            .filter(|file| file.is_transcript())
            .collect();

        if transcript_files.is_empty() {
            return Ok(json!({
                "error": "No transcript files found for this meeting",
                "status": "error",
            }));
        }

        let mut transcripts = Vec::new();
        let mut skipped = Vec::new();
        for file in transcript_files {
            let Some(download_url) = file.download_url.as_deref() else {
                continue;
            };

            // Sequential by design: one in-flight download at a time.
            let download = self.transport.get_url(download_url, &bearer).await?;
            if download.status != 200 {
                warn!(
                    file_id = %file.id,
                    status = download.status,
                    "transcript download failed, skipping file"
                );
                skipped.push(json!({
                    "file_id": file.id,
                    "status_code": download.status,
                }));
                continue;
            }

            transcripts.push(json!({
                "file_id": file.id,
                "file_name": file.file_name,
                "recording_start": file.recording_start,
                "recording_end": file.recording_end,
                "content": download.body,
            }));
        }

        let mut result = json!({
            "meeting_id": meeting_id,
            "topic": meeting.topic,
            "meeting_duration": meeting.duration,
            "transcripts": normalize(Value::Array(transcripts)),
            "status": "success",
        });
        if !skipped.is_empty() {
            result["skipped"] = Value::Array(skipped);
        }
        Ok(result)
    }

    fn bearer(&self) -> ZoomResult<&str> {
        self.credentials
            .access_token()
            .ok_or_else(|| ZoomError::Config("No access token provided".to_string()))
    }

    fn meeting_recordings_url(&self, meeting_id: &str) -> ZoomResult<url::Url> {
        Ok(self
            .config
            .api_base_url
            .join(&format!("meetings/{meeting_id}/recordings"))?)
    }
}

/// Outer boundary of every operation: nothing escapes as `Err`.
fn log_and_wrap(err: ZoomError) -> Value {
    warn!(error = %err, "Zoom API operation failed");
    err.into_envelope()
}
