//! Per-call credential material.

use crate::error::{ZoomError, ZoomResult};

/// OAuth2 credential material for one tool call.
///
/// Constructed fresh for every call and dropped when the call
/// returns; nothing here is ever written to disk. At least one of
/// access token or refresh token must be present; a credential with
/// neither cannot authenticate anything and is rejected before any
/// network activity.
#[derive(Debug, Clone)]
pub struct Credentials {
    access_token: Option<String>,
    refresh_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl Credentials {
    pub fn new(
        access_token: Option<String>,
        refresh_token: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> ZoomResult<Self> {
        if access_token.is_none() && refresh_token.is_none() {
            return Err(ZoomError::Config(
                "Either access_token or refresh_token must be provided".to_string(),
            ));
        }

        Ok(Self {
            access_token,
            refresh_token,
            client_id,
            client_secret,
        })
    }

    /// Credential holding only an access token (resource calls).
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: None,
            client_id: None,
            client_secret: None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub(crate) fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub(crate) fn set_refresh_token(&mut self, token: String) {
        self.refresh_token = Some(token);
    }

    pub(crate) fn set_client(&mut self, client_id: String, client_secret: String) {
        self.client_id = Some(client_id);
        self.client_secret = Some(client_secret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_at_least_one_token() {
        let result = Credentials::new(None, None, None, None);

        match result {
            Err(ZoomError::Config(message)) => {
                assert!(message.contains("access_token or refresh_token"));
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_access_token_only() {
        let creds = Credentials::new(Some("tok".into()), None, None, None).unwrap();

        assert_eq!(creds.access_token(), Some("tok"));
        assert_eq!(creds.refresh_token(), None);
    }

    #[test]
    fn test_refresh_token_only() {
        let creds = Credentials::new(None, Some("ref".into()), None, None).unwrap();

        assert_eq!(creds.access_token(), None);
        assert_eq!(creds.refresh_token(), Some("ref"));
    }
}
