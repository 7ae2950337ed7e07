//! Cloud credential value object

use std::fmt;

/// Access credentials for the cloud object store
///
/// `Debug` never prints the secret parts.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudCredentials {
    /// Access key identifier
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Optional session token for temporary credentials
    pub session_token: Option<String>,
}

impl CloudCredentials {
    /// Create long-lived credentials
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Whether these are temporary (session) credentials
    pub fn is_temporary(&self) -> bool {
        self.session_token.is_some()
    }

    /// Access key with everything but the last four characters masked
    pub fn masked_access_key(&self) -> String {
        let visible: String = self
            .access_key_id
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{visible}")
    }
}

impl fmt::Debug for CloudCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudCredentials")
            .field("access_key_id", &self.masked_access_key())
            .field("secret_access_key", &"<redacted>")
            .field("temporary", &self.is_temporary())
            .finish()
    }
}
