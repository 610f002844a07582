//! Session data types and helpers.
//!
//! The signed-in user is kept in the server-side session as a single
//! [`SessionData`] value. It carries the Firebase ID and refresh tokens so that
//! database calls can be made on the user's behalf without the browser ever
//! seeing them.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::ApiError;
use crate::models::UserInfo;

/// Key for the signed-in user.
pub const SESSION_AUTH_KEY: &str = "auth";
/// Key for the pending OAuth CSRF state.
pub const OAUTH_STATE_KEY: &str = "oauth_state";
/// Key for the pending PKCE verifier.
pub const PKCE_VERIFIER_KEY: &str = "pkce_verifier";

/// Refresh ID tokens this many seconds before they actually expire.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Session data stored in the session store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub uid: String,
    pub username: String,
    pub email: String,
    /// `"password"` or `"google"`.
    pub provider: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Unix seconds at which `id_token` stops being accepted.
    pub expires_at: i64,
}

impl SessionData {
    /// Whether the ID token should be refreshed at `now` (Unix seconds).
    pub fn is_expired(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    /// Replace the tokens after a refresh.
    pub fn with_tokens(mut self, id_token: String, refresh_token: String, expires_at: i64) -> Self {
        self.id_token = id_token;
        self.refresh_token = refresh_token;
        self.expires_at = expires_at;
        self
    }

    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            uid: self.uid.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            provider: self.provider.clone(),
        }
    }
}

/// Read the signed-in user, if any.
pub async fn load(session: &Session) -> Result<Option<SessionData>, ApiError> {
    Ok(session.get::<SessionData>(SESSION_AUTH_KEY).await?)
}

/// Read the signed-in user or fail with [`ApiError::NotAuthenticated`].
pub async fn require(session: &Session) -> Result<SessionData, ApiError> {
    load(session).await?.ok_or(ApiError::NotAuthenticated)
}

/// Store a freshly signed-in user under a new session id.
pub async fn sign_in(session: &Session, data: &SessionData) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session.insert(SESSION_AUTH_KEY, data).await?;
    Ok(())
}

/// Overwrite the stored user without cycling the id (token refresh).
pub async fn store(session: &Session, data: &SessionData) -> Result<(), ApiError> {
    session.insert(SESSION_AUTH_KEY, data).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(expires_at: i64) -> SessionData {
        SessionData {
            uid: "uid-1".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            provider: "password".to_string(),
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_expiry_margin() {
        let d = data(1_000);
        assert!(!d.is_expired(900));
        assert!(d.is_expired(940));
        assert!(d.is_expired(1_200));
    }

    #[test]
    fn test_with_tokens() {
        let d = data(1_000).with_tokens("new-id".into(), "new-refresh".into(), 5_000);
        assert_eq!(d.id_token, "new-id");
        assert_eq!(d.refresh_token, "new-refresh");
        assert!(!d.is_expired(1_000));
        assert_eq!(d.username, "ada");
    }

    #[test]
    fn test_to_info_hides_tokens() {
        let info = data(0).to_info();
        assert_eq!(info.uid, "uid-1");
        assert_eq!(info.username, "ada");
        assert_eq!(info.provider, "password");
    }
}
