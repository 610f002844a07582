//! The signed-in user as seen by the client.

use serde::{Deserialize, Serialize};

/// User information safe to send to the client. Tokens stay in the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub uid: String,
    pub email: String,
    /// Key of the user's node in the database.
    pub username: String,
    /// `"password"` or `"google"`.
    pub provider: String,
}

impl UserInfo {
    /// Get display name, falling back to email if the username is empty.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}
