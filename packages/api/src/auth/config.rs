//! Firebase and OAuth configuration from environment variables.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::error::ApiError;

const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Firebase project settings.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    pub api_key: String,
    /// Realtime Database root, e.g. `https://my-app-default-rtdb.firebaseio.com`.
    /// Without one, workspaces live in process memory.
    pub database_url: Option<String>,
    /// Identity Toolkit base URL (overridable for the emulator).
    pub identity_url: String,
    /// Secure Token service base URL.
    pub token_url: String,
}

impl FirebaseConfig {
    /// Read `FIREBASE_*` variables, loading `.env` first.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("FIREBASE_API_KEY")
            .map_err(|_| ApiError::config("FIREBASE_API_KEY not set"))?;
        let database_url = std::env::var("FIREBASE_DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string());

        Ok(Self {
            api_key,
            database_url,
            identity_url: std::env::var("FIREBASE_IDENTITY_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTITY_URL.to_string()),
            token_url: std::env::var("FIREBASE_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
        })
    }
}

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Create Google OAuth config from environment variables.
    pub fn google() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let client_id = std::env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| ApiError::config("GOOGLE_CLIENT_ID not set"))?;
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET")
            .map_err(|_| ApiError::config("GOOGLE_CLIENT_SECRET not set"))?;
        let redirect_uri = std::env::var("AUTH_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/auth/google/callback".to_string());

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new("https://accounts.google.com/o/oauth2/v2/auth".to_string())
                .map_err(ApiError::config)?,
            token_url: TokenUrl::new("https://oauth2.googleapis.com/token".to_string())
                .map_err(ApiError::config)?,
            redirect_url: RedirectUrl::new(redirect_uri).map_err(ApiError::config)?,
        })
    }
}
