//! # Firebase Authentication REST client
//!
//! Wraps the Identity Toolkit and Secure Token endpoints the app needs:
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`sign_up`](IdentityClient::sign_up) | `accounts:signUp` |
//! | [`sign_in_with_password`](IdentityClient::sign_in_with_password) | `accounts:signInWithPassword` |
//! | [`sign_in_with_idp`](IdentityClient::sign_in_with_idp) | `accounts:signInWithIdp` (Google access token) |
//! | [`update_display_name`](IdentityClient::update_display_name) | `accounts:update` |
//! | [`delete_account`](IdentityClient::delete_account) | `accounts:delete` |
//! | [`refresh`](IdentityClient::refresh) | Secure Token `token` (refresh-token grant) |
//!
//! Error responses carry a code such as `EMAIL_EXISTS` or
//! `WEAK_PASSWORD : Password should be at least 6 characters`; [`describe_auth_error`]
//! turns them into messages fit for the login and registration forms.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::config::FirebaseConfig;
use crate::error::ApiError;

/// Tokens and identity returned by every sign-in flavour.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    /// Seconds, sent as a string.
    pub expires_in: String,
}

impl AuthTokens {
    pub fn expires_in_secs(&self) -> i64 {
        self.expires_in.parse().unwrap_or(3600)
    }
}

/// Response of the refresh-token grant.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedTokens {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    pub user_id: String,
}

impl RefreshedTokens {
    pub fn expires_in_secs(&self) -> i64 {
        self.expires_in.parse().unwrap_or(3600)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Map an Identity Toolkit error code to a user-facing message.
pub fn describe_auth_error(code: &str) -> String {
    let code = code.split(" : ").next().unwrap_or(code).trim();
    match code {
        "EMAIL_EXISTS" => "An account with this email already exists".to_string(),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_string()
        }
        "INVALID_EMAIL" => "Please enter a valid email".to_string(),
        "WEAK_PASSWORD" => "Password should be at least 6 characters".to_string(),
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many attempts. Please try again later".to_string()
        }
        "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => {
            "Your session has expired. Please sign in again".to_string()
        }
        other => format!("Authentication failed: {other}"),
    }
}

/// Client for the Firebase Authentication REST API.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    api_key: String,
    identity_url: String,
    token_url: String,
}

impl IdentityClient {
    pub fn new(http: Client, config: &FirebaseConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            identity_url: config.identity_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, base: &str, method: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{base}/{method}")).map_err(ApiError::config)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T, ApiError> {
        let response = self.http.post(url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| describe_auth_error(&e.error.message))
                .unwrap_or_else(|_| format!("Authentication failed with status {status}"));
            tracing::warn!("Identity request failed ({status}): {text}");
            return Err(ApiError::Auth(message));
        }

        Ok(response.json::<T>().await?)
    }

    /// Create an email/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens, ApiError> {
        let url = self.endpoint(&self.identity_url, "accounts:signUp")?;
        self.post(
            url,
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let url = self.endpoint(&self.identity_url, "accounts:signInWithPassword")?;
        self.post(
            url,
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Sign in (or sign up) with a Google OAuth access token.
    pub async fn sign_in_with_idp(
        &self,
        google_access_token: &str,
        request_uri: &str,
    ) -> Result<AuthTokens, ApiError> {
        let url = self.endpoint(&self.identity_url, "accounts:signInWithIdp")?;
        let body = json!({
            "postBody": format!("access_token={google_access_token}&providerId=google.com"),
            "requestUri": request_uri,
            "returnIdpCredential": true,
            "returnSecureToken": true,
        });
        self.post(url, &body).await
    }

    /// Set the account's display name, which carries the workspace username.
    pub async fn update_display_name(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&self.identity_url, "accounts:update")?;
        let body = json!({
            "idToken": id_token,
            "displayName": display_name,
            "returnSecureToken": false,
        });
        let _: serde_json::Value = self.post(url, &body).await?;
        Ok(())
    }

    /// Delete the account the token belongs to.
    pub async fn delete_account(&self, id_token: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&self.identity_url, "accounts:delete")?;
        let _: serde_json::Value = self.post(url, &json!({ "idToken": id_token })).await?;
        Ok(())
    }

    /// Exchange a refresh token for a new ID token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, ApiError> {
        let url = self.endpoint(&self.token_url, "token")?;
        let body = json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        });
        self.post(url, &body).await
    }
}
