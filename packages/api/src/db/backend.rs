//! Process-wide backend shared by every server function.
//!
//! [`Backend`] owns the configuration, one pooled HTTP client and the identity client.
//! It runs the sign-in flows (each ends in a [`SessionData`] ready to be put in the
//! session) and hands out [`Workspace`]s bound to the caller's ID token, refreshing
//! that token first when it is about to expire.

use chrono::Utc;
use reqwest::Client;
use serde_json::{Map, Value};
use store::keys::sanitize_username;
use store::validation::Registration;
use store::{MemoryStore, UserProfile, Workspace, WorkspaceError, WorkspaceStore};
use tokio::sync::OnceCell;
use tower_sessions::Session;

use super::firebase::FirebaseDatabase;
use crate::auth::{session, AuthTokens, FirebaseConfig, IdentityClient, SessionData};
use crate::error::ApiError;

static BACKEND: OnceCell<Backend> = OnceCell::const_new();

/// Get or initialize the backend from the environment.
pub async fn get_backend() -> Result<&'static Backend, ApiError> {
    BACKEND.get_or_try_init(|| async { Backend::from_env() }).await
}

/// The store a request works against.
#[derive(Debug, Clone)]
pub enum Database {
    Remote(FirebaseDatabase),
    Local(MemoryStore),
}

impl WorkspaceStore for Database {
    async fn get(&self, path: &str) -> Result<Option<Value>, WorkspaceError> {
        match self {
            Database::Remote(db) => db.get(path).await,
            Database::Local(mem) => mem.get(path).await,
        }
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), WorkspaceError> {
        match self {
            Database::Remote(db) => db.set(path, value).await,
            Database::Local(mem) => mem.set(path, value).await,
        }
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), WorkspaceError> {
        match self {
            Database::Remote(db) => db.update(path, fields).await,
            Database::Local(mem) => mem.update(path, fields).await,
        }
    }

    async fn remove(&self, path: &str) -> Result<(), WorkspaceError> {
        match self {
            Database::Remote(db) => db.remove(path).await,
            Database::Local(mem) => mem.remove(path).await,
        }
    }
}

pub struct Backend {
    http: Client,
    config: FirebaseConfig,
    identity: IdentityClient,
    local: MemoryStore,
}

impl Backend {
    pub fn new(http: Client, config: FirebaseConfig) -> Self {
        let identity = IdentityClient::new(http.clone(), &config);
        Self {
            http,
            config,
            identity,
            local: MemoryStore::new(),
        }
    }

    fn from_env() -> Result<Self, ApiError> {
        let config = FirebaseConfig::from_env()?;
        if config.database_url.is_none() {
            tracing::warn!("FIREBASE_DATABASE_URL not set, workspaces are kept in memory");
        }
        Ok(Self::new(Client::new(), config))
    }

    /// Workspace operations performed as the owner of `id_token`.
    pub fn workspace(&self, id_token: &str) -> Workspace<Database> {
        let database = match &self.config.database_url {
            Some(url) => Database::Remote(FirebaseDatabase::new(self.http.clone(), url, id_token)),
            None => Database::Local(self.local.clone()),
        };
        Workspace::new(database)
    }

    /// Create an email/password account and its profile.
    ///
    /// Any failure after the account exists (a taken username included) removes the
    /// account again, so the email can be registered on a retry.
    pub async fn register(&self, registration: &Registration) -> Result<SessionData, ApiError> {
        let tokens = self
            .identity
            .sign_up(&registration.email, &registration.password)
            .await?;

        if let Err(e) = self.create_profile(registration, &tokens).await {
            if let Err(delete_err) = self.identity.delete_account(&tokens.id_token).await {
                tracing::error!("Failed to remove account {}: {delete_err}", tokens.local_id);
            }
            return Err(e);
        }

        tracing::info!("Registered {} ({})", registration.username, tokens.local_id);
        Ok(session_data(
            tokens,
            registration.username.clone(),
            registration.email.clone(),
            "password",
        ))
    }

    async fn create_profile(
        &self,
        registration: &Registration,
        tokens: &AuthTokens,
    ) -> Result<(), ApiError> {
        let workspace = self.workspace(&tokens.id_token);
        if workspace.profile_exists(&registration.username).await? {
            return Err(ApiError::Validation("Username is already taken".to_string()));
        }

        self.identity
            .update_display_name(&tokens.id_token, &registration.username)
            .await?;
        workspace
            .register_profile(&UserProfile {
                email: registration.email.clone(),
                uid: tokens.local_id.clone(),
                username: registration.username.clone(),
                created_at: Utc::now().to_rfc3339(),
            })
            .await?;
        Ok(())
    }

    pub async fn sign_in_password(&self, email: &str, password: &str) -> Result<SessionData, ApiError> {
        let tokens = self.identity.sign_in_with_password(email, password).await?;
        let username = self.claim_username(&tokens, email).await?;

        tracing::info!("Password sign-in for {username}");
        Ok(session_data(tokens, username, email.to_string(), "password"))
    }

    /// Finish a Google sign-in with the access token from the OAuth callback.
    pub async fn sign_in_google(
        &self,
        access_token: &str,
        request_uri: &str,
    ) -> Result<SessionData, ApiError> {
        let tokens = self.identity.sign_in_with_idp(access_token, request_uri).await?;
        let email = tokens.email.clone().unwrap_or_default();
        let username = self.claim_username(&tokens, &email).await?;

        tracing::info!("Google sign-in for {username}");
        Ok(session_data(tokens, username, email, "google"))
    }

    /// Resolve the workspace owned by the account behind `tokens`.
    ///
    /// The display name is only a hint: the profile under it must carry the
    /// account's uid. A name held by another account gets a uid suffix, which is
    /// stored back as the display name. Missing profiles are created.
    async fn claim_username(&self, tokens: &AuthTokens, email: &str) -> Result<String, ApiError> {
        let base = derive_username(tokens.display_name.as_deref(), email, &tokens.local_id);
        let workspace = self.workspace(&tokens.id_token);

        let (username, profile) = match workspace.get_profile(&base).await? {
            Some(profile) if profile.uid != tokens.local_id => {
                let suffixed = format!("{base}_{}", uid_prefix(&tokens.local_id));
                let profile = workspace.get_profile(&suffixed).await?;
                (suffixed, profile)
            }
            profile => (base, profile),
        };

        match profile {
            Some(profile) if profile.uid == tokens.local_id => {}
            Some(_) => {
                tracing::warn!("Username {username} belongs to another account than {}", tokens.local_id);
                return Err(ApiError::auth("This account's username belongs to someone else"));
            }
            None => {
                workspace
                    .register_profile(&UserProfile {
                        email: email.to_string(),
                        uid: tokens.local_id.clone(),
                        username: username.clone(),
                        created_at: Utc::now().to_rfc3339(),
                    })
                    .await?;
                tracing::info!("Created profile {username} for account {}", tokens.local_id);
            }
        }

        if tokens.display_name.as_deref() != Some(username.as_str()) {
            self.identity
                .update_display_name(&tokens.id_token, &username)
                .await?;
        }
        Ok(username)
    }

    /// Refresh the ID token when it expires within the safety margin.
    ///
    /// Returns the (possibly updated) data and whether it changed.
    pub async fn ensure_fresh(
        &self,
        data: SessionData,
        now: i64,
    ) -> Result<(SessionData, bool), ApiError> {
        if !data.is_expired(now) {
            return Ok((data, false));
        }
        let refreshed = self.identity.refresh(&data.refresh_token).await?;
        let expires_at = now + refreshed.expires_in_secs();
        tracing::debug!("Refreshed ID token for {}", data.username);
        Ok((
            data.with_tokens(refreshed.id_token, refreshed.refresh_token, expires_at),
            true,
        ))
    }

    /// The signed-in user of `session` and their workspace.
    ///
    /// A failed refresh signs the user out.
    pub async fn session_workspace(
        &self,
        session: &Session,
    ) -> Result<(SessionData, Workspace<Database>), ApiError> {
        let data = session::require(session).await?;
        let (data, refreshed) = match self.ensure_fresh(data, Utc::now().timestamp()).await {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!("Token refresh failed, signing out: {e}");
                session.flush().await?;
                return Err(ApiError::NotAuthenticated);
            }
        };
        if refreshed {
            session::store(session, &data).await?;
        }
        let workspace = self.workspace(&data.id_token);
        Ok((data, workspace))
    }
}

fn session_data(tokens: AuthTokens, username: String, email: String, provider: &str) -> SessionData {
    let expires_at = Utc::now().timestamp() + tokens.expires_in_secs();
    SessionData {
        uid: tokens.local_id,
        username,
        email,
        provider: provider.to_string(),
        id_token: tokens.id_token,
        refresh_token: tokens.refresh_token,
        expires_at,
    }
}

fn uid_prefix(uid: &str) -> String {
    uid.chars().take(6).collect()
}

/// Username for an account: its display name, else the email's local part, else
/// a name built from the uid.
fn derive_username(display_name: Option<&str>, email: &str, uid: &str) -> String {
    display_name
        .and_then(sanitize_username)
        .or_else(|| email.split('@').next().and_then(sanitize_username))
        .unwrap_or_else(|| format!("user_{}", uid_prefix(uid)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> Backend {
        let config = FirebaseConfig {
            api_key: "test-key".to_string(),
            database_url: Some(format!("{}/db", server.uri())),
            identity_url: format!("{}/v1", server.uri()),
            token_url: format!("{}/token/v1", server.uri()),
        };
        Backend::new(Client::new(), config)
    }

    fn tokens(uid: &str, display_name: Option<&str>) -> Value {
        json!({
            "localId": uid,
            "email": "ada@example.com",
            "displayName": display_name,
            "idToken": "id-token",
            "refreshToken": "refresh-token",
            "expiresIn": "3600"
        })
    }

    fn registration() -> Registration {
        Registration {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_derive_username() {
        assert_eq!(derive_username(Some("Ada Lovelace"), "x@y.z", "uid"), "Ada Lovelace");
        assert_eq!(derive_username(Some("a.b"), "x@y.z", "uid"), "a_b");
        assert_eq!(derive_username(None, "ada.l@example.com", "uid"), "ada_l");
        assert_eq!(derive_username(Some("..."), "", "abcdefgh"), "user_abcdef");
    }

    #[tokio::test]
    async fn test_register_writes_profile() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens("uid-1", None)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:update"))
            .and(body_partial_json(json!({ "displayName": "ada" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/db/users/ada.json"))
            .and(body_partial_json(json!({
                "email": "ada@example.com",
                "uid": "uid-1",
                "username": "ada"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let data = backend(&server).register(&registration()).await.unwrap();
        assert_eq!(data.username, "ada");
        assert_eq!(data.uid, "uid-1");
        assert_eq!(data.provider, "password");
        assert!(!data.is_expired(Utc::now().timestamp()));
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens("uid-2", None)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "other@example.com", "uid": "uid-1", "username": "ada", "createdAt": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:delete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let err = backend(&server).register(&registration()).await.unwrap_err();
        assert_eq!(err.to_string(), "Username is already taken");
    }

    #[tokio::test]
    async fn test_register_removes_account_when_profile_write_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens("uid-3", None)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:update"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/db/users/ada.json"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Permission denied" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:delete"))
            .and(body_partial_json(json!({ "idToken": "id-token" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let result = backend(&server).register(&registration()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_password_sign_in_ignores_foreign_display_name() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(tokens("attacker-uid", Some("ada"))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "ada@example.com", "uid": "uid-ada", "username": "ada", "createdAt": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada_attack.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/db/users/ada_attack.json"))
            .and(body_partial_json(json!({ "uid": "attacker-uid", "username": "ada_attack" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:update"))
            .and(body_partial_json(json!({ "displayName": "ada_attack" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let data = backend(&server)
            .sign_in_password("mallory@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(data.username, "ada_attack");
        assert_eq!(data.uid, "attacker-uid");
    }

    #[tokio::test]
    async fn test_password_sign_in_rejects_when_both_names_are_owned() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(tokens("attacker-uid", Some("ada"))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "ada@example.com", "uid": "uid-ada", "username": "ada", "createdAt": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada_attack.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "x@example.com", "uid": "attack-other", "username": "ada_attack", "createdAt": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let result = backend(&server)
            .sign_in_password("mallory@example.com", "secret1")
            .await;
        assert!(matches!(result, Err(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn test_returning_password_user_keeps_profile() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens("uid-1", Some("ada"))))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "ada@example.com", "uid": "uid-1", "username": "ada", "createdAt": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:update"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let data = backend(&server)
            .sign_in_password("ada@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(data.username, "ada");
        assert_eq!(data.provider, "password");
    }

    #[tokio::test]
    async fn test_google_sign_in_suffixes_taken_name() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithIdp"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(tokens("abcdef123", Some("ada"))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "other@example.com", "uid": "uid-1", "username": "ada", "createdAt": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada_abcdef.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/db/users/ada_abcdef.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:update"))
            .and(body_partial_json(json!({ "displayName": "ada_abcdef" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let data = backend(&server)
            .sign_in_google("google-token", "http://localhost:8080/auth/google/callback")
            .await
            .unwrap();
        assert_eq!(data.username, "ada_abcdef");
        assert_eq!(data.provider, "google");
    }

    #[tokio::test]
    async fn test_returning_google_user_keeps_profile() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithIdp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens("uid-1", Some("ada"))))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/db/users/ada.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "ada@example.com", "uid": "uid-1", "username": "ada", "createdAt": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let data = backend(&server)
            .sign_in_google("google-token", "http://localhost:8080/auth/google/callback")
            .await
            .unwrap();
        assert_eq!(data.username, "ada");
    }

    #[tokio::test]
    async fn test_ensure_fresh_refreshes_expired_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id_token": "new-id",
                "refresh_token": "new-refresh",
                "expires_in": "3600",
                "user_id": "uid-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend(&server);
        let data = SessionData {
            uid: "uid-1".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            provider: "password".to_string(),
            id_token: "old-id".to_string(),
            refresh_token: "old-refresh".to_string(),
            expires_at: 1_000,
        };

        let (fresh, changed) = backend.ensure_fresh(data.clone(), 100).await.unwrap();
        assert!(!changed);
        assert_eq!(fresh.id_token, "old-id");

        let (fresh, changed) = backend.ensure_fresh(data, 990).await.unwrap();
        assert!(changed);
        assert_eq!(fresh.id_token, "new-id");
        assert_eq!(fresh.expires_at, 990 + 3600);
    }

    #[tokio::test]
    async fn test_local_workspace_without_database_url() {
        let config = FirebaseConfig {
            api_key: "k".to_string(),
            database_url: None,
            identity_url: "http://localhost/v1".to_string(),
            token_url: "http://localhost/token".to_string(),
        };
        let backend = Backend::new(Client::new(), config);

        let created = backend
            .workspace("a")
            .create_project("ada", store::ProjectDraft::new("Site", ""), 1)
            .await
            .unwrap();
        let listed = backend.workspace("b").list_projects("ada").await.unwrap();
        assert_eq!(listed, vec![created]);
    }
}
