//! # API crate: fullstack server functions for CodeNest
//!
//! Defines every Dioxus server function the web front end calls, along with the
//! server-only modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` inside | Firebase identity client, Google OAuth with PKCE, session data |
//! | [`db`] | `server` inside | Realtime Database REST store and the process-wide backend |
//! | [`error`] | `server` | [`ApiError`](error::ApiError) |
//! | [`models`] | none | Client-safe [`UserInfo`] |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` below is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub.
//!
//! - **Authentication**: `get_current_user`, `get_login_url`, `logout`, `register`, `login_password`
//! - **Projects**: `list_projects`, `get_project`, `create_project`, `save_project_files`,
//!   `update_project_details`, `delete_project`
//! - **Settings**: `get_settings`, `save_settings`
//!
//! [`complete_google_login`] is not a server function; the web crate's
//! `/auth/google/callback` route calls it directly.

use dioxus::prelude::*;

pub mod auth;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;

pub use models::UserInfo;
pub use store::{Project, ProjectDetails, ProjectFiles, UserSettings};

#[cfg(feature = "server")]
use error::ApiError;

/// Flatten an [`ApiError`] into the message the client shows.
#[cfg(feature = "server")]
fn server_error(e: ApiError) -> ServerFnError {
    match &e {
        ApiError::Auth(_) | ApiError::Validation(_) | ApiError::NotAuthenticated => {
            tracing::debug!("Request rejected: {e}");
        }
        ApiError::Workspace(store::WorkspaceError::Validation(_))
        | ApiError::Workspace(store::WorkspaceError::NotFound(_)) => {
            tracing::debug!("Request rejected: {e}");
        }
        _ => tracing::error!("Request failed: {e}"),
    }
    ServerFnError::new(e.to_string())
}

#[cfg(feature = "server")]
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let data = auth::session::load(&session).await.map_err(server_error)?;
    Ok(data.map(|d| d.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Get the OAuth login URL for a provider.
///
/// The CSRF state and PKCE verifier are kept in the session until the callback.
#[cfg(feature = "server")]
#[get("/api/auth/login/:provider", session: tower_sessions::Session)]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    match provider.as_str() {
        "google" => {
            let oauth = auth::GoogleOAuth::new().map_err(server_error)?;
            let request = oauth.generate_auth_url();
            session
                .insert(auth::OAUTH_STATE_KEY, &request.state)
                .await
                .map_err(|e| server_error(e.into()))?;
            session
                .insert(auth::PKCE_VERIFIER_KEY, &request.pkce_verifier)
                .await
                .map_err(|e| server_error(e.into()))?;
            Ok(request.url)
        }
        _ => Err(ServerFnError::new(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/login/:provider")]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Handle the Google OAuth callback: check the CSRF state, exchange the code and
/// sign the user in to Firebase.
#[cfg(feature = "server")]
pub async fn complete_google_login(
    session: &tower_sessions::Session,
    code: &str,
    state: &str,
) -> Result<UserInfo, ApiError> {
    let expected: Option<String> = session.remove(auth::OAUTH_STATE_KEY).await?;
    let verifier: Option<String> = session.remove(auth::PKCE_VERIFIER_KEY).await?;

    let (Some(expected), Some(verifier)) = (expected, verifier) else {
        return Err(ApiError::auth("Invalid or expired OAuth state"));
    };
    if expected != state {
        return Err(ApiError::auth("Invalid or expired OAuth state"));
    }

    let oauth = auth::GoogleOAuth::new()?;
    let access_token = oauth.exchange_code(code, verifier).await?;

    let backend = db::get_backend().await?;
    let data = backend
        .sign_in_google(&access_token, oauth.redirect_uri())
        .await?;
    auth::session::sign_in(session, &data).await?;

    Ok(data.to_info())
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| server_error(e.into()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Register a new user with username, email and password.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    username: String,
    email: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    let registration = store::validation::validate_registration(&username, &email, &password)
        .map_err(|e| server_error(ApiError::Validation(e)))?;

    let backend = db::get_backend().await.map_err(server_error)?;
    let data = backend.register(&registration).await.map_err(server_error)?;
    auth::session::sign_in(&session, &data)
        .await
        .map_err(server_error)?;

    Ok(data.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    username: String,
    email: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    let (email, password) = store::validation::validate_login(&email, &password)
        .map_err(|e| server_error(ApiError::Validation(e)))?;

    let backend = db::get_backend().await.map_err(server_error)?;
    let data = backend
        .sign_in_password(&email, &password)
        .await
        .map_err(server_error)?;
    auth::session::sign_in(&session, &data)
        .await
        .map_err(server_error)?;

    Ok(data.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Projects of the signed-in user, most recently modified first.
#[cfg(feature = "server")]
#[get("/api/projects", session: tower_sessions::Session)]
pub async fn list_projects() -> Result<Vec<Project>, ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .list_projects(&user.username)
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[get("/api/projects")]
pub async fn list_projects() -> Result<Vec<Project>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Load one project; `None` when it does not exist.
#[cfg(feature = "server")]
#[get("/api/projects/:id", session: tower_sessions::Session)]
pub async fn get_project(id: String) -> Result<Option<Project>, ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .get_project(&user.username, &id)
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[get("/api/projects/:id")]
pub async fn get_project(id: String) -> Result<Option<Project>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a project from the starter template.
#[cfg(feature = "server")]
#[post("/api/projects/create", session: tower_sessions::Session)]
pub async fn create_project(name: String, description: String) -> Result<Project, ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .create_project(
            &user.username,
            store::ProjectDraft::new(name, description),
            now_ms(),
        )
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[post("/api/projects/create")]
pub async fn create_project(name: String, description: String) -> Result<Project, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Overwrite the three source buffers of a project.
#[cfg(feature = "server")]
#[post("/api/projects/files", session: tower_sessions::Session)]
pub async fn save_project_files(id: String, files: ProjectFiles) -> Result<(), ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .save_files(&user.username, &id, &files, now_ms())
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[post("/api/projects/files")]
pub async fn save_project_files(id: String, files: ProjectFiles) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Rename and redescribe a project.
#[cfg(feature = "server")]
#[post("/api/projects/details", session: tower_sessions::Session)]
pub async fn update_project_details(
    id: String,
    name: String,
    description: String,
) -> Result<ProjectDetails, ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .update_details(
            &user.username,
            &id,
            &ProjectDetails { name, description },
            now_ms(),
        )
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[post("/api/projects/details")]
pub async fn update_project_details(
    id: String,
    name: String,
    description: String,
) -> Result<ProjectDetails, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/projects/delete", session: tower_sessions::Session)]
pub async fn delete_project(id: String) -> Result<(), ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .delete_project(&user.username, &id)
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[post("/api/projects/delete")]
pub async fn delete_project(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Stored settings of the signed-in user, or the defaults.
#[cfg(feature = "server")]
#[get("/api/settings", session: tower_sessions::Session)]
pub async fn get_settings() -> Result<UserSettings, ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .get_settings(&user.username)
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[get("/api/settings")]
pub async fn get_settings() -> Result<UserSettings, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/settings/save", session: tower_sessions::Session)]
pub async fn save_settings(settings: UserSettings) -> Result<(), ServerFnError> {
    let backend = db::get_backend().await.map_err(server_error)?;
    let (user, workspace) = backend
        .session_workspace(&session)
        .await
        .map_err(server_error)?;

    workspace
        .save_settings(&user.username, &settings)
        .await
        .map_err(|e| server_error(e.into()))
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/save")]
pub async fn save_settings(settings: UserSettings) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
