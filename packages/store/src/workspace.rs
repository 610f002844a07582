//! # Workspace: project operations on an abstract path-addressed store
//!
//! [`Workspace`] holds every read and write the app performs against a user's
//! namespace in the realtime database. All I/O goes through the [`WorkspaceStore`]
//! trait, so the same logic runs against the remote database on the server
//! (`api::db::FirebaseDatabase`) and against [`crate::MemoryStore`] in tests.
//!
//! ## [`WorkspaceStore`] trait
//!
//! Four async methods mirroring the database's REST verbs: `get` (read a node),
//! `set` (replace a node), `update` (patch direct children), `remove` (delete a node).
//! Reading a missing node yields `Ok(None)`; removing one is not an error.
//!
//! ## Operations
//!
//! | Method | Path touched |
//! |--------|--------------|
//! | [`register_profile`](Workspace::register_profile) / [`get_profile`](Workspace::get_profile) | `users/{username}` |
//! | [`create_project`](Workspace::create_project) | `.../files/{now_ms}` (bumped until free) |
//! | [`list_projects`](Workspace::list_projects) | `.../files`, newest first |
//! | [`get_project`](Workspace::get_project) / [`delete_project`](Workspace::delete_project) | `.../files/{id}` |
//! | [`save_files`](Workspace::save_files) | `Project_Files` + `timestamp` of a project |
//! | [`update_details`](Workspace::update_details) | `Project_Name`, `Project_Description`, `timestamp` |
//! | [`get_settings`](Workspace::get_settings) / [`save_settings`](Workspace::save_settings) | `users/{username}/settings` |

use serde_json::{json, Map, Value};

use crate::error::WorkspaceError;
use crate::keys::{
    project_path, projects_path, settings_path, user_path, validate_key,
};
use crate::models::{Project, ProjectDetails, ProjectDraft, ProjectFiles, UserProfile};
use crate::settings::UserSettings;

/// Async, path-addressed JSON store.
pub trait WorkspaceStore {
    fn get(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Value>, WorkspaceError>>;
    fn set(
        &self,
        path: &str,
        value: Value,
    ) -> impl std::future::Future<Output = Result<(), WorkspaceError>>;
    fn update(
        &self,
        path: &str,
        fields: Map<String, Value>,
    ) -> impl std::future::Future<Output = Result<(), WorkspaceError>>;
    fn remove(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<(), WorkspaceError>>;
}

/// Check the "New Project" / "Project Details" name field.
pub fn validate_project_name(name: &str) -> Result<String, WorkspaceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WorkspaceError::Validation("Project name is required".to_string()));
    }
    Ok(name.to_string())
}

/// A user's workspace backed by a [`WorkspaceStore`].
pub struct Workspace<S: WorkspaceStore> {
    store: S,
}

impl<S: WorkspaceStore> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Write the profile fields under `users/{username}`.
    ///
    /// Patches rather than replaces, so an existing workspace survives a repeated
    /// sign-in through an identity provider.
    pub async fn register_profile(&self, profile: &UserProfile) -> Result<(), WorkspaceError> {
        validate_key(&profile.username)?;
        let fields = into_object(serde_json::to_value(profile)?);
        self.store.update(&user_path(&profile.username), fields).await
    }

    /// Whether anything is stored under `users/{username}`.
    pub async fn profile_exists(&self, username: &str) -> Result<bool, WorkspaceError> {
        validate_key(username)?;
        Ok(self.store.get(&user_path(username)).await?.is_some())
    }

    pub async fn get_profile(&self, username: &str) -> Result<Option<UserProfile>, WorkspaceError> {
        validate_key(username)?;
        let Some(value) = self.store.get(&user_path(username)).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!("Ignoring malformed profile for {username}: {e}");
                Ok(None)
            }
        }
    }

    /// Create a project from the "New Project" dialog.
    ///
    /// The id is the creation time in milliseconds; if that id is already taken the
    /// next free millisecond is used.
    pub async fn create_project(
        &self,
        username: &str,
        draft: ProjectDraft,
        now_ms: i64,
    ) -> Result<Project, WorkspaceError> {
        validate_key(username)?;
        let name = validate_project_name(&draft.name)?;

        let mut candidate = now_ms;
        let id = loop {
            let id = candidate.to_string();
            if self.store.get(&project_path(username, &id)).await?.is_none() {
                break id;
            }
            candidate += 1;
        };

        let project = Project {
            id,
            name,
            description: draft.description.trim().to_string(),
            files: draft.files,
            timestamp: Some(now_ms),
        };
        let fields = into_object(serde_json::to_value(&project)?);
        self.store
            .update(&project_path(username, &project.id), fields)
            .await?;
        tracing::info!("Created project {} for {username}", project.id);
        Ok(project)
    }

    /// All projects of `username`, most recently modified first.
    pub async fn list_projects(&self, username: &str) -> Result<Vec<Project>, WorkspaceError> {
        validate_key(username)?;
        let entries: Vec<(String, Value)> = match self.store.get(&projects_path(username)).await? {
            None => Vec::new(),
            Some(Value::Object(map)) => map.into_iter().collect(),
            // Numeric keys may come back as a sparse array.
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Some(other) => {
                tracing::warn!("Unexpected files node for {username}: {other}");
                Vec::new()
            }
        };

        let mut projects: Vec<Project> = entries
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<Project>(value) {
                Ok(mut project) => {
                    if project.id.is_empty() {
                        project.id = key;
                    }
                    Some(project)
                }
                Err(e) => {
                    tracing::warn!("Skipping malformed project {key}: {e}");
                    None
                }
            })
            .collect();

        projects.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(projects)
    }

    pub async fn get_project(
        &self,
        username: &str,
        project_id: &str,
    ) -> Result<Option<Project>, WorkspaceError> {
        validate_key(username)?;
        validate_key(project_id)?;
        let Some(value) = self.store.get(&project_path(username, project_id)).await? else {
            return Ok(None);
        };
        let mut project: Project = serde_json::from_value(value)?;
        if project.id.is_empty() {
            project.id = project_id.to_string();
        }
        Ok(Some(project))
    }

    /// Overwrite the three buffers of a project ("Save All").
    pub async fn save_files(
        &self,
        username: &str,
        project_id: &str,
        files: &ProjectFiles,
        now_ms: i64,
    ) -> Result<(), WorkspaceError> {
        self.require_project(username, project_id).await?;
        let fields = into_object(json!({
            "Project_Files": files,
            "timestamp": now_ms,
        }));
        self.store
            .update(&project_path(username, project_id), fields)
            .await
    }

    /// Rename / redescribe a project.
    pub async fn update_details(
        &self,
        username: &str,
        project_id: &str,
        details: &ProjectDetails,
        now_ms: i64,
    ) -> Result<ProjectDetails, WorkspaceError> {
        let details = ProjectDetails {
            name: validate_project_name(&details.name)?,
            description: details.description.trim().to_string(),
        };
        self.require_project(username, project_id).await?;
        let mut fields = into_object(serde_json::to_value(&details)?);
        fields.insert("timestamp".to_string(), json!(now_ms));
        self.store
            .update(&project_path(username, project_id), fields)
            .await?;
        Ok(details)
    }

    pub async fn delete_project(&self, username: &str, project_id: &str) -> Result<(), WorkspaceError> {
        validate_key(username)?;
        validate_key(project_id)?;
        self.store.remove(&project_path(username, project_id)).await?;
        tracing::info!("Deleted project {project_id} for {username}");
        Ok(())
    }

    /// Stored settings, or the defaults when none were saved yet.
    pub async fn get_settings(&self, username: &str) -> Result<UserSettings, WorkspaceError> {
        validate_key(username)?;
        let Some(value) = self.store.get(&settings_path(username)).await? else {
            return Ok(UserSettings::default());
        };
        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Resetting malformed settings for {username}: {e}");
            UserSettings::default()
        }))
    }

    pub async fn save_settings(
        &self,
        username: &str,
        settings: &UserSettings,
    ) -> Result<(), WorkspaceError> {
        validate_key(username)?;
        self.store
            .set(&settings_path(username), serde_json::to_value(settings)?)
            .await
    }

    async fn require_project(&self, username: &str, project_id: &str) -> Result<(), WorkspaceError> {
        validate_key(username)?;
        validate_key(project_id)?;
        match self.store.get(&project_path(username, project_id)).await? {
            Some(_) => Ok(()),
            None => Err(WorkspaceError::NotFound(format!("project {project_id}"))),
        }
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
