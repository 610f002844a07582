use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::error::WorkspaceError;
use crate::workspace::WorkspaceStore;

/// In-memory WorkspaceStore for testing and running without a database.
///
/// Holds one JSON tree. Writing `null` or removing a node prunes parents that
/// become empty, the same way the remote database drops empty nodes.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    root: Arc<Mutex<Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the whole tree.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.lock().clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Map<String, Value>> {
        self.root.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn lookup<'a>(root: &'a Map<String, Value>, segs: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segs.split_first()?;
    let mut node = root.get(*first)?;
    for seg in rest {
        node = node.as_object()?.get(*seg)?;
    }
    Some(node)
}

/// Replace (or with `None`, delete) the node at `segs`, pruning empty parents.
fn write(map: &mut Map<String, Value>, segs: &[&str], value: Option<Value>) {
    let Some((first, rest)) = segs.split_first() else {
        return;
    };
    if rest.is_empty() {
        match value {
            Some(v) if !is_empty(&v) => {
                map.insert(first.to_string(), v);
            }
            _ => {
                map.remove(*first);
            }
        }
        return;
    }

    let child = map
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !child.is_object() {
        *child = Value::Object(Map::new());
    }
    if let Value::Object(inner) = child {
        write(inner, rest, value);
        if inner.is_empty() {
            map.remove(*first);
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        _ => false,
    }
}

impl WorkspaceStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, WorkspaceError> {
        let root = self.lock();
        let segs = segments(path);
        if segs.is_empty() {
            return Ok((!root.is_empty()).then(|| Value::Object(root.clone())));
        }
        Ok(lookup(&root, &segs).cloned())
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), WorkspaceError> {
        let segs = segments(path);
        if segs.is_empty() {
            return Err(WorkspaceError::InvalidKey("cannot replace the root".to_string()));
        }
        write(&mut self.lock(), &segs, Some(value));
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), WorkspaceError> {
        let base = segments(path);
        let mut root = self.lock();
        for (key, value) in fields {
            let mut segs = base.clone();
            segs.extend(segments(&key));
            write(&mut root, &segs, Some(value));
        }
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), WorkspaceError> {
        let segs = segments(path);
        if segs.is_empty() {
            self.lock().clear();
            return Ok(());
        }
        write(&mut self.lock(), &segs, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectDetails, ProjectDraft, ProjectFiles, UserProfile};
    use crate::settings::{Theme, UserSettings};
    use crate::workspace::Workspace;
    use serde_json::json;

    fn profile(username: &str) -> UserProfile {
        UserProfile {
            email: format!("{username}@example.com"),
            uid: format!("uid-{username}"),
            username: username.to_string(),
            created_at: "2025-03-14T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_path_semantics() {
        let store = MemoryStore::new();

        assert!(store.get("users/ada").await.unwrap().is_none());

        store.set("users/ada/email", json!("ada@example.com")).await.unwrap();
        assert_eq!(
            store.get("users/ada").await.unwrap(),
            Some(json!({ "email": "ada@example.com" }))
        );

        // Writing null deletes and prunes the now-empty parents
        store.set("users/ada/email", Value::Null).await.unwrap();
        assert!(store.get("users").await.unwrap().is_none());
        assert_eq!(store.snapshot(), json!({}));

        // Removing a missing node is fine
        store.remove("users/nobody").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_only_touches_named_children() {
        let store = MemoryStore::new();
        store
            .set("p", json!({ "a": 1, "b": { "c": 2 } }))
            .await
            .unwrap();

        let mut fields = Map::new();
        fields.insert("a".to_string(), json!(10));
        fields.insert("d".to_string(), json!("new"));
        store.update("p", fields).await.unwrap();

        assert_eq!(
            store.get("p").await.unwrap(),
            Some(json!({ "a": 10, "b": { "c": 2 }, "d": "new" }))
        );
    }

    #[tokio::test]
    async fn test_register_profile_keeps_workspace() {
        let ws = Workspace::new(MemoryStore::new());

        assert!(!ws.profile_exists("ada").await.unwrap());
        ws.register_profile(&profile("ada")).await.unwrap();
        ws.create_project("ada", ProjectDraft::new("First", ""), 1_000)
            .await
            .unwrap();

        // Registering again (e.g. a repeated Google sign-in) must not wipe projects
        ws.register_profile(&profile("ada")).await.unwrap();

        assert!(ws.profile_exists("ada").await.unwrap());
        assert_eq!(ws.get_profile("ada").await.unwrap(), Some(profile("ada")));
        assert_eq!(ws.list_projects("ada").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_and_list_projects() {
        let store = MemoryStore::new();
        let ws = Workspace::new(store.clone());

        // Initially empty
        assert!(ws.list_projects("ada").await.unwrap().is_empty());

        let first = ws
            .create_project("ada", ProjectDraft::new("  Portfolio ", " my site "), 1_000)
            .await
            .unwrap();
        assert_eq!(first.id, "1000");
        assert_eq!(first.name, "Portfolio");
        assert_eq!(first.description, "my site");
        assert_eq!(first.files, ProjectFiles::starter());

        ws.create_project("ada", ProjectDraft::new("Game", ""), 2_000)
            .await
            .unwrap();

        let projects = ws.list_projects("ada").await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Game");
        assert_eq!(projects[1].name, "Portfolio");

        // Stored under workspaceFiles/files with the database field names
        let raw = store
            .get("users/ada/workspaceFiles/files/1000")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw["Project_Name"], "Portfolio");
        assert_eq!(raw["id"], "1000");
        assert_eq!(raw["timestamp"], 1_000);
    }

    #[tokio::test]
    async fn test_create_project_requires_name() {
        let ws = Workspace::new(MemoryStore::new());
        let err = ws
            .create_project("ada", ProjectDraft::new("   ", "desc"), 1_000)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project name is required");
        assert!(ws.list_projects("ada").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_project_avoids_id_collision() {
        let ws = Workspace::new(MemoryStore::new());
        let a = ws.create_project("ada", ProjectDraft::new("A", ""), 5_000).await.unwrap();
        let b = ws.create_project("ada", ProjectDraft::new("B", ""), 5_000).await.unwrap();
        assert_eq!(a.id, "5000");
        assert_eq!(b.id, "5001");
        assert_eq!(ws.list_projects("ada").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_skips_malformed_and_fills_ids() {
        let store = MemoryStore::new();
        store
            .set(
                "users/ada/workspaceFiles/files",
                json!({
                    "111": { "Project_Name": "Legacy", "timestamp": 111 },
                    "222": "not a project",
                }),
            )
            .await
            .unwrap();

        let ws = Workspace::new(store);
        let projects = ws.list_projects("ada").await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "111");
        assert_eq!(projects[0].name, "Legacy");
    }

    #[tokio::test]
    async fn test_save_files_and_update_details() {
        let ws = Workspace::new(MemoryStore::new());
        let project = ws
            .create_project("ada", ProjectDraft::new("Demo", "old"), 1_000)
            .await
            .unwrap();

        let files = ProjectFiles {
            html: "<h2>x</h2>".to_string(),
            css: String::new(),
            javascript: "1 + 1".to_string(),
        };
        ws.save_files("ada", &project.id, &files, 2_000).await.unwrap();

        let details = ProjectDetails {
            name: " Renamed ".to_string(),
            description: "new".to_string(),
        };
        let applied = ws
            .update_details("ada", &project.id, &details, 3_000)
            .await
            .unwrap();
        assert_eq!(applied.name, "Renamed");

        let loaded = ws.get_project("ada", &project.id).await.unwrap().unwrap();
        assert_eq!(loaded.files, files);
        assert_eq!(loaded.name, "Renamed");
        assert_eq!(loaded.description, "new");
        assert_eq!(loaded.timestamp, Some(3_000));
    }

    #[tokio::test]
    async fn test_updates_on_missing_project_fail() {
        let ws = Workspace::new(MemoryStore::new());
        let err = ws
            .save_files("ada", "404", &ProjectFiles::default(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::WorkspaceError::NotFound(_)));

        let details = ProjectDetails {
            name: "X".to_string(),
            description: String::new(),
        };
        assert!(ws.update_details("ada", "404", &details, 1).await.is_err());
        // Nothing was created as a side effect
        assert!(ws.list_projects("ada").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_project() {
        let ws = Workspace::new(MemoryStore::new());
        let keep = ws.create_project("ada", ProjectDraft::new("Keep", ""), 1).await.unwrap();
        let drop = ws.create_project("ada", ProjectDraft::new("Drop", ""), 2).await.unwrap();

        ws.delete_project("ada", &drop.id).await.unwrap();

        let projects = ws.list_projects("ada").await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, keep.id);
        assert!(ws.get_project("ada", &drop.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_keys_are_rejected() {
        let ws = Workspace::new(MemoryStore::new());
        assert!(ws.list_projects("a.b").await.is_err());
        assert!(ws.get_project("ada", "../x").await.is_err());
        assert!(ws.delete_project("ada", "").await.is_err());
    }

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let ws = Workspace::new(MemoryStore::new());

        // Defaults when nothing is stored
        assert_eq!(ws.get_settings("ada").await.unwrap(), UserSettings::default());

        let mut settings = UserSettings::default();
        settings.theme = Theme::Dark;
        settings.line_numbers = false;
        ws.save_settings("ada", &settings).await.unwrap();

        assert_eq!(ws.get_settings("ada").await.unwrap(), settings);
    }
}
