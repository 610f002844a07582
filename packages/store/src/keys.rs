//! Paths of the per-user workspace in the realtime database.
//!
//! ```text
//! users/{username}                                   UserProfile
//! users/{username}/settings                          UserSettings
//! users/{username}/workspaceFiles/files/{projectId}  Project
//! ```

use crate::error::WorkspaceError;

/// Characters the database refuses in keys.
const FORBIDDEN: [char; 6] = ['.', '$', '#', '[', ']', '/'];

/// Check that `segment` can be used as a single database key.
pub fn validate_key(segment: &str) -> Result<(), WorkspaceError> {
    if segment.is_empty() {
        return Err(WorkspaceError::InvalidKey("key must not be empty".to_string()));
    }
    if let Some(c) = segment
        .chars()
        .find(|c| FORBIDDEN.contains(c) || c.is_ascii_control())
    {
        return Err(WorkspaceError::InvalidKey(format!(
            "'{segment}' contains forbidden character {c:?}"
        )));
    }
    Ok(())
}

/// Turn a display name (e.g. from Google) into a usable username key.
///
/// Returns `None` when nothing usable is left after trimming.
pub fn sanitize_username(display_name: &str) -> Option<String> {
    let cleaned: String = display_name
        .trim()
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_ascii_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

pub fn user_path(username: &str) -> String {
    format!("users/{username}")
}

pub fn settings_path(username: &str) -> String {
    format!("users/{username}/settings")
}

pub fn projects_path(username: &str) -> String {
    format!("users/{username}/workspaceFiles/files")
}

pub fn project_path(username: &str, project_id: &str) -> String {
    format!("{}/{project_id}", projects_path(username))
}

pub fn project_files_path(username: &str, project_id: &str) -> String {
    format!("{}/Project_Files", project_path(username, project_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(user_path("ada"), "users/ada");
        assert_eq!(settings_path("ada"), "users/ada/settings");
        assert_eq!(projects_path("ada"), "users/ada/workspaceFiles/files");
        assert_eq!(
            project_path("ada", "1700000000000"),
            "users/ada/workspaceFiles/files/1700000000000"
        );
        assert_eq!(
            project_files_path("ada", "17"),
            "users/ada/workspaceFiles/files/17/Project_Files"
        );
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("ada_lovelace").is_ok());
        assert!(validate_key("Ada Lovelace").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("a.b").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a[0]").is_err());
        assert!(validate_key("tab\there").is_err());
    }

    #[test]
    fn test_sanitize_username() {
        assert_eq!(sanitize_username("  Ada L. "), Some("Ada L_".to_string()));
        assert_eq!(sanitize_username("a/b#c"), Some("a_b_c".to_string()));
        assert_eq!(sanitize_username(" ... "), None);
        assert_eq!(sanitize_username(""), None);
    }
}
