//! # Domain models for users and projects
//!
//! Records stored under the `users/` tree of the realtime database. These types are
//! `Serialize + Deserialize` so they can cross the server/client boundary via Dioxus
//! server functions, and their serde names match the keys already present in the
//! database (`Project_Name`, `Project_Files`, `HTML`, `createdAt`, ...).
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserProfile`] | The node at `users/{username}`: email, provider uid, username, creation time. |
//! | [`Project`] | One project under `users/{username}/workspaceFiles/files/{id}`. |
//! | [`ProjectFiles`] | The three source buffers of a project. |
//! | [`ProjectDraft`] | What the "New Project" dialog submits; starts from the starter template. |
//! | [`ProjectDetails`] | Name/description patch sent from the editor's details dialog. |
//! | [`SourceKind`] | Which of the three buffers a file in the explorer refers to. |

use chrono::DateTime;
use serde::{Deserialize, Serialize};

const STARTER_HTML: &str = "<!DOCTYPE html>\n<html>\n<head>\n  <title>Live Preview</title>\n</head>\n<body>\n  <h1>Hello World!</h1>\n</body>\n</html>";
const STARTER_CSS: &str = "body {\n  margin: 0;\n  padding: 20px;\n}";
const STARTER_JS: &str = "console.log(\"Hello from JavaScript!\");";

/// Profile written at registration time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub uid: String,
    pub username: String,
    /// RFC 3339 timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// The HTML, CSS and JavaScript buffers of a project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFiles {
    #[serde(rename = "HTML", default)]
    pub html: String,
    #[serde(rename = "CSS", default)]
    pub css: String,
    #[serde(rename = "JavaScript", default)]
    pub javascript: String,
}

impl ProjectFiles {
    /// Files every new project starts with.
    pub fn starter() -> Self {
        Self {
            html: STARTER_HTML.to_string(),
            css: STARTER_CSS.to_string(),
            javascript: STARTER_JS.to_string(),
        }
    }

    pub fn get(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Html => &self.html,
            SourceKind::Css => &self.css,
            SourceKind::JavaScript => &self.javascript,
        }
    }

    pub fn set(&mut self, kind: SourceKind, content: String) {
        match kind {
            SourceKind::Html => self.html = content,
            SourceKind::Css => self.css = content,
            SourceKind::JavaScript => self.javascript = content,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A project stored in a user's workspace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "Project_Name", default)]
    pub name: String,
    #[serde(rename = "Project_Description", default)]
    pub description: String,
    #[serde(rename = "Project_Files", default)]
    pub files: ProjectFiles,
    /// Last modification, milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Project {
    /// Name shown on dashboard cards.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Untitled Project"
        } else {
            &self.name
        }
    }

    /// Description shown on dashboard cards.
    pub fn display_description(&self) -> &str {
        if self.description.trim().is_empty() {
            "No description"
        } else {
            &self.description
        }
    }

    /// "Last modified" label, e.g. `3/14/2025`, or `Never` without a timestamp.
    pub fn last_modified_label(&self) -> String {
        self.timestamp
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }
}

/// Input of the "New Project" dialog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub files: ProjectFiles,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            files: ProjectFiles::starter(),
        }
    }
}

/// Patch applied by the editor's "Project Details" dialog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(rename = "Project_Name")]
    pub name: String,
    #[serde(rename = "Project_Description")]
    pub description: String,
}

/// One of the three editable buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Html,
    Css,
    JavaScript,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Html, SourceKind::Css, SourceKind::JavaScript];

    /// File name shown in the explorer.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceKind::Html => "index.html",
            SourceKind::Css => "styles.css",
            SourceKind::JavaScript => "script.js",
        }
    }

    /// Language id handed to the editor.
    pub fn language(self) -> &'static str {
        match self {
            SourceKind::Html => "html",
            SourceKind::Css => "css",
            SourceKind::JavaScript => "javascript",
        }
    }
}
