//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}
pub mod brand_icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

pub mod views;

mod auth;
pub use auth::{redirect_to, use_auth, Access, AuthProvider, AuthState, GoogleButton, LogoutButton};

mod theme;
pub use theme::{theme_class, use_theme, ThemeProvider};

mod header;
pub use header::{Footer, Header};

mod profile_sidebar;
pub use profile_sidebar::{ProfileSection, ProfileSidebar};

mod new_project_dialog;
pub use new_project_dialog::NewProjectDialog;

mod project_card;
pub use project_card::ProjectCard;

mod code_editor;
pub use code_editor::SourceEditor;

mod file_explorer;
pub use file_explorer::FileExplorer;

mod preview_pane;
pub use preview_pane::{open_preview_in_new_tab, PreviewPane};
