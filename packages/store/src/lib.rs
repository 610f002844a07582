pub mod error;
pub mod keys;
pub mod models;
pub mod preview;
pub mod settings;
pub mod validation;
pub mod workspace;

mod memory;
pub use memory::MemoryStore;

pub use error::WorkspaceError;
pub use models::{Project, ProjectDetails, ProjectDraft, ProjectFiles, SourceKind, UserProfile};
pub use preview::render_preview;
pub use settings::{FontSize, PrivacySettings, Theme, UserSettings};
pub use workspace::{Workspace, WorkspaceStore};
