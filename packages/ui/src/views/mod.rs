use dioxus::prelude::*;

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod loading;
pub use loading::LoadingView;

mod home;
pub use home::HomeView;

mod registration;
pub use registration::RegistrationView;

mod dashboard;
pub use dashboard::DashboardView;

mod editor;
pub use editor::EditorView;

mod settings;
pub use settings::SettingsView;

mod not_found;
pub use not_found::NotFoundView;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");
