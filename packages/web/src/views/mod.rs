mod shell;
pub use shell::Shell;

mod guard;
pub use guard::RequireAuth;

mod profile_layout;
pub use profile_layout::ProfileLayout;

mod home;
pub use home::Home;

mod registration;
pub use registration::Registration;

mod dashboard;
pub use dashboard::Dashboard;

mod settings;
pub use settings::Settings;

mod editor;
pub use editor::CodeEditor;

mod not_found;
pub use not_found::NotFound;
