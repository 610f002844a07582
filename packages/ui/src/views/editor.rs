//! `/code-editor?projectId=...`: explorer, source editor and live preview.

use dioxus::prelude::*;
use store::workspace::validate_project_name;
use store::{render_preview, Project, ProjectFiles, SourceKind, UserSettings};

use crate::components::{
    use_toast, Alert, AlertVariant, Button, ButtonVariant, Input, Label, Textarea, Toasts,
};
use crate::icons::{FaArrowUpRightFromSquare, FaCircleInfo, FaGear, FaHouse};
use crate::{open_preview_in_new_tab, FileExplorer, Icon, PreviewPane, SourceEditor};

use super::{LoadingView, ModalOverlay, VIEWS_CSS};

const EDITOR_CSS: Asset = asset!("/src/editor.css");

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
    Loading,
    Ready(Project),
    Missing,
}

/// Write `files` to the project. `announce` toasts on success; failures always do.
async fn persist(id: String, files: ProjectFiles, mut toasts: Toasts, announce: bool) {
    match api::save_project_files(id.clone(), files).await {
        Ok(()) if announce => toasts.success("Files Saved Successfully"),
        Ok(()) => tracing::debug!("Auto-saved project {}", id),
        Err(e) => {
            tracing::error!("Failed to save project {}: {}", id, e);
            toasts.error("Could not save your files");
        }
    }
}

#[component]
pub fn EditorView(project_id: String, on_dashboard: EventHandler<()>) -> Element {
    let mut toasts = use_toast();
    let mut state = use_signal(|| LoadState::Loading);
    let mut files = use_signal(ProjectFiles::default);
    let mut settings = use_signal(UserSettings::default);
    let mut active = use_signal(|| SourceKind::Html);
    let mut saving = use_signal(|| false);
    let mut menu_open = use_signal(|| false);
    let mut show_details = use_signal(|| false);
    let mut details_name = use_signal(String::new);
    let mut details_description = use_signal(String::new);
    let mut details_error = use_signal(|| Option::<String>::None);
    let mut details_busy = use_signal(|| false);
    #[cfg(target_arch = "wasm32")]
    let mut edit_seq = use_signal(|| 0u64);

    let _loader = use_resource(use_reactive!(|(project_id,)| async move {
        state.set(LoadState::Loading);
        if project_id.is_empty() {
            state.set(LoadState::Missing);
            return;
        }

        match api::get_settings().await {
            Ok(s) => settings.set(s),
            Err(e) => tracing::error!("Failed to load settings: {}", e),
        }

        match api::get_project(project_id.clone()).await {
            Ok(Some(project)) => {
                files.set(project.files.clone());
                state.set(LoadState::Ready(project));
            }
            Ok(None) => {
                tracing::warn!("Project {} not found", project_id);
                state.set(LoadState::Missing);
            }
            Err(e) => {
                tracing::error!("Failed to load project {}: {}", project_id, e);
                toasts.error("Could not load the project");
                state.set(LoadState::Missing);
            }
        }
    }));

    let preview = use_memo(move || render_preview(&files.read()));

    let project = match state() {
        LoadState::Loading => {
            return rsx! { LoadingView {} };
        }
        LoadState::Missing => {
            return rsx! {
                document::Stylesheet { href: VIEWS_CSS }
                div {
                    class: "not-found",
                    h1 { class: "not-found-code", "Project not found" }
                    p { "It may have been deleted, or the link is incomplete." }
                    Button { onclick: move |_| on_dashboard.call(()), "Back to Dashboard" }
                }
            };
        }
        LoadState::Ready(project) => project,
    };

    #[cfg(target_arch = "wasm32")]
    let id = project.id.clone();
    let title = project.display_name().to_string();

    let handle_change = move |text: String| {
        files.write().set(active(), text);

        #[cfg(target_arch = "wasm32")]
        {
            let seq = *edit_seq.peek() + 1;
            edit_seq.set(seq);
            if let Some(delay) = settings.peek().auto_save_delay_secs() {
                let id = id.clone();
                spawn(async move {
                    gloo_timers::future::sleep(std::time::Duration::from_secs(delay.into())).await;
                    if *edit_seq.peek() == seq {
                        persist(id, files.peek().clone(), toasts, false).await;
                    }
                });
            }
        }
    };

    let save_id = project.id.clone();
    let handle_save_all = move |_: ()| {
        let id = save_id.clone();
        spawn(async move {
            saving.set(true);
            persist(id, files(), toasts, true).await;
            saving.set(false);
        });
    };

    let open_details = {
        let project = project.clone();
        move |_| {
            details_name.set(project.name.clone());
            details_description.set(project.description.clone());
            details_error.set(None);
            menu_open.set(false);
            show_details.set(true);
        }
    };

    let details_id = project.id.clone();
    let handle_update_details = move |_| {
        let name = match validate_project_name(&details_name()) {
            Ok(name) => name,
            Err(e) => {
                details_error.set(Some(e.to_string()));
                return;
            }
        };
        let id = details_id.clone();
        spawn(async move {
            details_busy.set(true);
            match api::update_project_details(id.clone(), name, details_description()).await {
                Ok(_) => {
                    tracing::info!("Updated details of project {}", id);
                    toasts.success("Change Updated Successfully");
                    show_details.set(false);
                    on_dashboard.call(());
                }
                Err(e) => {
                    tracing::error!("Failed to update project {}: {}", id, e);
                    details_error.set(Some(e.to_string()));
                }
            }
            details_busy.set(false);
        });
    };

    let kind = active();
    let source = files.read().get(kind).to_string();
    let prefs = settings();

    rsx! {
        document::Stylesheet { href: EDITOR_CSS }
        document::Stylesheet { href: VIEWS_CSS }
        div {
            class: "editor-shell",
            header {
                class: "editor-topbar",
                h1 { "{title}" }
                div {
                    class: "editor-topbar-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_dashboard.call(()),
                        Icon { icon: FaHouse, width: 14, height: 14 }
                        "DashBoard"
                    }
                    button {
                        class: "icon-btn",
                        title: "Settings",
                        onclick: move |_| menu_open.toggle(),
                        Icon { icon: FaGear, width: 18, height: 18 }
                    }
                    if menu_open() {
                        div {
                            class: "menu",
                            div { class: "menu-label", "Settings" }
                            button {
                                class: "menu-item",
                                onclick: open_details,
                                Icon { icon: FaCircleInfo, width: 14, height: 14 }
                                "Project Details"
                            }
                        }
                    }
                }
            }

            div {
                class: "editor-main",
                FileExplorer {
                    active: kind,
                    saving: saving(),
                    on_select: move |k: SourceKind| active.set(k),
                    on_save_all: handle_save_all,
                    on_clear: move |_| files.write().clear(),
                }
                div {
                    class: "editor-panes",
                    SourceEditor {
                        key: "{kind.language()}",
                        value: source,
                        language: kind.language().to_string(),
                        line_numbers: prefs.line_numbers,
                        font_size_px: prefs.font_size.px(),
                        on_change: handle_change,
                    }
                    PreviewPane { html: preview() }
                }
            }

            footer {
                class: "editor-footer",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| open_preview_in_new_tab(&preview.read()),
                    Icon { icon: FaArrowUpRightFromSquare, width: 14, height: 14 }
                    "Open in new tab"
                }
            }
        }

        if show_details() {
            ModalOverlay {
                on_close: move |_| show_details.set(false),
                div {
                    class: "dialog-body",
                    h2 { class: "dialog-title", "Update Project" }
                    p { class: "dialog-description", "Change the name or description of this project." }

                    if let Some(message) = details_error() {
                        Alert { variant: AlertVariant::Destructive, "{message}" }
                    }

                    div {
                        class: "field",
                        Label { html_for: "details-name", "Project Name" }
                        Input {
                            id: "details-name",
                            value: details_name(),
                            oninput: move |evt: FormEvent| details_name.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "details-description", "Project Description" }
                        Textarea {
                            id: "details-description",
                            value: details_description(),
                            oninput: move |evt: FormEvent| details_description.set(evt.value()),
                        }
                    }
                    div {
                        class: "dialog-actions",
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| show_details.set(false),
                            "Cancel"
                        }
                        Button {
                            disabled: details_busy(),
                            onclick: handle_update_details,
                            if details_busy() { "Updating..." } else { "Update Details" }
                        }
                    }
                }
            }
        }
    }
}
