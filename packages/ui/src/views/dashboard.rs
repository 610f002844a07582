//! `/profile/dashboard`: the signed-in user's projects.

use dioxus::prelude::*;
use store::Project;

use crate::components::{use_toast, Button, ButtonVariant, Spinner, Toasts};
use crate::icons::FaPlus;
use crate::{use_auth, Icon, NewProjectDialog, ProjectCard};

use super::{ModalOverlay, VIEWS_CSS};

/// Seconds between background refreshes of the project list.
#[cfg(target_arch = "wasm32")]
const REFRESH_INTERVAL_SECS: u64 = 30;

/// Fetch the project list into `projects`. `None` in the signal means "not loaded yet".
async fn reload(mut projects: Signal<Option<Vec<Project>>>, mut toasts: Toasts) {
    match api::list_projects().await {
        Ok(list) => projects.set(Some(list)),
        Err(e) => {
            tracing::error!("Failed to load projects: {}", e);
            toasts.error("Could not load your projects");
            if projects.peek().is_none() {
                projects.set(Some(Vec::new()));
            }
        }
    }
}

#[component]
pub fn DashboardView(on_open_project: EventHandler<String>) -> Element {
    let auth = use_auth();
    let mut toasts = use_toast();
    let projects = use_signal(|| Option::<Vec<Project>>::None);
    let mut show_new = use_signal(|| false);
    let mut creating = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Project>::None);
    let mut deleting = use_signal(|| false);

    let _loader = use_resource(move || async move {
        reload(projects, toasts).await;
    });

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        spawn(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(REFRESH_INTERVAL_SECS))
                    .await;
                if let Ok(list) = api::list_projects().await {
                    if projects.peek().as_ref() != Some(&list) {
                        let mut projects = projects;
                        projects.set(Some(list));
                    }
                }
            }
        });
    });

    let handle_create = move |(name, description): (String, String)| {
        spawn(async move {
            creating.set(true);
            match api::create_project(name, description).await {
                Ok(project) => {
                    tracing::info!("Created project {}", project.id);
                    show_new.set(false);
                    reload(projects, toasts).await;
                }
                Err(e) => {
                    tracing::error!("Failed to create project: {}", e);
                    toasts.error(e.to_string());
                }
            }
            creating.set(false);
        });
    };

    let handle_confirm_delete = move |_| {
        let Some(project) = pending_delete() else {
            return;
        };
        spawn(async move {
            deleting.set(true);
            match api::delete_project(project.id.clone()).await {
                Ok(()) => {
                    tracing::info!("Deleted project {}", project.id);
                    reload(projects, toasts).await;
                }
                Err(e) => {
                    tracing::error!("Failed to delete project {}: {}", project.id, e);
                    toasts.error("Could not delete the project");
                }
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let Some(username) = auth().username().map(str::to_string) else {
        return rsx! {
            document::Stylesheet { href: VIEWS_CSS }
            div { class: "view-page", Spinner { label: "Loading your profile..." } }
        };
    };

    let files = match projects() {
        None => rsx! { Spinner { label: "Loading your files..." } },
        Some(list) if list.is_empty() => rsx! {
            div {
                class: "empty-state",
                h2 { "No projects yet" }
                p { "Create your first project to start coding." }
            }
        },
        Some(list) => rsx! {
            div {
                class: "project-grid",
                for project in list {
                    ProjectCard {
                        key: "{project.id}",
                        project: project.clone(),
                        on_open: move |id: String| on_open_project.call(id),
                        on_delete: move |p: Project| pending_delete.set(Some(p)),
                    }
                }
            }
        },
    };

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Welcome, {username}" }
                Button {
                    onclick: move |_| show_new.set(true),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "New Project"
                }
            }

            {files}
        }

        if show_new() {
            ModalOverlay {
                on_close: move |_| show_new.set(false),
                NewProjectDialog {
                    busy: creating(),
                    on_create: handle_create,
                    on_cancel: move |_| show_new.set(false),
                }
            }
        }

        if let Some(project) = pending_delete() {
            ModalOverlay {
                on_close: move |_| pending_delete.set(None),
                div {
                    class: "dialog-body",
                    h2 { class: "dialog-title", "Delete Project" }
                    p {
                        class: "dialog-description",
                        "Are you sure you want to delete \"{project.display_name()}\"? This action cannot be undone."
                    }
                    div {
                        class: "dialog-actions",
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| pending_delete.set(None),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: deleting(),
                            onclick: handle_confirm_delete,
                            if deleting() { "Deleting..." } else { "Delete" }
                        }
                    }
                }
            }
        }
    }
}
