use dioxus::prelude::*;
use store::workspace::validate_project_name;

use crate::components::{Alert, AlertVariant, Button, ButtonVariant, Input, Label, Textarea};

/// Form for creating a project. Only the name is required.
#[component]
pub fn NewProjectDialog(
    on_create: EventHandler<(String, String)>,
    on_cancel: EventHandler<()>,
    #[props(default)] busy: bool,
) -> Element {
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_submit = move |_| match validate_project_name(&name()) {
        Ok(valid) => {
            error.set(None);
            on_create.call((valid, description().trim().to_string()));
        }
        Err(e) => error.set(Some(e.to_string())),
    };

    rsx! {
        div {
            class: "dialog-body",
            h2 { class: "dialog-title", "Create a New Project" }
            p {
                class: "dialog-description",
                "Please provide the project name and description. Project name is required."
            }

            if let Some(message) = error() {
                Alert { variant: AlertVariant::Destructive, "{message}" }
            }

            div {
                class: "field",
                Label { html_for: "new-project-name", "Project Name" }
                Input {
                    id: "new-project-name",
                    placeholder: "Enter project name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
            }

            div {
                class: "field",
                Label { html_for: "new-project-description", "Project Description" }
                Textarea {
                    id: "new-project-description",
                    placeholder: "Enter project description",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
            }

            div {
                class: "dialog-actions",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    disabled: busy,
                    onclick: handle_submit,
                    if busy { "Creating..." } else { "Create Project" }
                }
            }
        }
    }
}
