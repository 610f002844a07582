use dioxus::prelude::*;
use store::Project;

use crate::icons::{FaEllipsisVertical, FaGlobe, FaTrashCan};
use crate::Icon;

/// Dashboard tile for one project. Clicking the card opens it; the menu offers
/// deletion.
#[component]
pub fn ProjectCard(
    project: Project,
    on_open: EventHandler<String>,
    on_delete: EventHandler<Project>,
) -> Element {
    let mut menu_open = use_signal(|| false);
    let id = project.id.clone();
    let name = project.display_name().to_string();
    let description = project.display_description().to_string();
    let modified = project.last_modified_label();

    rsx! {
        div {
            class: "project-card",
            onclick: move |_| on_open.call(id.clone()),
            div {
                class: "project-card-top",
                Icon { icon: FaGlobe, width: 24, height: 24, class: "project-card-icon" }
                div {
                    class: "project-card-menu",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    button {
                        class: "icon-btn",
                        title: "Project actions",
                        onclick: move |_| menu_open.toggle(),
                        Icon { icon: FaEllipsisVertical, width: 16, height: 16 }
                    }
                    if menu_open() {
                        div {
                            class: "menu",
                            button {
                                class: "menu-item menu-item-danger",
                                onclick: move |_| {
                                    menu_open.set(false);
                                    on_delete.call(project.clone());
                                },
                                Icon { icon: FaTrashCan, width: 14, height: 14 }
                                "Delete Project"
                            }
                        }
                    }
                }
            }
            h3 { class: "project-card-name", "{name}" }
            p { class: "project-card-description", "{description}" }
            div { class: "project-card-modified", "Last modified: {modified}" }
        }
    }
}
