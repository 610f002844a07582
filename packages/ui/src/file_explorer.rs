use dioxus::prelude::*;
use store::SourceKind;

use crate::brand_icons::{FaCss3Alt, FaHtml5, FaJs};
use crate::icons::{FaBars, FaEraser, FaFloppyDisk};
use crate::Icon;

#[component]
fn FileIcon(kind: SourceKind) -> Element {
    match kind {
        SourceKind::Html => rsx! {
            Icon { icon: FaHtml5, width: 16, height: 16, class: "file-icon file-icon-html" }
        },
        SourceKind::Css => rsx! {
            Icon { icon: FaCss3Alt, width: 16, height: 16, class: "file-icon file-icon-css" }
        },
        SourceKind::JavaScript => rsx! {
            Icon { icon: FaJs, width: 16, height: 16, class: "file-icon file-icon-js" }
        },
    }
}

/// Collapsible list of the three project files with Save All and Clear.
#[component]
pub fn FileExplorer(
    active: SourceKind,
    on_select: EventHandler<SourceKind>,
    on_save_all: EventHandler<()>,
    on_clear: EventHandler<()>,
    #[props(default)] saving: bool,
) -> Element {
    let mut open = use_signal(|| true);

    rsx! {
        div {
            class: if open() { "explorer" } else { "explorer collapsed" },
            div {
                class: "explorer-header",
                if open() {
                    span { "Explorer" }
                }
                button {
                    class: "icon-btn",
                    title: "Toggle explorer",
                    onclick: move |_| open.toggle(),
                    Icon { icon: FaBars, width: 16, height: 16 }
                }
            }
            div {
                class: "explorer-files",
                for kind in SourceKind::ALL {
                    div {
                        key: "{kind.file_name()}",
                        class: if kind == active { "explorer-file active" } else { "explorer-file" },
                        title: kind.file_name(),
                        onclick: move |_| on_select.call(kind),
                        FileIcon { kind }
                        if open() {
                            span { "{kind.file_name()}" }
                        }
                    }
                }
            }
            if open() {
                div {
                    class: "explorer-footer",
                    button {
                        class: "btn btn-save",
                        disabled: saving,
                        onclick: move |_| on_save_all.call(()),
                        Icon { icon: FaFloppyDisk, width: 14, height: 14 }
                        "Save All"
                    }
                    button {
                        class: "btn btn-destructive",
                        onclick: move |_| on_clear.call(()),
                        Icon { icon: FaEraser, width: 14, height: 14 }
                        "Clear"
                    }
                }
            }
        }
    }
}
