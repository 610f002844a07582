use dioxus::prelude::*;

use crate::icons::FaTerminal;
use crate::{use_auth, Icon};

const LAYOUT_CSS: Asset = asset!("/src/layout.css");

/// Top bar with the brand and, for visitors, a "Get Started" link.
#[component]
pub fn Header(on_home: EventHandler<()>, on_get_started: EventHandler<()>) -> Element {
    let auth = use_auth();

    rsx! {
        document::Stylesheet { href: LAYOUT_CSS }
        header {
            class: "app-header",
            button {
                class: "brand",
                onclick: move |_| on_home.call(()),
                Icon { icon: FaTerminal, width: 20, height: 20 }
                span { "CodeNest" }
            }
            if !auth().loading && auth().user.is_none() {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_get_started.call(()),
                    "Get Started"
                }
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        document::Stylesheet { href: LAYOUT_CSS }
        footer {
            class: "app-footer",
            "© 2025 CodeNest. Built for people learning the web."
        }
    }
}
