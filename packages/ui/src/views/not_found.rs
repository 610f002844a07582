use dioxus::prelude::*;

use crate::components::Button;

use super::VIEWS_CSS;

#[component]
pub fn NotFoundView(on_home: EventHandler<()>, #[props(default)] path: String) -> Element {
    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        div {
            class: "not-found",
            h1 { class: "not-found-code", "404" }
            p { "Oops! The page you are looking for doesn't exist." }
            if !path.is_empty() {
                p { class: "view-muted", "/{path}" }
            }
            Button { onclick: move |_| on_home.call(()), "Go to Home" }
        }
    }
}
