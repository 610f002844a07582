use dioxus::prelude::*;

use crate::components::Spinner;

use super::VIEWS_CSS;

/// Full-page spinner shown while auth or data is loading.
#[component]
pub fn LoadingView(#[props(default = "Loading, please wait...".to_string())] message: String) -> Element {
    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        div {
            class: "loading-view",
            Spinner { label: message }
        }
    }
}
