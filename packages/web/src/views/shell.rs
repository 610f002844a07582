use dioxus::prelude::*;
use ui::{Footer, Header};

use crate::Route;

/// Header and footer around every page except the editor.
#[component]
pub fn Shell() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "app-shell",
            Header {
                on_home: move |_| {
                    nav.push(Route::Home { error: String::new() });
                },
                on_get_started: move |_| {
                    nav.push(Route::Registration {});
                },
            }
            main { class: "app-content", Outlet::<Route> {} }
            Footer {}
        }
    }
}
