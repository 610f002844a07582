use dioxus::prelude::*;
use ui::views::RegistrationView;

use crate::Route;

#[component]
pub fn Registration() -> Element {
    let nav = use_navigator();

    rsx! {
        RegistrationView {
            on_registered: move |_| {
                nav.replace(Route::Dashboard {});
            },
            on_sign_in: move |_| {
                nav.push(Route::Home { error: String::new() });
            },
        }
    }
}
