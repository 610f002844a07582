use dioxus::prelude::*;
use ui::views::LoadingView;
use ui::{use_auth, Access};

use crate::Route;

/// Render `children` only for a signed-in user. Visitors are sent home once the
/// auth state has loaded.
#[component]
pub fn RequireAuth(children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if auth().access() == Access::Denied {
            nav.replace(Route::Home { error: String::new() });
        }
    });

    match auth().access() {
        Access::Granted => rsx! { {children} },
        Access::Pending | Access::Denied => rsx! { LoadingView {} },
    }
}
