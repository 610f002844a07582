use dioxus::prelude::*;
use ui::{ProfileSection, ProfileSidebar};

use super::RequireAuth;
use crate::Route;

#[component]
pub fn ProfileLayout() -> Element {
    let nav = use_navigator();
    let route = use_route::<Route>();

    let active = match route {
        Route::Settings {} => ProfileSection::Settings,
        _ => ProfileSection::Dashboard,
    };

    rsx! {
        RequireAuth {
            div {
                class: "profile-layout",
                ProfileSidebar {
                    active,
                    on_navigate: move |section: ProfileSection| {
                        match section {
                            ProfileSection::Dashboard => nav.push(Route::Dashboard {}),
                            ProfileSection::Settings => nav.push(Route::Settings {}),
                        };
                    },
                    on_logout: move |_| {
                        nav.replace(Route::Home { error: String::new() });
                    },
                }
                div { class: "profile-main", Outlet::<Route> {} }
            }
        }
    }
}
