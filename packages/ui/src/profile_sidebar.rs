use dioxus::prelude::*;

use crate::icons::{FaFolder, FaGear, FaRightFromBracket, FaUser};
use crate::{use_auth, Icon, LogoutButton};

const LAYOUT_CSS: Asset = asset!("/src/layout.css");

/// Entries of the profile sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileSection {
    Dashboard,
    Settings,
}

/// Left navigation of the `/profile` pages.
#[component]
pub fn ProfileSidebar(
    active: ProfileSection,
    on_navigate: EventHandler<ProfileSection>,
    on_logout: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let username = auth().username().unwrap_or("Profile").to_string();

    let item_class = move |section: ProfileSection| {
        if section == active {
            "sidebar-item active"
        } else {
            "sidebar-item"
        }
    };

    rsx! {
        document::Stylesheet { href: LAYOUT_CSS }
        aside {
            class: "profile-sidebar",
            div {
                class: "sidebar-user",
                Icon { icon: FaUser, width: 18, height: 18 }
                span { "{username}" }
            }
            nav {
                class: "sidebar-nav",
                button {
                    class: item_class(ProfileSection::Dashboard),
                    onclick: move |_| on_navigate.call(ProfileSection::Dashboard),
                    Icon { icon: FaFolder, width: 16, height: 16 }
                    span { "My Files" }
                }
                button {
                    class: item_class(ProfileSection::Settings),
                    onclick: move |_| on_navigate.call(ProfileSection::Settings),
                    Icon { icon: FaGear, width: 16, height: 16 }
                    span { "Settings" }
                }
            }
            div {
                class: "sidebar-footer",
                Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                LogoutButton {
                    class: "sidebar-logout",
                    on_logout: move |_| on_logout.call(()),
                }
            }
        }
    }
}
