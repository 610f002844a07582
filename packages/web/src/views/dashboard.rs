use dioxus::prelude::*;
use ui::views::DashboardView;

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();

    rsx! {
        DashboardView {
            on_open_project: move |id: String| {
                nav.push(Route::CodeEditor { projectId: id });
            },
        }
    }
}
