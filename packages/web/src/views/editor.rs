use dioxus::prelude::*;
use ui::views::EditorView;

use super::RequireAuth;
use crate::Route;

#[allow(non_snake_case)]
#[component]
pub fn CodeEditor(projectId: String) -> Element {
    let nav = use_navigator();

    rsx! {
        RequireAuth {
            EditorView {
                project_id: projectId,
                on_dashboard: move |_| {
                    nav.push(Route::Dashboard {});
                },
            }
        }
    }
}
