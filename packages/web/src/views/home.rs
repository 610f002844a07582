use dioxus::prelude::*;
use ui::views::HomeView;

use crate::Route;

/// Message for the `?error=` code set by the OAuth callback; empty for none.
fn login_error_message(code: &str) -> &'static str {
    match code {
        "" => "",
        "cancelled" => "Google sign-in was cancelled",
        "missing_code" | "missing_state" => "Google sign-in returned an incomplete response",
        _ => "Google sign-in failed. Please try again.",
    }
}

#[component]
pub fn Home(error: String) -> Element {
    let nav = use_navigator();

    rsx! {
        HomeView {
            initial_error: login_error_message(&error).to_string(),
            on_signed_in: move |_| {
                nav.replace(Route::Dashboard {});
            },
            on_sign_up: move |_| {
                nav.push(Route::Registration {});
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_message() {
        assert_eq!(login_error_message(""), "");
        assert_eq!(login_error_message("cancelled"), "Google sign-in was cancelled");
        assert_eq!(
            login_error_message("oauth_error"),
            "Google sign-in failed. Please try again."
        );
    }
}
