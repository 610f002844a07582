//! Authentication context and hooks for the UI.

use api::UserInfo;
use dioxus::prelude::*;

use crate::brand_icons::FaGoogle;
use crate::Icon;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// What a protected page should do with the current auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Still asking the server; render a spinner.
    Pending,
    Granted,
    /// Nobody is signed in; send the visitor to the sign-in page.
    Denied,
}

impl AuthState {
    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn access(&self) -> Access {
        match (self.loading, &self.user) {
            (true, _) => Access::Pending,
            (false, Some(_)) => Access::Granted,
            (false, None) => Access::Denied,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
///
/// Asks the server for the session user on mount, then every 30 s so that a
/// session that expired elsewhere is noticed.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(user) => auth_state.set(AuthState {
                user,
                loading: false,
            }),
            Err(e) => {
                tracing::error!("Failed to load current user: {}", e);
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        spawn(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(30)).await;

                if auth_state.peek().loading {
                    continue;
                }
                if let Ok(user) = api::get_current_user().await {
                    if auth_state.peek().user != user {
                        auth_state.set(AuthState {
                            user,
                            loading: false,
                        });
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Full-page navigation, used for the OAuth redirect.
pub fn redirect_to(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("Ignoring redirect to {url} outside the browser");
}

/// "Continue with Google": fetches the authorization URL and leaves the app.
#[component]
pub fn GoogleButton(
    #[props(default = "Continue with Google".to_string())] label: String,
    #[props(default)] on_error: EventHandler<String>,
) -> Element {
    let mut loading = use_signal(|| false);

    let onclick = move |_| async move {
        loading.set(true);
        match api::get_login_url("google".to_string()).await {
            Ok(url) => redirect_to(&url),
            Err(e) => {
                tracing::error!("Failed to get login URL: {}", e);
                on_error.call(e.to_string());
                loading.set(false);
            }
        }
    };

    rsx! {
        button {
            class: "btn btn-outline google-btn",
            r#type: "button",
            disabled: loading(),
            onclick: onclick,
            Icon { icon: FaGoogle, width: 16, height: 16 }
            if loading() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default)] class: String,
    #[props(default)] on_logout: EventHandler<()>,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState::signed_out());
                on_logout.call(());
            }
            Err(e) => tracing::error!("Logout failed: {}", e),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            uid: "uid-1".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            provider: "password".to_string(),
        }
    }

    #[test]
    fn test_access_waits_while_loading() {
        assert_eq!(AuthState::default().access(), Access::Pending);
        let loading_with_user = AuthState {
            user: Some(user()),
            loading: true,
        };
        assert_eq!(loading_with_user.access(), Access::Pending);
    }

    #[test]
    fn test_access_after_load() {
        assert_eq!(AuthState::signed_in(user()).access(), Access::Granted);
        assert_eq!(AuthState::signed_out().access(), Access::Denied);
    }

    #[test]
    fn test_username() {
        assert_eq!(AuthState::signed_in(user()).username(), Some("ada"));
        assert_eq!(AuthState::signed_out().username(), None);
    }
}
