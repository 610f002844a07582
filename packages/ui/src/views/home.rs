//! Landing page: hero, feature cards and the sign-in card.

use dioxus::prelude::*;
use store::validation::validate_login;

use crate::components::{Alert, AlertVariant, Button, Input, Label};
use crate::icons::{FaBook, FaCode, FaFolderOpen, FaUsers};
use crate::{use_auth, Access, AuthState, GoogleButton, Icon};

use super::VIEWS_CSS;

const FEATURES: [(&str, &str); 4] = [
    ("Built-in Editor", "Write HTML, CSS and JavaScript with a live preview."),
    ("Community", "Learn alongside other people building for the web."),
    ("Projects", "Keep every experiment saved in your own workspace."),
    ("Resources", "Guides and references to help you grow."),
];

#[component]
fn FeatureCard(index: usize, title: String, text: String) -> Element {
    let icon = match index {
        0 => rsx! { Icon { icon: FaCode, width: 22, height: 22 } },
        1 => rsx! { Icon { icon: FaUsers, width: 22, height: 22 } },
        2 => rsx! { Icon { icon: FaFolderOpen, width: 22, height: 22 } },
        _ => rsx! { Icon { icon: FaBook, width: 22, height: 22 } },
    };
    rsx! {
        div {
            class: "feature-card",
            div { class: "feature-icon", {icon} }
            h3 { "{title}" }
            p { "{text}" }
        }
    }
}

/// Home page. Signed-in visitors are handed to `on_signed_in`.
///
/// A non-empty `initial_error` is a failure reported by the OAuth callback.
#[component]
pub fn HomeView(
    on_signed_in: EventHandler<()>,
    on_sign_up: EventHandler<()>,
    #[props(default)] initial_error: String,
) -> Element {
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(move || (!initial_error.is_empty()).then_some(initial_error));
    let mut submitting = use_signal(|| false);

    use_effect(move || {
        if auth().access() == Access::Granted {
            on_signed_in.call(());
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let (email, password) = match validate_login(&email(), &password()) {
                Ok(credentials) => credentials,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };

            submitting.set(true);
            match api::login_password(email, password).await {
                Ok(user) => auth.set(AuthState::signed_in(user)),
                Err(e) => {
                    tracing::debug!("Sign-in failed: {}", e);
                    error.set(Some("Invalid email or password".to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        div {
            class: "home",
            section {
                class: "hero",
                div {
                    class: "hero-copy",
                    h1 { class: "hero-title", "Share. Code. Grow." }
                    p {
                        class: "hero-subtitle",
                        "A place to write, preview and keep your web projects while you learn."
                    }
                    div {
                        class: "feature-grid",
                        for (index, (title, text)) in FEATURES.into_iter().enumerate() {
                            FeatureCard {
                                key: "{title}",
                                index,
                                title: title.to_string(),
                                text: text.to_string(),
                            }
                        }
                    }
                }

                div {
                    class: "auth-card",
                    h2 { class: "auth-card-title", "Welcome" }
                    p { class: "auth-card-subtitle", "Sign in to continue to your projects" }

                    if let Some(message) = error() {
                        Alert { variant: AlertVariant::Destructive, "{message}" }
                    }

                    form {
                        class: "auth-form",
                        onsubmit: handle_login,
                        div {
                            class: "field",
                            Label { html_for: "login-email", "Email" }
                            Input {
                                id: "login-email",
                                kind: "email",
                                placeholder: "you@example.com",
                                value: email(),
                                oninput: move |evt: FormEvent| email.set(evt.value()),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "login-password", "Password" }
                            Input {
                                id: "login-password",
                                kind: "password",
                                placeholder: "Password",
                                value: password(),
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }
                        }
                        Button {
                            class: "btn-block",
                            submit: true,
                            disabled: submitting(),
                            if submitting() { "Signing in..." } else { "Sign in" }
                        }
                    }

                    div { class: "auth-divider", span { "or" } }

                    GoogleButton {
                        on_error: move |message: String| error.set(Some(message)),
                    }

                    p {
                        class: "auth-switch",
                        "Don't have an account? "
                        button {
                            class: "link-btn",
                            onclick: move |_| on_sign_up.call(()),
                            "Sign up"
                        }
                    }
                }
            }
        }
    }
}
