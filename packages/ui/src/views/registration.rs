//! Sign-up page.

use dioxus::prelude::*;
use store::validation::validate_registration;

use crate::components::{Alert, AlertVariant, Button, Input, Label};
use crate::{use_auth, Access, AuthState, GoogleButton};

use super::VIEWS_CSS;

#[component]
pub fn RegistrationView(on_registered: EventHandler<()>, on_sign_in: EventHandler<()>) -> Element {
    let mut auth = use_auth();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    use_effect(move || {
        if auth().access() == Access::Granted {
            on_registered.call(());
        }
    });

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let registration = match validate_registration(&username(), &email(), &password()) {
                Ok(r) => r,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };

            loading.set(true);
            match api::register(registration.username, registration.email, registration.password)
                .await
            {
                Ok(user) => {
                    tracing::info!("Registered {}", user.username);
                    auth.set(AuthState::signed_in(user));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h2 { class: "auth-card-title", "Create Account" }
                p { class: "auth-card-subtitle", "Join CodeNest and start building" }

                if let Some(message) = error() {
                    Alert { variant: AlertVariant::Destructive, "{message}" }
                }

                form {
                    class: "auth-form",
                    onsubmit: handle_register,
                    div {
                        class: "field",
                        Label { html_for: "register-username", "Username" }
                        Input {
                            id: "register-username",
                            placeholder: "Choose a username",
                            value: username(),
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "register-email", "Email" }
                        Input {
                            id: "register-email",
                            kind: "email",
                            placeholder: "you@example.com",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "register-password", "Password" }
                        Input {
                            id: "register-password",
                            kind: "password",
                            placeholder: "At least 6 characters",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    Button {
                        class: "btn-block",
                        submit: true,
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                div { class: "auth-divider", span { "or" } }

                GoogleButton {
                    label: "Sign up with Google",
                    on_error: move |message: String| error.set(Some(message)),
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    button {
                        class: "link-btn",
                        onclick: move |_| on_sign_in.call(()),
                        "Sign in"
                    }
                }
            }
        }
    }
}
