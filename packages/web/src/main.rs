use dioxus::prelude::*;

use ui::components::{ToastProvider, COMPONENTS_CSS};
use ui::{AuthProvider, ThemeProvider};
use views::{
    CodeEditor, Dashboard, Home, NotFound, ProfileLayout, Registration, Settings, Shell,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
#[allow(non_snake_case)]
enum Route {
    #[route("/code-editor?:projectId")]
    CodeEditor { projectId: String },
    #[layout(Shell)]
        #[route("/?:error")]
        Home { error: String },
        #[route("/registration-page")]
        Registration {},
        #[nest("/profile")]
            #[layout(ProfileLayout)]
                #[route("/dashboard")]
                Dashboard {},
                #[route("/settings")]
                Settings {},
            #[end_layout]
        #[end_nest]
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("Failed to start the tokio runtime: {e}");
                std::process::exit(1);
            }
        };
        runtime.block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail fast on a broken configuration rather than on the first request.
    if let Err(e) = api::db::get_backend().await {
        tracing::error!("Failed to initialise the backend: {}", e);
        std::process::exit(1);
    }

    let secure = std::env::var("SESSION_SECURE")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let router = axum::Router::new()
        .route("/auth/google/callback", get(google_callback))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server stopped: {}", e);
    }
}

#[cfg(feature = "server")]
async fn google_callback(
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    use axum::response::Redirect;

    if let Some(error) = params.get("error") {
        tracing::info!("Google sign-in cancelled: {}", error);
        return Redirect::to("/?error=cancelled");
    }
    let Some(code) = params.get("code") else {
        tracing::error!("Google callback missing code");
        return Redirect::to("/?error=missing_code");
    };
    let Some(state) = params.get("state") else {
        tracing::error!("Google callback missing state");
        return Redirect::to("/?error=missing_state");
    };

    match api::complete_google_login(&session, code, state).await {
        Ok(user) => {
            tracing::info!("{} signed in with Google", user.username);
            Redirect::to("/profile/dashboard")
        }
        Err(e) => {
            tracing::error!("Google sign-in failed: {}", e);
            Redirect::to("/?error=oauth_error")
        }
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        document::Stylesheet { href: COMPONENTS_CSS }

        AuthProvider {
            ThemeProvider {
                ToastProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}
