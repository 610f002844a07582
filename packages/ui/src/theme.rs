//! Applies the signed-in user's colour scheme to the whole app.

use dioxus::prelude::*;
use store::Theme;

use crate::use_auth;

/// Class on the app root that selects the CSS palette for `theme`.
pub fn theme_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "theme-light",
        Theme::Dark => "theme-dark",
        Theme::System => "theme-system",
    }
}

/// The active theme. Writing to it restyles the app immediately.
pub fn use_theme() -> Signal<Theme> {
    use_context::<Signal<Theme>>()
}

/// Loads the theme from the user's settings whenever someone signs in, and
/// falls back to [`Theme::System`] when nobody is.
#[component]
pub fn ThemeProvider(children: Element) -> Element {
    let auth = use_auth();
    let mut theme = use_context_provider(|| Signal::new(Theme::default()));

    let _ = use_resource(move || async move {
        if auth.read().user.is_none() {
            theme.set(Theme::default());
            return;
        }
        match api::get_settings().await {
            Ok(settings) => theme.set(settings.theme),
            Err(e) => tracing::warn!("Failed to load theme: {}", e),
        }
    });

    rsx! {
        div { class: "theme-root {theme_class(theme())}", {children} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_class_matches_stylesheet() {
        assert_eq!(theme_class(Theme::Light), "theme-light");
        assert_eq!(theme_class(Theme::Dark), "theme-dark");
        assert_eq!(theme_class(Theme::parse("system")), "theme-system");
        assert_eq!(theme_class(Theme::parse("unknown")), "theme-system");
    }
}
