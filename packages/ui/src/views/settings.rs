use dioxus::prelude::*;
use store::{FontSize, Theme, UserSettings};

use crate::components::{use_toast, Button, Spinner};
use crate::icons::{FaBell, FaCode, FaPalette, FaShieldHalved};
use crate::{use_theme, Icon};

use super::VIEWS_CSS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SettingsTab {
    Appearance,
    Editor,
    Notifications,
    Privacy,
}

impl SettingsTab {
    const ALL: [SettingsTab; 4] = [
        SettingsTab::Appearance,
        SettingsTab::Editor,
        SettingsTab::Notifications,
        SettingsTab::Privacy,
    ];

    fn label(self) -> &'static str {
        match self {
            SettingsTab::Appearance => "Appearance",
            SettingsTab::Editor => "Editor",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Privacy => "Privacy",
        }
    }
}

#[component]
fn TabIcon(tab: SettingsTab) -> Element {
    match tab {
        SettingsTab::Appearance => rsx! { Icon { icon: FaPalette, width: 14, height: 14 } },
        SettingsTab::Editor => rsx! { Icon { icon: FaCode, width: 14, height: 14 } },
        SettingsTab::Notifications => rsx! { Icon { icon: FaBell, width: 14, height: 14 } },
        SettingsTab::Privacy => rsx! { Icon { icon: FaShieldHalved, width: 14, height: 14 } },
    }
}

/// A labelled checkbox row.
#[component]
fn Toggle(id: String, label: String, hint: String, checked: bool, onchange: EventHandler<bool>) -> Element {
    rsx! {
        div {
            class: "setting-row",
            div {
                label { class: "label", r#for: "{id}", "{label}" }
                p { class: "view-muted", "{hint}" }
            }
            input {
                id: "{id}",
                class: "switch",
                r#type: "checkbox",
                checked,
                onchange: move |evt: FormEvent| onchange.call(evt.checked()),
            }
        }
    }
}

fn update(mut settings: Signal<Option<UserSettings>>, apply: impl FnOnce(&mut UserSettings)) {
    if let Some(s) = settings.write().as_mut() {
        apply(s);
    }
}

/// `/profile/settings`: preferences stored under the user's node.
#[component]
pub fn SettingsView() -> Element {
    let mut toasts = use_toast();
    let mut theme = use_theme();
    let mut settings = use_signal(|| Option::<UserSettings>::None);
    let mut tab = use_signal(|| SettingsTab::Appearance);
    let mut saving = use_signal(|| false);

    let _loader = use_resource(move || async move {
        match api::get_settings().await {
            Ok(s) => settings.set(Some(s)),
            Err(e) => {
                tracing::error!("Failed to load settings: {}", e);
                toasts.error("Could not load your settings");
                settings.set(Some(UserSettings::default()));
            }
        }
    });

    let handle_save = move |_| {
        let Some(current) = settings() else {
            return;
        };
        let chosen = current.theme;
        spawn(async move {
            saving.set(true);
            match api::save_settings(current).await {
                Ok(()) => {
                    theme.set(chosen);
                    toasts.success("Settings saved");
                }
                Err(e) => {
                    tracing::error!("Failed to save settings: {}", e);
                    toasts.error("Could not save your settings");
                }
            }
            saving.set(false);
        });
    };

    let Some(current) = settings() else {
        return rsx! {
            document::Stylesheet { href: VIEWS_CSS }
            div { class: "view-page", Spinner { label: "Loading your settings..." } }
        };
    };

    let panel = match tab() {
        SettingsTab::Appearance => rsx! {
            div {
                class: "field",
                label { class: "label", r#for: "settings-theme", "Theme" }
                select {
                    id: "settings-theme",
                    class: "input",
                    value: current.theme.as_str(),
                    onchange: move |evt: FormEvent| {
                        if let Some(s) = settings.write().as_mut() {
                            s.theme = Theme::parse(&evt.value());
                        }
                    },
                    option { value: "light", "Light" }
                    option { value: "dark", "Dark" }
                    option { value: "system", "System" }
                }
            }
            div {
                class: "field",
                label { class: "label", r#for: "settings-language", "Language" }
                select {
                    id: "settings-language",
                    class: "input",
                    value: "{current.language}",
                    onchange: move |evt: FormEvent| {
                        if let Some(s) = settings.write().as_mut() {
                            s.language = evt.value();
                        }
                    },
                    for (value, label) in UserSettings::LANGUAGES {
                        option { key: "{value}", value, "{label}" }
                    }
                }
            }
        },
        SettingsTab::Editor => rsx! {
            div {
                class: "field",
                label { class: "label", r#for: "settings-font-size", "Font size" }
                select {
                    id: "settings-font-size",
                    class: "input",
                    value: current.font_size.as_str(),
                    onchange: move |evt: FormEvent| {
                        if let Some(s) = settings.write().as_mut() {
                            s.font_size = FontSize::parse(&evt.value());
                        }
                    },
                    option { value: "small", "Small" }
                    option { value: "medium", "Medium" }
                    option { value: "large", "Large" }
                }
            }
            Toggle {
                id: "settings-line-numbers",
                label: "Line numbers",
                hint: "Show a line-number gutter next to the code.",
                checked: current.line_numbers,
                onchange: move |v: bool| update(settings, |s| s.line_numbers = v),
            }
            Toggle {
                id: "settings-auto-save",
                label: "Auto save",
                hint: "Save your files a few seconds after you stop typing.",
                checked: current.auto_save,
                onchange: move |v: bool| update(settings, |s| s.auto_save = v),
            }
        },
        SettingsTab::Notifications => rsx! {
            Toggle {
                id: "settings-notifications",
                label: "Notifications",
                hint: "Show notifications inside the app.",
                checked: current.notifications,
                onchange: move |v: bool| update(settings, |s| s.notifications = v),
            }
            Toggle {
                id: "settings-email-notifications",
                label: "Email notifications",
                hint: "Receive updates by email.",
                checked: current.email_notifications,
                onchange: move |v: bool| update(settings, |s| s.email_notifications = v),
            }
        },
        SettingsTab::Privacy => rsx! {
            Toggle {
                id: "settings-share-data",
                label: "Share usage data",
                hint: "Help improve CodeNest by sharing anonymous usage data.",
                checked: current.privacy.share_data,
                onchange: move |v: bool| update(settings, |s| s.privacy.share_data = v),
            }
            Toggle {
                id: "settings-public-profile",
                label: "Public profile",
                hint: "Let other people see your profile.",
                checked: current.privacy.public_profile,
                onchange: move |v: bool| update(settings, |s| s.privacy.public_profile = v),
            }
        },
    };

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        div {
            class: "view-page",
            h1 { class: "view-title", "Settings" }
            div {
                class: "tabs",
                for t in SettingsTab::ALL {
                    button {
                        key: "{t.label()}",
                        class: if t == tab() { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(t),
                        TabIcon { tab: t }
                        "{t.label()}"
                    }
                }
            }
            div { class: "tab-panel", {panel} }
            div {
                class: "view-actions",
                Button {
                    disabled: saving(),
                    onclick: handle_save,
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            }
        }
    }
}
