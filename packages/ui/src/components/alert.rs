use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AlertVariant {
    #[default]
    Info,
    Destructive,
}

/// Inline message box, used for form errors.
#[component]
pub fn Alert(#[props(default)] variant: AlertVariant, children: Element) -> Element {
    let class = match variant {
        AlertVariant::Info => "alert",
        AlertVariant::Destructive => "alert alert-destructive",
    };
    rsx! {
        div { class, role: "alert", {children} }
    }
}
