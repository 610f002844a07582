//! Plain-text source editor with an optional line-number gutter.

use dioxus::prelude::*;

const EDITOR_CSS: Asset = asset!("/src/editor.css");

/// Contents of the gutter for `text`: one number per line.
fn gutter_text(text: &str) -> String {
    let lines = text.split('\n').count();
    (1..=lines)
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Editor for one buffer. `language` is `html`, `css` or `javascript`.
#[component]
pub fn SourceEditor(
    value: String,
    language: String,
    on_change: EventHandler<String>,
    #[props(default = true)] line_numbers: bool,
    #[props(default = 14)] font_size_px: u32,
) -> Element {
    let gutter = gutter_text(&value);

    rsx! {
        document::Stylesheet { href: EDITOR_CSS }
        div {
            class: "source-editor",
            style: "font-size: {font_size_px}px;",
            "data-language": "{language}",
            if line_numbers {
                pre { class: "source-gutter", aria_hidden: "true", "{gutter}" }
            }
            textarea {
                class: "source-input",
                spellcheck: "false",
                autocomplete: "off",
                value: "{value}",
                oninput: move |evt: FormEvent| on_change.call(evt.value()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_counts_lines() {
        assert_eq!(gutter_text(""), "1");
        assert_eq!(gutter_text("a"), "1");
        assert_eq!(gutter_text("a\nb\n"), "1\n2\n3");
    }
}
