//! Live preview of a project in a sandboxed iframe.

use dioxus::prelude::*;

/// Renders `html` (a full page) with scripts allowed but no same-origin access.
#[component]
pub fn PreviewPane(html: String) -> Element {
    rsx! {
        iframe {
            class: "preview-frame",
            title: "Preview",
            "sandbox": "allow-scripts",
            "srcdoc": "{html}",
        }
    }
}

/// Milliseconds a preview blob URL stays valid, long enough for the new tab to load it.
#[cfg(target_arch = "wasm32")]
const PREVIEW_URL_LIFETIME_MS: u32 = 60_000;

/// Open `html` in a new browser tab through a blob URL.
///
/// The URL is revoked after a delay so repeated previews do not pin every
/// generated page in memory.
pub fn open_preview_in_new_tab(html: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let parts = js_sys::Array::of1(&js_sys::JsString::from(html));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("text/html");
        let url = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .and_then(|blob| web_sys::Url::create_object_url_with_blob(&blob));
        match (url, web_sys::window()) {
            (Ok(url), Some(window)) => {
                if let Err(e) = window.open_with_url_and_target(&url, "_blank") {
                    tracing::error!("Failed to open preview: {:?}", e);
                }
                gloo_timers::callback::Timeout::new(PREVIEW_URL_LIFETIME_MS, move || {
                    if let Err(e) = web_sys::Url::revoke_object_url(&url) {
                        tracing::warn!("Failed to revoke preview URL: {:?}", e);
                    }
                })
                .forget();
            }
            (Ok(url), None) => {
                let _ = web_sys::Url::revoke_object_url(&url);
                tracing::error!("No window to open the preview in");
            }
            (Err(e), _) => tracing::error!("Failed to build preview: {:?}", e),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("Preview of {} bytes not opened outside the browser", html.len());
}
