//! Transient notifications in the bottom-right corner.

use dioxus::prelude::*;

/// Milliseconds a toast stays on screen.
#[cfg(target_arch = "wasm32")]
const TOAST_DURATION_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

#[derive(Debug, Default, PartialEq)]
struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, kind, message });
        id
    }

    fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Handle for showing toasts, obtained from [`use_toast`].
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        let id = self.queue.write().push(kind, message);

        // The caller is often a view that unmounts right after (a redirect on
        // save), so the timer runs at the root scope rather than the caller's.
        #[cfg(target_arch = "wasm32")]
        {
            let mut queue = self.queue;
            spawn_forever(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
                queue.write().dismiss(id);
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = id;
    }

    fn dismiss(&mut self, id: u64) {
        self.queue.write().dismiss(id);
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provides [`Toasts`] to its children and renders the toast stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let mut toasts = use_context_provider(|| Toasts {
        queue: Signal::new(ToastQueue::default()),
    });

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in toasts.queue.read().items.iter().cloned() {
                div {
                    key: "{toast.id}",
                    class: if toast.kind == ToastKind::Success { "toast toast-success" } else { "toast toast-error" },
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_dismisses_only_matching_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "Saved".to_string());
        let second = queue.push(ToastKind::Error, "Failed".to_string());
        assert_ne!(first, second);

        queue.dismiss(first);
        assert_eq!(queue.items.len(), 1);
        assert_eq!(queue.items[0].message, "Failed");

        // A timer firing after a manual dismiss is a no-op.
        queue.dismiss(first);
        assert_eq!(queue.items.len(), 1);

        let third = queue.push(ToastKind::Success, "Again".to_string());
        assert!(third > second);
    }
}
