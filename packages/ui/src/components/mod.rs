//! Small building blocks shared by every view.

use dioxus::prelude::*;

mod alert;
mod button;
mod input;
mod spinner;
mod toast;

pub use alert::{Alert, AlertVariant};
pub use button::{Button, ButtonVariant};
pub use input::{Input, Label, Textarea};
pub use spinner::Spinner;
pub use toast::{use_toast, ToastKind, ToastProvider, Toasts};

pub const COMPONENTS_CSS: Asset = asset!("/src/components/components.css");
