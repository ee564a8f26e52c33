//! # Confirm Dialog Component
//!
//! Yes/no question raised by `DialogConfirm` before a destructive action.

use dioxus::prelude::*;

use crate::state::{CONFIRM, answer_confirm};

/// Confirmation dialog, rendered only while a question is pending
#[component]
pub fn ConfirmDialog() -> Element {
    let prompt = CONFIRM.read().as_ref().map(|pending| pending.prompt.clone());
    let Some(prompt) = prompt else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "modal-overlay",
            div {
                class: "modal confirm",
                div {
                    class: "confirm-body",
                    span { class: "confirm-icon", "⚠️" }
                    p { "{prompt}" }
                }
                div {
                    class: "modal-actions",
                    button {
                        class: "secondary",
                        onclick: move |_| answer_confirm(false),
                        "Cancel"
                    }
                    button {
                        class: "danger",
                        onclick: move |_| answer_confirm(true),
                        "Delete"
                    }
                }
            }
        }
    }
}
