//! # Form Modal Component
//!
//! Create / update form for the current table. The form stays open on a
//! failed submit so the operator can correct the input.

use dioxus::prelude::*;

use crate::components::inputs::FormFieldInput;
use crate::state::{APP_STATE, use_admin};

/// Modal form, rendered only while a form is open
#[component]
pub fn FormModal() -> Element {
    let admin = use_admin();
    let mut submitting = use_signal(|| false);

    let state = APP_STATE.read();
    let Ok(schema) = admin.registry().get(state.session.table()) else {
        return rsx! {};
    };
    let Some(view) = state.form_view(schema) else {
        return rsx! {};
    };
    drop(state);

    let submit_admin = admin.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if *submitting.read() {
            return;
        }

        let admin = submit_admin.clone();
        let values = {
            let state = APP_STATE.read();
            match admin.registry().get(state.session.table()) {
                Ok(schema) => state.draft.collect(schema),
                Err(_) => return,
            }
        };

        submitting.set(true);
        spawn(async move {
            if let Err(e) = admin.submit(&values).await {
                tracing::debug!("Submit not applied: {}", e);
            }
            submitting.set(false);
        });
    };

    let header_admin = admin.clone();
    let busy = *submitting.read();

    rsx! {
        div {
            class: "modal-overlay",
            div {
                class: "modal",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "modal-header",
                    h2 { "{view.title}" }
                    button {
                        r#type: "button",
                        class: "close",
                        onclick: move |_| header_admin.close_form(),
                        "×"
                    }
                }

                form {
                    onsubmit: handle_submit,

                    for field in view.fields.iter() {
                        FormFieldInput { key: "{field.name}", field: field.clone() }
                    }

                    div {
                        class: "modal-actions",
                        button {
                            r#type: "button",
                            class: "secondary",
                            onclick: move |_| admin.close_form(),
                            "Cancel"
                        }
                        button {
                            r#type: "submit",
                            class: "primary",
                            disabled: busy,
                            if busy { "Saving..." } else { "Save" }
                        }
                    }
                }
            }
        }
    }
}
