//! # Input Components
//!
//! One form input per schema field. Values are written straight into the
//! draft held in `APP_STATE`, so the modal only has to collect it on submit.

use dioxus::prelude::*;

use careadmin_view::{FormFieldView, Widget};

use crate::file_ops::pick_upload;
use crate::state::APP_STATE;

// ============================================================================
// Form Field
// ============================================================================

/// Properties for FormFieldInput component
#[derive(Props, Clone, PartialEq)]
pub struct FormFieldInputProps {
    /// Field as projected for the open form
    pub field: FormFieldView,
}

/// Labelled input for one form field
#[component]
pub fn FormFieldInput(props: FormFieldInputProps) -> Element {
    let field = props.field;
    let name = field.name.clone();

    let draft_text = APP_STATE.read().draft.text(&name).to_string();

    let control = match &field.widget {
        Widget::Input { html_type } => {
            let name = name.clone();
            rsx! {
                input {
                    id: "{field.name}",
                    r#type: "{html_type}",
                    value: "{draft_text}",
                    disabled: field.disabled,
                    oninput: move |e| APP_STATE.write().draft.set_text(&name, e.value()),
                }
            }
        }
        Widget::TextArea => {
            let name = name.clone();
            rsx! {
                textarea {
                    id: "{field.name}",
                    rows: "3",
                    value: "{draft_text}",
                    disabled: field.disabled,
                    oninput: move |e| APP_STATE.write().draft.set_text(&name, e.value()),
                }
            }
        }
        Widget::Select { options } => {
            let name = name.clone();
            rsx! {
                select {
                    id: "{field.name}",
                    disabled: field.disabled,
                    onchange: move |e| APP_STATE.write().draft.set_text(&name, e.value()),
                    for option in options.iter() {
                        option {
                            value: "{option}",
                            selected: *option == draft_text,
                            "{option}"
                        }
                    }
                }
            }
        }
        Widget::File => rsx! {
            FilePicker { name: name.clone(), label: field.label.clone(), disabled: field.disabled }
        },
    };

    rsx! {
        div {
            class: "form-field",
            label {
                r#for: "{field.name}",
                "{field.label}"
            }
            {control}
            if let Some(note) = &field.note {
                for line in note.lines() {
                    small { class: "field-note", "{line}" }
                }
            }
        }
    }
}

// ============================================================================
// File Picker
// ============================================================================

#[component]
fn FilePicker(name: String, label: String, disabled: bool) -> Element {
    let chosen = APP_STATE.read().draft.file_name(&name).map(str::to_string);
    let pick_name = name.clone();
    let clear_name = name.clone();

    rsx! {
        div {
            class: "file-picker",
            button {
                r#type: "button",
                disabled: disabled,
                onclick: move |_| {
                    let name = pick_name.clone();
                    let title = format!("Choose {}", label);
                    spawn(async move {
                        if let Some(upload) = pick_upload(&title).await {
                            APP_STATE.write().draft.set_file(&name, Some(upload));
                        }
                    });
                },
                "Choose file"
            }
            {match chosen {
                Some(file) => rsx! {
                    span { class: "file-name", "{file}" }
                    button {
                        r#type: "button",
                        class: "link",
                        onclick: move |_| APP_STATE.write().draft.set_file(&clear_name, None),
                        "Clear"
                    }
                },
                None => rsx! {
                    span { class: "file-name muted", "No file chosen" }
                },
            }}
        }
    }
}
