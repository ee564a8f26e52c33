//! Main Application Component for Care Admin
//!
//! The root component provides the CRUD orchestrator as context, loads the
//! default table once, and lays out the toolbar, table tabs, banner, record
//! table and the modal overlays.

use std::time::Duration;

use dioxus::prelude::*;

use careadmin_client::CrudOrchestrator;

use crate::components::{ConfirmDialog, DataTable, FormModal};
use crate::state::{self, APP_STATE, Admin, DialogConfirm, UiStore, use_admin};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let Some(runtime) = crate::runtime() else {
        return rsx! {
            div { class: "fatal", "Care Admin was started without a runtime" }
        };
    };

    let admin = use_context_provider(|| -> Admin {
        CrudOrchestrator::new(
            runtime.registry.clone(),
            runtime.transport.clone(),
            UiStore,
        )
    });

    // Load the first table once
    use_hook(move || {
        let admin = admin.clone();
        spawn(async move {
            if let Some(key) = admin.registry().default_key().map(str::to_string) {
                let _ = admin.switch_table(&key).await;
            }
        });
        tracing::info!("Care Admin UI initialized");
    });

    let base_url = runtime.transport.base_url().to_string();
    let notify_ms = runtime.config.notify_ms;

    rsx! {
        div {
            class: "app-container",

            Toolbar {}
            TableTabs {}
            MessageBanner { notify_ms }

            main {
                class: "content",
                DataTable { base_url }
            }

            FormModal {}
            ConfirmDialog {}
        }
    }
}

// ============================================================================
// Toolbar Component
// ============================================================================

/// Top toolbar with the CRUD actions
#[component]
fn Toolbar() -> Element {
    let admin = use_admin();

    let state = APP_STATE.read();
    let has_selection = state.session.selected().is_some();
    let form_open = state.session.mode().is_open();
    drop(state);

    let name = crate::NAME;

    let create_admin = admin.clone();
    let update_admin = admin.clone();
    let delete_admin = admin.clone();

    rsx! {
        header {
            class: "toolbar",

            div {
                class: "brand",
                span { class: "brand-name", "{name}" }
            }

            div {
                class: "actions",

                ToolbarButton {
                    label: "Create",
                    disabled: form_open,
                    onclick: move |_| {
                        if let Err(e) = state::open_create(&create_admin) {
                            tracing::debug!("Create form not opened: {}", e);
                        }
                    }
                }

                ToolbarButton {
                    label: "Update",
                    disabled: form_open,
                    onclick: move |_| {
                        // reports "no row selected" through the banner
                        if let Err(e) = state::open_update(&update_admin) {
                            tracing::debug!("Update form not opened: {}", e);
                        }
                    }
                }

                ToolbarButton {
                    label: "Delete",
                    disabled: form_open || !has_selection,
                    onclick: move |_| {
                        let admin = delete_admin.clone();
                        spawn(async move {
                            if let Err(e) = admin.delete(&DialogConfirm).await {
                                tracing::debug!("Delete not applied: {}", e);
                            }
                        });
                    }
                }

                ToolbarButton {
                    label: "Refresh",
                    onclick: move |_| {
                        let admin = admin.clone();
                        spawn(async move {
                            let _ = admin.refresh().await;
                        });
                    }
                }
            }
        }
    }
}

/// Toolbar button component
#[component]
fn ToolbarButton(
    label: &'static str,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            class: "toolbar-button",
            disabled: disabled,
            onclick: move |e| {
                if !disabled {
                    onclick.call(e);
                }
            },
            "{label}"
        }
    }
}

// ============================================================================
// Table Tabs
// ============================================================================

/// One tab per registered table
#[component]
fn TableTabs() -> Element {
    let admin = use_admin();
    let current = state::use_current_table();

    let tabs: Vec<(String, String)> = admin
        .registry()
        .iter()
        .map(|schema| (schema.key.clone(), schema.title.clone()))
        .collect();

    rsx! {
        nav {
            class: "tabs",
            for (key, title) in tabs {
                TabButton {
                    key: "{key}",
                    table: key.clone(),
                    title,
                    active: key == current,
                }
            }
        }
    }
}

#[component]
fn TabButton(table: String, title: String, active: bool) -> Element {
    let admin = use_admin();
    let class = if active { "tab active" } else { "tab" };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                let admin = admin.clone();
                let table = table.clone();
                spawn(async move {
                    let _ = admin.switch_table(&table).await;
                });
            },
            "{title}"
        }
    }
}

// ============================================================================
// Message Banner
// ============================================================================

/// Transient notification, cleared after `notify_ms`
///
/// Each notification carries its own id, so a timer started for an older
/// message never clears a newer one.
#[component]
fn MessageBanner(notify_ms: u64) -> Element {
    let current_id = use_memo(|| APP_STATE.read().session.notification().map(|n| n.id));

    use_effect(move || {
        if let Some(id) = current_id() {
            spawn(async move {
                tokio::time::sleep(Duration::from_millis(notify_ms)).await;
                APP_STATE.write().session.expire_notification(id);
            });
        }
    });

    let notification = APP_STATE.read().session.notification().cloned();

    match notification {
        Some(notification) => {
            let level = notification.level.css_class();
            rsx! {
                div {
                    class: "banner {level}",
                    "{notification.text}"
                }
            }
        }
        None => rsx! {},
    }
}
