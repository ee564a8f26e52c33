//! # Data Table Component
//!
//! Renders the loaded records of the current table. Clicking a row selects
//! it; clicking a thumbnail opens the full attachment instead.

use dioxus::prelude::*;

use careadmin_view::{CellView, RowView, TableView};

use crate::state::{APP_STATE, use_admin};

/// Record table for the current tab
#[component]
pub fn DataTable(base_url: String) -> Element {
    let admin = use_admin();

    let state = APP_STATE.read();
    let view = match admin.registry().get(state.session.table()) {
        Ok(schema) => TableView::project(
            schema,
            state.session.records(),
            state.session.selected(),
            &base_url,
        ),
        Err(e) => {
            return rsx! {
                div { class: "table-error", "{e}" }
            };
        }
    };
    drop(state);

    match view {
        TableView::Empty { placeholder } => rsx! {
            table {
                class: "data-table",
                tbody {
                    tr {
                        td { class: "placeholder", "{placeholder}" }
                    }
                }
            }
        },
        TableView::Rows { headers, rows } => rsx! {
            table {
                class: "data-table",
                thead {
                    tr {
                        for header in headers.iter() {
                            th { "{header}" }
                        }
                    }
                }
                tbody {
                    for row in rows {
                        DataRow { key: "{row.index}", row: row.clone() }
                    }
                }
            }
        },
    }
}

#[component]
fn DataRow(row: RowView) -> Element {
    let admin = use_admin();
    let index = row.index;
    let row_class = if row.selected { "selected" } else { "" };

    rsx! {
        tr {
            class: "{row_class}",
            onclick: move |_| {
                if let Err(e) = admin.select_row(index) {
                    // rows are not selectable while a form is open
                    tracing::debug!("Row {} not selected: {}", index, e);
                }
            },

            for cell in row.cells.iter() {
                td {
                    {match cell {
                        CellView::Text(text) => rsx! { "{text}" },
                        CellView::Image { src, href } => rsx! {
                            a {
                                href: "{href}",
                                target: "_blank",
                                onclick: move |e| e.stop_propagation(),
                                img { class: "thumbnail", src: "{src}", alt: "attachment" }
                            }
                        },
                    }}
                }
            }
        }
    }
}
