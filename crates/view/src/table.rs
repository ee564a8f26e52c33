//! Table projection
//!
//! Turns the loaded records into headers, rows and cells. Columns follow the
//! first record's key order (the backend's field order), not the schema.

use crate::format::humanize;
use careadmin_core::{Record, is_present, scalar_text};
use careadmin_schema::TableSchema;

/// Placeholder shown for an empty table
pub const EMPTY_PLACEHOLDER: &str = "No data available";

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    /// Plain text
    Text(String),
    /// Attachment thumbnail linking to the full asset
    Image { src: String, href: String },
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Index into the loaded records
    pub index: usize,
    pub cells: Vec<CellView>,
    pub selected: bool,
}

/// A rendered table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// No records: a single placeholder row
    Empty { placeholder: &'static str },
    /// Header row plus one row per record
    Rows {
        headers: Vec<String>,
        rows: Vec<RowView>,
    },
}

impl TableView {
    /// Project records for display
    ///
    /// `base_url` prefixes attachment paths so the image cells can be loaded
    /// straight from the backend.
    pub fn project(
        schema: &TableSchema,
        records: &[Record],
        selected: Option<usize>,
        base_url: &str,
    ) -> Self {
        let Some(first) = records.first() else {
            return TableView::Empty {
                placeholder: EMPTY_PLACEHOLDER,
            };
        };

        let keys: Vec<&String> = first.keys().collect();
        let headers = keys.iter().map(|k| humanize(k)).collect();
        let attachment = schema.attachment_field().map(|f| f.name.as_str());
        let base = base_url.trim_end_matches('/');

        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| RowView {
                index,
                cells: keys
                    .iter()
                    .map(|key| cell(schema, record, key, attachment, base))
                    .collect(),
                selected: selected == Some(index),
            })
            .collect();

        TableView::Rows { headers, rows }
    }

    /// Check if there are no rows
    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty { .. })
    }
}

fn cell(
    schema: &TableSchema,
    record: &Record,
    key: &str,
    attachment: Option<&str>,
    base: &str,
) -> CellView {
    let Some(value) = record.get(key) else {
        return CellView::Text(String::new());
    };

    if attachment == Some(key) && is_present(value) {
        // rows without a usable identity fall back to the stored value
        if let Ok(Some(path)) = schema.attachment_path(record) {
            let url = format!("{}{}", base, path);
            return CellView::Image {
                src: url.clone(),
                href: url,
            };
        }
    }

    CellView::Text(scalar_text(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use careadmin_schema::TableRegistry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_table() {
        let registry = TableRegistry::standard();
        let view = TableView::project(registry.get("users").unwrap(), &[], None, "");
        assert_eq!(
            view,
            TableView::Empty {
                placeholder: "No data available"
            }
        );
        assert!(view.is_empty());
    }

    #[test]
    fn test_headers_and_cells_follow_first_record() {
        let registry = TableRegistry::standard();
        let records = vec![
            record(json!({ "job_id": 4, "date_posted": null, "other_requirements": "Non-smoker" })),
            record(json!({ "other_requirements": "Pets", "job_id": 5 })),
        ];
        let view = TableView::project(registry.get("jobs").unwrap(), &records, Some(1), "");

        let TableView::Rows { headers, rows } = view else {
            panic!("expected rows");
        };
        assert_eq!(headers, vec!["Job Id", "Date Posted", "Other Requirements"]);
        assert_eq!(
            rows[0].cells,
            vec![
                CellView::Text("4".into()),
                CellView::Text(String::new()),
                CellView::Text("Non-smoker".into()),
            ]
        );
        assert_eq!(
            rows[1].cells,
            vec![
                CellView::Text("5".into()),
                CellView::Text(String::new()),
                CellView::Text("Pets".into()),
            ]
        );
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[test]
    fn test_photo_cell() {
        let registry = TableRegistry::standard();
        let records = vec![
            record(json!({ "caregiver_user_id": 9, "photo": "photos/9.jpg", "hourly_rate": 12.5 })),
            record(json!({ "caregiver_user_id": 10, "photo": null, "hourly_rate": 10 })),
        ];
        let view = TableView::project(
            registry.get("caregivers").unwrap(),
            &records,
            None,
            "http://127.0.0.1:8000/",
        );

        let TableView::Rows { rows, .. } = view else {
            panic!("expected rows");
        };
        assert_eq!(
            rows[0].cells[1],
            CellView::Image {
                src: "http://127.0.0.1:8000/caregivers/9/photo".into(),
                href: "http://127.0.0.1:8000/caregivers/9/photo".into(),
            }
        );
        assert_eq!(rows[0].cells[2], CellView::Text("12.5".into()));
        assert_eq!(rows[1].cells[1], CellView::Text(String::new()));
    }
}
