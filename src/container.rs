use serde_json::{Map, Value};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use crate::{TableViewError, TableViewResult};

/// One record of the dataset: field name to JSON value.
///
/// No schema is enforced. A field missing from a row renders as an empty cell.
pub type Row = Map<String, Value>;

/// Holds the rows read from the JSON document, and where they came from.
///
/// The rows are wrapped in an `Arc` so the UI can hand them to the row model
/// without copying; they are never modified after the load.
#[derive(Debug, Clone, Default)]
pub struct DataContainer {
    /// Rows in document order.
    pub rows: Arc<Vec<Row>>,
    /// Path of the JSON document the rows were read from.
    pub source: PathBuf,
}

impl DataContainer {
    /// Reads the JSON document at `path` and parses it as an array of row objects.
    ///
    /// ### Returns
    ///
    /// A `TableViewResult` containing the `DataContainer`, `FileNotFound` when the
    /// path does not exist, or `Json` when the document is not an array of objects.
    pub async fn load_data(path: PathBuf) -> TableViewResult<Self> {
        tracing::debug!("fn load_data()\npath: {path:#?}");
        let start_time = Instant::now();

        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => TableViewError::FileNotFound(path.clone()),
            _ => TableViewError::Io(e),
        })?;

        let rows: Vec<Row> = serde_json::from_slice(&bytes)?;

        tracing::info!(
            "Loaded {} rows from {} in {}ms",
            rows.len(),
            path.display(),
            start_time.elapsed().as_millis()
        );

        Ok(Self {
            rows: Arc::new(rows),
            source: path,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Text shown in a table cell (and matched by the search box) for a JSON value.
///
/// Strings are shown verbatim, numbers in shortest decimal form, booleans as `true`/`false`,
/// nested arrays/objects as compact JSON. Null and missing values yield `None`.
pub fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        // Floats print without a trailing `.0`, so `10.0` reads (and searches) as "10".
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Cell text of `field` in `row`; empty when the field is missing or null.
pub fn cell_text(row: &Row, field: &str) -> String {
    value_text(row.get(field)).unwrap_or_default()
}

#[cfg(test)]
mod tests_container {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be JSON objects"),
        }
    }

    #[test]
    fn test_cell_text_by_type() {
        let r = row(json!({
            "id": 7,
            "name": "Apple",
            "price": 10.5,
            "active": true,
            "note": null,
            "tags": ["a", "b"],
        }));

        assert_eq!(cell_text(&r, "id"), "7");
        assert_eq!(cell_text(&r, "name"), "Apple");
        assert_eq!(cell_text(&r, "price"), "10.5");
        assert_eq!(cell_text(&r, "active"), "true");
        assert_eq!(cell_text(&r, "note"), "");
        assert_eq!(cell_text(&r, "tags"), r#"["a","b"]"#);
        // Missing field renders an empty cell.
        assert_eq!(cell_text(&r, "subcategory"), "");
    }

    #[test]
    fn test_whole_floats_drop_the_fraction() {
        assert_eq!(value_text(Some(&json!(10.0))).as_deref(), Some("10"));
        assert_eq!(value_text(Some(&json!(7.5))).as_deref(), Some("7.5"));
        assert_eq!(value_text(Some(&json!(-0.25))).as_deref(), Some("-0.25"));
        assert_eq!(value_text(Some(&json!(42))).as_deref(), Some("42"));
        assert_eq!(value_text(Some(&json!(-3))).as_deref(), Some("-3"));
    }

    #[test]
    fn test_value_text_null_is_none() {
        assert_eq!(value_text(Some(&Value::Null)), None);
        assert_eq!(value_text(None), None);
    }

    #[test]
    fn test_len_and_source() {
        let container = DataContainer {
            rows: Arc::new(vec![row(json!({"id": 1}))]),
            source: PathBuf::from("data.json"),
        };
        assert_eq!(container.len(), 1);
        assert!(!container.is_empty());
        assert_eq!(container.source(), Path::new("data.json"));
        assert!(DataContainer::default().is_empty());
    }
}
