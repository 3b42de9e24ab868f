//! Free-text search over the dataset rows.

use crate::{Row, value_text};

/// Returns the indices of the rows matching `term`, in dataset order.
///
/// A row matches when the text of any of its fields, lowercased, contains the
/// lowercased term. All fields of the row take part, including fields that are
/// not part of the column schema. Null values never match. The empty term
/// matches every row.
pub fn search_rows(rows: &[Row], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// `needle` must already be lowercase.
fn row_matches(row: &Row, needle: &str) -> bool {
    row.values()
        .filter_map(|value| value_text(Some(value)))
        .any(|text| text.to_lowercase().contains(needle))
}
