//! Sorted and paginated row modeling.
//!
//! The table widget never orders or slices rows itself: it hands the rows that
//! survived the search to a `RowModel` and renders the `RowPage` it gets back.

use serde_json::Value;
use std::cmp::Ordering;

use crate::{ColumnDef, ColumnVisibility, Row, SortBy, SortDirection};

/// Inputs of one row-model computation.
#[derive(Debug, Clone, Copy)]
pub struct RowQuery<'a> {
    pub sort: &'a [SortBy],
    pub visibility: &'a ColumnVisibility,
    /// Requested page; clamped by the model.
    pub page_index: usize,
    pub page_size: usize,
}

/// The rows and columns to render for the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPage {
    /// Dataset indices of the rows on this page, in display order.
    pub rows: Vec<usize>,
    /// Indices into the column schema of the rendered columns.
    pub visible_columns: Vec<usize>,
    /// Page index after clamping to `[0, page_count - 1]`.
    pub page_index: usize,
    pub page_count: usize,
    /// Number of rows across all pages.
    pub total_rows: usize,
}

impl RowPage {
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// Capability interface of a row-modeling engine.
pub trait RowModel {
    /// Orders `candidates` (indices into `dataset`) by `query.sort` and cuts out the requested page.
    fn compute(
        &self,
        dataset: &[Row],
        columns: &[ColumnDef],
        candidates: &[usize],
        query: &RowQuery<'_>,
    ) -> RowPage;
}

/// In-memory row model: stable multi-key sort, then fixed-size pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientRowModel;

impl RowModel for ClientRowModel {
    fn compute(
        &self,
        dataset: &[Row],
        columns: &[ColumnDef],
        candidates: &[usize],
        query: &RowQuery<'_>,
    ) -> RowPage {
        let sorted = sort_rows(dataset, columns, candidates, query.sort);

        let page_size = query.page_size.max(1);
        let total_rows = sorted.len();
        let page_count = total_rows.div_ceil(page_size);
        let page_index = clamp_page_index(query.page_index, page_count);

        let start = (page_index * page_size).min(total_rows);
        let end = (start + page_size).min(total_rows);

        RowPage {
            rows: sorted[start..end].to_vec(),
            visible_columns: query.visibility.visible_indices(columns),
            page_index,
            page_count,
            total_rows,
        }
    }
}

/// Clamps a page index to `[0, page_count - 1]`; 0 when there are no pages.
pub fn clamp_page_index(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.saturating_sub(1))
}

/// Stable sort of `candidates` by the criteria in `spec`, in precedence order.
///
/// Criteria naming a column that is not in the schema are skipped.
pub fn sort_rows(
    dataset: &[Row],
    columns: &[ColumnDef],
    candidates: &[usize],
    spec: &[SortBy],
) -> Vec<usize> {
    let mut rows = candidates.to_vec();

    let keys: Vec<(&str, SortDirection)> = spec
        .iter()
        .filter_map(|sort_by| {
            match columns.iter().find(|c| c.id == sort_by.column_id) {
                Some(column) => Some((column.accessor.as_str(), sort_by.direction)),
                None => {
                    tracing::warn!("Ignoring sort on unknown column '{}'", sort_by.column_id);
                    None
                }
            }
        })
        .collect();

    if keys.is_empty() {
        return rows;
    }

    // `sort_by` is stable: rows with equal keys keep their dataset order.
    rows.sort_by(|&a, &b| {
        keys.iter()
            .map(|&(field, direction)| {
                compare_fields(dataset[a].get(field), dataset[b].get(field), direction)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    rows
}

/// Compares two cell values for one sort criterion.
///
/// Missing and null values go last in both directions; everything else is
/// compared by `compare_values` and reversed for descending order.
fn compare_fields(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Natural ascending order of two non-null JSON values.
///
/// Numbers compare numerically and strings in natural order (see `compare_natural`).
/// Values of different types are ordered by type: booleans, numbers, strings, arrays, objects.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => compare_natural(x, y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Case-insensitive natural order: "banana" < "Cherry" and "Product 2" < "Product 10".
///
/// Both strings are lowercased and split into runs of digits and non-digits.
/// Digit runs compare by numeric value and sort before text at the same position.
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    let mut chunks_a = NaturalChunks::new(&a);
    let mut chunks_b = NaturalChunks::new(&b);

    loop {
        let ordering = match (chunks_a.next(), chunks_b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match (is_digits(x), is_digits(y)) {
                (true, true) => compare_digit_runs(x, y),
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => x.cmp(y),
            },
        };
        if ordering.is_ne() {
            return ordering;
        }
    }
}

fn is_digits(chunk: &str) -> bool {
    chunk.starts_with(|c: char| c.is_ascii_digit())
}

/// Digit runs of any length: fewer significant digits means smaller.
fn compare_digit_runs(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Splits a string into maximal runs of ASCII digits and of everything else.
struct NaturalChunks<'a> {
    rest: &'a str,
}

impl<'a> NaturalChunks<'a> {
    fn new(text: &'a str) -> Self {
        NaturalChunks { rest: text }
    }
}

impl<'a> Iterator for NaturalChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let digits = is_digits(self.rest);
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(idx, _)| idx);

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests_row_model {
    use super::*;
    use crate::default_columns;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).expect("test rows must be objects")
    }

    fn ids(dataset: &[Row], indices: &[usize]) -> Vec<i64> {
        indices
            .iter()
            .map(|&i| dataset[i]["id"].as_i64().unwrap_or(-1))
            .collect()
    }

    fn numbered(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| {
                let mut row = Row::new();
                row.insert("id".to_string(), json!(i));
                row
            })
            .collect()
    }

    fn query<'a>(
        sort: &'a [SortBy],
        visibility: &'a ColumnVisibility,
        page_index: usize,
    ) -> RowQuery<'a> {
        RowQuery {
            sort,
            visibility,
            page_index,
            page_size: 10,
        }
    }

    #[test]
    fn test_sort_numbers_numerically() {
        let dataset = rows(json!([
            {"id": 1, "price": 10},
            {"id": 2, "price": 5},
            {"id": 3, "price": 100},
        ]));
        let columns = default_columns();
        let spec = vec![SortBy::new("price", SortDirection::Ascending)];

        let sorted = sort_rows(&dataset, &columns, &[0, 1, 2], &spec);
        assert_eq!(ids(&dataset, &sorted), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_strings_lexicographically() {
        let dataset = rows(json!([
            {"id": 1, "name": "banana"},
            {"id": 2, "name": "Apple"},
            {"id": 3, "name": "apple"},
        ]));
        let columns = default_columns();
        let spec = vec![SortBy::new("name", SortDirection::Ascending)];

        let sorted = sort_rows(&dataset, &columns, &[0, 1, 2], &spec);
        assert_eq!(ids(&dataset, &sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_strings_case_insensitive_natural_order() {
        let dataset = rows(json!([
            {"id": 1, "name": "banana"},
            {"id": 2, "name": "Cherry"},
            {"id": 3, "name": "Product 10"},
            {"id": 4, "name": "Product 2"},
        ]));
        let columns = default_columns();

        let asc = sort_rows(
            &dataset,
            &columns,
            &[0, 1, 2, 3],
            &[SortBy::new("name", SortDirection::Ascending)],
        );
        assert_eq!(ids(&dataset, &asc), vec![1, 2, 4, 3]);

        let desc = sort_rows(
            &dataset,
            &columns,
            &[0, 1, 2, 3],
            &[SortBy::new("name", SortDirection::Descending)],
        );
        assert_eq!(ids(&dataset, &desc), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_compare_natural() {
        assert_eq!(compare_natural("item 9", "item 10"), Ordering::Less);
        assert_eq!(compare_natural("ITEM 007", "item 7"), Ordering::Equal);
        assert_eq!(compare_natural("a1", "ab"), Ordering::Less);
        assert_eq!(compare_natural("Zebra", "apple"), Ordering::Greater);
        assert_eq!(compare_natural("", "a"), Ordering::Less);
        assert_eq!(
            compare_natural("sku 99999999999999999999", "sku 100000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_descending_reverses_distinct_keys() {
        let dataset = rows(json!([
            {"id": 1, "price": 3.5},
            {"id": 2, "price": 1},
            {"id": 3, "price": 2.25},
            {"id": 4, "price": 8},
        ]));
        let columns = default_columns();
        let all = [0, 1, 2, 3];

        let asc = sort_rows(
            &dataset,
            &columns,
            &all,
            &[SortBy::new("price", SortDirection::Ascending)],
        );
        let mut desc = sort_rows(
            &dataset,
            &columns,
            &all,
            &[SortBy::new("price", SortDirection::Descending)],
        );
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_sort_is_stable() {
        let dataset = rows(json!([
            {"id": 1, "category": "b"},
            {"id": 2, "category": "a"},
            {"id": 3, "category": "b"},
            {"id": 4, "category": "a"},
        ]));
        let columns = default_columns();

        let asc = sort_rows(
            &dataset,
            &columns,
            &[0, 1, 2, 3],
            &[SortBy::new("category", SortDirection::Ascending)],
        );
        assert_eq!(ids(&dataset, &asc), vec![2, 4, 1, 3]);

        let desc = sort_rows(
            &dataset,
            &columns,
            &[0, 1, 2, 3],
            &[SortBy::new("category", SortDirection::Descending)],
        );
        assert_eq!(ids(&dataset, &desc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_missing_values_sort_last_both_ways() {
        let dataset = rows(json!([
            {"id": 1},
            {"id": 2, "price": 5},
            {"id": 3, "price": null},
            {"id": 4, "price": 1},
        ]));
        let columns = default_columns();

        let asc = sort_rows(
            &dataset,
            &columns,
            &[0, 1, 2, 3],
            &[SortBy::new("price", SortDirection::Ascending)],
        );
        assert_eq!(ids(&dataset, &asc), vec![4, 2, 1, 3]);

        let desc = sort_rows(
            &dataset,
            &columns,
            &[0, 1, 2, 3],
            &[SortBy::new("price", SortDirection::Descending)],
        );
        assert_eq!(ids(&dataset, &desc), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_mixed_types_order_numbers_before_strings() {
        assert_eq!(compare_values(&json!(99), &json!("1")), Ordering::Less);
        assert_eq!(compare_values(&json!("a"), &json!(true)), Ordering::Greater);
        assert_eq!(compare_values(&json!(2), &json!(2.0)), Ordering::Equal);
    }

    #[test]
    fn test_multiple_criteria() {
        let dataset = rows(json!([
            {"id": 1, "category": "b", "price": 1},
            {"id": 2, "category": "a", "price": 2},
            {"id": 3, "category": "b", "price": 3},
            {"id": 4, "category": "a", "price": 1},
        ]));
        let columns = default_columns();
        let spec = vec![
            SortBy::new("category", SortDirection::Ascending),
            SortBy::new("price", SortDirection::Descending),
        ];

        let sorted = sort_rows(&dataset, &columns, &[0, 1, 2, 3], &spec);
        assert_eq!(ids(&dataset, &sorted), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_unknown_sort_column_keeps_order() {
        let dataset = rows(json!([{"id": 2}, {"id": 1}]));
        let columns = default_columns();
        let spec = vec![SortBy::new("discount", SortDirection::Ascending)];

        assert_eq!(sort_rows(&dataset, &columns, &[0, 1], &spec), vec![0, 1]);
    }

    #[test]
    fn test_page_sizes() {
        let dataset = numbered(23);
        let columns = default_columns();
        let visibility = ColumnVisibility::all_visible(&columns);
        let candidates: Vec<usize> = (0..23).collect();

        let model = ClientRowModel;
        let counts: Vec<usize> = (0..3)
            .map(|p| {
                model
                    .compute(&dataset, &columns, &candidates, &query(&[], &visibility, p))
                    .rows
                    .len()
            })
            .collect();
        assert_eq!(counts, vec![10, 10, 3]);

        let last = model.compute(&dataset, &columns, &candidates, &query(&[], &visibility, 2));
        assert_eq!(last.page_count, 3);
        assert_eq!(last.total_rows, 23);
        assert_eq!(last.rows, vec![20, 21, 22]);
        assert!(last.can_previous_page());
        assert!(!last.can_next_page());
    }

    #[test]
    fn test_page_index_is_clamped() {
        let dataset = numbered(15);
        let columns = default_columns();
        let visibility = ColumnVisibility::all_visible(&columns);
        let candidates: Vec<usize> = (0..15).collect();

        let page = ClientRowModel.compute(
            &dataset,
            &columns,
            &candidates,
            &query(&[], &visibility, 40),
        );
        assert_eq!(page.page_index, 1);
        assert_eq!(page.rows.len(), 5);
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        let columns = default_columns();
        let visibility = ColumnVisibility::all_visible(&columns);

        let page = ClientRowModel.compute(&[], &columns, &[], &query(&[], &visibility, 3));
        assert_eq!(page.page_count, 0);
        assert_eq!(page.page_index, 0);
        assert!(page.rows.is_empty());
        assert!(!page.can_previous_page());
        assert!(!page.can_next_page());
    }

    #[test]
    fn test_hidden_columns_are_left_out() {
        let columns = default_columns();
        let mut visibility = ColumnVisibility::all_visible(&columns);
        visibility.toggle("createdAt");
        visibility.toggle("updatedAt");

        let page = ClientRowModel.compute(&[], &columns, &[], &query(&[], &visibility, 0));
        assert_eq!(page.visible_columns, vec![0, 1, 2, 3, 6, 7]);
    }

    #[test]
    fn test_clamp_page_index() {
        assert_eq!(clamp_page_index(0, 0), 0);
        assert_eq!(clamp_page_index(5, 0), 0);
        assert_eq!(clamp_page_index(5, 3), 2);
        assert_eq!(clamp_page_index(1, 3), 1);
    }
}
