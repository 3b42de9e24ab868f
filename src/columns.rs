//! Column schema of the table and the visibility map built over it.

use std::collections::BTreeMap;

/// Static schema entry mapping a row field to a display header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Unique identifier, used as key for visibility and sorting.
    pub id: String,
    /// Text displayed in the table header and in the side panel.
    pub header: String,
    /// Name of the row field read for this column's cells.
    pub accessor: String,
}

impl ColumnDef {
    pub fn new(id: &str, header: &str, accessor: &str) -> Self {
        ColumnDef {
            id: id.to_string(),
            header: header.to_string(),
            accessor: accessor.to_string(),
        }
    }
}

/// The fixed set of columns shown for the product dataset.
///
/// Built once by `TableViewApp` at start-up and never modified afterwards.
pub fn default_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID", "id"),
        ColumnDef::new("name", "Name", "name"),
        ColumnDef::new("category", "Category", "category"),
        ColumnDef::new("subcategory", "Subcategory", "subcategory"),
        ColumnDef::new("createdAt", "Created At", "createdAt"),
        ColumnDef::new("updatedAt", "Updated At", "updatedAt"),
        ColumnDef::new("price", "Price", "price"),
        ColumnDef::new("sale_price", "Sale Price", "sale_price"),
    ]
}

/// Maps column identifiers to a visible/hidden flag.
///
/// Keys are always a subset of the identifiers the map was created from:
/// `toggle` ignores identifiers that are not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnVisibility {
    flags: BTreeMap<String, bool>,
}

impl ColumnVisibility {
    /// Creates a map with every column visible.
    pub fn all_visible(columns: &[ColumnDef]) -> Self {
        ColumnVisibility {
            flags: columns.iter().map(|c| (c.id.clone(), true)).collect(),
        }
    }

    /// Unknown identifiers are reported as visible, matching an empty entry in the map.
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.flags.get(column_id).copied().unwrap_or(true)
    }

    /// Flips the flag of `column_id`. Returns the new value, or `None` for unknown columns.
    pub fn toggle(&mut self, column_id: &str) -> Option<bool> {
        let flag = self.flags.get_mut(column_id)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Indices (into `columns`) of the columns that are currently rendered.
    pub fn visible_indices(&self, columns: &[ColumnDef]) -> Vec<usize> {
        columns
            .iter()
            .enumerate()
            .filter(|(_, c)| self.is_visible(&c.id))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn hidden_count(&self) -> usize {
        self.flags.values().filter(|visible| !**visible).count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests_columns {
    use super::*;

    #[test]
    fn test_default_columns_are_unique() {
        let columns = default_columns();
        assert_eq!(columns.len(), 8);

        let mut ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert_eq!(columns[6].header, "Price");
        assert_eq!(columns[7].accessor, "sale_price");
    }

    #[test]
    fn test_all_visible() {
        let columns = default_columns();
        let visibility = ColumnVisibility::all_visible(&columns);
        assert!(columns.iter().all(|c| visibility.is_visible(&c.id)));
        assert_eq!(visibility.visible_indices(&columns), (0..8).collect::<Vec<_>>());
        assert_eq!(visibility.hidden_count(), 0);
    }

    #[test]
    fn test_toggle_hides_only_rendering() {
        let columns = default_columns();
        let mut visibility = ColumnVisibility::all_visible(&columns);

        assert_eq!(visibility.toggle("category"), Some(false));
        assert!(!visibility.is_visible("category"));
        assert_eq!(visibility.visible_indices(&columns), vec![0, 1, 3, 4, 5, 6, 7]);
        // The key stays in the map, only its flag changes.
        assert_eq!(visibility.keys().count(), 8);

        assert_eq!(visibility.toggle("category"), Some(true));
        assert_eq!(visibility.hidden_count(), 0);
    }

    #[test]
    fn test_unknown_column_is_ignored() {
        let columns = default_columns();
        let mut visibility = ColumnVisibility::all_visible(&columns);

        assert_eq!(visibility.toggle("discount"), None);
        assert!(visibility.keys().all(|k| columns.iter().any(|c| c.id == k)));
    }
}
