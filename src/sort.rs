//! Defines the representation of sorting criteria for the table.
//! This module contains the core types for the sort specification and the header click cycle.

use serde_json::Value;

/// Direction of a single sort criterion.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn opposite(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Direction of the first header click on a column, judged from a sample cell:
    /// text starts ascending (A to Z), anything else starts descending (largest first).
    pub fn first_for(sample: Option<&Value>) -> Self {
        match sample {
            Some(Value::String(_)) => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }
}

/// Represents a single criterion for sorting.
/// The order of criteria in a `SortSpec` determines sort precedence.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SortBy {
    /// Identifier of the column to sort by.
    pub column_id: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortBy {
    pub fn new(column_id: &str, direction: SortDirection) -> Self {
        SortBy {
            column_id: column_id.to_string(),
            direction,
        }
    }
}

/// Ordered list of sort criteria. The UI keeps it at zero or one entry,
/// the row model accepts any number.
pub type SortSpec = Vec<SortBy>;

/// Represents the *interaction* state for sorting a specific column header in the UI.
///
/// This enum manages the click cycle:
/// NotSorted -> first direction -> opposite direction -> NotSorted.
/// The applied sort state (`SortSpec`) is stored separately in `TableState`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HeaderSortState {
    /// Column is not part of the current sort criteria list.
    NotSorted,
    Ascending,
    Descending,
}

impl HeaderSortState {
    /// Reads the state of `column_id` from the applied sort specification.
    pub fn from_spec(spec: &[SortBy], column_id: &str) -> Self {
        match spec.iter().find(|s| s.column_id == column_id) {
            Some(SortBy {
                direction: SortDirection::Ascending,
                ..
            }) => HeaderSortState::Ascending,
            Some(SortBy {
                direction: SortDirection::Descending,
                ..
            }) => HeaderSortState::Descending,
            None => HeaderSortState::NotSorted,
        }
    }

    /// Calculates the next interaction state in the UI cycle for a header click.
    ///
    /// 1. `NotSorted` -> `first`
    /// 2. `first`     -> the opposite direction
    /// 3. opposite    -> `NotSorted` (removes the sort for this column)
    pub fn cycle_next(&self, first: SortDirection) -> Self {
        match self.direction() {
            None => Self::from(first),
            Some(direction) if direction == first => Self::from(first.opposite()),
            Some(_) => HeaderSortState::NotSorted,
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            HeaderSortState::NotSorted => None,
            HeaderSortState::Ascending => Some(SortDirection::Ascending),
            HeaderSortState::Descending => Some(SortDirection::Descending),
        }
    }

    /// Returns a Unicode icon visually representing the interaction state.
    ///
    /// Used by the `SortableHeaderRenderer` trait implementation in `traits.rs`.
    pub fn get_icon(&self) -> &'static str {
        match self {
            HeaderSortState::Ascending => "⬆",
            HeaderSortState::Descending => "⬇",
            HeaderSortState::NotSorted => "↕", // U+2195 UP DOWN ARROW
        }
    }
}

impl From<SortDirection> for HeaderSortState {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => HeaderSortState::Ascending,
            SortDirection::Descending => HeaderSortState::Descending,
        }
    }
}
