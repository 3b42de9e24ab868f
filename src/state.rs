//! Interactive state of the table widget and the derivations built on it.
//!
//! `TableState` is the single owner of everything the user can change
//! (search term, column visibility, sort, page, side panel). The UI never
//! mutates it directly: rendering produces `TableAction`s which are applied
//! after the frame is drawn, and every change re-runs the pure pipeline
//! search -> sort -> paginate.

use std::sync::Arc;

use crate::{
    ClientRowModel, ColumnDef, ColumnVisibility, HeaderSortState, PanelState, Row, RowModel,
    RowPage, RowQuery, SortBy, SortDirection, SortSpec, search_rows,
};

/// A user intent emitted by the table widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    SetSearch(String),
    ClearSearch,
    /// Open the side panel with a feature. `PanelState::None` closes it.
    OpenPanel(PanelState),
    ClosePanel,
    /// Flip one column in the draft visibility map.
    ToggleDraftColumn(String),
    /// Commit the draft visibility map.
    ApplyVisibility,
    /// Replace the sort specification with a single criterion.
    SetSort {
        column_id: String,
        direction: SortDirection,
    },
    ClearSort,
    /// Header click: advance the column through its sort cycle.
    ToggleHeaderSort(String),
    SetPage(usize),
    NextPage,
    PreviousPage,
}

pub struct TableState {
    columns: Vec<ColumnDef>,
    dataset: Arc<Vec<Row>>,
    model: Box<dyn RowModel>,

    search_term: String,
    draft_visibility: ColumnVisibility,
    active_visibility: ColumnVisibility,
    sort: SortSpec,
    page_index: usize,
    page_size: usize,
    panel: PanelState,

    /// Dataset indices matching `search_term`.
    filtered: Vec<usize>,
    /// Current page as computed by `model`.
    page: RowPage,
}

impl TableState {
    pub fn new(columns: Vec<ColumnDef>, page_size: usize) -> Self {
        Self::with_model(columns, page_size, Box::new(ClientRowModel))
    }

    /// Creates the state with a custom row-modeling engine.
    pub fn with_model(columns: Vec<ColumnDef>, page_size: usize, model: Box<dyn RowModel>) -> Self {
        let visibility = ColumnVisibility::all_visible(&columns);
        let mut state = TableState {
            columns,
            dataset: Arc::new(Vec::new()),
            model,
            search_term: String::new(),
            draft_visibility: visibility.clone(),
            active_visibility: visibility,
            sort: SortSpec::new(),
            page_index: 0,
            page_size: page_size.max(1),
            panel: PanelState::None,
            filtered: Vec::new(),
            page: RowPage::default(),
        };
        state.recompute();
        state
    }

    /// Replaces the dataset, keeping search, sort and visibility.
    pub fn set_dataset(&mut self, dataset: Arc<Vec<Row>>) {
        tracing::debug!("Table dataset set: {} rows", dataset.len());
        self.dataset = dataset;
        self.page_index = 0;
        self.refilter();
    }

    pub fn apply(&mut self, action: TableAction) {
        tracing::trace!("Apply {action:?}");
        match action {
            TableAction::SetSearch(term) => self.set_search(term),
            TableAction::ClearSearch => self.set_search(String::new()),
            TableAction::OpenPanel(panel) => self.open_panel(panel),
            TableAction::ClosePanel => self.close_panel(),
            TableAction::ToggleDraftColumn(column_id) => {
                self.draft_visibility.toggle(&column_id);
            }
            TableAction::ApplyVisibility => self.apply_visibility(),
            TableAction::SetSort {
                column_id,
                direction,
            } => self.set_sort(vec![SortBy {
                column_id,
                direction,
            }]),
            TableAction::ClearSort => self.set_sort(SortSpec::new()),
            TableAction::ToggleHeaderSort(column_id) => self.toggle_header_sort(&column_id),
            TableAction::SetPage(index) => self.set_page(index),
            TableAction::NextPage => {
                if self.page.can_next_page() {
                    self.set_page(self.page.page_index + 1);
                }
            }
            TableAction::PreviousPage => {
                if self.page.can_previous_page() {
                    self.set_page(self.page.page_index - 1);
                }
            }
        }
    }

    fn set_search(&mut self, term: String) {
        if term == self.search_term {
            return;
        }
        self.search_term = term;
        self.page_index = 0;
        self.refilter();
        tracing::debug!(
            "Search '{}' matched {} of {} rows",
            self.search_term,
            self.filtered.len(),
            self.dataset.len()
        );
    }

    fn open_panel(&mut self, panel: PanelState) {
        if panel == PanelState::Columns {
            // Unapplied edits from a previous visit are discarded.
            self.draft_visibility = self.active_visibility.clone();
        }
        tracing::debug!("Side panel: {:?} -> {:?}", self.panel, panel);
        self.panel = panel;
    }

    fn close_panel(&mut self) {
        self.open_panel(PanelState::None);
    }

    fn apply_visibility(&mut self) {
        self.active_visibility = self.draft_visibility.clone();
        tracing::debug!(
            "Column visibility applied, {} hidden",
            self.active_visibility.hidden_count()
        );
        self.recompute();
    }

    fn set_sort(&mut self, sort: SortSpec) {
        tracing::debug!("Sort: {sort:?}");
        self.sort = sort;
        self.page_index = 0;
        self.recompute();
    }

    fn toggle_header_sort(&mut self, column_id: &str) {
        let next = HeaderSortState::from_spec(&self.sort, column_id)
            .cycle_next(self.first_sort_direction(column_id));
        let sort = match next.direction() {
            Some(direction) => vec![SortBy::new(column_id, direction)],
            None => SortSpec::new(),
        };
        self.set_sort(sort);
    }

    /// Judged from the column's cell in the first row that survived the search.
    fn first_sort_direction(&self, column_id: &str) -> SortDirection {
        let sample = self
            .columns
            .iter()
            .find(|c| c.id == column_id)
            .zip(self.filtered.first())
            .and_then(|(column, &idx)| self.dataset[idx].get(&column.accessor));
        SortDirection::first_for(sample)
    }

    fn set_page(&mut self, index: usize) {
        self.page_index = index;
        self.recompute();
    }

    fn refilter(&mut self) {
        self.filtered = search_rows(&self.dataset, &self.search_term);
        self.recompute();
    }

    fn recompute(&mut self) {
        let query = RowQuery {
            sort: &self.sort,
            visibility: &self.active_visibility,
            page_index: self.page_index,
            page_size: self.page_size,
        };
        self.page = self
            .model
            .compute(&self.dataset, &self.columns, &self.filtered, &query);
        self.page_index = self.page.page_index;
    }

    // --- Accessors ---

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn dataset(&self) -> &[Row] {
        &self.dataset
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn draft_visibility(&self) -> &ColumnVisibility {
        &self.draft_visibility
    }

    pub fn active_visibility(&self) -> &ColumnVisibility {
        &self.active_visibility
    }

    pub fn sort(&self) -> &[SortBy] {
        &self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    /// Number of rows surviving the search, across all pages.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn page(&self) -> &RowPage {
        &self.page
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&self) -> impl Iterator<Item = &Row> {
        self.page.rows.iter().map(|&idx| &self.dataset[idx])
    }

    /// Columns rendered on the current page.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.page.visible_columns.iter().map(|&idx| &self.columns[idx])
    }
}
