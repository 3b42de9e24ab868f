//! Rendering of the table widget.
//!
//! Every function here reads `TableState` and records what the user asked for
//! as `TableAction`s. Nothing is mutated while the frame is being drawn; the
//! caller applies the collected actions afterwards.

use crate::{
    HeaderSortState, PageButton, PanelState, SortDirection, SortableHeaderRenderer, TableAction,
    TableState, cell_text, page_buttons,
};

use egui::{Align, Button, Layout, RichText, TextEdit, TextStyle, Ui};
use egui_extras::{Column, TableBuilder, TableRow};

/// Width of the search input.
pub const SEARCH_WIDTH: f32 = 300.0;

/// Read-only view over `TableState` that draws the individual parts of the widget.
pub struct TableWidget<'a> {
    state: &'a TableState,
}

impl<'a> TableWidget<'a> {
    pub fn new(state: &'a TableState) -> Self {
        TableWidget { state }
    }

    /// Search box with its clear control, followed by one button per side-panel feature.
    pub fn render_toolbar(&self, ui: &mut Ui, actions: &mut Vec<TableAction>) {
        ui.horizontal(|ui| {
            let mut term = self.state.search_term().to_string();
            let response = ui.add(
                TextEdit::singleline(&mut term)
                    .hint_text("Search")
                    .desired_width(SEARCH_WIDTH),
            );
            if response.changed() {
                actions.push(TableAction::SetSearch(term));
            }

            if !self.state.search_term().is_empty()
                && ui.small_button("×").on_hover_text("Clear search").clicked()
            {
                actions.push(TableAction::ClearSearch);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                // Right-to-left: iterate backwards to keep toolbar order.
                for feature in PanelState::FEATURES.iter().rev() {
                    let selected = self.state.panel() == *feature;
                    let text = format!("{} {}", feature.icon(), feature.title());
                    let clicked = ui
                        .add(Button::selectable(selected, text))
                        .on_hover_text(feature.hover_text())
                        .clicked();

                    if clicked {
                        actions.push(toolbar_action(self.state.panel(), *feature));
                    }
                }
            });
        });
    }

    /// Draws the rows of the current page under a sortable header.
    pub fn render_table(&self, ui: &mut Ui, actions: &mut Vec<TableAction>) {
        let columns: Vec<_> = self.state.visible_columns().collect();
        if columns.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No visible columns. Enable some in the Columns panel.");
            });
            return;
        }

        let rows: Vec<_> = self.state.page_rows().collect();

        let style = ui.style();
        let text_height = TextStyle::Body.resolve(style).size + style.spacing.item_spacing.y;
        let header_height = style.spacing.interact_size.y + 2.0 * style.spacing.item_spacing.y;
        let col_number = columns.len() as f32;
        let available_space = ui.available_width()
            - col_number * style.spacing.item_spacing.x
            - style.spacing.scroll.bar_width;
        let initial_col_width = available_space / col_number;
        let min_col_width = style.spacing.interact_size.x.max(initial_col_width / 4.0);

        let column = Column::initial(initial_col_width)
            .at_least(min_col_width)
            .resizable(true)
            .clip(true);

        // Widths are remembered per id, so a new set of columns gets a fresh layout.
        let column_ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();

        TableBuilder::new(ui)
            .id_salt(&column_ids)
            .striped(true)
            .columns(column, columns.len())
            .column(Column::remainder())
            .auto_shrink([false, false])
            .header(header_height, |mut header: TableRow<'_, '_>| {
                for column in &columns {
                    header.col(|ui| {
                        let state = HeaderSortState::from_spec(self.state.sort(), &column.id);
                        ui.horizontal_centered(|ui| {
                            if ui.render_sortable_header(&column.header, state).clicked() {
                                actions.push(TableAction::ToggleHeaderSort(column.id.clone()));
                            }
                        });
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, rows.len(), |mut table_row| {
                    let row = rows[table_row.index()];
                    for column in &columns {
                        let numeric = row.get(&column.accessor).is_some_and(|v| v.is_number());
                        let layout = if numeric {
                            Layout::right_to_left(Align::Center)
                        } else {
                            Layout::left_to_right(Align::Center)
                        };
                        table_row.col(|ui| {
                            ui.with_layout(layout.with_main_wrap(false), |ui| {
                                ui.label(cell_text(row, &column.accessor));
                            });
                        });
                    }
                });
            });
    }

    /// Previous/next arrows, first/last shortcuts and the window of page numbers.
    pub fn render_pagination(&self, ui: &mut Ui, actions: &mut Vec<TableAction>) {
        let page = self.state.page();

        ui.horizontal(|ui| {
            for button in page_buttons(page.page_index, page.page_count) {
                match button {
                    PageButton::Previous => {
                        if ui.button("◀").on_hover_text("Previous page").clicked() {
                            actions.push(TableAction::PreviousPage);
                        }
                    }
                    PageButton::Page { index, current } => {
                        let label = (index + 1).to_string();
                        if ui.add(Button::selectable(current, label)).clicked() && !current {
                            actions.push(TableAction::SetPage(index));
                        }
                    }
                    PageButton::Ellipsis => {
                        ui.label("…");
                    }
                    PageButton::Next => {
                        if ui.button("▶").on_hover_text("Next page").clicked() {
                            actions.push(TableAction::NextPage);
                        }
                    }
                }
            }
        });
    }

    /// Content of the side panel for whichever feature is open.
    pub fn render_panel_contents(&self, ui: &mut Ui, actions: &mut Vec<TableAction>) {
        match self.state.panel() {
            PanelState::Columns => self.render_columns_panel(ui, actions),
            PanelState::Sort => self.render_sort_panel(ui, actions),
            PanelState::Filter => {
                ui.label("Filter Content");
            }
            PanelState::Group => {
                ui.label("Group Content");
            }
            PanelState::None => {}
        }
    }

    /// One checkbox per column bound to the draft map, then Apply.
    fn render_columns_panel(&self, ui: &mut Ui, actions: &mut Vec<TableAction>) {
        let draft = self.state.draft_visibility();

        for column in self.state.columns() {
            let mut visible = draft.is_visible(&column.id);
            if ui.checkbox(&mut visible, column.header.as_str()).changed() {
                actions.push(TableAction::ToggleDraftColumn(column.id.clone()));
            }
        }

        ui.separator();

        let dirty = draft != self.state.active_visibility();
        if ui
            .add_enabled(dirty, Button::new("Apply"))
            .on_hover_text("Show the selected columns in the table")
            .clicked()
        {
            actions.push(TableAction::ApplyVisibility);
        }
    }

    /// Per column: ascending and descending buttons. The active one is highlighted.
    fn render_sort_panel(&self, ui: &mut Ui, actions: &mut Vec<TableAction>) {
        let sort = self.state.sort();

        egui::Grid::new("sort_panel_grid")
            .num_columns(3)
            .striped(true)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                for column in self.state.columns() {
                    let current = HeaderSortState::from_spec(sort, &column.id).direction();
                    ui.label(column.header.as_str());

                    for direction in [SortDirection::Ascending, SortDirection::Descending] {
                        let icon = match direction {
                            SortDirection::Ascending => "⬆",
                            SortDirection::Descending => "⬇",
                        };
                        let selected = current == Some(direction);
                        if ui
                            .add(Button::selectable(selected, icon))
                            .on_hover_text(format!("{direction:?}"))
                            .clicked()
                        {
                            actions.push(TableAction::SetSort {
                                column_id: column.id.clone(),
                                direction,
                            });
                        }
                    }
                    ui.end_row();
                }
            });

        ui.separator();

        if ui
            .add_enabled(!sort.is_empty(), Button::new(RichText::new("Clear sort")))
            .clicked()
        {
            actions.push(TableAction::ClearSort);
        }
    }
}

/// A toolbar button opens its feature, or closes the panel if that feature is already open.
pub fn toolbar_action(current: PanelState, clicked: PanelState) -> TableAction {
    if current == clicked {
        TableAction::ClosePanel
    } else {
        TableAction::OpenPanel(clicked)
    }
}
