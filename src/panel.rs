//! The slide-in side panel and the state selecting what it shows.

use egui::{Align, Context, Id, Layout, RichText, ScrollArea, SidePanel, Ui};

/// Which feature the side panel is showing.
///
/// A single value carries both "is the panel open" and "what is in it", so an
/// open panel without content (or content without an open panel) cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    None,
    /// View/hide columns.
    Columns,
    Sort,
    Filter,
    Group,
}

impl PanelState {
    /// The features reachable from the toolbar, in toolbar order.
    pub const FEATURES: [PanelState; 4] = [
        PanelState::Columns,
        PanelState::Sort,
        PanelState::Filter,
        PanelState::Group,
    ];

    pub fn is_open(&self) -> bool {
        *self != PanelState::None
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelState::None => "",
            PanelState::Columns => "Columns",
            PanelState::Sort => "Sort",
            PanelState::Filter => "Filter",
            PanelState::Group => "Group",
        }
    }

    /// Toolbar icon.
    pub fn icon(&self) -> &'static str {
        match self {
            PanelState::None => "",
            PanelState::Columns => "👁",
            PanelState::Sort => "⇅",
            PanelState::Filter => "⛃",
            PanelState::Group => "👥",
        }
    }

    pub fn hover_text(&self) -> &'static str {
        match self {
            PanelState::None => "",
            PanelState::Columns => "Show or hide columns",
            PanelState::Sort => "Sort rows by a column",
            PanelState::Filter => "Filter rows",
            PanelState::Group => "Group rows",
        }
    }
}

/// Presentation shell of the side panel.
///
/// Owns no business state: the caller decides whether it is open and what it
/// contains, and gets told through `on_close` when the close control is used.
pub struct SidePanelShell<'a> {
    id: &'a str,
    title: &'a str,
    is_open: bool,
}

impl<'a> SidePanelShell<'a> {
    pub fn new(id: &'a str, title: &'a str, is_open: bool) -> Self {
        SidePanelShell { id, title, is_open }
    }

    /// Slides the panel in (or out) on the right edge and draws `add_contents` inside.
    ///
    /// While the panel is animating closed its content is still painted; clicks on
    /// the close control during that time are ignored, so `on_close` runs exactly
    /// once per activation of an open panel.
    pub fn show(self, ctx: &Context, on_close: impl FnOnce(), add_contents: impl FnOnce(&mut Ui)) {
        let mut close_clicked = false;

        SidePanel::right(Id::new(self.id))
            .resizable(true)
            .default_width(280.0)
            .show_animated(ctx, self.is_open, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(self.title);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        close_clicked = ui
                            .button(RichText::new("✖"))
                            .on_hover_text("Close")
                            .clicked();
                    });
                });
                ui.separator();
                ScrollArea::vertical().show(ui, add_contents);
            });

        if close_requested(self.is_open, close_clicked) {
            tracing::debug!("Side panel '{}' closed", self.title);
            on_close();
        }
    }
}

/// A click on the close control only counts while the panel is open.
pub fn close_requested(is_open: bool, clicked: bool) -> bool {
    is_open && clicked
}

#[cfg(test)]
mod tests_panel {
    use super::*;

    #[test]
    fn test_default_is_closed() {
        assert_eq!(PanelState::default(), PanelState::None);
        assert!(!PanelState::None.is_open());
        assert!(PanelState::FEATURES.iter().all(PanelState::is_open));
    }

    #[test]
    fn test_close_only_while_open() {
        assert!(close_requested(true, true));
        assert!(!close_requested(true, false));
        assert!(!close_requested(false, true));
        assert!(!close_requested(false, false));
    }

    #[test]
    fn test_close_fires_once_per_activation() {
        let mut calls = 0;
        let mut is_open = true;
        for clicked in [true, true, false] {
            if close_requested(is_open, clicked) {
                calls += 1;
                // The parent's handler flips the flag in response.
                is_open = false;
            }
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_shell_accepts_borrowed_id() {
        let ctx = Context::default();
        let mut closes = 0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            // Ids built at runtime, not string literals.
            let id = format!("panel_{}", PanelState::Sort.title());
            let title = PanelState::Sort.title().to_string();
            SidePanelShell::new(&id, &title, true).show(
                ctx,
                || closes += 1,
                |ui| {
                    ui.label("Sort content");
                },
            );
        });
        // Nothing was clicked.
        assert_eq!(closes, 0);
    }

    #[test]
    fn test_feature_labels() {
        let titles: Vec<&str> = PanelState::FEATURES.iter().map(|f| f.title()).collect();
        assert_eq!(titles, vec!["Columns", "Sort", "Filter", "Group"]);
    }
}
