//! Extensions to `egui` types used across the UI.
//!
//! `MyStyle` configures the look of the whole application once at start-up,
//! `SortableHeaderRenderer` draws one clickable, sort-aware table header cell.

use crate::HeaderSortState;

use egui::{
    Color32, Context,
    FontFamily::Proportional,
    FontId, Response, RichText, Sense, Spacing, Style,
    TextStyle::{Body, Button, Heading, Monospace, Small},
    Ui, Visuals,
    style::ScrollStyle,
};

/// Defines custom text styles for the egui context.
/// Overrides default `egui` font sizes for different logical text styles (Heading, Body, etc.).
pub const CUSTOM_TEXT_STYLE: [(egui::TextStyle, egui::FontId); 5] = [
    (Heading, FontId::new(18.0, Proportional)),
    (Body, FontId::new(15.0, Proportional)),
    (Button, FontId::new(15.0, Proportional)),
    (Monospace, FontId::new(14.0, Proportional)),
    (Small, FontId::new(13.0, Proportional)),
];

/// A trait for applying custom styling to the `egui` context (`Context`).
/// Used once at startup by `TableViewApp::new`.
pub trait MyStyle {
    /// Applies a pre-defined application style to the `egui` context.
    fn set_style_init(&self, visuals: Visuals);
}

impl MyStyle for Context {
    fn set_style_init(&self, visuals: Visuals) {
        let scroll = ScrollStyle {
            handle_min_length: 32.0,
            ..ScrollStyle::default()
        };

        let spacing = Spacing {
            scroll,
            item_spacing: [8.0, 6.0].into(),
            ..Spacing::default()
        };

        let style = Style {
            visuals,
            spacing,
            text_styles: CUSTOM_TEXT_STYLE.into(),
            ..Style::default()
        };

        self.set_style(style);
    }
}

/// Trait defining a widget for rendering a sortable table header cell.
pub trait SortableHeaderRenderer {
    /// Renders the column header text followed by its sort indicator.
    ///
    /// ### Returns
    /// * `egui::Response`: Click response of the whole header. The caller handles clicks.
    fn render_sortable_header(&mut self, header: &str, state: HeaderSortState) -> Response;
}

impl SortableHeaderRenderer for Ui {
    fn render_sortable_header(&mut self, header: &str, state: HeaderSortState) -> Response {
        let color = get_column_header_text_color(self.visuals());
        let text = RichText::new(format!("{header} {}", state.get_icon()))
            .color(color)
            .strong();

        self.add(egui::Label::new(text).sense(Sense::click()).selectable(false))
            .on_hover_text(format!("Click to sort by: {header}"))
    }
}

/// Helper: Determines header text color based on theme for contrast.
fn get_column_header_text_color(visuals: &Visuals) -> Color32 {
    if visuals.dark_mode {
        Color32::from_rgb(160, 200, 255) // Lighter blue for dark mode
    } else {
        Color32::from_rgb(0, 80, 160) // Darker blue for light mode
    }
}
