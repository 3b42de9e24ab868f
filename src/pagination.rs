//! Layout of the pagination bar below the table.

/// Number of rows per page unless overridden on the command line.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum number of consecutive page-number buttons.
pub const MAX_PAGES_TO_SHOW: usize = 5;

/// One element of the pagination bar, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Previous,
    /// Jump to the zero-based page index. `current` marks the highlighted button.
    Page { index: usize, current: bool },
    Ellipsis,
    Next,
}

/// Zero-based, half-open range of page numbers shown around the current page.
///
/// `start = max(min(current - 2, page_count - 5), 0)` and
/// `end = min(start + 5, page_count)`, evaluated in signed arithmetic.
pub fn page_window(current_page: usize, page_count: usize) -> (usize, usize) {
    let half = (MAX_PAGES_TO_SHOW / 2) as i64;
    let current = current_page as i64;
    let count = page_count as i64;

    let start = (current - half).min(count - MAX_PAGES_TO_SHOW as i64).max(0) as usize;
    let end = (start + MAX_PAGES_TO_SHOW).min(page_count);
    (start, end)
}

/// Builds the full pagination bar: previous/next arrows, first/last
/// shortcuts with ellipses, and the page window.
pub fn page_buttons(current_page: usize, page_count: usize) -> Vec<PageButton> {
    let (start, end) = page_window(current_page, page_count);
    let page = |index: usize| PageButton::Page {
        index,
        current: index == current_page,
    };
    let mut buttons = Vec::with_capacity(MAX_PAGES_TO_SHOW + 6);

    if current_page > 0 {
        buttons.push(PageButton::Previous);
    }

    if start > 0 {
        buttons.push(page(0));
        if start > 1 {
            buttons.push(PageButton::Ellipsis);
        }
    }

    buttons.extend((start..end).map(page));

    if end < page_count {
        if end + 1 < page_count {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.push(page(page_count - 1));
    }

    if current_page + 1 < page_count {
        buttons.push(PageButton::Next);
    }

    buttons
}
