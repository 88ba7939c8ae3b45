//! Read-only snapshot of the current page.

use super::{GridRow, PageSize, SortSpec};

/// One visible row and whether it is selected.
#[derive(Debug)]
pub struct ViewRow<'a, R> {
    pub record: &'a R,
    pub selected: bool,
}

/// Derived view returned by [`super::DataGrid::view`].
#[derive(Debug)]
pub struct GridView<'a, R: GridRow> {
    pub rows: Vec<ViewRow<'a, R>>,
    pub page_index: usize,
    /// Zero when the filter matches nothing.
    pub page_count: usize,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub selected_count: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub page_size: PageSize,
    pub sort: Option<SortSpec<R::Column>>,
    pub search_term: &'a str,
}

impl<'a, R: GridRow> GridView<'a, R> {
    /// True when every visible row is selected (and there is at least one).
    pub fn all_visible_selected(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|r| r.selected)
    }

    pub fn records(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.rows.iter().map(|r| r.record)
    }

    /// "Page x of y" as the pager shows it.
    pub fn pager_label(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.page_count)
    }
}
