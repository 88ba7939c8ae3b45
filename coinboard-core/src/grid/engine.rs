//! The grid state machine.
//!
//! View state is the tuple `(search, sort, page_index, page_size)`. Every
//! mutator is a total transition except `set_page_size`, which validates the
//! size before touching anything. The page index invariant,
//! `page_index <= last_page`, holds after every transition.

use std::collections::HashSet;

use tracing::debug;

use super::export::{encode_rows, CsvExport};
use super::observer::{Callback, GridEvent, Observers, SubscriptionId};
use super::view::{GridView, ViewRow};
use super::{GridError, GridRow, PageSize, SortDirection, SortSpec};

/// Owns one dataset plus its view state and selection.
#[derive(Debug)]
pub struct DataGrid<R: GridRow> {
    records: Vec<R>,
    search: String,
    sort: Option<SortSpec<R::Column>>,
    page_index: usize,
    page_size: PageSize,
    selected: HashSet<String>,
    observers: Observers<R::Column>,
}

impl<R: GridRow> Default for DataGrid<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: GridRow> DataGrid<R> {
    pub fn new() -> Self {
        Self::with_page_size(PageSize::default())
    }

    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            records: Vec::new(),
            search: String::new(),
            sort: None,
            page_index: 0,
            page_size,
            selected: HashSet::new(),
            observers: Observers::new(),
        }
    }

    // ─── Observers ──────────────────────────────────────────────────

    /// Register a callback invoked after every transition.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&GridEvent<R::Column>) + 'static,
    ) -> SubscriptionId {
        let callback: Callback<R::Column> = Box::new(callback);
        self.observers.add(callback)
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn emit(&mut self, event: GridEvent<R::Column>) {
        debug!(?event, "grid transition");
        self.observers.notify(&event);
    }

    // ─── Accessors ──────────────────────────────────────────────────

    /// The dataset in fetch order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortSpec<R::Column>> {
        self.sort
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    // ─── Transitions ────────────────────────────────────────────────

    /// Replace the dataset and reset everything derived from it.
    pub fn set_dataset(&mut self, records: Vec<R>) {
        self.records = records;
        self.search.clear();
        self.sort = None;
        self.page_index = 0;
        self.selected.clear();
        let len = self.records.len();
        self.emit(GridEvent::DatasetReplaced { len });
    }

    /// Case-insensitive substring filter across every field. Resets to page 0.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page_index = 0;
        let term = self.search.clone();
        self.emit(GridEvent::SearchChanged { term });
    }

    /// `None` restores dataset order. Resets to page 0.
    pub fn set_sort(&mut self, column: Option<R::Column>, direction: SortDirection) {
        self.sort = column.map(|column| SortSpec { column, direction });
        self.page_index = 0;
        self.emit(GridEvent::SortChanged(self.sort));
    }

    /// Header-click behaviour: ascending, then descending, then unsorted.
    pub fn sort_by_column(&mut self, column: R::Column) {
        let current = self.sort;
        match current {
            Some(s) if s.column == column && s.direction == SortDirection::Ascending => {
                self.set_sort(Some(column), SortDirection::Descending)
            }
            Some(s) if s.column == column => self.set_sort(None, SortDirection::Ascending),
            _ => self.set_sort(Some(column), SortDirection::Ascending),
        }
    }

    /// Out-of-range requests clamp to the nearest valid page.
    pub fn goto_page(&mut self, index: usize) {
        let last = self.last_page_index();
        self.move_to_page(index.min(last));
    }

    pub fn next_page(&mut self) {
        if self.page_index < self.last_page_index() {
            self.move_to_page(self.page_index + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.page_index > 0 {
            self.move_to_page(self.page_index - 1);
        }
    }

    pub fn first_page(&mut self) {
        self.goto_page(0);
    }

    pub fn last_page(&mut self) {
        self.goto_page(usize::MAX);
    }

    fn move_to_page(&mut self, index: usize) {
        if index != self.page_index {
            self.page_index = index;
            self.emit(GridEvent::PageChanged { page_index: index });
        }
    }

    /// Validate `size`, apply it, and clamp the page index into the new range.
    /// An invalid size leaves the grid untouched.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), GridError> {
        let page_size = PageSize::try_from(size)?;
        self.apply_page_size(page_size);
        Ok(())
    }

    pub fn apply_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page_index = self.page_index.min(self.last_page_index());
        let page_index = self.page_index;
        self.emit(GridEvent::PageSizeChanged {
            page_size,
            page_index,
        });
    }

    /// Flip the selection of `id`. Ids not in the dataset are ignored.
    pub fn toggle_row_selected(&mut self, id: &str) {
        if !self.records.iter().any(|r| r.row_id() == id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        let selected_count = self.selected.len();
        self.emit(GridEvent::SelectionChanged { selected_count });
    }

    /// Select every row on the current page unless all of them already are,
    /// in which case deselect them all.
    pub fn toggle_all_visible_selected(&mut self) {
        let visible: Vec<String> = self
            .page_rows()
            .into_iter()
            .map(|i| self.records[i].row_id().to_string())
            .collect();
        if visible.is_empty() {
            return;
        }

        let any_unselected = visible.iter().any(|id| !self.selected.contains(id));
        for id in visible {
            if any_unselected {
                self.selected.insert(id);
            } else {
                self.selected.remove(&id);
            }
        }
        let selected_count = self.selected.len();
        self.emit(GridEvent::SelectionChanged { selected_count });
    }

    // ─── Derivation ─────────────────────────────────────────────────

    /// Current page plus pager metadata. No side effects.
    pub fn view(&self) -> GridView<'_, R> {
        let filtered = self.filtered_sorted();
        let page_count = self.page_count_for(filtered.len());
        let rows = self
            .page_slice(&filtered)
            .iter()
            .map(|&i| {
                let record = &self.records[i];
                ViewRow {
                    record,
                    selected: self.selected.contains(record.row_id()),
                }
            })
            .collect();

        GridView {
            rows,
            page_index: self.page_index,
            page_count,
            can_go_next: self.page_index + 1 < page_count,
            can_go_previous: self.page_index > 0,
            selected_count: self.selected.len(),
            filtered_count: filtered.len(),
            total_count: self.records.len(),
            page_size: self.page_size,
            sort: self.sort,
            search_term: &self.search,
        }
    }

    /// Every record that passes the filter, in display order, across all pages.
    pub fn filtered_records(&self) -> Vec<&R> {
        self.filtered_sorted()
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    /// Encode the selected records, in dataset order.
    pub fn export_selected(&self) -> Result<CsvExport, GridError> {
        if self.selected.is_empty() {
            return Err(GridError::EmptySelection);
        }
        let export = encode_rows(
            self.records
                .iter()
                .filter(|r| self.selected.contains(r.row_id())),
        )?;
        debug!(rows = export.row_count, "encoded selection");
        Ok(export)
    }

    // ─── Internals ──────────────────────────────────────────────────

    fn matches(&self, record: &R, needle: &str) -> bool {
        needle.is_empty()
            || record
                .cells()
                .iter()
                .any(|c| c.render().to_lowercase().contains(needle))
    }

    /// Indices into `records`: filtered, then stably sorted.
    fn filtered_sorted(&self) -> Vec<usize> {
        let needle = self.search.to_lowercase();
        let mut indices: Vec<usize> = (0..self.records.len())
            .filter(|&i| self.matches(&self.records[i], &needle))
            .collect();

        if let Some(spec) = self.sort {
            // `sort_by` is stable, so ties keep dataset order in both directions.
            indices.sort_by(|&a, &b| {
                let ord = self.records[a]
                    .cell(spec.column)
                    .compare(&self.records[b].cell(spec.column));
                spec.direction.apply(ord)
            });
        }
        indices
    }

    fn page_count_for(&self, filtered_len: usize) -> usize {
        filtered_len.div_ceil(self.page_size.get())
    }

    /// Number of records passing the search. Order does not matter here.
    fn filtered_len(&self) -> usize {
        let needle = self.search.to_lowercase();
        self.records
            .iter()
            .filter(|r| self.matches(r, &needle))
            .count()
    }

    fn last_page_index(&self) -> usize {
        self.page_count_for(self.filtered_len()).saturating_sub(1)
    }

    fn page_slice<'s>(&self, filtered: &'s [usize]) -> &'s [usize] {
        let size = self.page_size.get();
        let start = (self.page_index * size).min(filtered.len());
        let end = (start + size).min(filtered.len());
        &filtered[start..end]
    }

    fn page_rows(&self) -> Vec<usize> {
        let filtered = self.filtered_sorted();
        self.page_slice(&filtered).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct Coin {
        id: String,
        symbol: &'static str,
        rank: u64,
        price: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Col {
        Symbol,
        Rank,
        Price,
    }

    impl GridRow for Coin {
        type Column = Col;

        fn row_id(&self) -> &str {
            &self.id
        }

        fn cells(&self) -> Vec<Cell<'_>> {
            vec![
                Cell::Text(&self.id),
                Cell::Text(self.symbol),
                Cell::Integer(self.rank),
                Cell::Number(self.price),
            ]
        }

        fn cell(&self, column: Col) -> Cell<'_> {
            match column {
                Col::Symbol => Cell::Text(self.symbol),
                Col::Rank => Cell::Integer(self.rank),
                Col::Price => Cell::Number(self.price),
            }
        }
    }

    fn coins(n: u64) -> Vec<Coin> {
        (1..=n)
            .map(|rank| Coin {
                id: format!("id{rank}"),
                symbol: if rank % 2 == 0 { "EVEN" } else { "odd" },
                rank,
                price: (n - rank) as f64 * 1.5,
            })
            .collect()
    }

    fn grid(n: u64) -> DataGrid<Coin> {
        let mut g = DataGrid::new();
        g.set_dataset(coins(n));
        g
    }

    #[test]
    fn empty_grid_has_no_pages() {
        let g: DataGrid<Coin> = DataGrid::new();
        let v = g.view();
        assert!(v.rows.is_empty());
        assert_eq!(v.page_index, 0);
        assert_eq!(v.page_count, 0);
        assert!(!v.can_go_next);
        assert!(!v.can_go_previous);
    }

    #[test]
    fn pages_through_dataset() {
        let mut g = grid(25);
        assert_eq!(g.view().page_count, 3);
        g.next_page();
        g.next_page();
        let v = g.view();
        assert_eq!(v.page_index, 2);
        assert_eq!(v.rows.len(), 5);
        assert!(!v.can_go_next);
        g.next_page();
        assert_eq!(g.page_index(), 2);
        g.first_page();
        g.previous_page();
        assert_eq!(g.page_index(), 0);
        g.last_page();
        assert_eq!(g.page_index(), 2);
    }

    #[test]
    fn search_resets_page_and_keeps_index_in_range() {
        let mut g = grid(25);
        g.goto_page(2);
        g.set_search_term("id1");
        let v = g.view();
        assert_eq!(v.page_index, 0);
        // id1, id10..id19
        assert_eq!(v.filtered_count, 11);
        assert_eq!(v.page_count, 2);
    }

    #[test]
    fn page_bounds_follow_filtered_count_under_sort() {
        let mut g = grid(25);
        g.set_search_term("id1");
        g.set_sort(Some(Col::Price), SortDirection::Descending);
        g.goto_page(9);
        assert_eq!(g.page_index(), 1);
        g.next_page();
        assert_eq!(g.page_index(), 1);
        g.first_page();
        g.last_page();
        let v = g.view();
        assert_eq!(v.page_index, 1);
        assert_eq!(v.rows.len(), 1);
        assert_eq!(v.records().next().unwrap().id, "id19");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut g = grid(6);
        g.set_search_term("OdD");
        let ids: Vec<&str> = g.view().records().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["id1", "id3", "id5"]);
    }

    #[test]
    fn search_matches_numeric_representation() {
        let mut g = grid(4);
        // prices: 4.5, 3, 1.5, 0
        g.set_search_term("1.5");
        let ids: Vec<&str> = g.view().records().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["id3"]);
    }

    #[test]
    fn sort_descending_keeps_ties_in_dataset_order() {
        let mut g = grid(6);
        g.set_sort(Some(Col::Symbol), SortDirection::Descending);
        let ids: Vec<&str> = g.view().records().map(|c| c.id.as_str()).collect();
        // "odd" > "EVEN" in byte order.
        assert_eq!(ids, ["id1", "id3", "id5", "id2", "id4", "id6"]);
    }

    #[test]
    fn sort_by_column_cycles() {
        let mut g = grid(3);
        g.sort_by_column(Col::Price);
        assert_eq!(g.sort().unwrap().direction, SortDirection::Ascending);
        g.sort_by_column(Col::Price);
        assert_eq!(g.sort().unwrap().direction, SortDirection::Descending);
        g.sort_by_column(Col::Price);
        assert!(g.sort().is_none());
        g.sort_by_column(Col::Rank);
        assert_eq!(g.sort().unwrap().column, Col::Rank);
    }

    #[test]
    fn invalid_page_size_leaves_state_untouched() {
        let mut g = grid(25);
        g.goto_page(1);
        assert_eq!(g.set_page_size(15), Err(GridError::InvalidPageSize(15)));
        assert_eq!(g.page_size(), PageSize::Ten);
        assert_eq!(g.page_index(), 1);
    }

    #[test]
    fn toggle_row_ignores_unknown_ids() {
        let mut g = grid(3);
        g.toggle_row_selected("nope");
        assert_eq!(g.selected_count(), 0);
        g.toggle_row_selected("id2");
        assert!(g.is_selected("id2"));
        g.toggle_row_selected("id2");
        assert!(!g.is_selected("id2"));
    }

    #[test]
    fn toggle_all_visible_selects_then_deselects_page() {
        let mut g = grid(25);
        g.toggle_row_selected("id3");
        g.toggle_all_visible_selected();
        assert_eq!(g.selected_count(), 10);
        assert!(g.view().all_visible_selected());

        // Selection on other pages is untouched.
        g.next_page();
        g.toggle_row_selected("id15");
        g.previous_page();
        g.toggle_all_visible_selected();
        assert_eq!(g.selected_count(), 1);
        assert!(g.is_selected("id15"));
    }

    #[test]
    fn toggle_all_visible_on_empty_page_is_noop() {
        let mut g = grid(5);
        g.set_search_term("zzz");
        g.toggle_all_visible_selected();
        assert_eq!(g.selected_count(), 0);
    }

    #[test]
    fn set_dataset_resets_view_state_and_selection() {
        let mut g = grid(25);
        g.set_search_term("id");
        g.set_sort(Some(Col::Price), SortDirection::Ascending);
        g.goto_page(1);
        g.toggle_row_selected("id1");

        g.set_dataset(coins(5));
        assert_eq!(g.search_term(), "");
        assert!(g.sort().is_none());
        assert_eq!(g.page_index(), 0);
        assert_eq!(g.selected_count(), 0);
    }

    #[test]
    fn export_uses_dataset_order_regardless_of_sort() {
        let mut g = grid(3);
        g.set_sort(Some(Col::Price), SortDirection::Ascending);
        g.toggle_row_selected("id3");
        g.toggle_row_selected("id1");
        let export = g.export_selected().unwrap();
        assert_eq!(export.content, "id1,odd,1,3\nid3,odd,3,0");
    }

    #[test]
    fn export_with_empty_selection_fails() {
        let g = grid(3);
        assert_eq!(g.export_selected(), Err(GridError::EmptySelection));
    }

    #[test]
    fn observers_see_each_transition() {
        let seen: Rc<RefCell<Vec<GridEvent<Col>>>> = Rc::default();
        let sink = seen.clone();
        let mut g: DataGrid<Coin> = DataGrid::new();
        let id = g.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        g.set_dataset(coins(15));
        g.next_page();
        g.next_page(); // boundary, no transition
        g.toggle_row_selected("id12");
        g.set_search_term("odd");

        assert_eq!(
            *seen.borrow(),
            vec![
                GridEvent::DatasetReplaced { len: 15 },
                GridEvent::PageChanged { page_index: 1 },
                GridEvent::SelectionChanged { selected_count: 1 },
                GridEvent::SearchChanged { term: "odd".into() },
            ]
        );

        assert!(g.unsubscribe(id));
        assert!(!g.unsubscribe(id));
        g.first_page();
        assert_eq!(seen.borrow().len(), 4);
    }
}
