//! Synchronous change notifications.
//!
//! Observers are plain callbacks held by the grid and invoked in subscription
//! order right after a transition is applied, before the mutator returns.

use std::fmt;

use super::{PageSize, SortSpec};

/// What a transition changed.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent<C> {
    DatasetReplaced { len: usize },
    SearchChanged { term: String },
    SortChanged(Option<SortSpec<C>>),
    PageChanged { page_index: usize },
    PageSizeChanged { page_size: PageSize, page_index: usize },
    SelectionChanged { selected_count: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Callback<C> = Box<dyn FnMut(&GridEvent<C>)>;

pub(crate) struct Observers<C> {
    entries: Vec<(SubscriptionId, Callback<C>)>,
    next_id: u64,
}

impl<C> Observers<C> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, callback: Callback<C>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &GridEvent<C>) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<C> fmt::Debug for Observers<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
