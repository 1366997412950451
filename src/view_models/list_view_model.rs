use log::trace;
use serde::Serialize;
use std::{fmt, num::NonZeroUsize};

use super::{
    filters::filter_indices,
    list_record::{ListRecord, SearchField},
    pagination::{PageWindow, paginate},
    record_store::RecordStore,
};
use crate::types::filters::{
    date_range::DateRange,
    filter_state::{FIRST_PAGE, FilterState},
    selection::Selection,
};

type Listener<R> = Box<dyn FnMut(&ListViewModel<R>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds a record collection and the filtered, paginated view derived from it.
///
/// Every setter recomputes the derived view from the full collection and then
/// notifies subscribers. Changing a filter or the records always lands on the
/// first page; `set_current_page` clamps into the available pages.
pub struct ListViewModel<R: ListRecord> {
    store: RecordStore<R>,
    search_fields: Vec<SearchField<R>>,
    filters: FilterState<R::Category, R::Status>,
    page_size: NonZeroUsize,
    filtered: Vec<usize>,
    window: PageWindow,
    listeners: Vec<(SubscriptionId, Listener<R>)>,
    next_subscription: u64,
}

impl<R: ListRecord> ListViewModel<R> {
    pub fn new(records: Vec<R>, page_size: NonZeroUsize) -> Self {
        Self::with_filters(records, page_size, FilterState::default())
    }

    /// Starts from injected filter inputs; the requested page is kept if it
    /// exists for the initial result set and clamped otherwise.
    pub fn with_filters(
        records: Vec<R>,
        page_size: NonZeroUsize,
        filters: FilterState<R::Category, R::Status>,
    ) -> Self {
        let requested_page = filters.current_page;
        let mut view_model = Self {
            store: RecordStore::new(records),
            search_fields: R::default_search_fields(),
            filters,
            page_size,
            filtered: Vec::new(),
            window: paginate(0, FIRST_PAGE, page_size),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        view_model.filtered = view_model.compute_filtered();
        view_model.repaginate(requested_page);
        view_model
    }

    /// Swaps the searched fields, keeping the current page when it still
    /// exists.
    pub fn with_search_fields(mut self, fields: Vec<SearchField<R>>) -> Self {
        self.search_fields = fields;
        self.filtered = self.compute_filtered();
        self.repaginate(self.filters.current_page);
        self
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.search_term = term.into();
        self.refilter();
    }

    pub fn set_category_filter(&mut self, category: Selection<R::Category>) {
        self.filters.category = category;
        self.refilter();
    }

    pub fn set_status_filter(&mut self, status: Selection<R::Status>) {
        self.filters.status = status;
        self.refilter();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filters.date_range = range;
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.refilter();
    }

    /// Moves to another page of the current filtered set without re-running
    /// the predicates.
    pub fn set_current_page(&mut self, page: usize) {
        self.repaginate(page);
        self.notify();
    }

    /// Replaces the canonical collection with a fresh snapshot.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.store.replace(records);
        self.refilter();
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ListViewModel<R>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn records(&self) -> &[R] {
        self.store.records()
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn filtered_records(&self) -> Vec<&R> {
        self.resolve(&self.filtered)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn paginated_records(&self) -> Vec<&R> {
        self.resolve(self.window.slice(&self.filtered))
    }

    pub fn current_page(&self) -> usize {
        self.window.page
    }

    pub fn total_pages(&self) -> usize {
        self.window.total_pages
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn filters(&self) -> &FilterState<R::Category, R::Status> {
        &self.filters
    }

    pub fn search_term(&self) -> &str {
        &self.filters.search_term
    }

    pub fn category_filter(&self) -> &Selection<R::Category> {
        &self.filters.category
    }

    pub fn status_filter(&self) -> &Selection<R::Status> {
        &self.filters.status
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.filters.date_range
    }

    pub fn search_fields(&self) -> &[SearchField<R>] {
        &self.search_fields
    }

    pub fn snapshot(&self) -> ListSnapshot<R>
    where
        R: Clone,
    {
        ListSnapshot {
            records: self.paginated_records().into_iter().cloned().collect(),
            current_page: self.current_page(),
            total_pages: self.total_pages(),
            page_size: self.page_size.get(),
            filtered_count: self.filtered_count(),
            total_count: self.store.len(),
            filters: self.filters.clone(),
        }
    }

    fn compute_filtered(&self) -> Vec<usize> {
        filter_indices(self.store.records(), &self.filters, &self.search_fields)
    }

    fn refilter(&mut self) {
        self.filtered = self.compute_filtered();
        self.repaginate(FIRST_PAGE);
        trace!(
            "list view recomputed: {} of {} records pass, {} page(s)",
            self.filtered.len(),
            self.store.len(),
            self.window.total_pages
        );
        self.notify();
    }

    fn repaginate(&mut self, page: usize) {
        self.window = paginate(self.filtered.len(), page, self.page_size);
        self.filters.current_page = self.window.page;
    }

    fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(&*self);
        }
        self.listeners = listeners;
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&R> {
        indices
            .iter()
            .filter_map(|&index| self.store.get(index))
            .collect()
    }
}

impl<R: ListRecord> fmt::Debug for ListViewModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListViewModel")
            .field("records", &self.store.len())
            .field("filters", &self.filters)
            .field("page_size", &self.page_size)
            .field("filtered", &self.filtered.len())
            .field("window", &self.window)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Owned, serialisable picture of the current page.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "R: Serialize, R::Category: fmt::Display, R::Status: fmt::Display"))]
pub struct ListSnapshot<R: ListRecord> {
    pub records: Vec<R>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub filters: FilterState<R::Category, R::Status>,
}
