//! Pagination state machine for list views
//!
//! Owns the filter, offset, and loaded window for one list view and hands
//! out [`LoadPlan`]s describing the request a front-end should issue.
//! Every plan carries a generation number; a response is only applied
//! when its generation is still the current one, so a stale response can
//! never overwrite fresher state (switch-latest semantics). While a load
//! is in flight no further plan is issued.

use maqraa_api::ListRequest;
use maqraa_api::page::PagedResult;

/// One request a front-end should issue on behalf of the pager.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPlan {
    /// Identifies the request; pass back to `apply_page`/`fail`.
    pub generation: u64,
    /// Fully positioned filter to send.
    pub request: ListRequest,
    /// Whether the resulting items extend the window or replace it.
    pub append: bool,
}

#[derive(Debug)]
struct Pending {
    generation: u64,
    append: bool,
    prev_page_index: u64,
}

/// Pagination/search state for one list view.
#[derive(Debug)]
pub struct ListPager<T> {
    request: ListRequest,
    page_index: u64,
    page_size: u64,
    total_count: u64,
    items: Vec<T>,
    generation: u64,
    pending: Option<Pending>,
    loaded_once: bool,
}

impl<T> ListPager<T> {
    pub fn new(page_size: u64) -> Self {
        let page_size = page_size.max(1);
        Self {
            request: ListRequest::default(),
            page_index: 0,
            page_size,
            total_count: 0,
            items: Vec::new(),
            generation: 0,
            pending: None,
            loaded_once: false,
        }
    }

    /// Base filter applied to every load (language, sort, opaque filter).
    #[must_use]
    pub fn with_request(mut self, request: ListRequest) -> Self {
        self.request = request;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn search_term(&self) -> Option<&str> {
        self.request.search_term.as_deref()
    }

    /// Whether the backend holds more rows than are loaded.
    pub fn has_more(&self) -> bool {
        !self.loaded_once || (self.items.len() as u64) < self.total_count
    }

    fn issue(&mut self, append: bool, prev_page_index: u64) -> LoadPlan {
        self.generation += 1;
        let plan = LoadPlan {
            generation: self.generation,
            request: self.request.clone().page(self.page_index, self.page_size),
            append,
        };
        self.pending = Some(Pending {
            generation: self.generation,
            append,
            prev_page_index,
        });
        plan
    }

    /// Apply a new search term: offset resets to zero and any in-flight
    /// load is superseded.
    pub fn apply_search(&mut self, term: impl Into<String>) -> LoadPlan {
        let term = term.into();
        self.request.search_term = if term.is_empty() { None } else { Some(term) };
        self.page_index = 0;
        self.issue(false, 0)
    }

    /// Reload the first page with the current filter, superseding any
    /// in-flight load.
    pub fn reload(&mut self) -> LoadPlan {
        self.page_index = 0;
        self.issue(false, 0)
    }

    /// Request the next page for infinite scroll.
    ///
    /// A no-op while a load is in flight, before the first load, or once
    /// everything is loaded.
    pub fn next_page(&mut self) -> Option<LoadPlan> {
        if self.pending.is_some() || !self.loaded_once || !self.has_more() {
            return None;
        }
        let prev = self.page_index;
        self.page_index += 1;
        Some(self.issue(true, prev))
    }

    /// Apply a loaded page. Returns false when the page was stale and has
    /// been discarded.
    pub fn apply_page(&mut self, generation: u64, page: PagedResult<T>) -> bool {
        if generation != self.generation {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        self.loaded_once = true;
        self.total_count = page.total_count;
        if pending.append {
            self.items.extend(page.items);
        } else {
            self.items = page.items;
        }
        true
    }

    /// Record a failed load. The already-loaded window is kept; a failed
    /// append rewinds the page index so the same page can be retried.
    /// Stale failures are ignored.
    pub fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if pending.append {
            self.page_index = pending.prev_page_index;
        }
        true
    }

    /// Drop all loaded state, keeping the filter.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_count = 0;
        self.page_index = 0;
        self.pending = None;
        self.loaded_once = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64, items: Vec<u32>) -> PagedResult<u32> {
        PagedResult {
            total_count: total,
            items,
        }
    }

    #[test]
    fn search_resets_offset() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        let plan = pager.reload();
        pager.apply_page(plan.generation, page(30, (0..10).collect()));
        let next = pager.next_page().unwrap();
        pager.apply_page(next.generation, page(30, (10..20).collect()));
        assert_eq!(pager.items().len(), 20);

        let plan = pager.apply_search("omar");
        assert_eq!(plan.request.skip_count, Some(0));
        assert_eq!(plan.request.search_term.as_deref(), Some("omar"));
        assert!(!plan.append);
    }

    #[test]
    fn empty_search_term_clears_the_filter() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        pager.apply_search("x");
        let plan = pager.apply_search("");
        assert_eq!(plan.request.search_term, None);
    }

    #[test]
    fn next_page_is_a_noop_until_first_load() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        assert!(pager.next_page().is_none());
    }

    #[test]
    fn next_page_stops_when_everything_is_loaded() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        let plan = pager.reload();
        assert!(pager.apply_page(plan.generation, page(12, (0..10).collect())));
        assert!(pager.has_more());

        let plan = pager.next_page().unwrap();
        assert_eq!(plan.request.skip_count, Some(10));
        assert!(plan.append);
        assert!(pager.apply_page(plan.generation, page(12, vec![10, 11])));

        assert_eq!(pager.items().len(), 12);
        assert!(!pager.has_more());
        assert!(pager.next_page().is_none());
    }

    #[test]
    fn loading_guard_blocks_duplicate_loads() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        let plan = pager.reload();
        pager.apply_page(plan.generation, page(30, (0..10).collect()));

        let first = pager.next_page();
        assert!(first.is_some());
        // request still in flight
        assert!(pager.is_loading());
        assert!(pager.next_page().is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        let old = pager.apply_search("om");
        // user kept typing before the first response arrived
        let new = pager.apply_search("omar");

        assert!(!pager.apply_page(old.generation, page(99, (0..10).collect())));
        assert!(pager.items().is_empty());

        assert!(pager.apply_page(new.generation, page(2, vec![1, 2])));
        assert_eq!(pager.items(), &[1, 2]);
        assert_eq!(pager.total_count(), 2);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        let old = pager.reload();
        let new = pager.reload();

        assert!(!pager.fail(old.generation));
        assert!(pager.is_loading());
        assert!(pager.fail(new.generation));
        assert!(!pager.is_loading());
    }

    #[test]
    fn failed_append_rewinds_for_retry() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        let plan = pager.reload();
        pager.apply_page(plan.generation, page(30, (0..10).collect()));

        let plan = pager.next_page().unwrap();
        assert!(pager.fail(plan.generation));
        // loaded window untouched, same page comes back on retry
        assert_eq!(pager.items().len(), 10);
        let retry = pager.next_page().unwrap();
        assert_eq!(retry.request.skip_count, Some(10));
    }

    #[test]
    fn clear_drops_state_but_keeps_filter() {
        let mut pager: ListPager<u32> = ListPager::new(10);
        let plan = pager.apply_search("omar");
        pager.apply_page(plan.generation, page(1, vec![1]));

        pager.clear();
        assert!(pager.items().is_empty());
        assert_eq!(pager.total_count(), 0);
        assert_eq!(pager.search_term(), Some("omar"));
    }
}
