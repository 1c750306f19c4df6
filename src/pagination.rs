//! Client-side paging for sections that load their whole collection at once
//! (authors, categories, labels), plus the page-link window shared by every
//! list view.
//!
//! Page indices are zero-based everywhere in this crate. One-based numbers only
//! exist at the display boundary: [`ClientPager::display_page`],
//! [`ClientPager::set_display_page`] and the links produced by [`page_window`].

use std::cmp::Ordering;
use std::fmt;

use crate::domain::Searchable;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One-indexed page links around the zero-indexed `current_index`.
///
/// Keeps two pages at each edge, two before and four after the current page;
/// `None` marks a gap. An index past the end is treated as the last page.
pub fn page_window(total_pages: usize, current_index: usize) -> Vec<Option<usize>> {
    let current = current_index.min(total_pages.saturating_sub(1)) + 1;
    get_pages(total_pages, current, 2, 2, 4, 2)
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Synchronous pager over an in-memory list.
///
/// The pager never rejects input: page indices and sizes are clamped, and the
/// current page is pulled back inside the valid range whenever the source
/// items or the filter shrink the list.
pub struct ClientPager<T> {
    source: Vec<T>,
    visible: Vec<usize>,
    filter: Option<Predicate<T>>,
    page: usize,
    per_page: usize,
}

impl<T> ClientPager<T> {
    pub fn new(items: Vec<T>, items_per_page: usize) -> Self {
        let mut pager = Self {
            source: items,
            visible: Vec::new(),
            filter: None,
            page: 0,
            per_page: items_per_page.max(1),
        };
        pager.refilter();
        pager
    }

    /// Replaces the source items, e.g. after a reload or a delete.
    pub fn set_source_items(&mut self, items: Vec<T>) {
        self.source = items;
        self.refilter();
        self.clamp_page();
    }

    /// Drops items in place, keeping the current page when it still exists.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.source.retain(keep);
        self.refilter();
        self.clamp_page();
    }

    /// Sorts the source items and goes back to the first page.
    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(&mut self, compare: F) {
        self.source.sort_by(compare);
        self.refilter();
        self.page = 0;
    }

    /// Narrows the list to items matching `predicate` and goes back to the
    /// first page.
    pub fn set_filter<F>(&mut self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self.refilter();
        self.page = 0;
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.refilter();
        self.page = 0;
    }

    /// Moves to the zero-indexed page `index`, clamped into range.
    pub fn set_page(&mut self, index: usize) {
        self.page = index.min(self.last_page_index());
    }

    /// Moves to the one-indexed page `number`, clamped into range.
    pub fn set_display_page(&mut self, number: usize) {
        self.set_page(number.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Changes the page size (at least one) and goes back to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.per_page = items_per_page.max(1);
        self.page = 0;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn display_page(&self) -> usize {
        self.page.saturating_add(1)
    }

    pub fn items_per_page(&self) -> usize {
        self.per_page
    }

    /// Number of items after filtering.
    pub fn total_items(&self) -> usize {
        self.visible.len()
    }

    pub fn total_pages(&self) -> usize {
        self.visible.len().div_ceil(self.per_page)
    }

    pub fn source_items(&self) -> &[T] {
        &self.source
    }

    /// Items on the current page, in source order.
    pub fn paginated_items(&self) -> Vec<&T> {
        self.visible
            .iter()
            .skip(self.page * self.per_page)
            .take(self.per_page)
            .map(|&index| &self.source[index])
            .collect()
    }

    pub fn page_links(&self) -> Vec<Option<usize>> {
        page_window(self.total_pages(), self.page)
    }

    fn last_page_index(&self) -> usize {
        self.total_pages().saturating_sub(1)
    }

    fn clamp_page(&mut self) {
        let last = self.last_page_index();
        if self.page > last {
            log::debug!("Client pager page {} out of range, clamping to {last}", self.page);
            self.page = last;
        }
    }

    fn refilter(&mut self) {
        self.visible = match &self.filter {
            Some(predicate) => self
                .source
                .iter()
                .enumerate()
                .filter(|(_, item)| predicate(item))
                .map(|(index, _)| index)
                .collect(),
            None => (0..self.source.len()).collect(),
        };
    }
}

impl<T: Searchable + 'static> ClientPager<T> {
    /// Case-insensitive text search over [`Searchable::search_fields`]. A blank
    /// term clears the filter.
    pub fn set_search_text(&mut self, text: &str) {
        let term = text.trim().to_string();
        if term.is_empty() {
            self.clear_filter();
        } else {
            self.set_filter(move |item: &T| item.matches_search(&term));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ClientPager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientPager")
            .field("source", &self.source)
            .field("filtered", &self.filter.is_some())
            .field("page", &self.page)
            .field("per_page", &self.per_page)
            .finish()
    }
}
