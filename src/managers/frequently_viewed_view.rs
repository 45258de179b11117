//! Cached, paginated view over the frequently viewed list.
//!
//! The view remembers the last computed [`CollectionPage`] and recomputes it
//! only when `limit`, `offset` or its update flag change. Counting a page view
//! through [`FrequentlyViewedView::record_view`] raises the flag.

use crate::managers::frequently_viewed::FrequentlyViewedTrait;
use crate::types::document::Doc;
use crate::types::frequently_viewed::{CollectionPage, FrequentlyViewedCollection, VisitRecord};

pub struct FrequentlyViewedView {
    limit: usize,
    offset: usize,
    updated: bool,
    page: Option<CollectionPage>,
}

impl FrequentlyViewedView {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            updated: true,
            page: None,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_limit(&mut self, limit: usize) {
        if self.limit != limit {
            self.limit = limit;
            self.updated = true;
        }
    }

    pub fn set_offset(&mut self, offset: usize) {
        if self.offset != offset {
            self.offset = offset;
            self.updated = true;
        }
    }

    /// Forces the next [`collection`](Self::collection) call to recompute.
    pub fn mark_updated(&mut self) {
        self.updated = true;
    }

    /// Whether the next read will recompute.
    pub fn is_stale(&self) -> bool {
        self.updated || self.page.is_none()
    }

    /// Returns the current collection, recomputing it if stale.
    pub fn collection(&mut self, source: &dyn FrequentlyViewedTrait) -> Option<&FrequentlyViewedCollection> {
        self.page(source).collection.as_ref()
    }

    /// Returns the current page (collection plus end flag), recomputing it if stale.
    pub fn page(&mut self, source: &dyn FrequentlyViewedTrait) -> &CollectionPage {
        if self.updated {
            self.page = None;
            self.updated = false;
        }
        let (limit, offset) = (self.limit, self.offset);
        self.page.get_or_insert_with(|| source.collection(limit, offset))
    }

    /// True once the last computed page ran past the qualifying records.
    pub fn is_end(&self) -> bool {
        self.page.as_ref().map(|p| p.end).unwrap_or(false)
    }

    /// Moves the window forward by one page unless the current page, brought
    /// up to date first, already reaches the end.
    pub fn next_page(&mut self, source: &dyn FrequentlyViewedTrait) -> bool {
        if self.page(source).end {
            return false;
        }
        let offset = self.offset + self.limit;
        self.set_offset(offset);
        true
    }

    /// Counts a view of `doc` and marks the view for recomputation.
    pub fn record_view(
        &mut self,
        source: &mut dyn FrequentlyViewedTrait,
        doc: Option<&Doc>,
    ) -> Option<VisitRecord> {
        let entry = source.record_view(doc);
        if entry.is_some() {
            self.mark_updated();
        }
        entry
    }
}
