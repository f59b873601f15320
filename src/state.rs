//! View state of the employee table and its transitions.
//!
//! A `ViewState` is never changed in place: every transition returns a new value.
//! Records live behind an `Arc`, so copying a state is cheap and only loading or
//! sorting allocates a new record sequence.

use std::sync::Arc;

use crate::filter::{FilterKind, Filters, distinct_values};
use crate::pagination::Pager;
use crate::record::Record;
use crate::sort::{SortKey, SortState, next_direction, sorted};

#[derive(Debug, Clone)]
pub struct ViewState {
    pub records: Arc<Vec<Record>>,
    // Bumped whenever `records` is replaced.
    pub revision: u64,
    pub sort: Option<SortState>,
    pub filters: Filters,
    pub pager: Pager,
    pub gender_options: Arc<Vec<String>>,
    pub country_options: Arc<Vec<String>>,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Arc::new(Vec::new()),
            revision: 0,
            // Fetch order; the first selection of any key sorts ascending.
            sort: None,
            filters: Filters::default(),
            pager: Pager::new(page_size),
            gender_options: Arc::new(Vec::new()),
            country_options: Arc::new(Vec::new()),
        }
    }

    fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            gender_options: Arc::new(distinct_values(&records, FilterKind::Gender)),
            country_options: Arc::new(distinct_values(&records, FilterKind::Country)),
            records: Arc::new(records),
            revision: self.revision + 1,
            ..self.clone()
        }
    }

    /// Replaces the record set. Sort, filters and page are left as they are.
    pub fn loaded(&self, records: Vec<Record>) -> Self {
        self.with_records(records)
    }

    /// Re-sorts the full record set by `key`, toggling direction on a repeated key.
    pub fn sorted_by(&self, key: SortKey) -> Self {
        let direction = next_direction(self.sort.as_ref(), &key);
        let records = sorted(&self.records, &key, direction);
        Self {
            sort: Some(SortState { key, direction }),
            ..self.with_records(records)
        }
    }

    pub fn filtered(&self, kind: FilterKind, value: &str) -> Self {
        Self {
            filters: self.filters.with(kind, value),
            ..self.clone()
        }
    }

    pub fn previous_page(&self) -> Self {
        Self {
            pager: self.pager.previous(),
            ..self.clone()
        }
    }

    pub fn next_page(&self) -> Self {
        Self {
            pager: self.pager.next(),
            ..self.clone()
        }
    }

    pub fn options(&self, kind: FilterKind) -> &[String] {
        match kind {
            FilterKind::Gender => &self.gender_options,
            FilterKind::Country => &self.country_options,
        }
    }
}
