use tracing::debug;

use crate::filter::Filters;
use crate::pagination::Pager;
use crate::state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ProjectionKey {
    revision: u64,
    filters: Filters,
    pager: Pager,
}

impl ProjectionKey {
    fn of(state: &ViewState) -> Self {
        Self {
            revision: state.revision,
            filters: state.filters.clone(),
            pager: state.pager,
        }
    }
}

/// Filtered and paginated view of a `ViewState`, as indices into its records.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub filtered: Vec<usize>,
    pub page: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Projection {
    pub fn compute(state: &ViewState) -> Self {
        let filtered = state.filters.apply(&state.records);
        let page = state.pager.page(&filtered).to_vec();
        Self {
            has_previous: state.pager.has_previous(),
            has_next: state.pager.has_next(filtered.len()),
            filtered,
            page,
        }
    }
}

/// Keeps the last projection until records, filters or page change.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    key: Option<ProjectionKey>,
    projection: Projection,
}

impl ProjectionCache {
    pub fn get(&mut self, state: &ViewState) -> &Projection {
        let key = ProjectionKey::of(state);
        if self.key.as_ref() != Some(&key) {
            self.projection = Projection::compute(state);
            debug!(
                "Projection: {} visible, {} on page {}",
                self.projection.filtered.len(),
                self.projection.page.len(),
                state.pager.current_page
            );
            self.key = Some(key);
        }
        &self.projection
    }

    #[cfg(test)]
    pub fn is_fresh(&self, state: &ViewState) -> bool {
        self.key.as_ref() == Some(&ProjectionKey::of(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterKind;
    use crate::record::Record;
    use crate::sort::SortKey;

    fn state(n: usize, page_size: usize) -> ViewState {
        let records = (0..n)
            .map(|i| Record {
                id: i as f64,
                gender: if i % 2 == 0 { "male" } else { "female" }.into(),
                ..Record::default()
            })
            .collect();
        ViewState::new(page_size).loaded(records)
    }

    #[test]
    fn three_records_fit_on_one_page() {
        let p = Projection::compute(&state(3, 10));
        assert_eq!(p.page, vec![0, 1, 2]);
        assert!(!p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn second_page_of_filtered_set() {
        let s = state(10, 2).filtered(FilterKind::Gender, "female").next_page();
        let p = Projection::compute(&s);
        assert_eq!(p.filtered, vec![1, 3, 5, 7, 9]);
        assert_eq!(p.page, vec![5, 7]);
        assert!(p.has_previous);
        assert!(p.has_next);
    }

    #[test]
    fn cache_recomputes_only_on_key_change() {
        let mut cache = ProjectionCache::default();
        let s = state(5, 2);
        assert!(!cache.is_fresh(&s));
        assert_eq!(cache.get(&s).page, vec![0, 1]);
        assert!(cache.is_fresh(&s));

        let next = s.next_page();
        assert!(!cache.is_fresh(&next));
        assert_eq!(cache.get(&next).page, vec![2, 3]);

        let resorted = next.sorted_by(SortKey::Id).sorted_by(SortKey::Id);
        assert!(!cache.is_fresh(&resorted));
        assert_eq!(cache.get(&resorted).page, vec![2, 3]);
    }
}
