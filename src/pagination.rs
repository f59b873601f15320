use std::ops::Range;

/// 1-based page cursor over a filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pager {
    pub current_page: usize,
    pub page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Half-open bounds of the current page, clipped to `len`. Past the end yields an empty range.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size);
        start.min(len)..end.min(len)
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn previous(self) -> Self {
        Self {
            current_page: self.current_page.saturating_sub(1).max(1),
            ..self
        }
    }

    // Not clamped to the last page. Callers go through has_next first.
    pub fn next(self) -> Self {
        Self {
            current_page: self.current_page + 1,
            ..self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        len > self.page_size.saturating_mul(self.current_page)
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_short_set() {
        let p = Pager::new(10);
        let items = [1, 2, 3];
        assert_eq!(p.page(&items), &[1, 2, 3]);
        assert!(!p.has_previous());
        assert!(!p.has_next(items.len()));
    }

    #[test]
    fn pages_cover_the_set_exactly() {
        for page_size in 1..8 {
            for len in 0..30 {
                let items: Vec<usize> = (0..len).collect();
                let mut p = Pager::new(page_size);
                let mut joined = Vec::new();
                loop {
                    joined.extend_from_slice(p.page(&items));
                    if !p.has_next(items.len()) {
                        break;
                    }
                    p = p.next();
                }
                assert_eq!(joined, items, "page_size {page_size}, len {len}");
                assert_eq!(p.current_page, p.page_count(len).max(1));
            }
        }
    }

    #[test]
    fn overshooting_yields_empty_page() {
        let items = [1, 2, 3];
        let p = Pager::new(2).next().next().next();
        assert_eq!(p.current_page, 4);
        assert!(p.page(&items).is_empty());
    }

    #[test]
    fn previous_is_floored_at_one() {
        let p = Pager::new(5).previous().previous();
        assert_eq!(p.current_page, 1);
        assert_eq!(Pager::new(5).next().previous().current_page, 1);
    }

    #[test]
    fn next_disabled_on_exact_boundary() {
        let p = Pager::new(5);
        assert!(!p.has_next(5));
        assert!(p.has_next(6));
    }
}
