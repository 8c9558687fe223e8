use std::num::IntErrorKind;

use serde::Serialize;

/// Posts shown per list page.
pub const POSTS_PER_PAGE: usize = 3;

/// One page of an ordered sequence plus the metadata templates need.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
    pub items: Vec<T>,
}

pub struct Paginator<T> {
    items: Vec<T>,
    per_page: usize,
}

impl<T> Paginator<T> {
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        Paginator {
            items,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// An empty sequence still has one (empty) page.
    pub fn num_pages(&self) -> usize {
        self.count().div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw `page` parameter.
    ///
    /// Missing or non-integer values fall back to the first page, anything
    /// outside `1..=num_pages` (including integers too large to represent)
    /// falls back to the last page.
    pub fn page(self, raw: Option<&str>) -> Page<T> {
        let num_pages = self.num_pages();
        let number = match raw.map(|value| value.trim().parse::<i64>()) {
            Some(Err(e))
                if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
            {
                num_pages
            }
            None | Some(Err(_)) => 1,
            Some(Ok(n)) if n < 1 || n as usize > num_pages => num_pages,
            Some(Ok(n)) => n as usize,
        };
        self.into_page(number)
    }

    fn into_page(self, number: usize) -> Page<T> {
        let num_pages = self.num_pages();
        let count = self.count();
        let start = (number - 1) * self.per_page;
        let items: Vec<T> = self
            .items
            .into_iter()
            .skip(start)
            .take(self.per_page)
            .collect();

        Page {
            number,
            num_pages,
            count,
            has_next: number < num_pages,
            has_previous: number > 1,
            next_page_number: (number < num_pages).then_some(number + 1),
            previous_page_number: (number > 1).then(|| number - 1),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> Paginator<u32> {
        Paginator::new((1..=7).collect(), 3)
    }

    #[test]
    fn missing_page_serves_first() {
        let page = seven().page(None);
        assert_eq!(page.number, 1);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn non_integer_page_serves_first() {
        assert_eq!(seven().page(Some("abc")).items, seven().page(Some("1")).items);
        assert_eq!(seven().page(Some("2.5")).number, 1);
    }

    #[test]
    fn page_past_the_end_serves_last() {
        let page = seven().page(Some("99"));
        assert_eq!(page.number, 3);
        assert_eq!(page.items, vec![7]);
        assert_eq!(page.next_page_number, None);
        assert_eq!(page.previous_page_number, Some(2));
    }

    #[test]
    fn overflowing_page_serves_last() {
        let page = seven().page(Some("99999999999999999999"));
        assert_eq!(page.number, 3);
        assert_eq!(page.items, vec![7]);
        assert_eq!(seven().page(Some("-99999999999999999999")).number, 3);
    }

    #[test]
    fn page_below_one_serves_last() {
        assert_eq!(seven().page(Some("0")).number, 3);
        assert_eq!(seven().page(Some("-4")).number, 3);
    }

    #[test]
    fn empty_sequence_has_single_empty_page() {
        let paginator: Paginator<u32> = Paginator::new(Vec::new(), 3);
        assert_eq!(paginator.num_pages(), 1);
        let page = paginator.page(Some("5"));
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.count, 0);
    }
}
