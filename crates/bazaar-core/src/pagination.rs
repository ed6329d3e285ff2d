//! Page resolution for ordered listings.
//!
//! Pages are 1-based. A listing always has at least one page, even when it
//! is empty. Out-of-range requests resolve to the last page and anything
//! that is not an integer resolves to the first one.

use std::num::IntErrorKind;

/// Number of ads on one listing page.
pub const ADS_PER_PAGE: u64 = 10;

/// Splits `count` items into pages of `per_page`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    pub count: u64,
    pub per_page: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    /// Total number of pages, never less than one.
    pub fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Resolve a raw `page` query value into a valid 1-based page number.
    pub fn resolve(&self, raw: Option<&str>) -> u64 {
        let last = self.num_pages();
        let Some(raw) = raw else {
            return 1;
        };

        match raw.trim().parse::<i64>() {
            Ok(n) if n >= 1 && (n as u64) <= last => n as u64,
            Ok(_) => last,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => last,
                _ => 1,
            },
        }
    }
}

/// One resolved page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 1-based number of this page.
    pub number: u64,
    pub num_pages: u64,
    /// Total number of items across all pages.
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_has_one_page() {
        let p = Paginator::new(0, ADS_PER_PAGE);
        assert_eq!(p.num_pages(), 1);
        assert_eq!(p.resolve(None), 1);
        assert_eq!(p.resolve(Some("5")), 1);
    }

    #[test]
    fn num_pages_rounds_up() {
        assert_eq!(Paginator::new(25, 10).num_pages(), 3);
        assert_eq!(Paginator::new(30, 10).num_pages(), 3);
        assert_eq!(Paginator::new(31, 10).num_pages(), 4);
    }

    #[test]
    fn out_of_range_resolves_to_last_page() {
        let p = Paginator::new(25, 10);
        assert_eq!(p.resolve(Some("2")), 2);
        assert_eq!(p.resolve(Some("99")), 3);
        assert_eq!(p.resolve(Some("0")), 3);
        assert_eq!(p.resolve(Some("-4")), 3);
        assert_eq!(p.resolve(Some("99999999999999999999999")), 3);
    }

    #[test]
    fn non_integer_resolves_to_first_page() {
        let p = Paginator::new(25, 10);
        assert_eq!(p.resolve(Some("abc")), 1);
        assert_eq!(p.resolve(Some("2.5")), 1);
        assert_eq!(p.resolve(Some("")), 1);
        assert_eq!(p.resolve(Some(" 3 ")), 3);
    }

    #[test]
    fn zero_per_page_is_clamped() {
        assert_eq!(Paginator::new(3, 0).num_pages(), 3);
    }
}
