//! Page-based pagination shared by every list endpoint.

use crate::model::api::{PageMetaDto, PaginatedDto};

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;
/// Highest page whose row offset still fits a signed 64-bit SQL `OFFSET`.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

/// Resolved 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    /// Applies defaults to raw query values.
    ///
    /// Missing or zero `page` becomes 1 and anything above `MAX_PAGE` is capped. Missing
    /// or zero `per_page` becomes `DEFAULT_PER_PAGE`, and anything above `MAX_PER_PAGE`
    /// is capped.
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1).min(MAX_PAGE),
            per_page: per_page
                .filter(|p| *p > 0)
                .unwrap_or(DEFAULT_PER_PAGE)
                .min(MAX_PER_PAGE),
        }
    }

    /// Zero-based page index as expected by SeaORM paginators.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of domain models with totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        let total_pages = if pagination.per_page > 0 {
            (total as f64 / pagination.per_page as f64).ceil() as u64
        } else {
            0
        };

        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages,
        }
    }

    pub fn meta(&self) -> PageMetaDto {
        PageMetaDto {
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }

    /// Converts every item and wraps the page in the list envelope.
    pub fn into_dto<D>(self, convert: impl FnMut(T) -> D) -> PaginatedDto<D> {
        let meta = self.meta();
        PaginatedDto {
            data: self.items.into_iter().map(convert).collect(),
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults_and_cap() {
        assert_eq!(
            Pagination::new(None, None),
            Pagination {
                page: 1,
                per_page: 20
            }
        );
        assert_eq!(Pagination::new(Some(0), Some(500)).per_page, 100);
        assert_eq!(Pagination::new(Some(0), Some(5)).page, 1);
        assert_eq!(Pagination::new(Some(3), None).index(), 2);

        let last = Pagination::new(Some(u64::MAX), Some(u64::MAX));
        assert_eq!(last.page, MAX_PAGE);
        assert!(last.index().checked_mul(last.per_page).is_some_and(|o| o <= i64::MAX as u64));
    }

    #[test]
    fn computes_total_pages() {
        let page = Paginated::new(vec![1, 2], 41, Pagination::new(Some(1), Some(20)));
        assert_eq!(page.total_pages, 3);

        let empty: Paginated<i32> = Paginated::new(vec![], 0, Pagination::default());
        assert_eq!(empty.total_pages, 0);
    }
}
