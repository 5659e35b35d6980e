//! Client-held page query and pagination arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    TwentyFive,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::TwentyFive];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::TwentyFive => 25,
        }
    }

    /// Next size in the selector, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            PageSize::Ten => PageSize::Twenty,
            PageSize::Twenty => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Ten,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page size {0} is not one of 10, 20, 25")]
pub struct InvalidPageSize(pub u32);

impl TryFrom<u32> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            25 => Ok(PageSize::TwentyFive),
            other => Err(InvalidPageSize(other)),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// The (index, size, search) tuple driving the next fetch.
///
/// `page_index` is 0-based. Every setter returns a new query; changing the
/// size or the search text starts over from the first page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageQuery {
    pub page_index: u32,
    pub page_size: PageSize,
    pub search_text: String,
}

impl PageQuery {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn with_page_index(self, page_index: u32) -> Self {
        Self { page_index, ..self }
    }

    pub fn with_page_size(self, page_size: PageSize) -> Self {
        if page_size == self.page_size {
            return self;
        }
        Self {
            page_index: 0,
            page_size,
            ..self
        }
    }

    pub fn with_search_text(self, search_text: impl Into<String>) -> Self {
        let search_text = search_text.into();
        if search_text == self.search_text {
            return self;
        }
        Self {
            page_index: 0,
            search_text,
            ..self
        }
    }

    /// 1-based page number sent to the directory.
    pub fn page_number(&self) -> u64 {
        u64::from(self.page_index) + 1
    }

    /// Whether the index points past the last page of `total_count` rows.
    pub fn is_out_of_range(&self, total_count: u64) -> bool {
        self.page_index > last_page_index(total_count, self.page_size)
    }

    /// 1-based row range shown by this page, `None` for an empty page.
    pub fn row_range(&self, total_count: u64) -> Option<(u64, u64)> {
        let size = u64::from(self.page_size.get());
        let first = u64::from(self.page_index) * size + 1;
        if total_count == 0 || first > total_count {
            return None;
        }
        Some((first, (first + size - 1).min(total_count)))
    }
}

/// Index of the last page, 0 for an empty collection.
pub fn last_page_index(total_count: u64, page_size: PageSize) -> u32 {
    let size = u64::from(page_size.get());
    let pages = total_count.div_ceil(size);
    u32::try_from(pages.saturating_sub(1)).unwrap_or(u32::MAX)
}

/// Pagination controls: first, previous, next, last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Previous,
    Next,
    Last,
}

impl PageMove {
    /// Target index for this move, or `None` when the control is disabled.
    pub fn target(self, page_index: u32, total_count: u64, page_size: PageSize) -> Option<u32> {
        let last = last_page_index(total_count, page_size);
        match self {
            PageMove::First | PageMove::Previous if page_index == 0 => None,
            PageMove::First => Some(0),
            PageMove::Previous => Some(page_index - 1),
            PageMove::Next | PageMove::Last if page_index >= last => None,
            PageMove::Next => Some(page_index + 1),
            PageMove::Last => Some(last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_does_not_overflow() {
        let query = PageQuery::default().with_page_index(u32::MAX);
        assert_eq!(query.page_number(), u64::from(u32::MAX) + 1);
        assert_eq!(PageQuery::default().page_number(), 1);
    }

    #[test]
    fn invalid_page_size_message() {
        let err = PageSize::try_from(15).unwrap_err();
        assert_eq!(err, InvalidPageSize(15));
        assert_eq!(err.to_string(), "page size 15 is not one of 10, 20, 25");
    }

    #[test]
    fn changing_size_resets_index() {
        let query = PageQuery::default().with_page_index(3);
        let query = query.with_page_size(PageSize::Twenty);
        assert_eq!(query.page_index, 0);
        assert_eq!(query.page_size, PageSize::Twenty);
    }

    #[test]
    fn changing_search_resets_index() {
        let query = PageQuery::default()
            .with_page_index(2)
            .with_search_text("adm");
        assert_eq!(query.page_index, 0);
        assert_eq!(query.search_text, "adm");
    }

    #[test]
    fn unchanged_size_keeps_index() {
        let query = PageQuery::default()
            .with_page_index(2)
            .with_page_size(PageSize::Ten)
            .with_search_text("");
        assert_eq!(query.page_index, 2);
    }

    #[test]
    fn page_number_is_one_based() {
        assert_eq!(PageQuery::default().page_number(), 1);
        assert_eq!(PageQuery::default().with_page_index(4).page_number(), 5);
    }

    #[test]
    fn last_page_index_rounds_up() {
        assert_eq!(last_page_index(0, PageSize::Ten), 0);
        assert_eq!(last_page_index(10, PageSize::Ten), 0);
        assert_eq!(last_page_index(11, PageSize::Ten), 1);
        assert_eq!(last_page_index(25, PageSize::Twenty), 1);
        assert_eq!(last_page_index(50, PageSize::TwentyFive), 1);
    }

    #[test]
    fn out_of_range_after_shrink() {
        let query = PageQuery::default().with_page_index(1);
        assert!(!query.is_out_of_range(11));
        assert!(query.is_out_of_range(10));
    }

    #[test]
    fn row_range_clamps_to_total() {
        let query = PageQuery::default().with_page_index(2);
        assert_eq!(query.row_range(25), Some((21, 25)));
        assert_eq!(query.row_range(20), None);
        assert_eq!(PageQuery::default().row_range(0), None);
    }

    #[test]
    fn page_moves_disable_at_edges() {
        assert_eq!(PageMove::Previous.target(0, 30, PageSize::Ten), None);
        assert_eq!(PageMove::First.target(0, 30, PageSize::Ten), None);
        assert_eq!(PageMove::Next.target(0, 30, PageSize::Ten), Some(1));
        assert_eq!(PageMove::Last.target(0, 30, PageSize::Ten), Some(2));
        assert_eq!(PageMove::Next.target(2, 30, PageSize::Ten), None);
        assert_eq!(PageMove::Previous.target(2, 30, PageSize::Ten), Some(1));
        assert_eq!(PageMove::Next.target(0, 0, PageSize::Ten), None);
    }

    #[test]
    fn page_size_parses_allowed_values_only() {
        assert_eq!(PageSize::try_from(25), Ok(PageSize::TwentyFive));
        assert_eq!(PageSize::try_from(15), Err(InvalidPageSize(15)));
        assert_eq!(PageSize::TwentyFive.cycle(), PageSize::Ten);
    }
}
