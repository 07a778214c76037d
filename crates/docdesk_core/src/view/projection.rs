//! Paginated, sorted projection of the document collection.
//!
//! # Invariants
//! - Sorting applies to the whole collection before slicing.
//! - An empty collection is reported as `Empty`, never as `OutOfRange`.
//! - A page past the end yields zero rows, not an error.

use crate::model::document::Document;
use crate::store::action::{order_by_title, SortDirection};
use std::num::NonZeroUsize;

/// Rows per page, or the "show all" mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    All,
    Rows(NonZeroUsize),
}

impl PageSize {
    /// Maps a raw UI value; zero or negative means show all.
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(Self::All, Self::Rows)
    }

    /// Raw UI value; `-1` for show all.
    pub fn as_raw(self) -> i64 {
        match self {
            Self::All => -1,
            Self::Rows(rows) => i64::try_from(rows.get()).unwrap_or(i64::MAX),
        }
    }
}

/// Title sort indicator state of the list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortState {
    /// Next state for one header activation: unsorted and descending go to
    /// ascending, ascending goes to descending.
    pub fn toggled(self) -> Self {
        match self {
            Self::Unsorted | Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }

    pub fn direction(self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::Ascending => Some(SortDirection::Ascending),
            Self::Descending => Some(SortDirection::Descending),
        }
    }
}

/// Distinguishes "nothing stored" from "page past the end".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionStatus {
    /// The collection holds no document at all.
    Empty,
    /// Documents exist but the requested page starts past the end.
    OutOfRange,
    Rows,
}

/// One visible row with its 1-based position in the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedRow<'a> {
    pub ordinal: usize,
    pub document: &'a Document,
}

/// Visible slice plus the counts the pager needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub rows: Vec<ProjectedRow<'a>>,
    pub total_count: usize,
    pub page_count: usize,
    pub status: ProjectionStatus,
}

impl<'a> Projection<'a> {
    /// Visible documents in display order.
    pub fn documents(&self) -> impl Iterator<Item = &'a Document> + '_ {
        self.rows.iter().map(|row| row.document)
    }

    pub fn is_empty(&self) -> bool {
        self.status == ProjectionStatus::Empty
    }
}

/// Number of pages needed for `total` documents.
pub fn page_count(total: usize, page_size: PageSize) -> usize {
    match page_size {
        PageSize::All => usize::from(total > 0),
        PageSize::Rows(rows) => total.div_ceil(rows.get()),
    }
}

/// Derives the visible slice for one page.
pub fn project(
    documents: &[Document],
    page: usize,
    page_size: PageSize,
    sort_state: SortState,
) -> Projection<'_> {
    let total_count = documents.len();
    let page_count = page_count(total_count, page_size);
    if documents.is_empty() {
        return Projection {
            rows: Vec::new(),
            total_count,
            page_count,
            status: ProjectionStatus::Empty,
        };
    }

    let mut ordered = documents.iter().collect::<Vec<_>>();
    if let Some(direction) = sort_state.direction() {
        order_by_title(&mut ordered, direction);
    }

    let (start, take) = match page_size {
        PageSize::All => (0, total_count),
        PageSize::Rows(rows) => (
            page.checked_mul(rows.get()).unwrap_or(usize::MAX),
            rows.get(),
        ),
    };

    let rows = ordered
        .into_iter()
        .enumerate()
        .skip(start)
        .take(take)
        .map(|(index, document)| ProjectedRow {
            ordinal: index + 1,
            document,
        })
        .collect::<Vec<_>>();

    let status = if rows.is_empty() {
        ProjectionStatus::OutOfRange
    } else {
        ProjectionStatus::Rows
    };

    Projection {
        rows,
        total_count,
        page_count,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::{page_count, PageSize, SortState};
    use std::num::NonZeroUsize;

    #[test]
    fn non_positive_raw_page_size_means_show_all() {
        assert_eq!(PageSize::from_raw(0), PageSize::All);
        assert_eq!(PageSize::from_raw(-1), PageSize::All);
        assert_eq!(
            PageSize::from_raw(5),
            PageSize::Rows(NonZeroUsize::new(5).expect("non-zero"))
        );
    }

    #[test]
    fn toggle_cycles_ascending_descending_ascending() {
        let first = SortState::Unsorted.toggled();
        let second = first.toggled();
        let third = second.toggled();
        assert_eq!(first, SortState::Ascending);
        assert_eq!(second, SortState::Descending);
        assert_eq!(third, SortState::Ascending);
    }

    #[test]
    fn page_count_rounds_up() {
        let two = PageSize::from_raw(2);
        assert_eq!(page_count(7, two), 4);
        assert_eq!(page_count(0, two), 0);
        assert_eq!(page_count(3, PageSize::All), 1);
    }
}
