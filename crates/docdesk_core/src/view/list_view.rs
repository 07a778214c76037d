//! List screen state: current page, rows per page and title sort.

use crate::config::{ConfigError, DeskConfig};
use crate::store::action::Action;
use crate::store::reducer::StoreState;
use crate::view::projection::{project, PageSize, Projection, SortState};

/// Pager and sort-header state of the document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    page: usize,
    page_size: PageSize,
    sort_state: SortState,
    page_size_options: Vec<usize>,
}

impl ListView {
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            page: 0,
            page_size: PageSize::from_raw(i64::try_from(config.default_page_size()).unwrap_or(0)),
            sort_state: SortState::Unsorted,
            page_size_options: config.page_size_options().to_vec(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort_state(&self) -> SortState {
        self.sort_state
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changes rows per page and jumps back to the first page.
    ///
    /// # Errors
    /// - `UnsupportedPageSize` when a row count is not an offered option;
    ///   pager state is left unchanged. `All` is always accepted.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<(), ConfigError> {
        if let PageSize::Rows(rows) = page_size {
            if !self.page_size_options.contains(&rows.get()) {
                return Err(ConfigError::UnsupportedPageSize {
                    value: rows.get(),
                    options: self.page_size_options.clone(),
                });
            }
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Advances the title sort indicator and returns the action to dispatch.
    pub fn toggle_title_sort(&mut self) -> Action {
        self.sort_state = self.sort_state.toggled();
        match self.sort_state {
            SortState::Descending => Action::SortDesc,
            SortState::Unsorted | SortState::Ascending => Action::SortAsc,
        }
    }

    /// Visible slice of `state` for the current page.
    pub fn project<'a>(&self, state: &'a StoreState) -> Projection<'a> {
        project(state.documents(), self.page, self.page_size, self.sort_state)
    }
}

#[cfg(test)]
mod tests {
    use super::ListView;
    use crate::config::{ConfigError, DeskConfig};
    use crate::store::action::Action;
    use crate::view::projection::{PageSize, SortState};

    #[test]
    fn page_size_change_resets_page() {
        let mut view = ListView::new(&DeskConfig::default());
        view.set_page(3);
        view.set_page_size(PageSize::from_raw(5)).unwrap();
        assert_eq!(view.page(), 0);
        assert_eq!(view.page_size(), PageSize::from_raw(5));
    }

    #[test]
    fn unoffered_page_size_is_rejected_and_show_all_is_kept() {
        let mut view = ListView::new(&DeskConfig::default());
        view.set_page(1);
        let err = view.set_page_size(PageSize::from_raw(3)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedPageSize { value: 3, .. }));
        assert_eq!(view.page(), 1);
        assert_eq!(view.page_size(), PageSize::from_raw(2));

        view.set_page_size(PageSize::All).unwrap();
        assert_eq!(view.page(), 0);
        assert_eq!(view.page_size(), PageSize::All);
    }

    #[test]
    fn first_toggle_dispatches_ascending_sort() {
        let mut view = ListView::new(&DeskConfig::default());
        assert_eq!(view.toggle_title_sort(), Action::SortAsc);
        assert_eq!(view.sort_state(), SortState::Ascending);
        assert_eq!(view.toggle_title_sort(), Action::SortDesc);
        assert_eq!(view.toggle_title_sort(), Action::SortAsc);
    }
}
