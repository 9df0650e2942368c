//! Ranking configuration.

/// Default number of stations per page, matching the list view.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration parameters for station ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankConfig {
    /// Stations per page. `None` returns the whole filtered list as one page.
    pub page_size: Option<usize>,
}

impl RankConfig {
    /// Paginate with the given page size (at least 1).
    pub fn paginated(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size.max(1)),
        }
    }

    /// Return every matching station on a single page.
    pub fn unpaginated() -> Self {
        Self { page_size: None }
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self::paginated(DEFAULT_PAGE_SIZE)
    }
}
