//! Per-search view state: reference point, sort order, filters and page.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Distance};

/// Direction of the distance sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Nearest first.
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Furthest first.
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Unit a distance limit was expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    #[serde(alias = "mi")]
    Miles,
}

/// Maximum distance from the reference point.
///
/// "No limit" is its own variant; there is no numeric sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DistanceLimit {
    #[default]
    Unlimited,
    /// Keep stations at most this far away (inclusive).
    Within(Distance),
    /// A negative or NaN limit. Keeps nothing, not even a station at the
    /// reference point.
    Excluding,
}

impl DistanceLimit {
    /// Build a limit from a user-supplied value.
    ///
    /// Positive infinity means no limit. Negative and NaN values admit no
    /// station at all.
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        if value == f64::INFINITY {
            return DistanceLimit::Unlimited;
        }
        if value.is_nan() || value < 0.0 {
            return DistanceLimit::Excluding;
        }
        let distance = match unit {
            DistanceUnit::Km => Distance::from_km(value),
            DistanceUnit::Miles => Distance::from_miles(value),
        };
        DistanceLimit::Within(distance)
    }

    pub fn km(value: f64) -> Self {
        Self::new(value, DistanceUnit::Km)
    }

    pub fn miles(value: f64) -> Self {
        Self::new(value, DistanceUnit::Miles)
    }

    /// Whether a station at `distance` passes this limit.
    pub fn admits(&self, distance: Distance) -> bool {
        match self {
            DistanceLimit::Unlimited => true,
            DistanceLimit::Within(limit) => distance.km() <= limit.km(),
            DistanceLimit::Excluding => false,
        }
    }
}

/// Everything the user can change about how a result list is shown.
///
/// Created fresh for every search and discarded when the next one starts.
/// Changing a filter sends the view back to the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Point distances are measured from. Without one there is nothing to
    /// sort or distance-filter by.
    pub reference: Option<Coordinate>,

    pub sort: SortDirection,

    pub distance_limit: DistanceLimit,

    /// Categories to keep. Empty keeps everything.
    pub categories: BTreeSet<String>,

    /// 1-based page number.
    pub page: usize,
}

impl ViewState {
    /// Fresh view for a search around `reference`.
    pub fn new(reference: Option<Coordinate>) -> Self {
        Self {
            reference,
            sort: SortDirection::default(),
            distance_limit: DistanceLimit::default(),
            categories: BTreeSet::new(),
            page: 1,
        }
    }

    pub fn with_sort(mut self, sort: SortDirection) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_distance_limit(mut self, limit: DistanceLimit) -> Self {
        self.distance_limit = limit;
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.go_to_page(page);
        self
    }

    /// Flip between nearest-first and furthest-first.
    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
    }

    pub fn set_distance_limit(&mut self, limit: DistanceLimit) {
        self.distance_limit = limit;
        self.page = 1;
    }

    /// Add the category to the filter, or remove it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
        self.page = 1;
    }

    /// Drop the distance limit and category selection.
    pub fn clear_filters(&mut self) {
        self.distance_limit = DistanceLimit::Unlimited;
        self.categories.clear();
        self.page = 1;
    }

    /// Jump to a page. Page 0 is treated as the first page.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, unless already on the last of `page_count` pages.
    pub fn next_page(&mut self, page_count: usize) {
        if self.page < page_count {
            self.page += 1;
        }
    }

    /// Go back one page, stopping at the first.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(None)
    }
}
