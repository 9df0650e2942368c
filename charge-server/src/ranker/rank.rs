//! Station ranking: distance sort, filters and pagination.
//!
//! Ranking is a pure function of the station list and the view. It borrows
//! the input and never alters or invents stations, so the result is always
//! a reordered subset of what was passed in.

use tracing::debug;

use crate::domain::{Coordinate, Distance, Station};

use super::config::RankConfig;
use super::view::{SortDirection, ViewState};

/// A station in a ranked list, with its distance from the reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedStation<'a> {
    pub station: &'a Station,

    /// `None` when the view has no reference point.
    pub distance: Option<Distance>,
}

/// One page of ranked stations.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult<'a> {
    /// Stations on the requested page, in display order.
    pub items: Vec<RankedStation<'a>>,

    /// Number of stations that passed every filter, across all pages.
    pub total_count: usize,

    /// 1-based page number that was requested.
    pub page: usize,

    /// Number of non-empty pages.
    pub page_count: usize,

    /// Index of the first item on this page within the full filtered list.
    offset: usize,
}

impl RankedResult<'_> {
    /// 1-based inclusive bounds of this page within the filtered list,
    /// or `(0, 0)` when the page is empty.
    pub fn bounds(&self) -> (usize, usize) {
        if self.items.is_empty() {
            (0, 0)
        } else {
            (self.offset + 1, self.offset + self.items.len())
        }
    }

    /// Summary like "11–20 of 23".
    pub fn results_text(&self) -> String {
        let (start, end) = self.bounds();
        format!("{start}–{end} of {}", self.total_count)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Produces ranked, filtered and paginated views of a station list.
#[derive(Debug, Clone, Default)]
pub struct StationRanker {
    config: RankConfig,
}

impl StationRanker {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank `stations` for display under `view`.
    ///
    /// With a reference point, stations without a location are dropped,
    /// the rest are sorted by distance (stable, so equal distances keep
    /// their input order) and the distance limit is applied. Without one,
    /// input order is kept and no distance filtering happens. The category
    /// filter applies in both cases.
    pub fn rank<'a>(&self, stations: &'a [Station], view: &ViewState) -> RankedResult<'a> {
        let mut ranked = measure(stations, view);

        if view.reference.is_some() {
            ranked.retain(|r| r.distance.is_some_and(|d| view.distance_limit.admits(d)));
            sort_by_distance(&mut ranked, view.sort);
        }

        if !view.categories.is_empty() {
            ranked.retain(|r| {
                r.station
                    .category
                    .as_ref()
                    .is_some_and(|c| view.categories.contains(c))
            });
        }

        let result = paginate(ranked, view.page, self.config.page_size);

        debug!(
            input = stations.len(),
            matched = result.total_count,
            page = result.page,
            page_count = result.page_count,
            "ranked stations"
        );

        result
    }
}

/// Pair every usable station with its distance from the reference point.
fn measure<'a>(stations: &'a [Station], view: &ViewState) -> Vec<RankedStation<'a>> {
    match &view.reference {
        Some(reference) => stations
            .iter()
            .filter_map(|station| {
                let location = station.location.as_ref()?;
                Some(RankedStation {
                    station,
                    distance: Some(reference.distance_to(location)),
                })
            })
            .collect(),
        None => stations
            .iter()
            .map(|station| RankedStation {
                station,
                distance: None,
            })
            .collect(),
    }
}

fn sort_by_distance(ranked: &mut [RankedStation<'_>], direction: SortDirection) {
    let km = |r: &RankedStation<'_>| r.distance.map_or(f64::INFINITY, |d| d.km());

    // slice::sort_by is stable, so ties stay in input order either way
    match direction {
        SortDirection::Ascending => ranked.sort_by(|a, b| km(a).total_cmp(&km(b))),
        SortDirection::Descending => ranked.sort_by(|a, b| km(b).total_cmp(&km(a))),
    }
}

fn paginate(ranked: Vec<RankedStation<'_>>, page: usize, page_size: Option<usize>) -> RankedResult<'_> {
    let total_count = ranked.len();
    let page = page.max(1);

    let Some(size) = page_size.map(|s| s.max(1)) else {
        let items = if page == 1 { ranked } else { Vec::new() };
        return RankedResult {
            items,
            total_count,
            page,
            page_count: usize::from(total_count > 0),
            offset: 0,
        };
    };

    let page_count = total_count.div_ceil(size);
    let offset = (page - 1).saturating_mul(size);
    let items = ranked.into_iter().skip(offset).take(size).collect();

    RankedResult {
        items,
        total_count,
        page,
        page_count,
        offset,
    }
}

/// Distinct non-empty categories in the order they first appear.
///
/// Used to offer filter choices for the current station list.
pub fn category_universe(stations: &[Station]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    stations
        .iter()
        .filter_map(|s| s.category.as_deref())
        .filter(|c| !c.trim().is_empty())
        .filter(|c| seen.insert(*c))
        .collect()
}

/// Nearest and farthest located station from `reference`.
///
/// Bounds the choices for a distance limit. `None` when no station has a
/// location.
pub fn distance_range(
    stations: &[Station],
    reference: &Coordinate,
) -> Option<(Distance, Distance)> {
    stations
        .iter()
        .filter_map(|s| s.location.as_ref())
        .map(|at| reference.distance_to(at))
        .fold(None, |range, d| match range {
            None => Some((d, d)),
            Some((min, max)) => Some((
                if d < min { d } else { min },
                if d > max { d } else { max },
            )),
        })
}
