//! Caching layer for station lookups.
//!
//! Nearby-station lists change slowly, and users often search the same place
//! twice (a new search, a page refresh). Coordinates are snapped to a grid
//! so nearby requests share an entry.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Coordinate, Station};
use crate::stations::{MockStationSource, StationError, StationSource};

/// Cache key: latitude and longitude scaled by the grid resolution.
type CellKey = (i64, i64);

/// Finest grid. 180 * 10^9 still fits an `i64` cell index.
const MAX_GRID_DECIMALS: u8 = 9;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Decimal places coordinates are rounded to. Three is roughly 110 m.
    /// Values above nine are treated as nine.
    pub grid_decimals: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
            grid_decimals: 3,
        }
    }
}

/// One cached fetch.
#[derive(Debug, Clone)]
pub struct StationFetch {
    pub stations: Arc<Vec<Station>>,
    pub fetched_at: DateTime<Utc>,
}

/// Cache of station lists by grid cell.
pub struct StationCache {
    entries: MokaCache<CellKey, StationFetch>,
    scale: f64,
}

impl StationCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            entries,
            scale: 10f64.powi(i32::from(config.grid_decimals.min(MAX_GRID_DECIMALS))),
        }
    }

    /// The grid cell a coordinate falls in.
    fn cell(&self, at: Coordinate) -> CellKey {
        (
            (at.latitude() * self.scale).round() as i64,
            (at.longitude() * self.scale).round() as i64,
        )
    }

    pub async fn get(&self, at: Coordinate) -> Option<StationFetch> {
        self.entries.get(&self.cell(at)).await
    }

    pub async fn insert(&self, at: Coordinate, fetch: StationFetch) {
        self.entries.insert(self.cell(at), fetch).await;
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

/// Station source with caching.
pub struct CachedStationSource {
    source: Arc<dyn StationSource>,
    cache: StationCache,
}

impl CachedStationSource {
    pub fn new(source: Arc<dyn StationSource>, config: &CacheConfig) -> Self {
        Self {
            source,
            cache: StationCache::new(config),
        }
    }

    /// Stations around `at`, from the cache when a fresh entry exists.
    pub async fn fetch(&self, at: Coordinate) -> Result<StationFetch, StationError> {
        if let Some(cached) = self.cache.get(at).await {
            debug!(%at, fetched_at = %cached.fetched_at, "station cache hit");
            return Ok(cached);
        }

        let stations = self.source.fetch_stations(at).await?;
        let fetch = StationFetch {
            stations: Arc::new(stations),
            fetched_at: Utc::now(),
        };

        self.cache.insert(at, fetch.clone()).await;

        Ok(fetch)
    }

    /// Drop every cached fetch, e.g. after the underlying data changed.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

/// Re-read a station fixture and drop fetches made from its old contents.
///
/// Returns the number of stations now served.
pub async fn reload_fixture(
    fixture: &MockStationSource,
    cached: &CachedStationSource,
) -> Result<usize, StationError> {
    let count = fixture.reload().await?;
    cached.invalidate_cache();
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::FutureExt;
    use futures::future::BoxFuture;

    use super::*;
    use crate::domain::StationId;

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl StationSource for CountingSource {
        fn fetch_stations(
            &self,
            _at: Coordinate,
        ) -> BoxFuture<'_, Result<Vec<Station>, StationError>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as i64;
            async move { Ok(vec![Station::new(StationId::Numeric(n), None)]) }.boxed()
        }
    }

    struct FailingSource;

    impl StationSource for FailingSource {
        fn fetch_stations(
            &self,
            _at: Coordinate,
        ) -> BoxFuture<'_, Result<Vec<Station>, StationError>> {
            async { Err(StationError::RateLimited) }.boxed()
        }
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1000);
        assert_eq!(config.grid_decimals, 3);
    }

    #[test]
    fn cell_calculation() {
        let cache = StationCache::new(&CacheConfig::default());

        assert_eq!(cache.cell(coord(40.0, -75.0)), (40_000, -75_000));
        assert_eq!(cache.cell(coord(40.00049, -75.0)), (40_000, -75_000));
        assert_eq!(cache.cell(coord(40.0006, -75.0)), (40_001, -75_000));

        let coarse = StationCache::new(&CacheConfig {
            grid_decimals: 1,
            ..CacheConfig::default()
        });
        assert_eq!(coarse.cell(coord(40.04, -75.06)), (400, -751));
    }

    #[test]
    fn oversized_grid_is_capped() {
        let fine = StationCache::new(&CacheConfig {
            grid_decimals: MAX_GRID_DECIMALS,
            ..CacheConfig::default()
        });
        let huge = StationCache::new(&CacheConfig {
            grid_decimals: u8::MAX,
            ..CacheConfig::default()
        });

        let a = coord(89.999999999, 179.999999999);
        let b = coord(-89.999999999, -179.999999999);
        assert_eq!(huge.cell(a), fine.cell(a));
        assert_eq!(huge.cell(a), (89_999_999_999, 179_999_999_999));
        assert_ne!(huge.cell(a), huge.cell(b));
        assert_ne!(huge.cell(coord(40.0, -75.0)), huge.cell(coord(40.000001, -75.0)));
    }

    #[tokio::test]
    async fn second_fetch_in_same_cell_is_cached() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedStationSource::new(source.clone(), &CacheConfig::default());

        let first = cached.fetch(coord(40.0, -75.0)).await.unwrap();
        let second = cached.fetch(coord(40.0001, -75.0001)).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.fetched_at, second.fetched_at);
        assert!(Arc::ptr_eq(&first.stations, &second.stations));

        cached.fetch(coord(41.0, -75.0)).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedStationSource::new(source.clone(), &CacheConfig::default());

        cached.fetch(coord(40.0, -75.0)).await.unwrap();
        cached.invalidate_cache();
        cached.fetch(coord(40.0, -75.0)).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fixture_reload_reaches_cached_searches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pois.json");
        std::fs::write(&path, r#"[ { "ID": 1 }, { "ID": 2 } ]"#).unwrap();

        let fixture = MockStationSource::from_file(&path).unwrap();
        let cached = CachedStationSource::new(Arc::new(fixture.clone()), &CacheConfig::default());
        assert_eq!(cached.fetch(coord(40.0, -75.0)).await.unwrap().stations.len(), 2);

        std::fs::write(&path, r#"[ { "ID": 9 } ]"#).unwrap();
        assert_eq!(reload_fixture(&fixture, &cached).await.unwrap(), 1);

        let fetch = cached.fetch(coord(40.0, -75.0)).await.unwrap();
        assert_eq!(fetch.stations[0].id, StationId::Numeric(9));
    }

    #[tokio::test]
    async fn failed_reload_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pois.json");
        std::fs::write(&path, r#"[ { "ID": 1 } ]"#).unwrap();

        let fixture = MockStationSource::from_file(&path).unwrap();
        let cached = CachedStationSource::new(Arc::new(fixture.clone()), &CacheConfig::default());
        let before = cached.fetch(coord(40.0, -75.0)).await.unwrap();

        std::fs::write(&path, "{ broken").unwrap();
        assert!(matches!(
            reload_fixture(&fixture, &cached).await,
            Err(StationError::Fixture { .. })
        ));

        let after = cached.fetch(coord(40.0, -75.0)).await.unwrap();
        assert!(Arc::ptr_eq(&before.stations, &after.stations));
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cached = CachedStationSource::new(Arc::new(FailingSource), &CacheConfig::default());
        assert!(cached.fetch(coord(40.0, -75.0)).await.is_err());
        assert!(cached.cache.get(coord(40.0, -75.0)).await.is_none());
    }
}
