//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::geocode::GeocoderConfig;
use crate::ranker::RankConfig;
use crate::stations::OcmConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_MOCK_RELOAD_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {message}")]
    Invalid {
        name: &'static str,
        value: String,
        message: String,
    },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub ocm: OcmConfig,
    pub geocoder: GeocoderConfig,
    pub cache: CacheConfig,
    pub rank: RankConfig,
    /// Serve stations from this Open Charge Map response file instead of
    /// the live API.
    pub mock_file: Option<PathBuf>,
    /// How often the mock file is re-read. `None` never re-reads it.
    pub mock_reload: Option<Duration>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    ///
    /// | Variable          | Default                          |
    /// |-------------------|----------------------------------|
    /// | `BIND_ADDR`       | `127.0.0.1:8000`                 |
    /// | `OCM_API_KEY`     | none (anonymous requests)        |
    /// | `OCM_BASE_URL`    | `https://api.openchargemap.io/v3`|
    /// | `OCM_RADIUS_KM`   | `10`                             |
    /// | `OCM_MAX_RESULTS` | `10`                             |
    /// | `OCM_MOCK_FILE`   | none                             |
    /// | `OCM_MOCK_RELOAD_SECS` | `60`, `0` never reloads     |
    /// | `MAPBOX_TOKEN`    | none                             |
    /// | `MAPBOX_BASE_URL` | `https://api.mapbox.com`         |
    /// | `PAGE_SIZE`       | `10`, `0` disables paging        |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(
            "BIND_ADDR",
            var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let api_key = var("OCM_API_KEY").unwrap_or_else(|| {
            warn!("OCM_API_KEY not set; Open Charge Map requests will be anonymous");
            String::new()
        });
        let mut ocm = OcmConfig::new(api_key);
        if let Some(url) = var("OCM_BASE_URL") {
            ocm = ocm.with_base_url(url);
        }
        if let Some(radius) = var("OCM_RADIUS_KM") {
            ocm = ocm.with_radius_km(parse_radius("OCM_RADIUS_KM", radius)?);
        }
        if let Some(n) = var("OCM_MAX_RESULTS") {
            ocm = ocm.with_max_results(parse("OCM_MAX_RESULTS", n)?);
        }

        let token = var("MAPBOX_TOKEN").unwrap_or_else(|| {
            warn!("MAPBOX_TOKEN not set; geocoding requests will fail");
            String::new()
        });
        let mut geocoder = GeocoderConfig::new(token);
        if let Some(url) = var("MAPBOX_BASE_URL") {
            geocoder = geocoder.with_base_url(url);
        }

        let rank = match var("PAGE_SIZE") {
            None => RankConfig::default(),
            Some(size) => match parse::<usize>("PAGE_SIZE", size)? {
                0 => RankConfig::unpaginated(),
                n => RankConfig::paginated(n),
            },
        };

        let mock_reload = match var("OCM_MOCK_RELOAD_SECS") {
            None => Some(DEFAULT_MOCK_RELOAD_SECS),
            Some(secs) => match parse::<u64>("OCM_MOCK_RELOAD_SECS", secs)? {
                0 => None,
                n => Some(n),
            },
        }
        .map(Duration::from_secs);

        Ok(Self {
            bind_addr,
            ocm,
            geocoder,
            cache: CacheConfig::default(),
            rank,
            mock_file: var("OCM_MOCK_FILE").map(PathBuf::from),
            mock_reload,
        })
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        message: e.to_string(),
        value,
    })
}

/// A search radius must be a positive, finite number of kilometers.
fn parse_radius(name: &'static str, value: String) -> Result<f64, ConfigError> {
    let radius: f64 = parse(name, value.clone())?;
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(ConfigError::Invalid {
            name,
            value,
            message: "must be a positive number of kilometers".to_string(),
        })
    }
}
