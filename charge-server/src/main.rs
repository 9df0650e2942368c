use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use charge_server::cache::{CachedStationSource, reload_fixture};
use charge_server::config::ServerConfig;
use charge_server::geocode::MapboxClient;
use charge_server::ranker::StationRanker;
use charge_server::search::Locator;
use charge_server::stations::{MockStationSource, OcmClient, StationSource};
use charge_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // Station source: a saved response file, or the live API
    let fixture = match &config.mock_file {
        Some(path) => {
            info!(path = %path.display(), "serving stations from fixture");
            Some(MockStationSource::from_file(path)?)
        }
        None => None,
    };
    let source: Arc<dyn StationSource> = match &fixture {
        Some(fixture) => Arc::new(fixture.clone()),
        None => Arc::new(OcmClient::new(config.ocm.clone())?),
    };
    let stations = Arc::new(CachedStationSource::new(source, &config.cache));

    // Pick up edits to the fixture file without a restart
    if let (Some(fixture), Some(every)) = (fixture, config.mock_reload) {
        let stations = stations.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match reload_fixture(&fixture, &stations).await {
                    Ok(count) => info!(count, "reloaded station fixture"),
                    Err(e) => warn!(error = %e, "failed to reload station fixture"),
                }
            }
        });
    }

    let geocoder = MapboxClient::new(config.geocoder.clone())?;

    let locator = Locator::new(Arc::new(geocoder), stations);
    let state = AppState::new(locator, StationRanker::new(config.rank.clone()));

    let app = create_router(state);

    info!(addr = %config.bind_addr, "charging station locator listening");
    info!("  GET  /health");
    info!("  POST /api/charging-stations");
    info!("  GET  /api/geocode?q=");
    info!("  GET  /api/geocode/reverse?latitude=&longitude=");
    info!("  GET  /api/geocode/suggest?q=");
    info!("  POST /api/search");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
