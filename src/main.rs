use anyhow::Result;
use axum::Router;
use solar_billing_monitor::{api, config::Config, service::AppState, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cfg = Config::load()?;

    if cfg.datadis.consumption_url.is_none() {
        warn!("datadis is not configured; distributor data will be synthetic");
    }

    let app_state = AppState::new(cfg.clone())?;
    let app: Router = api::router(app_state, &cfg);

    let addr = cfg.server.socket_addr()?;
    info!(%addr, "starting solar billing monitor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
