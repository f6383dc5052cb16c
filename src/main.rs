//! Retail CRM Sellers - seller identifier service

use anyhow::Result;
use retail_crm_sellers::{api, config::Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = Config::from_env()?;
    let addr = config.bind_addr()?;
    let storage_width = config.storage_width;
    let app = api::router(api::AppState::new(config));

    tracing::info!(%addr, storage_width, "Retail CRM sellers listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
