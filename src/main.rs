use delivery_pricing::config::Config;
use delivery_pricing::venue::VenueClient;
use delivery_pricing::AppState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;

    let client = VenueClient::new(&config.venue_api_url, config.upstream_timeout)?;
    tracing::info!(
        "Using venue API {} (timeout {:?})",
        client.base(),
        config.upstream_timeout
    );

    let app = delivery_pricing::app(AppState::new(client));

    let listen_addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    tracing::info!("Listening on {}", listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("delivery_pricing=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}
