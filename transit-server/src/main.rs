use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_server::config::ServerConfig;
use transit_server::feeds::TransitClient;
use transit_server::tools::{ToolKind, Tools};
use transit_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "transit_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env()?;

    // Create the feed client
    let client = TransitClient::new(config.feeds)?;

    // Build app state and router
    let state = AppState::new(Tools::new(client));
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "Seoul transit server listening");
    info!("JSON-RPC endpoint: POST http://{addr}/mcp");
    for kind in ToolKind::ALL {
        info!(tool = kind.name(), "tool available");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
