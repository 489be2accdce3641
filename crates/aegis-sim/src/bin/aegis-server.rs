//! Aegis Network Simulator Server
//!
//! Load a topology and serve the dashboard API.

use std::net::SocketAddr;
use std::path::PathBuf;

use aegis_sim::{AegisServer, SimulationConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "aegis-server",
    about = "Network routing simulator with an HTTP API for the Aegis dashboard",
    version
)]
struct Cli {
    /// Address to listen on (overrides AEGIS_API_ADDR)
    #[arg(short, long)]
    addr: Option<SocketAddr>,

    /// TOML topology file (overrides AEGIS_TOPOLOGY)
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// Keep at most this many events, 0 for unbounded (overrides AEGIS_EVENT_CAPACITY)
    #[arg(long)]
    event_capacity: Option<usize>,

    /// Sleep for each link's latency while delivering messages
    #[arg(long)]
    simulate_delays: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aegis_server=info,aegis_sim=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = SimulationConfig::from_env()?;
    if let Some(addr) = cli.addr {
        config.api_addr = addr;
    }
    if let Some(path) = cli.topology {
        config.topology_path = Some(path);
    }
    if let Some(cap) = cli.event_capacity {
        config.event_capacity = Some(cap).filter(|&n| n > 0);
    }
    config.simulate_delays |= cli.simulate_delays;

    match &config.topology_path {
        Some(path) => tracing::info!("Loading topology from {}", path.display()),
        None => tracing::info!("No topology file given, using the demo topology"),
    }

    let server = AegisServer::from_config(&config)?;
    let snapshot = server.network().snapshot().await;
    tracing::info!(
        nodes = snapshot.nodes.len(),
        links = snapshot.links.len(),
        simulate_delays = config.simulate_delays,
        "Network ready"
    );

    server.serve(config.api_addr).await?;

    Ok(())
}
