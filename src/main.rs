use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use museum_server::config::AppConfig;
use museum_server::startup::{build_app, initialize_database, seed_admin};
use museum_server::AppState;

#[derive(Parser, Debug)]
#[command(name = "museum-server")]
#[command(about = "REST backend for museum collection and exhibition management")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let mut app_config = AppConfig::load_or_default(&args.config)
        .map_err(|e| format!("Failed to load configuration: {}", e))?;
    app_config.apply_env_overrides();

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }

    tracing::info!(
        "Database: {} ({})",
        app_config.database.db_type,
        app_config.database.url
    );

    let gateway = initialize_database(&app_config).await?;
    let state = AppState::new(gateway, &app_config)?;

    if let Some(admin) = &app_config.auth.bootstrap_admin {
        seed_admin(&state, admin).await?;
    }

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        tracing::warn!(
            "Invalid host address: {}, using 127.0.0.1",
            app_config.server.host
        );
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    let app = build_app(state);

    tracing::info!("Museum server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
