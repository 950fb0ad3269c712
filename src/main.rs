//! Entry point for the payroll engine HTTP server.
//!
//! The configuration file is read from `PAYROLL_CONFIG` (default
//! `./config/payroll.yaml`) and the server binds to `PAYROLL_BIND_ADDR`
//! (default `127.0.0.1:3000`). Log output is filtered with `RUST_LOG`.

use std::env;
use std::error::Error;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

const DEFAULT_CONFIG_PATH: &str = "./config/payroll.yaml";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_line_number(true)
        .init();

    let config_path =
        env::var("PAYROLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    if let Err(err) = serve(&config_path, &addr).await {
        error!(error = %err, "Server terminated");
        std::process::exit(1);
    }
}

async fn serve(config_path: &str, addr: &str) -> Result<(), Box<dyn Error>> {
    let config = ConfigLoader::load(config_path)?;
    info!(
        config = %config_path,
        currency = %config.currency(),
        model = ?config.payroll().model,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
