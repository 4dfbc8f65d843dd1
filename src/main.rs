//! PumpArena upstream proxy.
//!
//! Lets a browser client read pump.fun data by forwarding a fixed set of
//! read-only REST calls server-side, where CORS does not apply.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                      PROXY                       │
//!   Client Request     │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ───────────────────┼─▶│  http   │───▶│ handlers │───▶│  routing   │   │
//!                      │  │ server  │    │          │    │ endpoints  │   │
//!                      │  └─────────┘    └────┬─────┘    └─────┬──────┘   │
//!                      │                      │   upstream URL  │         │
//!                      │                      ▼◀────────────────┘         │
//!   Client Response    │  ┌─────────┐    ┌──────────┐                     │
//!   ◀──────────────────┼──│response │◀───│ upstream │◀────────────────────┼── pump.fun API
//!                      │  │envelope │    │  client  │                     │
//!                      │  └─────────┘    └──────────┘                     │
//!                      │                                                  │
//!                      │   config · observability · lifecycle · health    │
//!                      └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;

use pumparena_proxy::config::{load_config, Args};
use pumparena_proxy::lifecycle::startup;
use pumparena_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_logging(args.log_format);

    tracing::info!("pumparena-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(args)?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        metrics_address = ?config.observability.metrics_address,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
