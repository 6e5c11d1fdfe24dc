// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Prism CLI
//!
//! Runs the stage-mirror sync client headless, logging everything the
//! server pushes. Useful for smoke-testing a stage server without a
//! renderer attached.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prism_client::{ClientConfig, SyncClient};

mod adapters;

use adapters::{LogRenderer, LogUi};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Explicit WebSocket endpoint (skips candidate derivation)
    #[clap(short, long)]
    url: Option<String>,

    /// Origin host used to derive a same-origin candidate
    #[clap(short, long)]
    origin: Option<String>,

    /// Use wss for the origin-derived candidate
    #[clap(long)]
    tls: bool,

    /// Request a fresh layer listing shortly after startup
    #[clap(long)]
    request_layers: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig {
        override_url: args.url,
        origin: args.origin,
        tls: args.tls,
    };
    info!(candidates = ?config.candidates(), "starting stage mirror");

    let (client, input) = SyncClient::new(&config, LogRenderer, LogUi)?;
    let client_task = tokio::spawn(client.run());

    if args.request_layers {
        // Give the first connection attempt a moment; sends while the
        // socket is down are dropped, not queued.
        let handle = input.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            handle.request_layers();
        });
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    drop(input);
    client_task.await?;
    Ok(())
}
