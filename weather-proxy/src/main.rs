//! Standalone forwarding proxy process.
//!
//! Binds a fixed local port (3000 unless overridden) and relays `/weather`
//! requests to the upstream API with the shared rewrite + CORS rule.

use anyhow::Context;
use clap::Parser;
use weather_core::Config;
use weather_proxy::{ProxyRule, proxy_router};

/// Command line arguments for the weather proxy server
#[derive(Parser, Debug)]
#[command(name = "weather-proxy")]
#[command(about = "Forwarding proxy for the weather dashboard")]
struct Args {
    /// Port to bind the server to; defaults to the configured port (3000).
    #[arg(short, long)]
    port: Option<u16>,

    /// Upstream host to forward to; defaults to the configured upstream.
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt().init();

    let config = Config::load().context("Failed to load configuration")?;

    let port = args.port.unwrap_or_else(|| config.proxy_port());
    let upstream = args.upstream.unwrap_or_else(|| config.upstream().to_string());

    let rule = ProxyRule::weather(upstream);
    tracing::info!("Forwarding {} to {}", rule.prefix(), rule.upstream());

    let app = proxy_router(rule);

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    tracing::info!("Proxy server is running on http://localhost:{port}");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
