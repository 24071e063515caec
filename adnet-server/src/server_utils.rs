use adnet_types::ServerConfig;
use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

pub async fn create_listener(server: &ServerConfig) -> Result<tokio::net::TcpListener> {
    let ip: std::net::IpAddr = server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", server.host, e))?;
    let addr = SocketAddr::new(ip, server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🔌 Listening on {}", addr);
    Ok(listener)
}

#[allow(
    clippy::expect_used,
    reason = "Signal handlers are critical infrastructure, panic is appropriate on failure"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("🛑 Received Ctrl+C, initiating graceful shutdown..."),
        () = terminate => info!("🛑 Received SIGTERM, initiating graceful shutdown..."),
    }

    info!("⏳ Draining in-flight requests...");
}
