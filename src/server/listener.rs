use std::net::SocketAddr;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::dispatch::Dispatcher;
use crate::http::connection::Connection;

/// Pending connections the OS may queue while one is being served.
const BACKLOG: u32 = 1;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server).await?;
    let dispatcher = Dispatcher::new(cfg.static_files.public_dir.clone());

    info!("Listening on {}", listener.local_addr()?);
    info!(public_dir = ?dispatcher.public_dir(), "Serving static files");

    serve(listener, dispatcher, cfg.server.read_buffer_size).await
}

pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = tokio::net::lookup_host((cfg.host.as_str(), cfg.port))
        .await
        .with_context(|| format!("Failed to resolve {}:{}", cfg.host, cfg.port))?
        .next()
        .with_context(|| format!("No address for {}:{}", cfg.host, cfg.port))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("Failed to bind {}", addr))?;

    Ok(socket.listen(BACKLOG)?)
}

/// Accepts and serves connections one at a time, forever.
///
/// A connection is read, answered and closed before the next accept. Errors
/// and panics on one connection are logged and never stop the loop. There are no
/// timeouts: a client that never sends stalls the server.
pub async fn serve(
    listener: TcpListener,
    dispatcher: Dispatcher,
    read_buffer_size: usize,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        serve_connection(socket, peer, dispatcher.clone(), read_buffer_size).await;
    }
}

/// Runs one connection on its own task and waits for it to finish.
///
/// The task keeps a panic inside the connection from unwinding into the
/// accept loop.
pub async fn serve_connection<S>(
    stream: S,
    peer: SocketAddr,
    dispatcher: Dispatcher,
    read_buffer_size: usize,
) where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut conn = Connection::new(stream, &dispatcher, read_buffer_size);
        conn.run().await
    });

    match task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Connection error from {}: {}", peer, e),
        Err(e) if e.is_panic() => tracing::error!("Connection from {} panicked", peer),
        Err(e) => tracing::warn!("Connection task for {} failed: {}", peer, e),
    }
}
