use std::any::Any;
use std::panic::AssertUnwindSafe;

use bytes::{Bytes, BytesMut};
use futures::FutureExt;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::dispatch::Dispatcher;
use crate::http::error::ErrorResponse;
use crate::http::writer::ResponseWriter;

/// Bytes read from a client per connection. Anything beyond is ignored.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8192;

/// One client connection: a single request and a single response.
pub struct Connection<'a, S> {
    stream: S,
    dispatcher: &'a Dispatcher,
    buffer: BytesMut,
    read_limit: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Bytes),
    Writing(ResponseWriter),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, dispatcher: &'a Dispatcher, read_limit: usize) -> Self {
        Self {
            stream,
            dispatcher,
            buffer: BytesMut::with_capacity(read_limit),
            read_limit,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`.
    ///
    /// A response is always attempted, even when reading or dispatching fails
    /// or panics. Only write failures are returned.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match AssertUnwindSafe(self.read_request()).catch_unwind().await {
                        Ok(Ok(raw)) => ConnectionState::Processing(raw),
                        Ok(Err(e)) => {
                            tracing::warn!(error = %e, "Failed to read request");
                            internal_error()
                        }
                        Err(panic) => {
                            tracing::error!(panic = panic_message(&*panic), "Panic while reading request");
                            internal_error()
                        }
                    };
                }

                ConnectionState::Processing(raw) => {
                    let dispatched = AssertUnwindSafe(self.dispatcher.dispatch(&raw))
                        .catch_unwind()
                        .await;
                    let response = match dispatched {
                        Ok(Ok(response)) => response,
                        Ok(Err(err)) => err.into_response(),
                        Err(panic) => {
                            tracing::error!(panic = panic_message(&*panic), "Panic while handling request");
                            ErrorResponse::InternalServerError.into_response()
                        }
                    };

                    tracing::info!(
                        status = response.status().as_u16(),
                        request_bytes = raw.len(),
                        "Request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // No keep-alive: one response per connection.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Failed to shut down connection");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads once, up to the configured limit. There is no read loop, so
    /// requests larger than the buffer are truncated.
    pub async fn read_request(&mut self) -> anyhow::Result<Bytes> {
        self.buffer.clear();
        self.buffer.resize(self.read_limit, 0);

        let n = self.stream.read(&mut self.buffer[..]).await?;
        if n == 0 {
            tracing::debug!("Client closed connection before sending a request");
        }

        self.buffer.truncate(n);
        Ok(self.buffer.split().freeze())
    }
}

fn internal_error() -> ConnectionState {
    let response = ErrorResponse::InternalServerError.into_response();
    ConnectionState::Writing(ResponseWriter::new(&response))
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
