//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: one request
//! line in, one response out, then the connection is closed.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The connection handler implementing the read-process-write state machine
//! - **`parser`**: Request-line parsing, version/method validation and target resolution
//! - **`request`**: HTTP methods and the parsed request line
//! - **`response`**: Status codes, headers and the response message model
//! - **`error`**: Error responses (400, 404, 405, 500) returned by the dispatcher
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One bounded read from the socket
//!        └──────┬──────┘
//!               │ Bytes received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch to a response or error response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sadao::dispatch::Dispatcher;
//! use sadao::http::connection::{Connection, DEFAULT_READ_BUFFER_SIZE};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:3000").await?;
//!     let dispatcher = Dispatcher::new("./public");
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, &dispatcher, DEFAULT_READ_BUFFER_SIZE);
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod error;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
