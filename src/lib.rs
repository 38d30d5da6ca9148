//! Sadao - Minimal static file server
//!
//! Core library for the HTTP model, request dispatching and the accept loop.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod server;
