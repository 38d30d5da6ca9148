//! Static file dispatching
//!
//! This module maps validated requests onto the public directory and
//! produces the matching responses.

pub mod files;
pub mod handler;

pub use files::FileInfo;
pub use handler::Dispatcher;
