//! Request dispatching
//!
//! Turns the raw bytes of a request into a [`Response`] or an
//! [`ErrorResponse`]. The pipeline is:
//!
//! ```text
//! parse line → validate version → validate method ─┬─ OPTIONS → 200 + Allow
//!                                                  └─ resolve path → exists? ─┬─ GET  → 200 + body
//!                                                                             └─ HEAD → 200, headers only
//! ```
//!
//! Any step may stop the pipeline with an [`ErrorResponse`].

use std::io;
use std::path::{Path, PathBuf};

use crate::dispatch::files;
use crate::http::error::ErrorResponse;
use crate::http::parser::{self, ParseError};
use crate::http::request::Method;
use crate::http::response::Response;

/// Serves files from a single public directory.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    public_dir: PathBuf,
}

impl Dispatcher {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Handles one request.
    ///
    /// The version is checked before the method, and the method before the
    /// target is looked at. OPTIONS is answered without touching the
    /// filesystem, so it never produces a 404.
    pub async fn dispatch(&self, raw: &[u8]) -> Result<Response, ErrorResponse> {
        let line = parser::parse_request_line(raw).map_err(client_error)?;

        parser::validate_version(&line.version).map_err(client_error)?;
        let method = parser::validate_method(&line.method).map_err(client_error)?;

        match method {
            Method::OPTIONS => Ok(self.handle_options()),
            Method::GET => {
                let path = self.existing_file(&line.target).await?;
                self.handle_get(&path).await
            }
            Method::HEAD => {
                let path = self.existing_file(&line.target).await?;
                self.handle_head(&path).await
            }
            Method::POST | Method::PUT | Method::DELETE => Err(ErrorResponse::MethodNotAllowed),
        }
    }

    /// Maps the target into the public directory and checks that a regular
    /// file is there.
    async fn existing_file(&self, target: &str) -> Result<PathBuf, ErrorResponse> {
        let path = parser::resolve_target(&self.public_dir, target).map_err(client_error)?;

        if !files::path_exists(&path).await {
            tracing::debug!(request_target = %target, path = ?path, "File not found");
            return Err(ErrorResponse::NotFound);
        }

        Ok(path)
    }

    async fn handle_get(&self, path: &Path) -> Result<Response, ErrorResponse> {
        let content = files::read(path).await.map_err(|e| internal_error(path, e))?;
        let info = files::stat(path).await.map_err(|e| internal_error(path, e))?;

        let mut response = Response::ok();
        response.set_body(content, info.content_type, info.modified);
        Ok(response)
    }

    async fn handle_head(&self, path: &Path) -> Result<Response, ErrorResponse> {
        let info = files::stat(path).await.map_err(|e| internal_error(path, e))?;

        let mut response = Response::ok();
        response.set_content_headers(info.content_type, info.len, info.modified);
        Ok(response)
    }

    fn handle_options(&self) -> Response {
        Response::options()
    }
}

fn client_error(err: ParseError) -> ErrorResponse {
    tracing::debug!(error = ?err, "Rejecting request");
    err.into()
}

// Only reached after the existence check passed.
fn internal_error(path: &Path, err: io::Error) -> ErrorResponse {
    tracing::error!(path = ?path, error = %err, "Failed to access file");
    ErrorResponse::InternalServerError
}
