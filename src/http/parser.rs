use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::http::request::{Method, RequestLine};

/// The only protocol version the server speaks.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// File served for the bare `/` target.
pub const INDEX_FILE: &str = "index.html";

// Request targets are usually origin-form paths; resolve them against a
// dummy origin so `url` can normalize them.
const TARGET_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidEncoding,
    IncompleteRequestLine,
    UnsupportedVersion(String),
    UnknownMethod(String),
    MethodNotAllowed(Method),
    InvalidTarget(String),
    PathTraversal(String),
}

/// Splits raw request bytes into method, target and version.
///
/// Everything after the third whitespace-separated token (headers, body) is
/// ignored.
pub fn parse_request_line(raw: &[u8]) -> Result<RequestLine, ParseError> {
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text,
        // Tolerate a character cut off at the end of the read buffer.
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&raw[..e.valid_up_to()]).map_err(|_| ParseError::InvalidEncoding)?
        }
        Err(_) => return Err(ParseError::InvalidEncoding),
    };

    let mut parts = text.split_whitespace();

    let method = parts.next().ok_or(ParseError::IncompleteRequestLine)?;
    let target = parts.next().ok_or(ParseError::IncompleteRequestLine)?;
    let version = parts.next().ok_or(ParseError::IncompleteRequestLine)?;

    Ok(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    })
}

/// Accepts `HTTP/1.1` in any letter case.
pub fn validate_version(version: &str) -> Result<(), ParseError> {
    if version.eq_ignore_ascii_case(HTTP_VERSION) {
        Ok(())
    } else {
        Err(ParseError::UnsupportedVersion(version.to_string()))
    }
}

/// Uppercases the method token and checks it against the recognized and
/// allowed sets.
pub fn validate_method(method: &str) -> Result<Method, ParseError> {
    let method = Method::from_str(&method.to_ascii_uppercase())
        .ok_or_else(|| ParseError::UnknownMethod(method.to_string()))?;

    if !method.is_allowed() {
        return Err(ParseError::MethodNotAllowed(method));
    }

    Ok(method)
}

/// Maps a request target onto a file below `public_dir`.
///
/// Query and fragment are dropped and the path is percent-decoded. An empty
/// path resolves to [`INDEX_FILE`]. `..` segments are folded by URL
/// normalization; any that survive decoding are rejected, so the result
/// always lies inside `public_dir`.
pub fn resolve_target(public_dir: &Path, target: &str) -> Result<PathBuf, ParseError> {
    let invalid = || ParseError::InvalidTarget(target.to_string());

    let url = Url::parse(TARGET_BASE)
        .and_then(|base| base.join(target))
        .map_err(|_| invalid())?;
    let decoded = urlencoding::decode(url.path()).map_err(|_| invalid())?;

    let relative = match decoded.trim_matches('/') {
        "" => INDEX_FILE,
        path => path,
    };

    let mut path = public_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => path.push(segment),
            Component::CurDir => {}
            _ => return Err(ParseError::PathTraversal(target.to_string())),
        }
    }

    Ok(path)
}
