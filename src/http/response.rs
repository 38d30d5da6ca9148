use std::time::{SystemTime, UNIX_EPOCH};

use crate::http::request::Method;

/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = "Sadao";

/// HTTP status codes the server can emit.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request line, version or method
/// - `NotFound` (404): No regular file behind the target
/// - `MethodNotAllowed` (405): Recognized method that is not served
/// - `InternalServerError` (500): Server-side failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use sadao::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use sadao::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A single response header. Names are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An HTTP response under construction.
///
/// Every response starts with the `Connection: Close`, `Server` and `Date`
/// headers, in that order. Headers keep their insertion order on the wire.
/// A body can only be attached through [`Response::set_body`], which also
/// appends the matching `Content-Type` and `Content-Length`.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    status_text: String,
    headers: Vec<Header>,
    body: Option<Vec<u8>>,
}

const CONTENT_HEADERS: [&str; 3] = ["Content-Type", "Content-Length", "Last-Modified"];

impl Response {
    /// Creates a response with the default headers and no body.
    pub fn new(status: StatusCode) -> Self {
        let mut response = Self {
            status,
            status_text: status.reason_phrase().to_string(),
            headers: Vec::with_capacity(8),
            body: None,
        };
        response.add_header("Connection", "Close");
        response.add_header("Server", SERVER_NAME);
        response.add_header("Date", httpdate::fmt_http_date(SystemTime::now()));
        response
    }

    /// 200 OK with no body yet.
    pub fn ok() -> Self {
        Self::new(StatusCode::Ok)
    }

    /// 200 OK advertising the served methods in `Allow`.
    pub fn options() -> Self {
        let mut response = Self::ok();
        response.add_header("Allow", Method::allow_header_value());
        response
    }

    /// Replaces the reason phrase taken from the status table.
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Appends a header. Name and value are passed through unchecked.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push(Header::new(name, value));
    }

    /// Attaches a body along with its content headers.
    ///
    /// Calling this again replaces both the body and the content headers
    /// written by the previous call.
    pub fn set_body(
        &mut self,
        content: Vec<u8>,
        content_type: &str,
        last_modified: Option<SystemTime>,
    ) {
        let length = content.len() as u64;
        self.body = Some(content);
        self.set_content_headers(content_type, length, last_modified);
    }

    /// Writes `Content-Type`, `Content-Length` and optionally `Last-Modified`
    /// without attaching a body. Used for HEAD.
    ///
    /// Times before the Unix epoch cannot be formatted and are left out.
    pub fn set_content_headers(
        &mut self,
        content_type: &str,
        content_length: u64,
        last_modified: Option<SystemTime>,
    ) {
        self.headers
            .retain(|h| !CONTENT_HEADERS.iter().any(|c| h.name.eq_ignore_ascii_case(c)));

        self.add_header("Content-Type", content_type);
        self.add_header("Content-Length", content_length.to_string());
        if let Some(modified) = last_modified.filter(|t| *t >= UNIX_EPOCH) {
            self.add_header("Last-Modified", httpdate::fmt_http_date(modified));
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
