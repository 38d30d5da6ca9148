/// HTTP request methods recognized by the server.
///
/// All six are parsed, but only GET, HEAD and OPTIONS are served. The rest
/// are answered with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
}

impl Method {
    /// Methods the server actually serves, in `Allow` header order.
    pub const ALLOWED: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];

    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a known method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use sadao::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PATCH"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
        }
    }

    /// Whether the server serves this method.
    pub fn is_allowed(&self) -> bool {
        Self::ALLOWED.contains(self)
    }

    /// The `Allow` header value: `GET, HEAD, OPTIONS`.
    pub fn allow_header_value() -> String {
        Self::ALLOWED
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The first three tokens of a request: method, target and version.
///
/// Tokens are kept as sent; validation happens separately in
/// [`crate::http::parser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Raw method token (e.g. "get" or "GET")
    pub method: String,
    /// Request target (e.g. "/index.html?x=1")
    pub target: String,
    /// HTTP version token (e.g. "HTTP/1.1")
    pub version: String,
}
