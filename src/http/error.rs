use crate::http::parser::ParseError;
use crate::http::request::Method;
use crate::http::response::{Response, StatusCode};

/// Failure outcomes of request handling.
///
/// Each variant stands for a complete HTTP response; [`ErrorResponse::into_response`]
/// builds it. Handlers return `Result<Response, ErrorResponse>` and the
/// connection writes whichever side comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorResponse {
    #[error("400 Bad Request")]
    BadRequest,
    #[error("404 Not Found")]
    NotFound,
    #[error("405 Method Not Allowed")]
    MethodNotAllowed,
    #[error("500 Internal Server Error")]
    InternalServerError,
}

impl ErrorResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorResponse::BadRequest => StatusCode::BadRequest,
            ErrorResponse::NotFound => StatusCode::NotFound,
            ErrorResponse::MethodNotAllowed => StatusCode::MethodNotAllowed,
            ErrorResponse::InternalServerError => StatusCode::InternalServerError,
        }
    }

    /// Builds the wire response for this error. 405 carries `Allow`.
    pub fn into_response(self) -> Response {
        let mut response = Response::new(self.status());
        if self == ErrorResponse::MethodNotAllowed {
            response.add_header("Allow", Method::allow_header_value());
        }
        response
    }
}

impl From<ErrorResponse> for Response {
    fn from(err: ErrorResponse) -> Self {
        err.into_response()
    }
}

impl From<ParseError> for ErrorResponse {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MethodNotAllowed(_) => ErrorResponse::MethodNotAllowed,
            // Escaping the public directory looks like any other missing file.
            ParseError::PathTraversal(_) => ErrorResponse::NotFound,
            ParseError::InvalidEncoding
            | ParseError::IncompleteRequestLine
            | ParseError::UnsupportedVersion(_)
            | ParseError::UnknownMethod(_)
            | ParseError::InvalidTarget(_) => ErrorResponse::BadRequest,
        }
    }
}
