use std::time::{Duration, SystemTime};

use sadao::http::error::ErrorResponse;
use sadao::http::response::{Header, Response, SERVER_NAME, StatusCode};
use sadao::http::writer::{LINE_ENDING, ResponseWriter, serialize_response};

fn header_names(response: &Response) -> Vec<&str> {
    response.headers().iter().map(Header::name).collect()
}

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_default_headers_in_order() {
    let response = Response::ok();

    assert_eq!(header_names(&response), vec!["Connection", "Server", "Date"]);
    assert_eq!(response.header("Connection"), Some("Close"));
    assert_eq!(response.header("Server"), Some(SERVER_NAME));
    assert!(response.header("Date").unwrap().ends_with(" GMT"));
    assert!(response.body().is_none());
}

#[test]
fn test_add_header_keeps_duplicates_and_order() {
    let mut response = Response::ok();
    response.add_header("X-Custom", "one");
    response.add_header("X-Custom", "two");

    let values: Vec<&str> = response
        .headers()
        .iter()
        .filter(|h| h.name() == "X-Custom")
        .map(Header::value)
        .collect();

    assert_eq!(values, vec!["one", "two"]);
    assert_eq!(response.header("x-custom"), Some("one"));
}

#[test]
fn test_set_body_adds_content_headers() {
    let mut response = Response::ok();
    response.set_body(b"<h1>hi</h1>".to_vec(), "text/html", None);

    assert_eq!(response.body(), Some(&b"<h1>hi</h1>"[..]));
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.header("Content-Length"), Some("11"));
    assert_eq!(response.header("Last-Modified"), None);
}

#[test]
fn test_set_body_last_modified_is_rfc1123() {
    // 1994-11-06 08:49:37 UTC
    let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);

    let mut response = Response::ok();
    response.set_body(b"x".to_vec(), "text/plain", Some(modified));

    assert_eq!(
        response.header("Last-Modified"),
        Some("Sun, 06 Nov 1994 08:49:37 GMT")
    );
}

#[test]
fn test_last_modified_before_epoch_is_left_out() {
    let before_epoch = SystemTime::UNIX_EPOCH - Duration::from_secs(1);

    let mut response = Response::ok();
    response.set_body(b"x".to_vec(), "text/plain", Some(before_epoch));
    assert_eq!(response.header("Last-Modified"), None);
    assert_eq!(response.header("Content-Length"), Some("1"));

    // The epoch itself is still representable.
    response.set_content_headers("text/plain", 1, Some(SystemTime::UNIX_EPOCH));
    assert_eq!(
        response.header("Last-Modified"),
        Some("Thu, 01 Jan 1970 00:00:00 GMT")
    );
}

#[test]
fn test_set_body_twice_last_write_wins() {
    let mut response = Response::ok();
    response.set_body(b"first body".to_vec(), "text/html", None);
    response.set_body(b"second".to_vec(), "image/png", None);

    assert_eq!(response.body(), Some(&b"second"[..]));
    assert_eq!(response.header("Content-Type"), Some("image/png"));
    assert_eq!(response.header("Content-Length"), Some("6"));
    let content_types = response
        .headers()
        .iter()
        .filter(|h| h.name() == "Content-Type")
        .count();
    assert_eq!(content_types, 1);
}

#[test]
fn test_set_content_headers_without_body() {
    let mut response = Response::ok();
    response.set_content_headers("image/png", 2048, None);

    assert!(response.body().is_none());
    assert_eq!(response.header("Content-Type"), Some("image/png"));
    assert_eq!(response.header("Content-Length"), Some("2048"));
}

#[test]
fn test_options_response_allow_header() {
    let response = Response::options();

    assert_eq!(response.status(), StatusCode::Ok);
    assert_eq!(response.header("Allow"), Some("GET, HEAD, OPTIONS"));
}

#[test]
fn test_status_text_override() {
    let response = Response::ok().with_status_text("All Good");
    let wire = String::from_utf8(response.serialize()).unwrap();

    assert_eq!(response.status(), StatusCode::Ok);
    assert!(wire.starts_with("HTTP/1.1 200 All Good\n"));
}

#[test]
fn test_serialize_uses_bare_newlines() {
    let mut response = Response::ok();
    response.set_body(b"body{}".to_vec(), "text/plain", None);
    let date = response.header("Date").unwrap().to_string();

    let expected = format!(
        "HTTP/1.1 200 OK\nConnection: Close\nServer: Sadao\nDate: {}\nContent-Type: text/plain\nContent-Length: 6\n\nbody{{}}",
        date
    );

    assert_eq!(LINE_ENDING, "\n");
    assert_eq!(response.serialize(), expected.into_bytes());
    assert!(!response.serialize().windows(2).any(|w| w == b"\r\n"));
}

#[test]
fn test_serialize_without_body_ends_with_blank_line() {
    let response = Response::options();
    let wire = serialize_response(&response);

    assert!(wire.ends_with(b"Allow: GET, HEAD, OPTIONS\n\n"));
}

#[test]
fn test_serialize_binary_body_verbatim() {
    let body = vec![0x89, b'P', b'N', b'G', 0x00, 0xff];
    let mut response = Response::ok();
    response.set_body(body.clone(), "image/png", None);

    let wire = response.serialize();
    assert!(wire.ends_with(&body));
}

#[test]
fn test_error_responses() {
    let cases = [
        (ErrorResponse::BadRequest, StatusCode::BadRequest),
        (ErrorResponse::NotFound, StatusCode::NotFound),
        (ErrorResponse::MethodNotAllowed, StatusCode::MethodNotAllowed),
        (ErrorResponse::InternalServerError, StatusCode::InternalServerError),
    ];

    for (err, status) in cases {
        assert_eq!(err.status(), status);
        let response: Response = err.into();
        assert_eq!(response.status(), status);
        assert!(response.body().is_none());
        assert_eq!(response.header("Connection"), Some("Close"));
    }
}

#[test]
fn test_method_not_allowed_carries_allow() {
    let response = ErrorResponse::MethodNotAllowed.into_response();
    let wire = String::from_utf8(response.serialize()).unwrap();

    assert!(wire.starts_with("HTTP/1.1 405 Method Not Allowed\n"));
    assert!(wire.contains("\nAllow: GET, HEAD, OPTIONS\n"));
    assert_eq!(ErrorResponse::NotFound.into_response().header("Allow"), None);
}

#[test]
fn test_error_display() {
    assert_eq!(ErrorResponse::NotFound.to_string(), "404 Not Found");
}

#[tokio::test]
async fn test_response_writer_writes_everything() {
    let response = Response::options();
    let mut writer = ResponseWriter::new(&response);
    let expected = writer.bytes().to_vec();

    let mut out: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();

    assert_eq!(out, expected);
}
