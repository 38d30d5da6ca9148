use std::path::Path;

/// Fallback for any extension that is not special-cased.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Maps a file extension (without the dot) to a content type.
///
/// Matching is case-insensitive. Only `html` and `png` are recognized;
/// everything else is served as `text/plain`.
///
/// # Example
///
/// ```
/// # use sadao::http::mime::mime_type;
/// assert_eq!(mime_type("HTML"), "text/html");
/// assert_eq!(mime_type("css"), "text/plain");
/// ```
pub fn mime_type(extension: &str) -> &'static str {
    if extension.eq_ignore_ascii_case("html") {
        "text/html"
    } else if extension.eq_ignore_ascii_case("png") {
        "image/png"
    } else {
        DEFAULT_MIME_TYPE
    }
}

/// Content type for a file path, based on its extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(mime_type)
        .unwrap_or(DEFAULT_MIME_TYPE)
}
