use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::parser::HTTP_VERSION;
use crate::http::response::Response;

/// Line terminator for the status line and headers.
///
/// Responses use a bare `\n` rather than `\r\n`; existing clients of the
/// server rely on this exact framing.
pub const LINE_ENDING: &str = "\n";

/// Serializes a response to its wire form.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let body_len = resp.body().map_or(0, <[u8]>::len);
    let mut buf = Vec::with_capacity(256 + body_len);

    // Status line
    let status_line = format!(
        "{} {} {}{}",
        HTTP_VERSION,
        resp.status().as_u16(),
        resp.status_text(),
        LINE_ENDING
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for header in resp.headers() {
        buf.extend_from_slice(header.name().as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(header.value().as_bytes());
        buf.extend_from_slice(LINE_ENDING.as_bytes());
    }

    // Header/body separator
    buf.extend_from_slice(LINE_ENDING.as_bytes());

    // Body
    if let Some(body) = resp.body() {
        buf.extend_from_slice(body);
    }

    buf
}

impl Response {
    /// Wire bytes: status line, headers, blank line, then the body if any.
    pub fn serialize(&self) -> Vec<u8> {
        serialize_response(self)
    }
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
