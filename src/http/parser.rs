use std::fmt;

use bytes::BytesMut;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::http::request::{Method, Request};

/// Default upper bound for a single request or header line.
pub const MAX_LINE: usize = 8192;

#[derive(Debug)]
pub enum ParseError {
    /// Peer closed the stream before a request line arrived
    ConnectionClosed,
    /// Method token other than GET or HEAD (case-insensitive)
    UnsupportedMethod(String),
    Io(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ConnectionClosed => write!(f, "connection closed before request line"),
            ParseError::UnsupportedMethod(m) => write!(f, "unsupported method {:?}", m),
            ParseError::Io(e) => write!(f, "io: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// Reads one `\n`-terminated line, keeping at most `max_line` bytes of it.
///
/// Bytes past the limit are consumed from the stream and dropped, so an
/// oversized line never grows the buffer. Returns `None` on EOF before any
/// byte was read; a final unterminated line is returned as-is.
pub async fn read_line<R>(reader: &mut R, max_line: usize) -> std::io::Result<Option<BytesMut>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = BytesMut::with_capacity(max_line.min(256));
    let mut seen_any = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(seen_any.then_some(line));
        }
        seen_any = true;

        let (take, complete) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };

        let room = max_line.saturating_sub(line.len());
        line.extend_from_slice(&available[..take.min(room)]);
        reader.consume(take);

        if complete {
            return Ok(Some(line));
        }
    }
}

/// Splits a request line into method, URI and version.
///
/// Only the first three whitespace-separated tokens are looked at. Missing
/// tokens become empty strings rather than errors.
pub fn parse_request_line(line: &str) -> Result<Request, ParseError> {
    let mut parts = line.split_whitespace();

    let method_str = parts.next().unwrap_or("");
    let uri = parts.next().unwrap_or("");
    let version = parts.next().unwrap_or("");

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::UnsupportedMethod(method_str.to_string()))?;

    Ok(Request::new(method, uri, version))
}

pub async fn read_request_line<R>(reader: &mut R, max_line: usize) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_line(reader, max_line)
        .await?
        .ok_or(ParseError::ConnectionClosed)?;

    let text = String::from_utf8_lossy(&line);
    debug!(request_line = %text.trim_end(), "Request line received");

    parse_request_line(&text)
}

/// Reads and discards header lines up to the blank-line terminator.
///
/// Stops early at EOF. Returns how many header lines were dropped.
pub async fn drain_headers<R>(reader: &mut R, max_line: usize) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut drained = 0;

    while let Some(line) = read_line(reader, max_line).await? {
        if is_blank(&line) {
            break;
        }
        debug!(header = %String::from_utf8_lossy(&line).trim_end(), "Discarding header");
        drained += 1;
    }

    Ok(drained)
}

fn is_blank(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}
