/// HTTP status codes the server emits.
///
/// - `Ok` (200): static file or CGI program served
/// - `Forbidden` (403): not a regular file, or missing the read/execute bit
/// - `NotFound` (404): the resolved path does not exist
/// - `NotImplemented` (501): method other than GET or HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not found
    NotFound,
    /// 501 Not implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Reason phrase written on the status line.
    ///
    /// For error statuses this doubles as the short message of the error page.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not found",
            StatusCode::NotImplemented => "Not implemented",
        }
    }
}

/// A response header block plus an optional in-memory body.
///
/// Headers keep insertion order; they are written exactly as appended.
/// Static file bodies are streamed separately and never stored here.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Header lines in wire order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Append-only builder for response header blocks.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Server", SERVER_NAME)
///     .header("Content-type", "text/html")
///     .body(b"<html></html>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header line. Duplicates are kept.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets an in-memory body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the final Response.
    ///
    /// When a body was set and no `Content-length` was appended, one matching
    /// the body size is added last.
    pub fn build(mut self) -> Response {
        let body = self.body.take();

        if let Some(body) = &body {
            let has_length = self
                .headers
                .iter()
                .any(|(k, _)| k.eq_ignore_ascii_case("Content-length"));
            if !has_length {
                self.headers
                    .push(("Content-length".to_string(), body.len().to_string()));
            }
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: body.unwrap_or_default(),
        }
    }
}

impl Response {
    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The announced `Content-length`, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.header("Content-length").and_then(|v| v.parse().ok())
    }
}
