/// HTTP request methods the server accepts.
///
/// Only GET and HEAD are served. Every other token on the request line is
/// answered with 501 before any header is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

impl Method {
    /// Parses an HTTP method from a request-line token.
    ///
    /// Matching is case-insensitive, so `get` and `Head` are accepted.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("head"), Some(Method::HEAD));
    /// assert_eq!(Method::from_str("DELETE"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("GET") {
            Some(Method::GET)
        } else if s.eq_ignore_ascii_case("HEAD") {
            Some(Method::HEAD)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }
}

/// A parsed request line.
///
/// Headers are drained from the stream but never stored, and request bodies
/// are not supported, so the request line is all there is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET or HEAD)
    pub method: Method,
    /// The raw request URI, query string included (e.g. "/cgi-bin/adder?1&2")
    pub uri: String,
    /// HTTP version token as sent by the client (typically "HTTP/1.0")
    pub version: String,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            version: version.into(),
        }
    }

    /// Whether the response must stop after the header block.
    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}
