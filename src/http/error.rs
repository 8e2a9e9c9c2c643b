//! Client-facing faults and the error page they render to.

use std::fmt;
use std::path::PathBuf;

use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Which permission bit a forbidden target was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forbidden {
    /// Static target is not a regular, user-readable file
    Read,
    /// Dynamic target is not a regular, user-executable file
    Run,
}

/// A transaction fault that is reported to the client, never fatal to the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// 501: method other than GET or HEAD
    NotImplemented { method: String },
    /// 404: nothing at the resolved path
    NotFound { path: PathBuf },
    /// 403: wrong file type or permission bit
    Forbidden { path: PathBuf, reason: Forbidden },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotImplemented { .. } => StatusCode::NotImplemented,
            HttpError::NotFound { .. } => StatusCode::NotFound,
            HttpError::Forbidden { .. } => StatusCode::Forbidden,
        }
    }

    pub fn record(&self) -> ErrorRecord {
        let (long_message, cause) = match self {
            HttpError::NotImplemented { method } => {
                ("Tiny does not implement this method", method.clone())
            }
            HttpError::NotFound { path } => {
                ("Tiny couldn't find this file", path.display().to_string())
            }
            HttpError::Forbidden { path, reason } => {
                let long = match reason {
                    Forbidden::Read => "Tiny couldn't read the file",
                    Forbidden::Run => "Tiny couldn't run the CGI program",
                };
                (long, path.display().to_string())
            }
        };

        let status = self.status();
        ErrorRecord {
            status,
            short_message: status.reason_phrase(),
            long_message,
            cause,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record();
        write!(
            f,
            "{} {}: {}",
            record.status.as_u16(),
            record.long_message,
            record.cause
        )
    }
}

impl std::error::Error for HttpError {}

/// Everything the error page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub status: StatusCode,
    pub short_message: &'static str,
    pub long_message: &'static str,
    pub cause: String,
}

impl ErrorRecord {
    pub fn page_body(&self) -> String {
        let mut body = String::with_capacity(256);
        body.push_str("<html><title>Tiny Error</title>");
        body.push_str("<body bgcolor=ffffff>\r\n");
        body.push_str(&format!(
            "{}: {}\r\n",
            self.status.as_u16(),
            self.short_message
        ));
        body.push_str(&format!("<p>{}: {}\r\n", self.long_message, self.cause));
        body.push_str("<hr><em>The Tiny Web server</em>\r\n");
        body
    }

    pub fn into_response(self) -> Response {
        let body = self.page_body().into_bytes();
        ResponseBuilder::new(self.status)
            .header("Content-type", "text/html")
            .header("Content-length", body.len().to_string())
            .header("Connection", "close")
            .body(body)
            .build()
    }
}
