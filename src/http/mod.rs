//! HTTP/1.0 protocol handling.
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: the per-connection transaction state machine
//! - **`parser`**: bounded line reading, request-line parsing, header draining
//! - **`request`**: the parsed request line
//! - **`response`**: status codes and the ordered header-block builder
//! - **`writer`**: serializes and writes response fragments
//! - **`mime`**: content type detection from file names
//! - **`error`**: client-facing faults and the error page
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← request line, then headers drained
//!        └──────┬──────┘
//!               ├─ unsupported method ──────────┐
//!               ▼                               ▼
//!        ┌──────────────────┐  404/403  ┌──────────────┐
//!        │   Processing     │ ────────► │    Failed    │ ← error page
//!        └──────┬───────────┘           └──────┬───────┘
//!               │ static file / CGI spawn      │
//!               ▼                              ▼
//!        ┌──────────────────────────────────────────┐
//!        │                  Closed                  │
//!        └──────────────────────────────────────────┘
//! ```
//!
//! Peer EOF before a request line goes straight to `Closed`.

pub mod connection;
pub mod error;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

/// Value of the `Server` header on successful responses.
pub const SERVER_NAME: &str = "Tiny Web Server";
