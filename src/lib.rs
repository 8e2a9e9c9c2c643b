//! Tiny - iterative HTTP/1.0 server for static files and CGI programs.
//!
//! Connections are handled strictly one at a time; only spawned CGI programs
//! run alongside the accept loop.

pub mod cgi;
pub mod config;
pub mod content;
pub mod http;
pub mod server;
