//! Dynamic content: launching CGI programs and collecting them afterwards.

pub mod executor;
pub mod reaper;

pub use executor::{CgiInvocation, ProcessSpawner, Spawner, serve_dynamic};
pub use reaper::Reaper;
