//! Mapping request URIs onto the content root and serving static files.
//!
//! - **`resolver`**: classifies a URI as static or dynamic and builds its path
//! - **`access`**: stats the path and enforces the regular-file and permission rules
//! - **`static_file`**: writes headers and file bytes

pub mod access;
pub mod resolver;
pub mod static_file;
