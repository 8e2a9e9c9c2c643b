//! Listening socket and the serial accept loop.

pub mod listener;

use std::sync::Arc;

use crate::cgi::Spawner;
use crate::config::Config;

/// Shared, read-only state every transaction needs.
#[derive(Clone)]
pub struct ServerContext {
    pub config: Arc<Config>,
    pub spawner: Arc<dyn Spawner>,
}

impl ServerContext {
    pub fn new(config: Config, spawner: Arc<dyn Spawner>) -> Self {
        Self {
            config: Arc::new(config),
            spawner,
        }
    }
}
