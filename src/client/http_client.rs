//! HTTP client construction for the build service.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::ServerConfig;
use crate::error::ForgeError;

const USER_AGENT: &str = concat!("pcforge/", env!("CARGO_PKG_VERSION"));

const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Build a client with the configured request and connect timeouts
pub fn create_shared_client(server: &ServerConfig) -> Result<Arc<Client>, ForgeError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(server.timeout())
        .connect_timeout(server.connect_timeout())
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .map_err(ForgeError::Transport)?;

    Ok(Arc::new(client))
}
