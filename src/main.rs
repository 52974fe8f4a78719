//! Move-advice server binary.
//!
//! Binds the advice server on the configured address and serves snapshot
//! requests until interrupted. Host and port come from `BLOCKFALL_HOST`
//! and `BLOCKFALL_PORT`, defaulting to 127.0.0.1:3000.

use anyhow::Result;

use blockfall::net::server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    run_server(ServerConfig::from_env(), None).await
}
