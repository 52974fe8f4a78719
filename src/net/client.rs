//! TCP client for remote move advice
//!
//! Opens one short-lived connection per request: send the snapshot line,
//! read the advice line, done. The engine is synchronous, so the advisor
//! carries its own small runtime and turns every failure into the neutral
//! fallback answer rather than an error the game loop would have to handle.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;

use crate::net::protocol::{GameSnapshot, MoveAdvice};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            timeout_ms: 250,
        }
    }
}

impl ClientConfig {
    /// Read settings from BLOCKFALL_* environment variables
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("BLOCKFALL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("BLOCKFALL_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let timeout_ms = env::var("BLOCKFALL_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(250);

        Self {
            host,
            port,
            timeout_ms,
        }
    }
}

/// Blocking bridge to a remote advice server.
#[derive(Debug)]
pub struct RemoteAdvisor {
    config: ClientConfig,
    runtime: Runtime,
}

impl RemoteAdvisor {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { config, runtime })
    }

    /// Fetch advice for a snapshot. Any failure, including a timeout,
    /// yields the fallback answer.
    pub fn request_move(&self, snapshot: &GameSnapshot) -> MoveAdvice {
        let line = match serde_json::to_string(snapshot) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("[Client] Snapshot encoding failed: {}", e);
                return MoveAdvice::fallback();
            }
        };

        let timeout = Duration::from_millis(self.config.timeout_ms);
        // tokio timers grab the runtime handle at construction, so the
        // timeout has to be created inside block_on, not passed to it.
        let result = self.runtime.block_on(async {
            tokio::time::timeout(timeout, exchange(&self.config, &line)).await
        });

        match result {
            Ok(Ok(advice)) => advice,
            Ok(Err(e)) => {
                eprintln!("[Client] Advice request failed: {}", e);
                MoveAdvice::fallback()
            }
            Err(_) => {
                eprintln!(
                    "[Client] Advice request timed out after {}ms",
                    self.config.timeout_ms
                );
                MoveAdvice::fallback()
            }
        }
    }

    /// Whether the advice server currently accepts connections.
    pub fn probe(&self) -> bool {
        let timeout = Duration::from_millis(self.config.timeout_ms);
        let connected = self.runtime.block_on(async {
            let connect = TcpStream::connect((self.config.host.as_str(), self.config.port));
            tokio::time::timeout(timeout, connect).await
        });
        matches!(connected, Ok(Ok(_)))
    }
}

/// One request/response round trip.
async fn exchange(config: &ClientConfig, line: &str) -> anyhow::Result<MoveAdvice> {
    let stream = TcpStream::connect((config.host.as_str(), config.port)).await?;
    let (reader, mut writer) = stream.into_split();

    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    let mut reader = BufReader::new(reader);
    let mut reply = String::new();
    let bytes_read = reader.read_line(&mut reply).await?;
    if bytes_read == 0 {
        anyhow::bail!("connection closed before reply");
    }

    Ok(serde_json::from_str(reply.trim())?)
}
