//! TCP server for remote move advice
//!
//! Listens for line-delimited JSON snapshots and answers each one with the
//! solver's placement on one line. Connections are independent; a client
//! may send one request and hang up or keep the connection open for more.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::net::protocol::{GameSnapshot, MoveAdvice};
use crate::solver;

/// Bind address settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Read settings from BLOCKFALL_* environment variables
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("BLOCKFALL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("BLOCKFALL_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

/// Bind the listener and serve clients until stopped
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr).await?;
    let bound = listener.local_addr()?;
    println!("[Server] Listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;

    // Accept loop; a listener error ends the server.
    loop {
        let (socket, peer) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        println!("[Server] Client {} connected from {}", client_id, peer);

        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id).await {
                eprintln!("[Server] Client {} error: {}", client_id, e);
            }
            println!("[Server] Client {} disconnected", client_id);
        });
    }
}

/// Serve one client until it hangs up
async fn handle_client(socket: TcpStream, client_id: usize) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            // Peer closed the connection.
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let advice = advise(trimmed);
        let reply = serde_json::to_string(&advice)?;
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        println!("[Server] Client {} advised: {}", client_id, reply);
    }

    Ok(())
}

/// Compute the reply for one request line.
///
/// A request that cannot be decoded gets the fallback answer instead of an
/// error: the player side treats any reply as a move, and a stuck game is
/// worse than a wasted placement.
pub fn advise(line: &str) -> MoveAdvice {
    let snapshot: GameSnapshot = match serde_json::from_str(line) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("[Server] Bad request line: {}", e);
            return MoveAdvice::fallback();
        }
    };

    let Some(board) = snapshot.to_board() else {
        eprintln!("[Server] Request board is malformed");
        return MoveAdvice::fallback();
    };
    let Some(piece) = snapshot.to_piece() else {
        eprintln!("[Server] Request piece is malformed");
        return MoveAdvice::fallback();
    };

    match solver::find_best_move(&board, piece.kind) {
        Some(mv) => MoveAdvice::from(mv),
        None => MoveAdvice::fallback(),
    }
}
