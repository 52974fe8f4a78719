//! Net module - the move-advice wire protocol and both of its ends

pub mod client;
pub mod protocol;
pub mod server;

pub use client::{ClientConfig, RemoteAdvisor};
pub use protocol::{GameSnapshot, MoveAdvice};
pub use server::{run_server, ServerConfig};
