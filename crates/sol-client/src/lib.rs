//! Minimal Solana JSON-RPC client.
//!
//! Covers the two calls a signing flow needs, `getLatestBlockhash` and
//! `sendTransaction`. The network itself sits behind [`Transport`], so any
//! HTTP stack (or a test double) can be plugged in.

pub mod client;
pub mod config;
pub mod error;
pub mod rpc;
pub mod transport;

pub use client::RpcClient;
pub use config::{ClientConfig, Cluster, Commitment};
pub use error::ClientError;
pub use rpc::LatestBlockhash;
pub use transport::Transport;
