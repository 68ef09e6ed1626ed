//! Typed JSON-RPC client for Monero daemons (`monerod`) and wallets (`monero-wallet-rpc`).
//!
//! [`rpc`] holds the request/response pipeline; [`daemon`] and [`wallet`] put
//! typed methods and models on top of it.

pub mod cli;
pub mod config;
pub mod daemon;
pub mod log;
pub mod rpc;
pub mod wallet;

pub use crate::daemon::MoneroDaemon;
pub use crate::rpc::{ClientError, RpcClient};
pub use crate::wallet::MoneroWallet;
