//! JSON-RPC client core for Monero daemon and wallet endpoints.
//!
//! This module turns a method name and optional params into a validated, typed
//! result. Every request follows the same path:
//!
//! ```text
//! RequestEnvelope ─► HttpTransport ─► HTTP status check ─► JSON-RPC error check ─► ResultMap ─► model
//! ```
//!
//! # Architecture
//!
//! - [`RpcClient`] - Composition root owning the endpoint, credentials and connection pool
//! - [`RequestEnvelope`] - The `{"jsonrpc":"2.0","id":..,"method":..,"params":..}` body
//! - [`numeric`] - Lossless JSON numbers; integers are only narrowed when a field asks
//! - [`ResultMap`] / [`FromRpcResult`] - Field-by-field projection onto typed models
//! - [`RpcMethod`] - Pairs a method name with its params and response model
//! - [`ClientError`] - Transport, HTTP, RPC and decode failures, kept apart
//!
//! # Example
//!
//! ```rust,no_run
//! use monero_rpc::rpc::RpcClient;
//! use monero_rpc::daemon::GetLastBlockHeader;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = RpcClient::new("http://127.0.0.1:18081")?;
//!
//! // Untyped: any method, raw `result` object back
//! let info = client.call("get_info", None).await?;
//! println!("height: {}", info["height"]);
//!
//! // Typed: same pipeline, mapped onto a model
//! let header = client.call_method(&GetLastBlockHeader).await?;
//! println!("tip {} at height {}", header.hash, header.height);
//! # Ok(())
//! # }
//! ```

mod client;
mod envelope;
mod error;
mod mapper;
mod method;
pub mod numeric;
mod transport;
mod validator;

pub use client::{DEFAULT_REQUEST_ID, RpcClient};
pub use envelope::{RequestEnvelope, Version};
pub use error::{ClientError, ClientResult, DecodeError, HttpError, RpcError};
pub use mapper::{FieldValue, FromRpcResult, ResultMap};
pub use method::RpcMethod;
pub use numeric::NumericError;
pub use transport::Credentials;
