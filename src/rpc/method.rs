use serde_json::Value;

use super::mapper::FromRpcResult;

/// A typed JSON-RPC method: its wire name, how its params are built and what its
/// `result` maps to.
///
/// Every daemon and wallet operation in this crate is one of these, dispatched
/// through [`RpcClient::call_method`](super::RpcClient::call_method), so all of them
/// share the same transport and validation path.
///
/// ```rust
/// use monero_rpc::rpc::RpcMethod;
/// use monero_rpc::daemon::{GetBlockHeaderByHeight, GetBlockCount};
///
/// assert_eq!(GetBlockCount::METHOD, "get_block_count");
/// assert_eq!(GetBlockCount.params(), None);
/// assert_eq!(
///     GetBlockHeaderByHeight { height: 42 }.params(),
///     Some(serde_json::json!({ "height": 42 }))
/// );
/// ```
pub trait RpcMethod {
    const METHOD: &'static str;

    type Response: FromRpcResult;

    /// Params for the envelope; `None` omits the key entirely.
    fn params(&self) -> Option<Value> {
        None
    }
}
