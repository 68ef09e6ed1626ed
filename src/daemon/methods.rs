use serde_json::{Value, json};

use super::models::{BlockCount, BlockHeader, BlockTemplate};
use crate::rpc::RpcMethod;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetBlockCount;

impl RpcMethod for GetBlockCount {
    const METHOD: &'static str = "get_block_count";
    type Response = BlockCount;
}

/// Hash of the main-chain block at `height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBlockHash {
    pub height: u64,
}

impl RpcMethod for GetBlockHash {
    const METHOD: &'static str = "on_get_block_hash";
    type Response = String;

    // positional, unlike every other daemon method here
    fn params(&self) -> Option<Value> {
        Some(json!([self.height]))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetLastBlockHeader;

impl RpcMethod for GetLastBlockHeader {
    const METHOD: &'static str = "get_last_block_header";
    type Response = BlockHeader;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBlockHeaderByHash {
    pub hash: String,
}

impl RpcMethod for GetBlockHeaderByHash {
    const METHOD: &'static str = "get_block_header_by_hash";
    type Response = BlockHeader;

    fn params(&self) -> Option<Value> {
        Some(json!({ "hash": self.hash }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBlockHeaderByHeight {
    pub height: u64,
}

impl RpcMethod for GetBlockHeaderByHeight {
    const METHOD: &'static str = "get_block_header_by_height";
    type Response = BlockHeader;

    fn params(&self) -> Option<Value> {
        Some(json!({ "height": self.height }))
    }
}

/// Headers for every block in `start_height..=end_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBlockHeadersRange {
    pub start_height: u64,
    pub end_height: u64,
}

impl RpcMethod for GetBlockHeadersRange {
    const METHOD: &'static str = "get_block_headers_range";
    type Response = Vec<BlockHeader>;

    fn params(&self) -> Option<Value> {
        Some(json!({ "start_height": self.start_height, "end_height": self.end_height }))
    }
}

/// A template for mining the next block, paying out to `wallet_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBlockTemplate {
    pub wallet_address: String,
    /// Bytes to reserve in the coinbase extra for a miner nonce.
    pub reserve_size: u64,
}

impl RpcMethod for GetBlockTemplate {
    const METHOD: &'static str = "get_block_template";
    type Response = BlockTemplate;

    fn params(&self) -> Option<Value> {
        Some(json!({ "wallet_address": self.wallet_address, "reserve_size": self.reserve_size }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterless_methods_omit_params() {
        assert_eq!(GetBlockCount.params(), None);
        assert_eq!(GetLastBlockHeader.params(), None);
    }

    #[test]
    fn test_block_hash_params_are_positional() {
        assert_eq!(GetBlockHash { height: 912345 }.params(), Some(json!([912345])));
    }

    #[test]
    fn test_named_params() {
        assert_eq!(
            GetBlockHeadersRange { start_height: 10, end_height: 12 }.params(),
            Some(json!({ "start_height": 10, "end_height": 12 }))
        );
        assert_eq!(
            GetBlockTemplate { wallet_address: "44AFFq5k".to_string(), reserve_size: 2 }.params(),
            Some(json!({ "wallet_address": "44AFFq5k", "reserve_size": 2 }))
        );
        assert_eq!(
            GetBlockHeaderByHash { hash: "e22cf7".to_string() }.params(),
            Some(json!({ "hash": "e22cf7" }))
        );
    }
}
