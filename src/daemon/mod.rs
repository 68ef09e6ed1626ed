//! Typed access to a monerod JSON-RPC endpoint.
//!
//! [`MoneroDaemon`] is a thin facade: each operation is an [`RpcMethod`] sent
//! through the shared [`RpcClient`], so the request, validation and error rules
//! are exactly those of [`RpcClient::call`].

mod methods;
mod models;

use log::debug;

pub use methods::{
    GetBlockCount, GetBlockHash, GetBlockHeaderByHash, GetBlockHeaderByHeight, GetBlockHeadersRange,
    GetBlockTemplate, GetLastBlockHeader,
};
pub use models::{BlockCount, BlockHeader, BlockTemplate, DaemonStatus};

use crate::{
    log::mask_string,
    rpc::{ClientResult, RpcClient, RpcMethod},
};

/// Default monerod RPC port on mainnet.
pub const DEFAULT_DAEMON_PORT: u16 = 18081;

#[derive(Clone)]
pub struct MoneroDaemon {
    rpc: RpcClient,
}

impl MoneroDaemon {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    pub async fn get_block_count(&self) -> ClientResult<BlockCount> {
        self.rpc.call_method(&GetBlockCount).await
    }

    pub async fn get_block_hash(&self, height: u64) -> ClientResult<String> {
        debug!(height = height; "Requesting block hash");
        self.rpc.call_method(&GetBlockHash { height }).await
    }

    pub async fn get_last_block_header(&self) -> ClientResult<BlockHeader> {
        self.rpc.call_method(&GetLastBlockHeader).await
    }

    pub async fn get_block_header_by_hash(&self, hash: &str) -> ClientResult<BlockHeader> {
        debug!(hash = hash; "Requesting block header");
        self.rpc
            .call_method(&GetBlockHeaderByHash { hash: hash.to_string() })
            .await
    }

    pub async fn get_block_header_by_height(&self, height: u64) -> ClientResult<BlockHeader> {
        debug!(height = height; "Requesting block header");
        self.rpc.call_method(&GetBlockHeaderByHeight { height }).await
    }

    /// Headers for `start_height..=end_height`, in the order the daemon returns them.
    pub async fn get_block_headers_range(&self, start_height: u64, end_height: u64) -> ClientResult<Vec<BlockHeader>> {
        debug!(start_height = start_height, end_height = end_height; "Requesting block headers");
        self.rpc
            .call_method(&GetBlockHeadersRange { start_height, end_height })
            .await
    }

    pub async fn get_block_template(&self, wallet_address: &str, reserve_size: u64) -> ClientResult<BlockTemplate> {
        debug!(
            address:% = mask_string(wallet_address),
            reserve_size = reserve_size;
            "Requesting block template"
        );
        let request = GetBlockTemplate {
            wallet_address: wallet_address.to_string(),
            reserve_size,
        };
        self.rpc.call_method(&request).await
    }

    /// Sends any other daemon method through the same pipeline.
    pub async fn call<M: RpcMethod>(&self, request: &M) -> ClientResult<M::Response> {
        self.rpc.call_method(request).await
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::rpc::{ClientError, DecodeError};

    fn header(height: u64, hash: &str) -> Value {
        json!({
            "block_size": 65853,
            "block_weight": 65853,
            "cumulative_difficulty": 87023870367216u64,
            "depth": 0,
            "difficulty": 288207145u64,
            "hash": hash,
            "height": height,
            "long_term_weight": 65853,
            "major_version": 16,
            "minor_version": 16,
            "nonce": 1885649739,
            "num_txes": 37,
            "orphan_status": false,
            "pow_hash": "",
            "prev_hash": "22c72248ae9c5a2863c94735d710a3525c499f70707d1c2f395169bc5c8a0da3",
            "reward": 615702960000u64,
            "timestamp": 1612088597,
            "wide_cumulative_difficulty": "0x4f25ce8d1bf0",
            "wide_difficulty": "0x112dcc29"
        })
    }

    fn rpc_ok(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({ "id": "0", "jsonrpc": "2.0", "result": result }))
    }

    async fn daemon(server: &MockServer) -> MoneroDaemon {
        MoneroDaemon::new(RpcClient::new(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn test_get_block_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/json_rpc"))
            .and(body_partial_json(json!({ "method": "get_block_count" })))
            .respond_with(rpc_ok(json!({ "count": 993163, "status": "OK" })))
            .expect(1)
            .mount(&server)
            .await;

        let count = daemon(&server).await.get_block_count().await.unwrap();

        assert_eq!(count.count, 993163);
        assert_eq!(count.daemon_status.status.as_deref(), Some("OK"));
        assert_eq!(count.daemon_status.is_trusted, None);
    }

    #[tokio::test]
    async fn test_get_block_hash_sends_positional_height() {
        let hash = "e22cf75f39ae720e8b71b3d120a5ac03f0db50bba6379e2850975b4859190bc6";
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "on_get_block_hash", "params": [912345] })))
            .respond_with(rpc_ok(json!(hash)))
            .mount(&server)
            .await;

        let got = daemon(&server).await.get_block_hash(912345).await.unwrap();
        assert_eq!(got, hash);
        assert_eq!(got.len(), 64);
    }

    #[tokio::test]
    async fn test_get_block_header_by_height() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "get_block_header_by_height",
                "params": { "height": 912345 }
            })))
            .respond_with(rpc_ok(json!({
                "block_header": header(912345, "e22cf75f39ae720e8b71b3d120a5ac03f0db50bba6379e2850975b4859190bc6"),
                "status": "OK",
                "untrusted": false
            })))
            .mount(&server)
            .await;

        let header = daemon(&server).await.get_block_header_by_height(912345).await.unwrap();

        assert_eq!(header.height, 912345);
        assert_eq!(header.reward, BigUint::from(615702960000u64));
        assert_eq!(header.daemon_status.is_trusted, Some(true));
    }

    #[tokio::test]
    async fn test_get_block_headers_range() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "get_block_headers_range",
                "params": { "start_height": 1545999, "end_height": 1546000 }
            })))
            .respond_with(rpc_ok(json!({
                "headers": [header(1545999, "aa"), header(1546000, "bb")],
                "status": "OK",
                "untrusted": false
            })))
            .mount(&server)
            .await;

        let headers = daemon(&server).await.get_block_headers_range(1545999, 1546000).await.unwrap();

        let heights: Vec<u64> = headers.iter().map(|h| h.height).collect();
        assert_eq!(heights, vec![1545999, 1546000]);
    }

    #[tokio::test]
    async fn test_missing_header_field_is_decode_error() {
        let mut broken = header(10, "aa");
        broken.as_object_mut().unwrap().remove("timestamp");

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(rpc_ok(json!({ "block_header": broken, "status": "OK" })))
            .mount(&server)
            .await;

        let err = daemon(&server).await.get_last_block_header().await.unwrap_err();

        match err {
            ClientError::Decode(DecodeError::MissingField { method, field }) => {
                assert_eq!(method, "get_last_block_header");
                assert_eq!(field, "block_header.timestamp");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_block_template_sends_address_and_reserve() {
        let address = "44GBHzv6ZyQdJkjqZje6KLZ3xSyN1hBSFAnLP6EAqJtCRVzMzZmeXTC2AHKDS9aEDTRKmo6a6o9r9j86pYfhCWDkKjbtcns";
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "get_block_template",
                "params": { "wallet_address": address, "reserve_size": 60 }
            })))
            .respond_with(rpc_ok(json!({
                "blockhashing_blob": "1010f4bae0b4069d648e741d85ca0e7acb4501f051b27e9b107d3cd7a3f03aa7f776089117c81a00000000e0c20372be23d356347091025c5b5e8f2abf83ab618378565cce2b703491523401",
                "blocktemplate_blob": "1010f4bae0b4069d648e741d85ca0e7acb4501f051b27e9b107d3cd7a3f03aa7f776089117c81a0000000002c681c30101ff8a81c3010180e0a596bb11033b7eedf47baf878f3490cb20b696079c34bd017fe59b0d070e74d73ffabc4bb0e05f011decb630f3148d0163b3bd39690dde4078e4cfb69fecf020d6278a27bad10c58023c010000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
                "difficulty": 283305047039u64,
                "expected_reward": 600000000000u64,
                "height": 3195018,
                "next_seed_hash": "",
                "prev_hash": "9d648e741d85ca0e7acb4501f051b27e9b107d3cd7a3f03aa7f776089117c81a",
                "reserved_offset": 131,
                "seed_hash": "e2aa0b7b55042cd48b02e395d78fa66a29815ccc1584e38db2d1f0e8485cd44f",
                "seed_height": 3194880,
                "status": "OK",
                "untrusted": false,
                "wide_difficulty": "0x41f64bf3ff"
            })))
            .mount(&server)
            .await;

        let template = daemon(&server).await.get_block_template(address, 60).await.unwrap();

        assert_eq!(template.height, 3195018);
        assert_eq!(template.reserved_offset, 131);
        assert_eq!(template.expected_reward, BigUint::from(600000000000u64));
        assert_eq!(template.next_seed_hash.as_deref(), Some(""));
        assert!(template.daemon_status.is_ok());
    }
}
