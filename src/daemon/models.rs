use num_bigint::BigUint;
use serde::Serialize;
use serde_json::Value;

use crate::rpc::{
    DecodeError, FromRpcResult, ResultMap,
    numeric::{serialize_integer, serialize_optional_integer},
};

/// Status fields most daemon responses carry next to their payload.
///
/// Both are `None` when the daemon did not send them, which is distinct from a
/// present `"status"` or an explicit `untrusted: true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DaemonStatus {
    pub status: Option<String>,
    /// Negation of the daemon's `untrusted` flag.
    pub is_trusted: Option<bool>,
}

impl DaemonStatus {
    pub const OK: &'static str = "OK";

    pub fn from_result(result: &ResultMap<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            status: result.optional("status")?,
            is_trusted: result.optional::<bool>("untrusted")?.map(|untrusted| !untrusted),
        })
    }

    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(Self::OK)
    }
}

/// `get_block_count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockCount {
    /// Number of blocks in the longest chain, i.e. the tip height plus one.
    pub count: u64,
    #[serde(flatten)]
    pub daemon_status: DaemonStatus,
}

impl FromRpcResult for BlockCount {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        let result = ResultMap::new(method, result)?;
        Ok(Self {
            count: result.required("count")?,
            daemon_status: DaemonStatus::from_result(&result)?,
        })
    }
}

/// Header of a block on the main chain or an orphan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHeader {
    pub block_size: u64,
    pub depth: u64,
    #[serde(serialize_with = "serialize_integer")]
    pub difficulty: BigUint,
    pub hash: String,
    pub height: u64,
    pub major_version: u32,
    pub minor_version: u32,
    pub nonce: u64,
    pub num_txes: u64,
    pub orphan_status: bool,
    pub prev_hash: String,
    /// Coinbase reward in atomic units.
    #[serde(serialize_with = "serialize_integer")]
    pub reward: BigUint,
    pub timestamp: u64,

    pub block_weight: Option<u64>,
    pub long_term_weight: Option<u64>,
    #[serde(serialize_with = "serialize_optional_integer")]
    pub cumulative_difficulty: Option<BigUint>,
    pub miner_tx_hash: Option<String>,
    pub pow_hash: Option<String>,
    pub wide_difficulty: Option<String>,
    pub wide_cumulative_difficulty: Option<String>,

    #[serde(flatten)]
    pub daemon_status: DaemonStatus,
}

impl BlockHeader {
    /// Reads one header object; `daemon_status` comes from the enclosing result.
    pub fn from_header(header: &ResultMap<'_>, daemon_status: DaemonStatus) -> Result<Self, DecodeError> {
        Ok(Self {
            block_size: header.required("block_size")?,
            depth: header.required("depth")?,
            difficulty: header.required("difficulty")?,
            hash: header.required("hash")?,
            height: header.required("height")?,
            major_version: header.required("major_version")?,
            minor_version: header.required("minor_version")?,
            nonce: header.required("nonce")?,
            num_txes: header.required("num_txes")?,
            orphan_status: header.required("orphan_status")?,
            prev_hash: header.required("prev_hash")?,
            reward: header.required("reward")?,
            timestamp: header.required("timestamp")?,
            block_weight: header.optional("block_weight")?,
            long_term_weight: header.optional("long_term_weight")?,
            cumulative_difficulty: header.optional("cumulative_difficulty")?,
            miner_tx_hash: header.optional("miner_tx_hash")?,
            pow_hash: header.optional("pow_hash")?,
            wide_difficulty: header.optional("wide_difficulty")?,
            wide_cumulative_difficulty: header.optional("wide_cumulative_difficulty")?,
            daemon_status,
        })
    }
}

/// `get_last_block_header`, `get_block_header_by_hash`, `get_block_header_by_height`
impl FromRpcResult for BlockHeader {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        let result = ResultMap::new(method, result)?;
        let daemon_status = DaemonStatus::from_result(&result)?;
        Self::from_header(&result.object("block_header")?, daemon_status)
    }
}

/// `get_block_headers_range`; every header shares the response's status.
impl FromRpcResult for Vec<BlockHeader> {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        let result = ResultMap::new(method, result)?;
        let daemon_status = DaemonStatus::from_result(&result)?;
        result
            .objects("headers")?
            .iter()
            .map(|header| BlockHeader::from_header(header, daemon_status.clone()))
            .collect()
    }
}

/// `get_block_template`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockTemplate {
    /// `blocktemplate_blob`
    pub template_blob: String,
    /// `blockhashing_blob`
    pub hash_blob: String,
    #[serde(serialize_with = "serialize_integer")]
    pub difficulty: BigUint,
    #[serde(serialize_with = "serialize_integer")]
    pub expected_reward: BigUint,
    pub height: u64,
    pub prev_hash: String,
    /// Byte offset of the reserved space inside `template_blob`.
    pub reserved_offset: u64,

    pub seed_height: Option<u64>,
    pub seed_hash: Option<String>,
    pub next_seed_hash: Option<String>,
    pub wide_difficulty: Option<String>,

    #[serde(flatten)]
    pub daemon_status: DaemonStatus,
}

impl FromRpcResult for BlockTemplate {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        let result = ResultMap::new(method, result)?;
        Ok(Self {
            template_blob: result.required("blocktemplate_blob")?,
            hash_blob: result.required("blockhashing_blob")?,
            difficulty: result.required("difficulty")?,
            expected_reward: result.required("expected_reward")?,
            height: result.required("height")?,
            prev_hash: result.required("prev_hash")?,
            reserved_offset: result.required("reserved_offset")?,
            seed_height: result.optional("seed_height")?,
            seed_hash: result.optional("seed_hash")?,
            next_seed_hash: result.optional("next_seed_hash")?,
            wide_difficulty: result.optional("wide_difficulty")?,
            daemon_status: DaemonStatus::from_result(&result)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn header_json() -> Value {
        json!({
            "block_size": 5500,
            "block_weight": 5500,
            "cumulative_difficulty": 86164894009456483u64,
            "depth": 0,
            "difficulty": 227026389695u64,
            "hash": "a6ad87cf357a1aac1ee1d7cb0afa4c2e653b0b1ab7d5bf6af310333e43c59dd0",
            "height": 2286454,
            "long_term_weight": 5500,
            "major_version": 14,
            "miner_tx_hash": "a474f87de1645ff14c5e90c477b07f9bc86a22fb42909caa0705239298da96d0",
            "minor_version": 14,
            "nonce": 249602367,
            "num_txes": 3,
            "orphan_status": false,
            "pow_hash": "",
            "prev_hash": "fa17fefe1d05da775a61a3dc33d9e199d12af167ef0ab37e52b51e8487b50f25",
            "reward": 1181337498013u64,
            "timestamp": 1612088597,
            "wide_cumulative_difficulty": "0x1321e83bb8af763",
            "wide_difficulty": "0x34dbd3cabf"
        })
    }

    #[test]
    fn test_block_header_from_result() {
        let result = json!({ "block_header": header_json(), "status": "OK", "untrusted": false });

        let header = BlockHeader::from_result("get_last_block_header", result).unwrap();

        assert_eq!(header.height, 2286454);
        assert_eq!(header.reward, BigUint::from(1181337498013u64));
        assert_eq!(header.pow_hash.as_deref(), Some(""));
        assert_eq!(header.daemon_status.status.as_deref(), Some("OK"));
        assert_eq!(header.daemon_status.is_trusted, Some(true));
        assert!(header.daemon_status.is_ok());
    }

    #[test]
    fn test_block_header_optional_fields_unset() {
        let mut raw = header_json();
        for key in ["block_weight", "miner_tx_hash", "cumulative_difficulty"] {
            raw.as_object_mut().unwrap().remove(key);
        }

        let header = BlockHeader::from_result("get_last_block_header", json!({ "block_header": raw })).unwrap();

        assert_eq!(header.block_weight, None);
        assert_eq!(header.miner_tx_hash, None);
        assert_eq!(header.cumulative_difficulty, None);
        assert_eq!(header.daemon_status, DaemonStatus::default());
        assert!(!header.daemon_status.is_ok());
    }

    #[test]
    fn test_block_header_missing_required_field() {
        let mut raw = header_json();
        raw.as_object_mut().unwrap().remove("reward");

        let err = BlockHeader::from_result("get_block_header_by_hash", json!({ "block_header": raw })).unwrap_err();

        assert_eq!(err.method(), "get_block_header_by_hash");
        assert_eq!(err.field(), Some("block_header.reward"));
    }

    #[test]
    fn test_block_count_without_untrusted() {
        let count = BlockCount::from_result("get_block_count", json!({ "count": 993163, "status": "OK" })).unwrap();
        assert_eq!(count.count, 993163);
        assert_eq!(count.daemon_status.status.as_deref(), Some("OK"));
        assert_eq!(count.daemon_status.is_trusted, None);
    }

    #[test]
    fn test_block_template_maps_renamed_blobs() {
        let result = json!({
            "blockhashing_blob": "0e0ed286da8006ecdc1aab3033cf1716c52f13f9d8ae0051615a2453643de94cf47e29db2b2e0000000099bbd6c2ab2c8ef9f52f4ae7e5d6c3b87b0e1c4d8b7a1f8e2c3d4e5f6a7b8c900",
            "blocktemplate_blob": "0e0ed286da8006ecdc1aab3033cf1716c52f13f9d8ae0051615a2453643de94cf47e29db2b2e00000000",
            "difficulty": 2325,
            "expected_reward": 17571058496478u64,
            "height": 2287217,
            "prev_hash": "ecdc1aab3033cf1716c52f13f9d8ae0051615a2453643de94cf47e29db2b2e",
            "reserved_offset": 130,
            "seed_hash": "d432f499205150873b2572b5f033c9c6e4b7c6f3394bd2dd93822cd7085e7307",
            "seed_height": 2285568,
            "status": "OK",
            "untrusted": true,
            "wide_difficulty": "0x915"
        });

        let template = BlockTemplate::from_result("get_block_template", result).unwrap();

        assert!(template.template_blob.starts_with("0e0e"));
        assert!(template.hash_blob.ends_with("900"));
        assert_eq!(template.difficulty, BigUint::from(2325u32));
        assert_eq!(template.reserved_offset, 130);
        assert_eq!(template.next_seed_hash, None);
        assert_eq!(template.daemon_status.is_trusted, Some(false));
    }

    #[test]
    fn test_headers_range_share_status() {
        let mut second = header_json();
        second["height"] = json!(2286455);
        let result = json!({ "headers": [header_json(), second], "status": "OK", "untrusted": false });

        let headers = Vec::<BlockHeader>::from_result("get_block_headers_range", result).unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].height, 2286455);
        assert!(headers.iter().all(|h| h.daemon_status.is_ok()));
    }

    #[test]
    fn test_models_serialize_amounts_as_numbers() {
        let result = json!({ "block_header": header_json(), "status": "OK", "untrusted": false });
        let header = BlockHeader::from_result("get_last_block_header", result).unwrap();

        let printed = serde_json::to_string(&header).unwrap();
        assert!(printed.contains(r#""reward":1181337498013"#));
        assert!(printed.contains(r#""status":"OK""#));
        assert!(printed.contains(r#""is_trusted":true"#));
    }
}
