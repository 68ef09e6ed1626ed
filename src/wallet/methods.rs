use serde_json::{Value, json};

use super::models::{AccountListing, AddressListing};
use crate::rpc::RpcMethod;

/// Addresses of one account, optionally restricted to some subaddress indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAddress {
    pub account_index: u32,
    pub address_indices: Option<Vec<u32>>,
}

impl RpcMethod for GetAddress {
    const METHOD: &'static str = "get_address";
    type Response = AddressListing;

    fn params(&self) -> Option<Value> {
        let mut params = json!({ "account_index": self.account_index });
        if let Some(indices) = &self.address_indices {
            params["address_index"] = json!(indices);
        }
        Some(params)
    }
}

/// All accounts, or only those carrying `tag`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccounts {
    pub tag: Option<String>,
}

impl RpcMethod for GetAccounts {
    const METHOD: &'static str = "get_accounts";
    type Response = AccountListing;

    fn params(&self) -> Option<Value> {
        self.tag.as_ref().map(|tag| json!({ "tag": tag }))
    }
}
