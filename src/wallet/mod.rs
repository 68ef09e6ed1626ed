//! Typed access to a monero-wallet-rpc endpoint.

mod methods;
mod models;

use log::debug;

pub use methods::{GetAccounts, GetAddress};
pub use models::{Account, AccountListing, AddressListing, Subaddress};

use crate::rpc::{ClientResult, RpcClient, RpcMethod};

/// Default monero-wallet-rpc port used by the wallet tooling.
pub const DEFAULT_WALLET_PORT: u16 = 18082;

#[derive(Clone)]
pub struct MoneroWallet {
    rpc: RpcClient,
}

impl MoneroWallet {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Base address of account 0.
    pub async fn get_primary_address(&self) -> ClientResult<String> {
        let listing = self.rpc.call_method(&GetAddress::default()).await?;
        Ok(listing.address)
    }

    pub async fn get_accounts(&self) -> ClientResult<Vec<Account>> {
        Ok(self.get_account_listing(None).await?.accounts)
    }

    /// Accounts plus wallet-wide totals, optionally filtered by tag.
    pub async fn get_account_listing(&self, tag: Option<&str>) -> ClientResult<AccountListing> {
        let request = GetAccounts {
            tag: tag.map(str::to_string),
        };
        self.rpc.call_method(&request).await
    }

    pub async fn get_subaddresses(&self, account_index: u32) -> ClientResult<Vec<Subaddress>> {
        debug!(account_index = account_index; "Requesting subaddresses");
        let request = GetAddress {
            account_index,
            address_indices: None,
        };
        Ok(self.rpc.call_method(&request).await?.addresses)
    }

    pub async fn call<M: RpcMethod>(&self, request: &M) -> ClientResult<M::Response> {
        self.rpc.call_method(request).await
    }
}
