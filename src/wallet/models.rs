use num_bigint::BigUint;
use serde::Serialize;
use serde_json::Value;

use crate::rpc::{DecodeError, FromRpcResult, ResultMap, numeric::serialize_integer};

/// One subaddress of an account, as listed by `get_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subaddress {
    /// `address_index`
    pub index: u32,
    pub address: String,
    pub label: Option<String>,
    /// `used`
    pub is_used: Option<bool>,
}

impl Subaddress {
    fn from_entry(entry: &ResultMap<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            index: entry.required("address_index")?,
            address: entry.required("address")?,
            label: entry.optional("label")?,
            is_used: entry.optional("used")?,
        })
    }
}

/// `get_address`: the account's base address and its subaddresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressListing {
    pub address: String,
    pub addresses: Vec<Subaddress>,
}

impl FromRpcResult for AddressListing {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        let result = ResultMap::new(method, result)?;
        Ok(Self {
            address: result.required("address")?,
            addresses: result
                .objects("addresses")?
                .iter()
                .map(Subaddress::from_entry)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// A wallet account. Balances are in atomic units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// `account_index`
    pub index: u32,
    /// `base_address`
    pub primary_address: String,
    #[serde(serialize_with = "serialize_integer")]
    pub balance: BigUint,
    #[serde(serialize_with = "serialize_integer")]
    pub unlocked_balance: BigUint,
    pub label: Option<String>,
    pub tag: Option<String>,
}

impl Account {
    fn from_entry(entry: &ResultMap<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            index: entry.required("account_index")?,
            primary_address: entry.required("base_address")?,
            balance: entry.required("balance")?,
            unlocked_balance: entry.required("unlocked_balance")?,
            label: entry.optional("label")?,
            tag: entry.optional("tag")?,
        })
    }
}

/// `get_accounts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountListing {
    pub accounts: Vec<Account>,
    #[serde(serialize_with = "serialize_integer")]
    pub total_balance: BigUint,
    #[serde(serialize_with = "serialize_integer")]
    pub total_unlocked_balance: BigUint,
}

impl FromRpcResult for AccountListing {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        let result = ResultMap::new(method, result)?;
        Ok(Self {
            accounts: result
                .objects("subaddress_accounts")?
                .iter()
                .map(Account::from_entry)
                .collect::<Result<_, _>>()?,
            total_balance: result.required("total_balance")?,
            total_unlocked_balance: result.required("total_unlocked_balance")?,
        })
    }
}
