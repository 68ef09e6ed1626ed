//! JSON-RPC 2.0 request envelope.
//!
//! The daemon does not correlate requests by id, so the id is a fixed,
//! client-scoped string (the client default is `"0"`).

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use serde_json::Value;

/// Protocol version marker, always (de)serialized as the JSON string `"2.0"`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Version;

impl Version {
    pub const TWO: &'static str = "2.0";
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(Self::TWO)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("the exact string \"2.0\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Version, E> {
                if v == Version::TWO {
                    Ok(Version)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        d.deserialize_str(VersionVisitor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::TWO)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::TWO)
    }
}

/// The body POSTed to `/json_rpc`.
///
/// `params` is omitted from the serialized form when it is `None`; a `null`
/// passed to [`RequestEnvelope::new`] is normalised to `None` so the key is never
/// emitted as `"params":null`. Method names are not checked against any known set;
/// [`RpcClient`](super::RpcClient) refuses an empty one before building the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub jsonrpc: Version,
    pub id: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RequestEnvelope {
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: Version,
            id: id.into(),
            method: method.into(),
            params: params.filter(|p| !p.is_null()),
        }
    }
}

impl fmt::Display for RequestEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
