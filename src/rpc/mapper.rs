//! Projection of a validated `result` value onto typed models.
//!
//! Models implement [`FromRpcResult`] by reading their documented keys through a
//! [`ResultMap`]. A required key that is absent (or `null`) is a
//! [`DecodeError::MissingField`] naming the key and the method; an optional key that
//! is absent becomes `None`, never a zero or `false`. A key that is present but has
//! the wrong type is a [`DecodeError::InvalidField`] whether it is required or not.
//!
//! No unit conversion or reinterpretation happens here.

use num_bigint::{BigInt, BigUint};
use serde_json::{Map, Value};

use super::{error::DecodeError, numeric};

/// A value that can be read out of a single JSON field.
pub trait FieldValue: Sized {
    /// Human readable description used in [`DecodeError::InvalidField`].
    const EXPECTED: &'static str;

    fn from_field(value: &Value) -> Result<Self, String>;
}

impl FieldValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_field(value: &Value) -> Result<Self, String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| format!("got {value}"))
    }
}

impl FieldValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_field(value: &Value) -> Result<Self, String> {
        value.as_bool().ok_or_else(|| format!("got {value}"))
    }
}

impl FieldValue for BigInt {
    const EXPECTED: &'static str = "an integer";

    fn from_field(value: &Value) -> Result<Self, String> {
        match value {
            Value::Number(number) => numeric::decode_integer(number).map_err(|e| e.to_string()),
            other => Err(format!("got {other}")),
        }
    }
}

impl FieldValue for Value {
    const EXPECTED: &'static str = "any JSON value";

    fn from_field(value: &Value) -> Result<Self, String> {
        Ok(value.clone())
    }
}

macro_rules! narrowed_field_value {
    ($($ty:ty => $expected:literal),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_field(value: &Value) -> Result<Self, String> {
                    let integer = BigInt::from_field(value)?;
                    numeric::narrow(&integer).map_err(|e| e.to_string())
                }
            }
        )+
    };
}

narrowed_field_value! {
    BigUint => "a non-negative integer",
    u64 => "an unsigned 64-bit integer",
    u32 => "an unsigned 32-bit integer",
    u16 => "an unsigned 16-bit integer",
    u8 => "an unsigned 8-bit integer",
    i64 => "a signed 64-bit integer",
}

/// Typed projection of a method's `result`.
pub trait FromRpcResult: Sized {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError>;
}

/// The raw object form, returned by [`RpcClient::call`](super::RpcClient::call).
impl FromRpcResult for Map<String, Value> {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        Ok(ResultMap::new(method, result)?.into_inner())
    }
}

impl FromRpcResult for Value {
    fn from_result(_method: &str, result: Value) -> Result<Self, DecodeError> {
        Ok(result)
    }
}

/// Scalar string results, such as the block hash returned by `on_get_block_hash`.
impl FromRpcResult for String {
    fn from_result(method: &str, result: Value) -> Result<Self, DecodeError> {
        String::from_field(&result).map_err(|reason| DecodeError::InvalidField {
            method: method.to_string(),
            field: "result".to_string(),
            expected: String::EXPECTED,
            reason,
        })
    }
}

/// A JSON object being read field by field on behalf of one method.
///
/// Nested objects keep a dotted path (`block_header.height`, `headers[3].hash`) so
/// errors point at the exact key.
#[derive(Debug, Clone)]
pub struct ResultMap<'m> {
    method: &'m str,
    path: String,
    fields: Map<String, Value>,
}

impl<'m> ResultMap<'m> {
    pub fn new(method: &'m str, result: Value) -> Result<Self, DecodeError> {
        Self::at_path(method, String::new(), result)
    }

    fn at_path(method: &'m str, path: String, value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(fields) => Ok(Self { method, path, fields }),
            other => Err(DecodeError::InvalidField {
                method: method.to_string(),
                field: if path.is_empty() { "result".to_string() } else { path },
                expected: "an object",
                reason: format!("got {other}"),
            }),
        }
    }

    pub fn method(&self) -> &'m str {
        self.method
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    fn missing(&self, key: &str) -> DecodeError {
        DecodeError::MissingField {
            method: self.method.to_string(),
            field: self.path_of(key),
        }
    }

    fn convert<T: FieldValue>(&self, key: &str, value: &Value) -> Result<T, DecodeError> {
        T::from_field(value).map_err(|reason| DecodeError::InvalidField {
            method: self.method.to_string(),
            field: self.path_of(key),
            expected: T::EXPECTED,
            reason,
        })
    }

    pub fn required<T: FieldValue>(&self, key: &str) -> Result<T, DecodeError> {
        let value = self.present(key).ok_or_else(|| self.missing(key))?;
        self.convert(key, value)
    }

    pub fn optional<T: FieldValue>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.present(key).map(|value| self.convert(key, value)).transpose()
    }

    /// A required nested object.
    pub fn object(&self, key: &str) -> Result<ResultMap<'m>, DecodeError> {
        let value = self.present(key).ok_or_else(|| self.missing(key))?;
        Self::at_path(self.method, self.path_of(key), value.clone())
    }

    /// A required array of objects. An empty array is valid.
    pub fn objects(&self, key: &str) -> Result<Vec<ResultMap<'m>>, DecodeError> {
        let value = self.present(key).ok_or_else(|| self.missing(key))?;
        let Value::Array(items) = value else {
            return Err(DecodeError::InvalidField {
                method: self.method.to_string(),
                field: self.path_of(key),
                expected: "an array",
                reason: format!("got {value}"),
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::at_path(self.method, format!("{}[{i}]", self.path_of(key)), item.clone()))
            .collect()
    }
}
