//! Lossless handling of JSON numbers.
//!
//! `serde_json` is built with the `arbitrary_precision` feature, so every number token
//! of a parsed response keeps its literal text inside [`serde_json::Number`]. Nothing is
//! converted to `f64` at the parse boundary. A number only becomes a concrete integer
//! when a model field asks for one: [`decode_integer`] produces an unbounded [`BigInt`]
//! and [`narrow`] performs the checked conversion into the field's machine type.
//!
//! Non-integer numbers are not part of the Monero RPC dialect. They are carried through
//! untouched inside [`serde_json::Value`] (so `call` callers can still see them) and are
//! rejected with [`NumericError::NotAnInteger`] as soon as a typed field reads one.

use std::{fmt::Display, str::FromStr};

use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Failure to turn a JSON number into the integer a field expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("expected an integer, got `{0}`")]
    NotAnInteger(String),

    #[error("{value} does not fit in {target}")]
    OutOfRange { value: BigInt, target: &'static str },
}

/// Parses a response body into a JSON object without losing numeric precision.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Decodes a JSON number into an arbitrary-precision integer.
///
/// ```rust
/// use monero_rpc::rpc::numeric::decode_integer;
/// use serde_json::Value;
///
/// let value: Value = serde_json::from_str("340282366920938463463374607431768211457").unwrap();
/// let Value::Number(number) = value else { unreachable!() };
/// assert_eq!(decode_integer(&number).unwrap().to_string(), "340282366920938463463374607431768211457");
/// ```
pub fn decode_integer(number: &Number) -> Result<BigInt, NumericError> {
    let text = number.to_string();
    if text.contains(['.', 'e', 'E']) {
        return Err(NumericError::NotAnInteger(text));
    }
    BigInt::from_str(&text).map_err(|_| NumericError::NotAnInteger(text))
}

/// Encodes an integer as a bare JSON number literal.
pub fn encode_integer(value: &BigInt) -> Result<Number, serde_json::Error> {
    Number::from_str(&value.to_string())
}

/// Checked conversion of a decoded integer into the type a field declares.
pub fn narrow<T>(value: &BigInt) -> Result<T, NumericError>
where
    T: TryFrom<BigInt>,
{
    T::try_from(value.clone()).map_err(|_| NumericError::OutOfRange {
        value: value.clone(),
        target: std::any::type_name::<T>(),
    })
}

/// `serialize_with` helper writing any integer type as a bare JSON number.
///
/// Used by model fields holding [`num_bigint::BigUint`] amounts and difficulties so that
/// printed models keep every digit and never quote the value.
pub fn serialize_integer<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    let number = Number::from_str(&value.to_string()).map_err(serde::ser::Error::custom)?;
    number.serialize(serializer)
}

/// Optional counterpart of [`serialize_integer`]; `None` is written as `null`.
pub fn serialize_optional_integer<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(value) => serialize_integer(value, serializer),
        None => serializer.serialize_none(),
    }
}
