//! Pluggable value serialization.
//!
//! The cipher layer only moves bytes; a [`ValueCodec`] turns a typed value
//! into those bytes and back. Implementations must round-trip
//! (`deserialize(serialize(v))` reproduces `v`) and operate purely on
//! in-memory buffers.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;

pub trait ValueCodec<T> {
    fn serialize(&self, value: &T) -> Result<Vec<u8>, CodecError>;
    fn deserialize(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// JSON codec for any serde-serializable type. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> ValueCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Serialize(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Deserialize(e.to_string()))
    }
}

/// Identity codec for raw byte payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl ValueCodec<Vec<u8>> for RawCodec {
    fn serialize(&self, value: &Vec<u8>) -> Result<Vec<u8>, CodecError> {
        Ok(value.clone())
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn json_roundtrip() {
        let value = Sample {
            name: "alpha".into(),
            count: 3,
        };

        let bytes = JsonCodec.serialize(&value).unwrap();
        let back: Sample = JsonCodec.deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn json_type_mismatch_fails() {
        let bytes = JsonCodec.serialize(&vec![1u32, 2, 3]).unwrap();
        let result: Result<Sample, _> = JsonCodec.deserialize(&bytes);
        assert!(matches!(result, Err(CodecError::Deserialize(_))));
    }

    #[test]
    fn json_garbage_fails() {
        let result: Result<Sample, _> = JsonCodec.deserialize(b"\x00\x01\x02");
        assert!(result.is_err());
    }

    #[test]
    fn raw_is_identity() {
        let value = vec![0u8, 255, 7, 42];
        let bytes = RawCodec.serialize(&value).unwrap();
        assert_eq!(bytes, value);
        assert_eq!(RawCodec.deserialize(&bytes).unwrap(), value);
    }
}
