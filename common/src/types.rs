//! Fixed-width wire values shared by every transaction shape.
//!
//! Addresses, public keys and hashes travel as raw bytes on the wire and as
//! hex strings in transaction descriptions. The hex conversions live here so
//! that the boundary gets a length- and digit-checked value or a
//! [`CodecError::InvalidFieldEncoding`] naming the offending field; the
//! codec itself only ever sees correctly sized byte arrays.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::errors::CodecError;

fn fixed_from_hex<const N: usize>(
    input: &str,
    field: &'static str,
    wrong_len: &'static str,
) -> Result<[u8; N], CodecError> {
    let raw: Vec<u8> = hex::decode(input).map_err(|_| CodecError::InvalidFieldEncoding {
        field,
        reason: "not a hex string",
    })?;
    if raw.len() != N {
        return Err(CodecError::InvalidFieldEncoding {
            field,
            reason: wrong_len,
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&raw);
    Ok(out)
}

/// A 24-byte account address.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(pub [u8; Address::LEN]);

impl Address {
    pub const LEN: usize = 24;

    pub fn from_hex(input: &str, field: &'static str) -> Result<Self, CodecError> {
        Ok(Address(fixed_from_hex(input, field, "expected 24 bytes")?))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte Ed25519 public key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub [u8; PublicKey::LEN]);

impl PublicKey {
    pub const LEN: usize = 32;

    pub fn from_hex(input: &str, field: &'static str) -> Result<Self, CodecError> {
        Ok(PublicKey(fixed_from_hex(input, field, "expected 32 bytes")?))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte transaction digest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hash256(pub [u8; Hash256::LEN]);

impl Hash256 {
    pub const LEN: usize = 32;

    pub fn from_hex(input: &str, field: &'static str) -> Result<Self, CodecError> {
        Ok(Hash256(fixed_from_hex(input, field, "expected 32 bytes")?))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex(
            "98d2a5e8e063ad1a910bdedb5167e2f1a5645c48fa2c0248",
            "recipient",
        )
        .unwrap();
        assert_eq!(addr.0[0], 0x98);
        assert_eq!(addr.0[23], 0x48);
        assert_eq!(addr.to_hex(), "98d2a5e8e063ad1a910bdedb5167e2f1a5645c48fa2c0248");
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = Address::from_hex("0011", "recipient").unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFieldEncoding {
                field: "recipient",
                reason: "expected 24 bytes",
            }
        );
    }

    #[test]
    fn test_rejects_non_hex() {
        let err = Hash256::from_hex("zz", "transactionHash").unwrap_err();
        assert!(matches!(err, CodecError::InvalidFieldEncoding { .. }));
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let key = PublicKey::from_hex(
            "F5AC59D222B9F1B0E0E2C9CBA8D9EBBB0404DA1F0C0A85D89516E79AA3B2C7E4",
            "signerPublicKey",
        )
        .unwrap();
        assert_eq!(key.0[0], 0xf5);
        assert_eq!(key.0[31], 0xe4);
    }
}
