//! End-to-end description round-trips through the codec.

use common::errors::CodecError;
use vnd_symbol_client::{decode_description, encode_description, TransactionDescription};

const AGGREGATE_DOC: &str = r#"{
    "common_txn_header": {
        "transactionHash": "e5f37fe3f83f4f0a2f21e7cf25f75cf29a20d7929cbeb7eb552eda846969281f",
        "version": 1,
        "networkType": 152,
        "transactionType": "AGGREGATE_COMPLETE",
        "maxFee": 2000000,
        "deadline": 82616600
    },
    "fields": {
        "transactionHash": "e5f37fe3f83f4f0a2f21e7cf25f75cf29a20d7929cbeb7eb552eda846969281f",
        "transactions": [
            {
                "inner_tx_header": {
                    "signerPublicKey": "f5ac59d222b9f1b0e0e2c9cba8d9ebbb0404da1f0c0a85d89516e79aa3b2c7e4",
                    "version": 1,
                    "networkType": 152,
                    "transactionType": "MOSAIC_DEFINITION"
                },
                "fields": {
                    "mosaicId": 5993362836255154289,
                    "duration": 300,
                    "nonce": 3077497720,
                    "flag": 7,
                    "divisibility": 0
                }
            },
            {
                "inner_tx_header": {
                    "signerPublicKey": "f5ac59d222b9f1b0e0e2c9cba8d9ebbb0404da1f0c0a85d89516e79aa3b2c7e4",
                    "version": 1,
                    "networkType": 152,
                    "transactionType": "MOSAIC_SUPPLY_CHANGE"
                },
                "fields": {
                    "mosaicId": 5993362836255154289,
                    "amount": 1000000,
                    "action": 1
                }
            }
        ]
    }
}"#;

#[test]
fn test_aggregate_document_round_trips() {
    let description = TransactionDescription::from_json(AGGREGATE_DOC).unwrap();
    let bytes = encode_description(&description).unwrap();
    let back = decode_description(&bytes).unwrap();
    assert_eq!(back, description);
}

#[test]
fn test_aggregate_document_payload_accounting() {
    let description = TransactionDescription::from_json(AGGREGATE_DOC).unwrap();
    let bytes = encode_description(&description).unwrap();

    // mosaic definition body is 22 bytes (size 70, padded 72), supply
    // change is 17 (size 65, padded 72)
    let payload_size_at = 52 + 32;
    let declared =
        u32::from_le_bytes(bytes[payload_size_at..payload_size_at + 4].try_into().unwrap());
    assert_eq!(declared, 72 + 72);
    assert_eq!(bytes.len(), 52 + 32 + 4 + 4 + 144);
}

#[test]
fn test_nested_aggregate_document_is_rejected() {
    let doc = AGGREGATE_DOC.replace(
        r#""transactionType": "MOSAIC_SUPPLY_CHANGE""#,
        r#""transactionType": "AGGREGATE_BONDED""#,
    );
    // give the renamed inner transaction an aggregate-shaped fields object
    let doc = doc.replace(
        r#"{
                    "mosaicId": 5993362836255154289,
                    "amount": 1000000,
                    "action": 1
                }"#,
        r#"{
                    "transactionHash": "e5f37fe3f83f4f0a2f21e7cf25f75cf29a20d7929cbeb7eb552eda846969281f",
                    "transactions": []
                }"#,
    );
    let description = TransactionDescription::from_json(&doc).unwrap();
    let err = encode_description(&description).unwrap_err();
    let vnd_symbol_client::ClientError::Codec(codec) = err else {
        panic!("expected a codec error");
    };
    assert_eq!(
        codec,
        CodecError::InvalidFieldEncoding {
            field: "transactions",
            reason: "aggregate transactions cannot nest",
        }
    );
}

#[test]
fn test_wire_bytes_for_codecless_registry_entry() {
    // SECRET_PROOF resolves in the registry but has no body codec
    let mut wire = vec![0u8; 52];
    wire[34..36].copy_from_slice(&0x4252u16.to_le_bytes());
    let err = decode_description(&wire).unwrap_err();
    assert!(matches!(
        err,
        vnd_symbol_client::ClientError::Codec(CodecError::UnsupportedTransactionType(_))
    ));
}

#[test]
fn test_truncated_wire_bytes_underrun() {
    let description = TransactionDescription::from_json(AGGREGATE_DOC).unwrap();
    let bytes = encode_description(&description).unwrap();
    let err = decode_description(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(
        err,
        vnd_symbol_client::ClientError::Codec(CodecError::BufferUnderrun { .. })
    ));
}
