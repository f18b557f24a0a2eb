//! Encoders: structured transaction values to their exact wire bytes.
//!
//! Each body encoder is the byte-for-byte inverse of its decoder in
//! [`crate::decode`]. Counts that travel as fixed-width integers are
//! range-checked here before narrowing, so a malformed structured value
//! fails loudly instead of truncating.

use alloc::vec::Vec;

use crate::buffer::Writer;
use crate::errors::CodecError;
use crate::model::{
    AccountMetadataBody, AddressAliasBody, AddressRestrictionBody, AggregateBody,
    CommonHeader, FundLockBody, InnerTransaction, KeyLinkBody, MosaicAliasBody,
    MosaicDefinitionBody, MosaicRestrictionBody, MosaicSupplyChangeBody,
    MultisigModificationBody, NamespaceRegistrationBody, OperationRestrictionBody,
    TargetedMetadataBody, Transaction, TransactionBody, TransferBody, VotingKeyLinkBody,
    ALIGNMENT_BYTES, INNER_TX_HEADER_SIZE,
};
use crate::registry::TransactionType;

/// Encodes a top-level transaction: the 52-byte common header followed by
/// the type-specific body.
pub fn encode_transaction(tx: &Transaction) -> Result<Vec<u8>, CodecError> {
    let mut w = Writer::new();
    encode_common_header(&tx.header, tx.transaction_type(), &mut w);
    encode_body(&tx.body, &mut w)?;
    Ok(w.into_vec())
}

fn encode_common_header(header: &CommonHeader, tt: TransactionType, w: &mut Writer) {
    w.bytes(header.transaction_hash.as_bytes());
    w.u8(header.version);
    w.u8(header.network_type);
    w.u16(tt.wire_code());
    w.u64(header.max_fee);
    w.u64(header.deadline);
}

fn encode_inner_header(inner: &InnerTransaction, size: u32, w: &mut Writer) {
    w.u32(size);
    w.u32(0); // reserved
    w.bytes(inner.signer_public_key.as_bytes());
    w.u32(0); // reserved
    w.u8(inner.version);
    w.u8(inner.network_type);
    w.u16(inner.transaction_type().wire_code());
}

fn encode_body(body: &TransactionBody, w: &mut Writer) -> Result<(), CodecError> {
    match body {
        TransactionBody::Transfer(b) => encode_transfer(b, w),
        TransactionBody::RegisterNamespace(b) => encode_namespace_registration(b, w),
        TransactionBody::AddressAlias(b) => {
            encode_address_alias(b, w);
            Ok(())
        }
        TransactionBody::MosaicAlias(b) => {
            encode_mosaic_alias(b, w);
            Ok(())
        }
        TransactionBody::MosaicDefinition(b) => {
            encode_mosaic_definition(b, w);
            Ok(())
        }
        TransactionBody::MosaicSupplyChange(b) => {
            encode_mosaic_supply_change(b, w);
            Ok(())
        }
        TransactionBody::ModifyMultisigAccount(b) => encode_multisig_modification(b, w),
        TransactionBody::AggregateComplete(b) | TransactionBody::AggregateBonded(b) => {
            encode_aggregate(b, w)
        }
        TransactionBody::AccountMetadata(b) => encode_account_metadata(b, w),
        TransactionBody::MosaicMetadata(b) | TransactionBody::NamespaceMetadata(b) => {
            encode_targeted_metadata(b, w)
        }
        TransactionBody::AccountAddressRestriction(b) => encode_address_restriction(b, w),
        TransactionBody::AccountMosaicRestriction(b) => encode_mosaic_restriction(b, w),
        TransactionBody::AccountOperationRestriction(b) => encode_operation_restriction(b, w),
        TransactionBody::AccountKeyLink(b)
        | TransactionBody::NodeKeyLink(b)
        | TransactionBody::VrfKeyLink(b) => {
            encode_key_link(b, w);
            Ok(())
        }
        TransactionBody::VotingKeyLink(b) => {
            encode_voting_key_link(b, w);
            Ok(())
        }
        TransactionBody::FundLock(b) => {
            encode_fund_lock(b, w);
            Ok(())
        }
    }
}

fn count_u8(len: usize, field: &'static str) -> Result<u8, CodecError> {
    u8::try_from(len).map_err(|_| CodecError::InvalidFieldEncoding {
        field,
        reason: "more than 255 entries",
    })
}

fn encode_transfer(body: &TransferBody, w: &mut Writer) -> Result<(), CodecError> {
    let message_size = match &body.message {
        Some(message) => {
            let size = message.bytes.len() + 1; // tag byte
            u16::try_from(size).map_err(|_| CodecError::InvalidFieldEncoding {
                field: "message",
                reason: "longer than 65534 bytes",
            })?
        }
        None => 0,
    };
    let mosaic_count = count_u8(body.mosaics.len(), "mosaicList")?;

    w.bytes(body.recipient.as_bytes());
    w.u16(message_size);
    w.u8(mosaic_count);
    w.u32(0); // reserved
    w.u8(0); // reserved
    for mosaic in &body.mosaics {
        w.u64(mosaic.mosaic_id);
        w.u64(mosaic.amount);
    }
    if let Some(message) = &body.message {
        w.u8(message.message_type);
        w.bytes(&message.bytes);
    }
    Ok(())
}

fn encode_mosaic_definition(body: &MosaicDefinitionBody, w: &mut Writer) {
    w.u64(body.mosaic_id);
    w.u64(body.duration);
    w.u32(body.nonce);
    w.u8(body.flags);
    w.u8(body.divisibility);
}

fn encode_mosaic_supply_change(body: &MosaicSupplyChangeBody, w: &mut Writer) {
    w.u64(body.mosaic_id);
    w.u64(body.amount);
    w.u8(body.action);
}

fn encode_multisig_modification(
    body: &MultisigModificationBody,
    w: &mut Writer,
) -> Result<(), CodecError> {
    let additions = count_u8(body.address_additions.len(), "addressAdditions")?;
    let deletions = count_u8(body.address_deletions.len(), "addressDeletions")?;

    w.i8(body.min_removal_delta);
    w.i8(body.min_approval_delta);
    w.u8(additions);
    w.u8(deletions);
    w.u32(0); // reserved
    for address in &body.address_additions {
        w.bytes(address.as_bytes());
    }
    for address in &body.address_deletions {
        w.bytes(address.as_bytes());
    }
    Ok(())
}

fn encode_namespace_registration(
    body: &NamespaceRegistrationBody,
    w: &mut Writer,
) -> Result<(), CodecError> {
    w.u64(body.duration);
    w.u64(body.namespace_id);
    w.u8(body.registration_type);
    w.str8(&body.namespace_name, "namespaceName")
}

fn encode_account_metadata(body: &AccountMetadataBody, w: &mut Writer) -> Result<(), CodecError> {
    let value_len = u16::try_from(body.value.len()).map_err(|_| {
        CodecError::InvalidFieldEncoding {
            field: "value",
            reason: "longer than 65535 bytes",
        }
    })?;
    w.bytes(body.address.as_bytes());
    w.u64(body.metadata_key);
    w.i16(body.value_size_delta);
    w.u16(value_len);
    w.bytes(&body.value);
    Ok(())
}

fn encode_targeted_metadata(body: &TargetedMetadataBody, w: &mut Writer) -> Result<(), CodecError> {
    let value_len = u16::try_from(body.value.len()).map_err(|_| {
        CodecError::InvalidFieldEncoding {
            field: "value",
            reason: "longer than 65535 bytes",
        }
    })?;
    w.bytes(body.address.as_bytes());
    w.u64(body.metadata_key);
    w.u64(body.target_id);
    w.i16(body.value_size_delta);
    w.u16(value_len);
    w.bytes(&body.value);
    Ok(())
}

fn encode_address_alias(body: &AddressAliasBody, w: &mut Writer) {
    w.u64(body.namespace_id);
    w.bytes(body.address.as_bytes());
    w.u8(body.alias_action);
}

fn encode_mosaic_alias(body: &MosaicAliasBody, w: &mut Writer) {
    w.u64(body.namespace_id);
    w.u64(body.mosaic_id);
    w.u8(body.alias_action);
}

fn encode_restriction_header(
    flags: u16,
    additions: usize,
    deletions: usize,
    w: &mut Writer,
) -> Result<(), CodecError> {
    let additions = count_u8(additions, "restrictionAdditions")?;
    let deletions = count_u8(deletions, "restrictionDeletions")?;
    w.u16(flags);
    w.u8(additions);
    w.u8(deletions);
    w.u32(0); // reserved
    Ok(())
}

fn encode_address_restriction(
    body: &AddressRestrictionBody,
    w: &mut Writer,
) -> Result<(), CodecError> {
    encode_restriction_header(
        body.restriction_flags,
        body.additions.len(),
        body.deletions.len(),
        w,
    )?;
    for address in body.additions.iter().chain(&body.deletions) {
        w.bytes(address.as_bytes());
    }
    Ok(())
}

fn encode_mosaic_restriction(
    body: &MosaicRestrictionBody,
    w: &mut Writer,
) -> Result<(), CodecError> {
    encode_restriction_header(
        body.restriction_flags,
        body.additions.len(),
        body.deletions.len(),
        w,
    )?;
    for mosaic_id in body.additions.iter().chain(&body.deletions) {
        w.u64(*mosaic_id);
    }
    Ok(())
}

fn encode_operation_restriction(
    body: &OperationRestrictionBody,
    w: &mut Writer,
) -> Result<(), CodecError> {
    encode_restriction_header(
        body.restriction_flags,
        body.additions.len(),
        body.deletions.len(),
        w,
    )?;
    for operation in body.additions.iter().chain(&body.deletions) {
        w.u16(*operation);
    }
    Ok(())
}

fn encode_key_link(body: &KeyLinkBody, w: &mut Writer) {
    w.bytes(body.linked_public_key.as_bytes());
    w.u8(body.link_action);
}

fn encode_voting_key_link(body: &VotingKeyLinkBody, w: &mut Writer) {
    w.bytes(body.linked_public_key.as_bytes());
    w.u32(body.start_point);
    w.u32(body.end_point);
    w.u8(body.link_action);
}

fn encode_fund_lock(body: &FundLockBody, w: &mut Writer) {
    w.u64(body.mosaic_id);
    w.u64(body.amount);
    w.u64(body.block_duration);
    w.bytes(body.aggregate_bonded_hash.as_bytes());
}

/// Encodes an aggregate body: hash, computed payload size, then each inner
/// transaction as header ‖ body, zero-padded to the 8-byte alignment.
fn encode_aggregate(body: &AggregateBody, w: &mut Writer) -> Result<(), CodecError> {
    let mut payload = Writer::new();
    for inner in &body.transactions {
        if inner.transaction_type().is_aggregate() {
            return Err(CodecError::InvalidFieldEncoding {
                field: "transactions",
                reason: "aggregate transactions cannot nest",
            });
        }

        let mut inner_body = Writer::new();
        encode_body(&inner.body, &mut inner_body)?;
        let inner_body = inner_body.into_vec();

        let size = INNER_TX_HEADER_SIZE + inner_body.len();
        encode_inner_header(inner, size as u32, &mut payload);
        payload.bytes(&inner_body);

        let misalignment = size % ALIGNMENT_BYTES;
        if misalignment != 0 {
            for _ in 0..ALIGNMENT_BYTES - misalignment {
                payload.u8(0);
            }
        }
    }
    let payload = payload.into_vec();

    w.bytes(body.transaction_hash.as_bytes());
    w.u32(payload.len() as u32);
    w.u32(0); // reserved
    w.bytes(&payload);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mosaic, TransferMessage};
    use crate::types::{Address, Hash256, PublicKey};
    use alloc::vec;

    fn header() -> CommonHeader {
        CommonHeader {
            transaction_hash: Hash256([0u8; 32]),
            version: 1,
            network_type: 152,
            max_fee: 2_000_000,
            deadline: 82_616_600,
        }
    }

    #[test]
    fn test_common_header_is_52_bytes() {
        let tx = Transaction {
            header: header(),
            body: TransactionBody::MosaicSupplyChange(MosaicSupplyChangeBody {
                mosaic_id: 0x7CDF3B117A3C40CC,
                amount: 1_000_000,
                action: 1,
            }),
        };
        let bytes = encode_transaction(&tx).unwrap();
        // header + mosaicId(8) + amount(8) + action(1)
        assert_eq!(bytes.len(), 52 + 17);
        // type code at offset 34, little-endian
        assert_eq!(&bytes[34..36], &0x424Du16.to_le_bytes());
    }

    #[test]
    fn test_transfer_without_message_or_mosaics() {
        let tx = Transaction {
            header: header(),
            body: TransactionBody::Transfer(TransferBody {
                recipient: Address([0u8; 24]),
                mosaics: vec![],
                message: None,
            }),
        };
        let bytes = encode_transaction(&tx).unwrap();
        let body = &bytes[52..];
        assert_eq!(body.len(), 32);
        assert_eq!(&body[24..26], &[0u8, 0]); // messageSize
        assert_eq!(body[26], 0); // mosaic count
    }

    #[test]
    fn test_transfer_message_size_counts_tag_byte() {
        let tx = Transaction {
            header: header(),
            body: TransactionBody::Transfer(TransferBody {
                recipient: Address([0u8; 24]),
                mosaics: vec![Mosaic {
                    mosaic_id: 1,
                    amount: 100,
                }],
                message: Some(TransferMessage {
                    message_type: 0,
                    bytes: b"Hello".to_vec(),
                }),
            }),
        };
        let bytes = encode_transaction(&tx).unwrap();
        let body = &bytes[52..];
        assert_eq!(body.len(), 24 + 2 + 1 + 4 + 1 + 16 + 1 + 5);
        assert_eq!(&body[24..26], &6u16.to_le_bytes()); // 1 + len("Hello")
        assert_eq!(&body[48..], b"\x00Hello");
    }

    #[test]
    fn test_aggregate_rejects_nested_aggregate() {
        let nested = InnerTransaction {
            signer_public_key: PublicKey([0u8; 32]),
            version: 1,
            network_type: 152,
            body: TransactionBody::AggregateComplete(AggregateBody {
                transaction_hash: Hash256([0u8; 32]),
                transactions: vec![],
            }),
        };
        let tx = Transaction {
            header: header(),
            body: TransactionBody::AggregateComplete(AggregateBody {
                transaction_hash: Hash256([0u8; 32]),
                transactions: vec![nested],
            }),
        };
        let err = encode_transaction(&tx).unwrap_err();
        assert!(matches!(err, CodecError::InvalidFieldEncoding { .. }));
    }

    #[test]
    fn test_aggregate_padding_and_payload_size() {
        // key link body is 33 bytes: size 81, padded to 88
        let inner = InnerTransaction {
            signer_public_key: PublicKey([7u8; 32]),
            version: 1,
            network_type: 152,
            body: TransactionBody::AccountKeyLink(KeyLinkBody {
                linked_public_key: PublicKey([9u8; 32]),
                link_action: 1,
            }),
        };
        let tx = Transaction {
            header: header(),
            body: TransactionBody::AggregateBonded(AggregateBody {
                transaction_hash: Hash256([1u8; 32]),
                transactions: vec![inner],
            }),
        };
        let bytes = encode_transaction(&tx).unwrap();
        let body = &bytes[52..];
        assert_eq!(&body[32..36], &88u32.to_le_bytes()); // payloadSize
        assert_eq!(body.len(), 32 + 4 + 4 + 88);
        // declared inner size excludes padding
        assert_eq!(&body[40..44], &81u32.to_le_bytes());
        // padding bytes are zero
        assert_eq!(&body[body.len() - 7..], &[0u8; 7]);
    }
}
