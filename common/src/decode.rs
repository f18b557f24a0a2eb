//! Decoders: wire bytes back to structured transaction values.
//!
//! Each body decoder consumes exactly the bytes its encoder produces. The
//! top-level entry point rejects unconsumed bytes with
//! [`CodecError::TrailingData`]; inside an aggregate payload, every
//! bookkeeping failure (short residue, bad declared size, unconsumed inner
//! body, missing padding) is [`CodecError::CorruptAggregatePayload`].

use alloc::vec::Vec;

use crate::buffer::Reader;
use crate::errors::CodecError;
use crate::model::{
    AccountMetadataBody, AddressAliasBody, AddressRestrictionBody, AggregateBody,
    CommonHeader, FundLockBody, InnerTransaction, KeyLinkBody, Mosaic, MosaicAliasBody,
    MosaicDefinitionBody, MosaicRestrictionBody, MosaicSupplyChangeBody,
    MultisigModificationBody, NamespaceRegistrationBody, OperationRestrictionBody,
    TargetedMetadataBody, Transaction, TransactionBody, TransferBody, TransferMessage,
    VotingKeyLinkBody, ALIGNMENT_BYTES, INNER_TX_HEADER_SIZE,
};
use crate::registry::TransactionType;
use crate::types::{Address, Hash256, PublicKey};

/// Decodes a top-level transaction and requires the buffer to be fully
/// consumed.
pub fn decode_transaction(buf: &[u8]) -> Result<Transaction, CodecError> {
    let mut r = Reader::new(buf);
    let (header, tt) = decode_common_header(&mut r)?;
    let body = decode_body(tt, &mut r)?;
    if !r.is_empty() {
        return Err(CodecError::TrailingData {
            remaining: r.remaining(),
        });
    }
    Ok(Transaction { header, body })
}

fn decode_common_header(r: &mut Reader) -> Result<(CommonHeader, TransactionType), CodecError> {
    let transaction_hash = Hash256(r.array("transactionHash")?);
    let version = r.u8("version")?;
    let network_type = r.u8("networkType")?;
    let tt = TransactionType::from_wire_code(r.u16("transactionType")?)?;
    let max_fee = r.u64("maxFee")?;
    let deadline = r.u64("deadline")?;
    Ok((
        CommonHeader {
            transaction_hash,
            version,
            network_type,
            max_fee,
            deadline,
        },
        tt,
    ))
}

struct InnerHeader {
    size: u32,
    signer_public_key: PublicKey,
    version: u8,
    network_type: u8,
    transaction_type: TransactionType,
}

fn decode_inner_header(r: &mut Reader) -> Result<InnerHeader, CodecError> {
    let size = r.u32("size")?;
    r.u32("reserved")?;
    let signer_public_key = PublicKey(r.array("signerPublicKey")?);
    r.u32("reserved")?;
    let version = r.u8("version")?;
    let network_type = r.u8("networkType")?;
    let transaction_type = TransactionType::from_wire_code(r.u16("transactionType")?)?;
    Ok(InnerHeader {
        size,
        signer_public_key,
        version,
        network_type,
        transaction_type,
    })
}

fn decode_body(tt: TransactionType, r: &mut Reader) -> Result<TransactionBody, CodecError> {
    match tt {
        TransactionType::Transfer => Ok(TransactionBody::Transfer(decode_transfer(r)?)),
        TransactionType::RegisterNamespace => Ok(TransactionBody::RegisterNamespace(
            decode_namespace_registration(r)?,
        )),
        TransactionType::AddressAlias => {
            Ok(TransactionBody::AddressAlias(decode_address_alias(r)?))
        }
        TransactionType::MosaicAlias => Ok(TransactionBody::MosaicAlias(decode_mosaic_alias(r)?)),
        TransactionType::MosaicDefinition => Ok(TransactionBody::MosaicDefinition(
            decode_mosaic_definition(r)?,
        )),
        TransactionType::MosaicSupplyChange => Ok(TransactionBody::MosaicSupplyChange(
            decode_mosaic_supply_change(r)?,
        )),
        TransactionType::ModifyMultisigAccount => Ok(TransactionBody::ModifyMultisigAccount(
            decode_multisig_modification(r)?,
        )),
        TransactionType::AggregateComplete => {
            Ok(TransactionBody::AggregateComplete(decode_aggregate(r)?))
        }
        TransactionType::AggregateBonded => {
            Ok(TransactionBody::AggregateBonded(decode_aggregate(r)?))
        }
        TransactionType::AccountMetadata => Ok(TransactionBody::AccountMetadata(
            decode_account_metadata(r)?,
        )),
        TransactionType::MosaicMetadata => Ok(TransactionBody::MosaicMetadata(
            decode_targeted_metadata(r)?,
        )),
        TransactionType::NamespaceMetadata => Ok(TransactionBody::NamespaceMetadata(
            decode_targeted_metadata(r)?,
        )),
        TransactionType::AccountAddressRestriction => Ok(
            TransactionBody::AccountAddressRestriction(decode_address_restriction(r)?),
        ),
        TransactionType::AccountMosaicRestriction => Ok(
            TransactionBody::AccountMosaicRestriction(decode_mosaic_restriction(r)?),
        ),
        TransactionType::AccountOperationRestriction => Ok(
            TransactionBody::AccountOperationRestriction(decode_operation_restriction(r)?),
        ),
        TransactionType::AccountKeyLink => {
            Ok(TransactionBody::AccountKeyLink(decode_key_link(r)?))
        }
        TransactionType::NodeKeyLink => Ok(TransactionBody::NodeKeyLink(decode_key_link(r)?)),
        TransactionType::VotingKeyLink => {
            Ok(TransactionBody::VotingKeyLink(decode_voting_key_link(r)?))
        }
        TransactionType::VrfKeyLink => Ok(TransactionBody::VrfKeyLink(decode_key_link(r)?)),
        TransactionType::FundLock => Ok(TransactionBody::FundLock(decode_fund_lock(r)?)),
        TransactionType::MosaicAddressRestriction
        | TransactionType::MosaicGlobalRestriction
        | TransactionType::SecretLock
        | TransactionType::SecretProof => Err(CodecError::UnsupportedTransactionType(tt)),
    }
}

fn decode_transfer(r: &mut Reader) -> Result<TransferBody, CodecError> {
    let recipient = Address(r.array("recipient")?);
    let message_size = r.u16("messageSize")?;
    let mosaic_count = r.u8("mosaicsCount")?;
    r.u32("reserved")?;
    r.u8("reserved")?;

    let mut mosaics = Vec::with_capacity(mosaic_count as usize);
    for _ in 0..mosaic_count {
        mosaics.push(Mosaic {
            mosaic_id: r.u64("mosaicId")?,
            amount: r.u64("amount")?,
        });
    }

    let message = if message_size > 0 {
        let message_type = r.u8("messageType")?;
        let bytes = r.take(message_size as usize - 1, "message")?.to_vec();
        Some(TransferMessage {
            message_type,
            bytes,
        })
    } else {
        None
    };

    Ok(TransferBody {
        recipient,
        mosaics,
        message,
    })
}

fn decode_mosaic_definition(r: &mut Reader) -> Result<MosaicDefinitionBody, CodecError> {
    Ok(MosaicDefinitionBody {
        mosaic_id: r.u64("mosaicId")?,
        duration: r.u64("duration")?,
        nonce: r.u32("nonce")?,
        flags: r.u8("flags")?,
        divisibility: r.u8("divisibility")?,
    })
}

fn decode_mosaic_supply_change(r: &mut Reader) -> Result<MosaicSupplyChangeBody, CodecError> {
    Ok(MosaicSupplyChangeBody {
        mosaic_id: r.u64("mosaicId")?,
        amount: r.u64("amount")?,
        action: r.u8("action")?,
    })
}

fn decode_multisig_modification(r: &mut Reader) -> Result<MultisigModificationBody, CodecError> {
    let min_removal_delta = r.i8("minRemovalDelta")?;
    let min_approval_delta = r.i8("minApprovalDelta")?;
    let additions_count = r.u8("addressAdditionsCount")?;
    let deletions_count = r.u8("addressDeletionsCount")?;
    r.u32("reserved")?;

    let mut address_additions = Vec::with_capacity(additions_count as usize);
    for _ in 0..additions_count {
        address_additions.push(Address(r.array("addressAdditions")?));
    }
    let mut address_deletions = Vec::with_capacity(deletions_count as usize);
    for _ in 0..deletions_count {
        address_deletions.push(Address(r.array("addressDeletions")?));
    }

    Ok(MultisigModificationBody {
        min_removal_delta,
        min_approval_delta,
        address_additions,
        address_deletions,
    })
}

fn decode_namespace_registration(r: &mut Reader) -> Result<NamespaceRegistrationBody, CodecError> {
    Ok(NamespaceRegistrationBody {
        duration: r.u64("duration")?,
        namespace_id: r.u64("namespaceId")?,
        registration_type: r.u8("registrationType")?,
        namespace_name: r.str8("namespaceName")?,
    })
}

fn decode_account_metadata(r: &mut Reader) -> Result<AccountMetadataBody, CodecError> {
    let address = Address(r.array("address")?);
    let metadata_key = r.u64("metadataKey")?;
    let value_size_delta = r.i16("valueSizeDelta")?;
    let value_len = r.u16("valueLen")?;
    let value = r.take(value_len as usize, "value")?.to_vec();
    Ok(AccountMetadataBody {
        address,
        metadata_key,
        value_size_delta,
        value,
    })
}

fn decode_targeted_metadata(r: &mut Reader) -> Result<TargetedMetadataBody, CodecError> {
    let address = Address(r.array("address")?);
    let metadata_key = r.u64("metadataKey")?;
    let target_id = r.u64("targetId")?;
    let value_size_delta = r.i16("valueSizeDelta")?;
    let value_len = r.u16("valueLen")?;
    let value = r.take(value_len as usize, "value")?.to_vec();
    Ok(TargetedMetadataBody {
        address,
        metadata_key,
        target_id,
        value_size_delta,
        value,
    })
}

fn decode_address_alias(r: &mut Reader) -> Result<AddressAliasBody, CodecError> {
    Ok(AddressAliasBody {
        namespace_id: r.u64("namespaceId")?,
        address: Address(r.array("address")?),
        alias_action: r.u8("aliasAction")?,
    })
}

fn decode_mosaic_alias(r: &mut Reader) -> Result<MosaicAliasBody, CodecError> {
    Ok(MosaicAliasBody {
        namespace_id: r.u64("namespaceId")?,
        mosaic_id: r.u64("mosaicId")?,
        alias_action: r.u8("aliasAction")?,
    })
}

fn decode_restriction_header(r: &mut Reader) -> Result<(u16, u8, u8), CodecError> {
    let flags = r.u16("restrictionFlags")?;
    let additions_count = r.u8("restrictionAdditionsCount")?;
    let deletions_count = r.u8("restrictionDeletionsCount")?;
    r.u32("reserved")?;
    Ok((flags, additions_count, deletions_count))
}

fn decode_address_restriction(r: &mut Reader) -> Result<AddressRestrictionBody, CodecError> {
    let (restriction_flags, additions_count, deletions_count) = decode_restriction_header(r)?;
    let mut additions = Vec::with_capacity(additions_count as usize);
    for _ in 0..additions_count {
        additions.push(Address(r.array("restrictionAdditions")?));
    }
    let mut deletions = Vec::with_capacity(deletions_count as usize);
    for _ in 0..deletions_count {
        deletions.push(Address(r.array("restrictionDeletions")?));
    }
    Ok(AddressRestrictionBody {
        restriction_flags,
        additions,
        deletions,
    })
}

fn decode_mosaic_restriction(r: &mut Reader) -> Result<MosaicRestrictionBody, CodecError> {
    let (restriction_flags, additions_count, deletions_count) = decode_restriction_header(r)?;
    let mut additions = Vec::with_capacity(additions_count as usize);
    for _ in 0..additions_count {
        additions.push(r.u64("restrictionAdditions")?);
    }
    let mut deletions = Vec::with_capacity(deletions_count as usize);
    for _ in 0..deletions_count {
        deletions.push(r.u64("restrictionDeletions")?);
    }
    Ok(MosaicRestrictionBody {
        restriction_flags,
        additions,
        deletions,
    })
}

fn decode_operation_restriction(r: &mut Reader) -> Result<OperationRestrictionBody, CodecError> {
    let (restriction_flags, additions_count, deletions_count) = decode_restriction_header(r)?;
    let mut additions = Vec::with_capacity(additions_count as usize);
    for _ in 0..additions_count {
        additions.push(r.u16("restrictionAdditions")?);
    }
    let mut deletions = Vec::with_capacity(deletions_count as usize);
    for _ in 0..deletions_count {
        deletions.push(r.u16("restrictionDeletions")?);
    }
    Ok(OperationRestrictionBody {
        restriction_flags,
        additions,
        deletions,
    })
}

fn decode_key_link(r: &mut Reader) -> Result<KeyLinkBody, CodecError> {
    Ok(KeyLinkBody {
        linked_public_key: PublicKey(r.array("linkedPublicKey")?),
        link_action: r.u8("linkAction")?,
    })
}

fn decode_voting_key_link(r: &mut Reader) -> Result<VotingKeyLinkBody, CodecError> {
    Ok(VotingKeyLinkBody {
        linked_public_key: PublicKey(r.array("linkedPublicKey")?),
        start_point: r.u32("startPoint")?,
        end_point: r.u32("endPoint")?,
        link_action: r.u8("linkAction")?,
    })
}

fn decode_fund_lock(r: &mut Reader) -> Result<FundLockBody, CodecError> {
    Ok(FundLockBody {
        mosaic_id: r.u64("mosaicId")?,
        amount: r.u64("amount")?,
        block_duration: r.u64("blockDuration")?,
        aggregate_bonded_hash: Hash256(r.array("aggregateBondedHash")?),
    })
}

fn corrupt(reason: &'static str) -> CodecError {
    CodecError::CorruptAggregatePayload { reason }
}

/// Decodes an aggregate body, walking the padded payload until it is
/// exactly exhausted.
fn decode_aggregate(r: &mut Reader) -> Result<AggregateBody, CodecError> {
    let transaction_hash = Hash256(r.array("transactionHash")?);
    let payload_size = r.u32("payloadSize")?;
    r.u32("reserved")?;
    let payload = r.take(payload_size as usize, "payload")?;

    let mut p = Reader::new(payload);
    let mut transactions = Vec::new();
    while !p.is_empty() {
        if p.remaining() < INNER_TX_HEADER_SIZE {
            return Err(corrupt("residue shorter than an inner header"));
        }
        let header = decode_inner_header(&mut p)?;
        if header.transaction_type.is_aggregate() {
            return Err(corrupt("nested aggregate"));
        }

        let size = header.size as usize;
        if size < INNER_TX_HEADER_SIZE {
            return Err(corrupt("inner size shorter than its header"));
        }
        let body_len = size - INNER_TX_HEADER_SIZE;
        if p.remaining() < body_len {
            return Err(corrupt("inner size past the payload end"));
        }

        let mut body_reader = Reader::new(p.take(body_len, "innerBody")?);
        let body = decode_body(header.transaction_type, &mut body_reader)?;
        if !body_reader.is_empty() {
            return Err(corrupt("inner body not fully consumed"));
        }

        let misalignment = size % ALIGNMENT_BYTES;
        if misalignment != 0 {
            let padding = ALIGNMENT_BYTES - misalignment;
            if p.remaining() < padding {
                return Err(corrupt("missing alignment padding"));
            }
            p.take(padding, "padding")?;
        }

        transactions.push(InnerTransaction {
            signer_public_key: header.signer_public_key,
            version: header.version,
            network_type: header.network_type,
            body,
        });
    }

    Ok(AggregateBody {
        transaction_hash,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_transaction;
    use alloc::vec;
    use hex_literal::hex;

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
    fn test_unknown_type_code_is_fatal() {
        let mut buf = vec![0u8; 52];
        // type code 0xFFFF at offset 34
        buf[34] = 0xFF;
        buf[35] = 0xFF;
        assert_eq!(
            decode_transaction(&buf),
            Err(CodecError::UnknownTypeCode(0xFFFF))
        );
    }

    #[test]
    fn test_registry_entry_without_codec() {
        let mut buf = vec![0u8; 52];
        // SECRET_LOCK, registry-valid but codec-less
        buf[34..36].copy_from_slice(&0x4152u16.to_le_bytes());
        assert_eq!(
            decode_transaction(&buf),
            Err(CodecError::UnsupportedTransactionType(
                TransactionType::SecretLock
            ))
        );
    }

    #[test]
    fn test_trailing_byte_is_fatal() {
        let tx = Transaction {
            header: header(),
            body: TransactionBody::MosaicAlias(MosaicAliasBody {
                namespace_id: 0x82A9D1AC587EC054,
                mosaic_id: 0x7CDF3B117A3C40CC,
                alias_action: 1,
            }),
        };
        let mut bytes = encode_transaction(&tx).unwrap();
        bytes.push(0);
        assert_eq!(
            decode_transaction(&bytes),
            Err(CodecError::TrailingData { remaining: 1 })
        );
    }

    #[test]
    fn test_truncation_is_fatal() {
        let tx = Transaction {
            header: header(),
            body: TransactionBody::FundLock(FundLockBody {
                mosaic_id: 1,
                amount: 10_000_000,
                block_duration: 480,
                aggregate_bonded_hash: Hash256([3u8; 32]),
            }),
        };
        let bytes = encode_transaction(&tx).unwrap();
        let err = decode_transaction(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, CodecError::BufferUnderrun { .. }));
    }

    #[test]
    fn test_transfer_body_layout() {
        // 54-byte transfer body: zero recipient, one mosaic {1, 100},
        // message tag 0x00 followed by "Hello"
        let body = hex!(
            "000000000000000000000000000000000000000000000000" // recipient
            "0600" // messageSize = 1 + 5
            "01"   // mosaic count
            "00000000" "00" // reserved
            "0100000000000000" "6400000000000000" // mosaicId = 1, amount = 100
            "00" "48656c6c6f" // messageType, "Hello"
        );
        assert_eq!(body.len(), 54);

        let mut buf = Vec::new();
        buf.extend_from_slice(&[0u8; 32]); // transactionHash
        buf.push(1); // version
        buf.push(152); // networkType
        buf.extend_from_slice(&0x4154u16.to_le_bytes());
        buf.extend_from_slice(&2_000_000u64.to_le_bytes());
        buf.extend_from_slice(&82_616_600u64.to_le_bytes());
        buf.extend_from_slice(&body);

        let tx = decode_transaction(&buf).unwrap();
        let TransactionBody::Transfer(transfer) = &tx.body else {
            panic!("expected a transfer body");
        };
        assert_eq!(
            transfer.mosaics,
            vec![Mosaic {
                mosaic_id: 1,
                amount: 100,
            }]
        );
        let message = transfer.message.as_ref().unwrap();
        assert_eq!(message.message_type, 0);
        assert_eq!(message.bytes, b"Hello");

        // the exact bytes come back out
        assert_eq!(encode_transaction(&tx).unwrap(), buf);
    }

    #[test]
    fn test_aggregate_payload_size_mismatch() {
        let inner = InnerTransaction {
            signer_public_key: PublicKey([0u8; 32]),
            version: 1,
            network_type: 152,
            body: TransactionBody::MosaicSupplyChange(MosaicSupplyChangeBody {
                mosaic_id: 2,
                amount: 5,
                action: 1,
            }),
        };
        let tx = Transaction {
            header: header(),
            body: TransactionBody::AggregateComplete(AggregateBody {
                transaction_hash: Hash256([0u8; 32]),
                transactions: vec![inner],
            }),
        };
        let mut bytes = encode_transaction(&tx).unwrap();

        // shrink payloadSize so the last inner transaction sticks out of
        // the declared payload
        let payload_size_at = 52 + 32;
        let declared = u32::from_le_bytes(
            bytes[payload_size_at..payload_size_at + 4].try_into().unwrap(),
        );
        bytes[payload_size_at..payload_size_at + 4]
            .copy_from_slice(&(declared - 8).to_le_bytes());
        bytes.truncate(bytes.len() - 8);

        let err = decode_transaction(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::CorruptAggregatePayload { .. }));
    }

    #[test]
    fn test_aggregate_rejects_nested_aggregate_bytes() {
        // hand-build an aggregate whose single inner transaction claims the
        // AGGREGATE_BONDED type
        let mut inner = Vec::new();
        inner.extend_from_slice(&48u32.to_le_bytes()); // size: bare header
        inner.extend_from_slice(&0u32.to_le_bytes());
        inner.extend_from_slice(&[0u8; 32]);
        inner.extend_from_slice(&0u32.to_le_bytes());
        inner.push(1);
        inner.push(152);
        inner.extend_from_slice(&0x4241u16.to_le_bytes());

        let mut body = Vec::new();
        body.extend_from_slice(&[0u8; 32]); // transactionHash
        body.extend_from_slice(&(inner.len() as u32).to_le_bytes());
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(&inner);

        let mut wire = Vec::new();
        wire.extend_from_slice(&[0u8; 32]);
        wire.push(1);
        wire.push(152);
        wire.extend_from_slice(&0x4141u16.to_le_bytes());
        wire.extend_from_slice(&2_000_000u64.to_le_bytes());
        wire.extend_from_slice(&82_616_600u64.to_le_bytes());
        wire.extend_from_slice(&body);

        assert_eq!(
            decode_transaction(&wire),
            Err(CodecError::CorruptAggregatePayload {
                reason: "nested aggregate"
            })
        );
    }

    #[test]
    fn test_aggregate_residue_shorter_than_header() {
        let mut body = Vec::new();
        body.extend_from_slice(&[0u8; 32]); // transactionHash
        body.extend_from_slice(&8u32.to_le_bytes()); // payloadSize
        body.extend_from_slice(&0u32.to_le_bytes()); // reserved
        body.extend_from_slice(&[0u8; 8]); // 8-byte residue, no room for a header

        let mut wire = Vec::new();
        wire.extend_from_slice(&[0u8; 32]);
        wire.push(1);
        wire.push(152);
        wire.extend_from_slice(&0x4141u16.to_le_bytes());
        wire.extend_from_slice(&0u64.to_le_bytes());
        wire.extend_from_slice(&0u64.to_le_bytes());
        wire.extend_from_slice(&body);

        assert_eq!(
            decode_transaction(&wire),
            Err(CodecError::CorruptAggregatePayload {
                reason: "residue shorter than an inner header"
            })
        );
    }
}
