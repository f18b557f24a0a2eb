//! JSON transaction descriptions.
//!
//! A description is the human-authored document a transaction is built
//! from: a `common_txn_header` object plus a `fields` object whose shape is
//! selected by the header's `transactionType` name. Addresses, keys, hashes
//! and raw values travel as hex strings here and are validated into typed
//! bytes before the codec ever sees them; the conversion is bidirectional,
//! so decoded wire bytes can be rendered back into the same document shape
//! for verification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use common::decode::decode_transaction;
use common::encode::encode_transaction;
use common::errors::CodecError;
use common::model::{
    AccountMetadataBody, AddressAliasBody, AddressRestrictionBody, AggregateBody, CommonHeader,
    FundLockBody, InnerTransaction, KeyLinkBody, Mosaic, MosaicAliasBody, MosaicDefinitionBody,
    MosaicRestrictionBody, MosaicSupplyChangeBody, MultisigModificationBody,
    NamespaceRegistrationBody, OperationRestrictionBody, TargetedMetadataBody, Transaction,
    TransactionBody, TransferBody, TransferMessage, VotingKeyLinkBody,
};
use common::registry::TransactionType;
use common::types::{Address, Hash256, PublicKey};

use crate::errors::ClientError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionDescription {
    pub common_txn_header: CommonHeaderDescription,
    pub fields: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommonHeaderDescription {
    pub transaction_hash: String,
    pub version: u8,
    pub network_type: u8,
    pub transaction_type: String,
    pub max_fee: u64,
    pub deadline: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InnerTransactionDescription {
    pub inner_tx_header: InnerHeaderDescription,
    pub fields: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InnerHeaderDescription {
    pub signer_public_key: String,
    pub version: u8,
    pub network_type: u8,
    pub transaction_type: String,
}

impl TransactionDescription {
    pub fn from_json(text: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the description into a typed transaction.
    pub fn to_transaction(&self) -> Result<Transaction, ClientError> {
        let header = &self.common_txn_header;
        let tt = TransactionType::from_name(&header.transaction_type)?;
        Ok(Transaction {
            header: CommonHeader {
                transaction_hash: Hash256::from_hex(&header.transaction_hash, "transactionHash")?,
                version: header.version,
                network_type: header.network_type,
                max_fee: header.max_fee,
                deadline: header.deadline,
            },
            body: body_from_fields(tt, &self.fields)?,
        })
    }

    /// Renders a typed transaction back into the document shape.
    pub fn from_transaction(tx: &Transaction) -> Result<Self, ClientError> {
        Ok(TransactionDescription {
            common_txn_header: CommonHeaderDescription {
                transaction_hash: tx.header.transaction_hash.to_hex(),
                version: tx.header.version,
                network_type: tx.header.network_type,
                transaction_type: tx.transaction_type().name().into(),
                max_fee: tx.header.max_fee,
                deadline: tx.header.deadline,
            },
            fields: fields_from_body(&tx.body)?,
        })
    }
}

/// Builds the wire bytes for a description.
pub fn encode_description(description: &TransactionDescription) -> Result<Vec<u8>, ClientError> {
    let tx = description.to_transaction()?;
    Ok(encode_transaction(&tx)?)
}

/// Parses wire bytes back into a description document.
pub fn decode_description(bytes: &[u8]) -> Result<TransactionDescription, ClientError> {
    let tx = decode_transaction(bytes)?;
    TransactionDescription::from_transaction(&tx)
}

// Per-type `fields` shapes. Keys follow the corpus documents, which is why
// a few of them are irregular (`flag`, `mosaicNamespaceId`).

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct MosaicEntry {
    mosaic_id: u64,
    amount: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct TransferFields {
    recipient: String,
    #[serde(default)]
    mosaic_list: Vec<MosaicEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message_type: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct MosaicDefinitionFields {
    mosaic_id: u64,
    duration: u64,
    nonce: u32,
    flag: u8,
    divisibility: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct MosaicSupplyChangeFields {
    mosaic_id: u64,
    amount: u64,
    action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct MultisigModificationFields {
    min_removal_delta: i8,
    min_approval_delta: i8,
    address_additions: Vec<String>,
    address_deletions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct NamespaceRegistrationFields {
    duration: u64,
    namespace_id: u64,
    registration_type: u8,
    namespace_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct AccountMetadataFields {
    address: String,
    metadata_key: u64,
    value_size_delta: i16,
    value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct TargetedMetadataFields {
    address: String,
    metadata_key: u64,
    mosaic_namespace_id: u64,
    value_size_delta: i16,
    value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct AddressAliasFields {
    namespace_id: u64,
    address: String,
    alias_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct MosaicAliasFields {
    namespace_id: u64,
    mosaic_id: u64,
    alias_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct RestrictionFields<T> {
    restriction_flags: u16,
    restriction_additions: Vec<T>,
    restriction_deletions: Vec<T>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct KeyLinkFields {
    linked_public_key: String,
    link_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct VotingKeyLinkFields {
    linked_public_key: String,
    start_point: u32,
    end_point: u32,
    link_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct FundLockFields {
    mosaic_id: u64,
    amount: u64,
    block_duration: u64,
    aggregate_bonded_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct AggregateFields {
    transaction_hash: String,
    transactions: Vec<InnerTransactionDescription>,
}

fn addresses_from_hex(
    values: &[String],
    field: &'static str,
) -> Result<Vec<Address>, ClientError> {
    values
        .iter()
        .map(|value| Ok(Address::from_hex(value, field)?))
        .collect()
}

fn value_from_hex(input: &str, field: &'static str) -> Result<Vec<u8>, ClientError> {
    Ok(hex::decode(input).map_err(|_| CodecError::InvalidFieldEncoding {
        field,
        reason: "not a hex string",
    })?)
}

fn body_from_fields(tt: TransactionType, fields: &Value) -> Result<TransactionBody, ClientError> {
    match tt {
        TransactionType::Transfer => {
            let f: TransferFields = serde_json::from_value(fields.clone())?;
            let message = match f.message {
                Some(message) => {
                    let message_type = f.message_type.ok_or_else(|| {
                        ClientError::InvalidDescription(
                            "messageType is required when message is present".into(),
                        )
                    })?;
                    Some(TransferMessage {
                        message_type,
                        bytes: value_from_hex(&message, "message")?,
                    })
                }
                None => None,
            };
            Ok(TransactionBody::Transfer(TransferBody {
                recipient: Address::from_hex(&f.recipient, "recipient")?,
                mosaics: f
                    .mosaic_list
                    .iter()
                    .map(|m| Mosaic {
                        mosaic_id: m.mosaic_id,
                        amount: m.amount,
                    })
                    .collect(),
                message,
            }))
        }
        TransactionType::RegisterNamespace => {
            let f: NamespaceRegistrationFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::RegisterNamespace(
                NamespaceRegistrationBody {
                    duration: f.duration,
                    namespace_id: f.namespace_id,
                    registration_type: f.registration_type,
                    namespace_name: f.namespace_name,
                },
            ))
        }
        TransactionType::AddressAlias => {
            let f: AddressAliasFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::AddressAlias(AddressAliasBody {
                namespace_id: f.namespace_id,
                address: Address::from_hex(&f.address, "address")?,
                alias_action: f.alias_action,
            }))
        }
        TransactionType::MosaicAlias => {
            let f: MosaicAliasFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::MosaicAlias(MosaicAliasBody {
                namespace_id: f.namespace_id,
                mosaic_id: f.mosaic_id,
                alias_action: f.alias_action,
            }))
        }
        TransactionType::MosaicDefinition => {
            let f: MosaicDefinitionFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::MosaicDefinition(MosaicDefinitionBody {
                mosaic_id: f.mosaic_id,
                duration: f.duration,
                nonce: f.nonce,
                flags: f.flag,
                divisibility: f.divisibility,
            }))
        }
        TransactionType::MosaicSupplyChange => {
            let f: MosaicSupplyChangeFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::MosaicSupplyChange(MosaicSupplyChangeBody {
                mosaic_id: f.mosaic_id,
                amount: f.amount,
                action: f.action,
            }))
        }
        TransactionType::ModifyMultisigAccount => {
            let f: MultisigModificationFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::ModifyMultisigAccount(
                MultisigModificationBody {
                    min_removal_delta: f.min_removal_delta,
                    min_approval_delta: f.min_approval_delta,
                    address_additions: addresses_from_hex(&f.address_additions, "addressAdditions")?,
                    address_deletions: addresses_from_hex(&f.address_deletions, "addressDeletions")?,
                },
            ))
        }
        TransactionType::AggregateComplete | TransactionType::AggregateBonded => {
            let f: AggregateFields = serde_json::from_value(fields.clone())?;
            let mut transactions = Vec::with_capacity(f.transactions.len());
            for inner in &f.transactions {
                let inner_tt = TransactionType::from_name(&inner.inner_tx_header.transaction_type)?;
                transactions.push(InnerTransaction {
                    signer_public_key: PublicKey::from_hex(
                        &inner.inner_tx_header.signer_public_key,
                        "signerPublicKey",
                    )?,
                    version: inner.inner_tx_header.version,
                    network_type: inner.inner_tx_header.network_type,
                    body: body_from_fields(inner_tt, &inner.fields)?,
                });
            }
            let body = AggregateBody {
                transaction_hash: Hash256::from_hex(&f.transaction_hash, "transactionHash")?,
                transactions,
            };
            Ok(match tt {
                TransactionType::AggregateComplete => TransactionBody::AggregateComplete(body),
                _ => TransactionBody::AggregateBonded(body),
            })
        }
        TransactionType::AccountMetadata => {
            let f: AccountMetadataFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::AccountMetadata(AccountMetadataBody {
                address: Address::from_hex(&f.address, "address")?,
                metadata_key: f.metadata_key,
                value_size_delta: f.value_size_delta,
                value: value_from_hex(&f.value, "value")?,
            }))
        }
        TransactionType::MosaicMetadata | TransactionType::NamespaceMetadata => {
            let f: TargetedMetadataFields = serde_json::from_value(fields.clone())?;
            let body = TargetedMetadataBody {
                address: Address::from_hex(&f.address, "address")?,
                metadata_key: f.metadata_key,
                target_id: f.mosaic_namespace_id,
                value_size_delta: f.value_size_delta,
                value: value_from_hex(&f.value, "value")?,
            };
            Ok(match tt {
                TransactionType::MosaicMetadata => TransactionBody::MosaicMetadata(body),
                _ => TransactionBody::NamespaceMetadata(body),
            })
        }
        TransactionType::AccountAddressRestriction => {
            let f: RestrictionFields<String> = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::AccountAddressRestriction(
                AddressRestrictionBody {
                    restriction_flags: f.restriction_flags,
                    additions: addresses_from_hex(&f.restriction_additions, "restrictionAdditions")?,
                    deletions: addresses_from_hex(&f.restriction_deletions, "restrictionDeletions")?,
                },
            ))
        }
        TransactionType::AccountMosaicRestriction => {
            let f: RestrictionFields<u64> = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::AccountMosaicRestriction(
                MosaicRestrictionBody {
                    restriction_flags: f.restriction_flags,
                    additions: f.restriction_additions,
                    deletions: f.restriction_deletions,
                },
            ))
        }
        TransactionType::AccountOperationRestriction => {
            let f: RestrictionFields<u16> = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::AccountOperationRestriction(
                OperationRestrictionBody {
                    restriction_flags: f.restriction_flags,
                    additions: f.restriction_additions,
                    deletions: f.restriction_deletions,
                },
            ))
        }
        TransactionType::AccountKeyLink
        | TransactionType::NodeKeyLink
        | TransactionType::VrfKeyLink => {
            let f: KeyLinkFields = serde_json::from_value(fields.clone())?;
            let body = KeyLinkBody {
                linked_public_key: PublicKey::from_hex(&f.linked_public_key, "linkedPublicKey")?,
                link_action: f.link_action,
            };
            Ok(match tt {
                TransactionType::AccountKeyLink => TransactionBody::AccountKeyLink(body),
                TransactionType::NodeKeyLink => TransactionBody::NodeKeyLink(body),
                _ => TransactionBody::VrfKeyLink(body),
            })
        }
        TransactionType::VotingKeyLink => {
            let f: VotingKeyLinkFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::VotingKeyLink(VotingKeyLinkBody {
                linked_public_key: PublicKey::from_hex(&f.linked_public_key, "linkedPublicKey")?,
                start_point: f.start_point,
                end_point: f.end_point,
                link_action: f.link_action,
            }))
        }
        TransactionType::FundLock => {
            let f: FundLockFields = serde_json::from_value(fields.clone())?;
            Ok(TransactionBody::FundLock(FundLockBody {
                mosaic_id: f.mosaic_id,
                amount: f.amount,
                block_duration: f.block_duration,
                aggregate_bonded_hash: Hash256::from_hex(
                    &f.aggregate_bonded_hash,
                    "aggregateBondedHash",
                )?,
            }))
        }
        TransactionType::MosaicAddressRestriction
        | TransactionType::MosaicGlobalRestriction
        | TransactionType::SecretLock
        | TransactionType::SecretProof => {
            Err(CodecError::UnsupportedTransactionType(tt).into())
        }
    }
}

fn fields_from_body(body: &TransactionBody) -> Result<Value, ClientError> {
    let value = match body {
        TransactionBody::Transfer(b) => serde_json::to_value(TransferFields {
            recipient: b.recipient.to_hex(),
            mosaic_list: b
                .mosaics
                .iter()
                .map(|m| MosaicEntry {
                    mosaic_id: m.mosaic_id,
                    amount: m.amount,
                })
                .collect(),
            message_type: b.message.as_ref().map(|m| m.message_type),
            message: b.message.as_ref().map(|m| hex::encode(&m.bytes)),
        })?,
        TransactionBody::RegisterNamespace(b) => serde_json::to_value(NamespaceRegistrationFields {
            duration: b.duration,
            namespace_id: b.namespace_id,
            registration_type: b.registration_type,
            namespace_name: b.namespace_name.clone(),
        })?,
        TransactionBody::AddressAlias(b) => serde_json::to_value(AddressAliasFields {
            namespace_id: b.namespace_id,
            address: b.address.to_hex(),
            alias_action: b.alias_action,
        })?,
        TransactionBody::MosaicAlias(b) => serde_json::to_value(MosaicAliasFields {
            namespace_id: b.namespace_id,
            mosaic_id: b.mosaic_id,
            alias_action: b.alias_action,
        })?,
        TransactionBody::MosaicDefinition(b) => serde_json::to_value(MosaicDefinitionFields {
            mosaic_id: b.mosaic_id,
            duration: b.duration,
            nonce: b.nonce,
            flag: b.flags,
            divisibility: b.divisibility,
        })?,
        TransactionBody::MosaicSupplyChange(b) => serde_json::to_value(MosaicSupplyChangeFields {
            mosaic_id: b.mosaic_id,
            amount: b.amount,
            action: b.action,
        })?,
        TransactionBody::ModifyMultisigAccount(b) => {
            serde_json::to_value(MultisigModificationFields {
                min_removal_delta: b.min_removal_delta,
                min_approval_delta: b.min_approval_delta,
                address_additions: b.address_additions.iter().map(Address::to_hex).collect(),
                address_deletions: b.address_deletions.iter().map(Address::to_hex).collect(),
            })?
        }
        TransactionBody::AggregateComplete(b) | TransactionBody::AggregateBonded(b) => {
            let mut transactions = Vec::with_capacity(b.transactions.len());
            for inner in &b.transactions {
                transactions.push(InnerTransactionDescription {
                    inner_tx_header: InnerHeaderDescription {
                        signer_public_key: inner.signer_public_key.to_hex(),
                        version: inner.version,
                        network_type: inner.network_type,
                        transaction_type: inner.transaction_type().name().into(),
                    },
                    fields: fields_from_body(&inner.body)?,
                });
            }
            serde_json::to_value(AggregateFields {
                transaction_hash: b.transaction_hash.to_hex(),
                transactions,
            })?
        }
        TransactionBody::AccountMetadata(b) => serde_json::to_value(AccountMetadataFields {
            address: b.address.to_hex(),
            metadata_key: b.metadata_key,
            value_size_delta: b.value_size_delta,
            value: hex::encode(&b.value),
        })?,
        TransactionBody::MosaicMetadata(b) | TransactionBody::NamespaceMetadata(b) => {
            serde_json::to_value(TargetedMetadataFields {
                address: b.address.to_hex(),
                metadata_key: b.metadata_key,
                mosaic_namespace_id: b.target_id,
                value_size_delta: b.value_size_delta,
                value: hex::encode(&b.value),
            })?
        }
        TransactionBody::AccountAddressRestriction(b) => {
            serde_json::to_value(RestrictionFields::<String> {
                restriction_flags: b.restriction_flags,
                restriction_additions: b.additions.iter().map(Address::to_hex).collect(),
                restriction_deletions: b.deletions.iter().map(Address::to_hex).collect(),
            })?
        }
        TransactionBody::AccountMosaicRestriction(b) => {
            serde_json::to_value(RestrictionFields::<u64> {
                restriction_flags: b.restriction_flags,
                restriction_additions: b.additions.clone(),
                restriction_deletions: b.deletions.clone(),
            })?
        }
        TransactionBody::AccountOperationRestriction(b) => {
            serde_json::to_value(RestrictionFields::<u16> {
                restriction_flags: b.restriction_flags,
                restriction_additions: b.additions.clone(),
                restriction_deletions: b.deletions.clone(),
            })?
        }
        TransactionBody::AccountKeyLink(b)
        | TransactionBody::NodeKeyLink(b)
        | TransactionBody::VrfKeyLink(b) => serde_json::to_value(KeyLinkFields {
            linked_public_key: b.linked_public_key.to_hex(),
            link_action: b.link_action,
        })?,
        TransactionBody::VotingKeyLink(b) => serde_json::to_value(VotingKeyLinkFields {
            linked_public_key: b.linked_public_key.to_hex(),
            start_point: b.start_point,
            end_point: b.end_point,
            link_action: b.link_action,
        })?,
        TransactionBody::FundLock(b) => serde_json::to_value(FundLockFields {
            mosaic_id: b.mosaic_id,
            amount: b.amount,
            block_duration: b.block_duration,
            aggregate_bonded_hash: b.aggregate_bonded_hash.to_hex(),
        })?,
    };
    Ok(value)
}
