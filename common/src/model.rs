//! Structured transaction model.
//!
//! A [`Transaction`] is a common header plus one body variant; the
//! transaction type is not stored separately but derived from the active
//! [`TransactionBody`] variant, so a header/body mismatch cannot be
//! represented. Inner transactions carry their own 48-byte header on the
//! wire; its `size` field is computed during encoding and never stored
//! here.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::registry::TransactionType;
use crate::types::{Address, Hash256, PublicKey};

/// Fixed size of the top-level common header.
pub const COMMON_HEADER_SIZE: usize = 52;

/// Fixed size of an inner-transaction header.
pub const INNER_TX_HEADER_SIZE: usize = 48;

/// Inner transactions are zero-padded to this alignment inside an
/// aggregate payload.
pub const ALIGNMENT_BYTES: usize = 8;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommonHeader {
    pub transaction_hash: Hash256,
    pub version: u8,
    pub network_type: u8,
    pub max_fee: u64,
    pub deadline: u64,
}

/// A top-level transaction submitted for signing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub header: CommonHeader,
    pub body: TransactionBody,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }
}

/// A transaction embedded in an aggregate payload.
///
/// The body may be any variant except the two aggregate containers;
/// the codec rejects nesting on both encode and decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InnerTransaction {
    pub signer_public_key: PublicKey,
    pub version: u8,
    pub network_type: u8,
    pub body: TransactionBody,
}

impl InnerTransaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mosaic {
    pub mosaic_id: u64,
    pub amount: u64,
}

/// An optional transfer message: a 1-byte type tag plus raw bytes.
///
/// On the wire `messageSize` counts the tag byte, so it is
/// `1 + bytes.len()` when a message is present and 0 otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransferMessage {
    pub message_type: u8,
    pub bytes: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransferBody {
    pub recipient: Address,
    pub mosaics: Vec<Mosaic>,
    pub message: Option<TransferMessage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicDefinitionBody {
    pub mosaic_id: u64,
    pub duration: u64,
    pub nonce: u32,
    pub flags: u8,
    pub divisibility: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicSupplyChangeBody {
    pub mosaic_id: u64,
    pub amount: u64,
    pub action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MultisigModificationBody {
    pub min_removal_delta: i8,
    pub min_approval_delta: i8,
    pub address_additions: Vec<Address>,
    pub address_deletions: Vec<Address>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRegistrationBody {
    pub duration: u64,
    pub namespace_id: u64,
    pub registration_type: u8,
    pub namespace_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountMetadataBody {
    pub address: Address,
    pub metadata_key: u64,
    pub value_size_delta: i16,
    pub value: Vec<u8>,
}

/// Shared shape of mosaic and namespace metadata; `target_id` is the
/// mosaic or namespace being annotated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TargetedMetadataBody {
    pub address: Address,
    pub metadata_key: u64,
    pub target_id: u64,
    pub value_size_delta: i16,
    pub value: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressAliasBody {
    pub namespace_id: u64,
    pub address: Address,
    pub alias_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicAliasBody {
    pub namespace_id: u64,
    pub mosaic_id: u64,
    pub alias_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AddressRestrictionBody {
    pub restriction_flags: u16,
    pub additions: Vec<Address>,
    pub deletions: Vec<Address>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MosaicRestrictionBody {
    pub restriction_flags: u16,
    pub additions: Vec<u64>,
    pub deletions: Vec<u64>,
}

/// Operation restrictions list raw transaction-type wire codes; they are
/// not resolved through the registry so arbitrary codes round-trip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OperationRestrictionBody {
    pub restriction_flags: u16,
    pub additions: Vec<u16>,
    pub deletions: Vec<u16>,
}

/// Shared shape of the account, node and VRF key links.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLinkBody {
    pub linked_public_key: PublicKey,
    pub link_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingKeyLinkBody {
    pub linked_public_key: PublicKey,
    pub start_point: u32,
    pub end_point: u32,
    pub link_action: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundLockBody {
    pub mosaic_id: u64,
    pub amount: u64,
    pub block_duration: u64,
    pub aggregate_bonded_hash: Hash256,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AggregateBody {
    pub transaction_hash: Hash256,
    pub transactions: Vec<InnerTransaction>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    Transfer(TransferBody),
    RegisterNamespace(NamespaceRegistrationBody),
    AddressAlias(AddressAliasBody),
    MosaicAlias(MosaicAliasBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    ModifyMultisigAccount(MultisigModificationBody),
    AggregateComplete(AggregateBody),
    AggregateBonded(AggregateBody),
    AccountMetadata(AccountMetadataBody),
    MosaicMetadata(TargetedMetadataBody),
    NamespaceMetadata(TargetedMetadataBody),
    AccountAddressRestriction(AddressRestrictionBody),
    AccountMosaicRestriction(MosaicRestrictionBody),
    AccountOperationRestriction(OperationRestrictionBody),
    AccountKeyLink(KeyLinkBody),
    NodeKeyLink(KeyLinkBody),
    VotingKeyLink(VotingKeyLinkBody),
    VrfKeyLink(KeyLinkBody),
    FundLock(FundLockBody),
}

impl TransactionBody {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionBody::Transfer(_) => TransactionType::Transfer,
            TransactionBody::RegisterNamespace(_) => TransactionType::RegisterNamespace,
            TransactionBody::AddressAlias(_) => TransactionType::AddressAlias,
            TransactionBody::MosaicAlias(_) => TransactionType::MosaicAlias,
            TransactionBody::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            TransactionBody::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            TransactionBody::ModifyMultisigAccount(_) => TransactionType::ModifyMultisigAccount,
            TransactionBody::AggregateComplete(_) => TransactionType::AggregateComplete,
            TransactionBody::AggregateBonded(_) => TransactionType::AggregateBonded,
            TransactionBody::AccountMetadata(_) => TransactionType::AccountMetadata,
            TransactionBody::MosaicMetadata(_) => TransactionType::MosaicMetadata,
            TransactionBody::NamespaceMetadata(_) => TransactionType::NamespaceMetadata,
            TransactionBody::AccountAddressRestriction(_) => {
                TransactionType::AccountAddressRestriction
            }
            TransactionBody::AccountMosaicRestriction(_) => {
                TransactionType::AccountMosaicRestriction
            }
            TransactionBody::AccountOperationRestriction(_) => {
                TransactionType::AccountOperationRestriction
            }
            TransactionBody::AccountKeyLink(_) => TransactionType::AccountKeyLink,
            TransactionBody::NodeKeyLink(_) => TransactionType::NodeKeyLink,
            TransactionBody::VotingKeyLink(_) => TransactionType::VotingKeyLink,
            TransactionBody::VrfKeyLink(_) => TransactionType::VrfKeyLink,
            TransactionBody::FundLock(_) => TransactionType::FundLock,
        }
    }
}
