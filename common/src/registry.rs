//! Transaction-type registry.
//!
//! A single per-variant table maps registry names to 2-byte wire codes, so
//! the two lookup directions cannot drift apart. Four entries
//! (mosaic-scoped restrictions and the secret lock/proof pair) are valid
//! wire codes without a body codec; dispatching on one of them fails with
//! [`CodecError::UnsupportedTransactionType`] instead of being skipped.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CodecError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Transfer,
    RegisterNamespace,
    AddressAlias,
    MosaicAlias,
    MosaicDefinition,
    MosaicSupplyChange,
    ModifyMultisigAccount,
    AggregateComplete,
    AggregateBonded,
    AccountMetadata,
    MosaicMetadata,
    NamespaceMetadata,
    AccountAddressRestriction,
    AccountMosaicRestriction,
    AccountOperationRestriction,
    MosaicAddressRestriction,
    MosaicGlobalRestriction,
    AccountKeyLink,
    NodeKeyLink,
    VotingKeyLink,
    VrfKeyLink,
    FundLock,
    SecretLock,
    SecretProof,
}

impl TransactionType {
    pub const ALL: [TransactionType; 24] = [
        TransactionType::Transfer,
        TransactionType::RegisterNamespace,
        TransactionType::AddressAlias,
        TransactionType::MosaicAlias,
        TransactionType::MosaicDefinition,
        TransactionType::MosaicSupplyChange,
        TransactionType::ModifyMultisigAccount,
        TransactionType::AggregateComplete,
        TransactionType::AggregateBonded,
        TransactionType::AccountMetadata,
        TransactionType::MosaicMetadata,
        TransactionType::NamespaceMetadata,
        TransactionType::AccountAddressRestriction,
        TransactionType::AccountMosaicRestriction,
        TransactionType::AccountOperationRestriction,
        TransactionType::MosaicAddressRestriction,
        TransactionType::MosaicGlobalRestriction,
        TransactionType::AccountKeyLink,
        TransactionType::NodeKeyLink,
        TransactionType::VotingKeyLink,
        TransactionType::VrfKeyLink,
        TransactionType::FundLock,
        TransactionType::SecretLock,
        TransactionType::SecretProof,
    ];

    pub fn wire_code(self) -> u16 {
        match self {
            TransactionType::Transfer => 0x4154,
            TransactionType::RegisterNamespace => 0x414E,
            TransactionType::AddressAlias => 0x424E,
            TransactionType::MosaicAlias => 0x434E,
            TransactionType::MosaicDefinition => 0x414D,
            TransactionType::MosaicSupplyChange => 0x424D,
            TransactionType::ModifyMultisigAccount => 0x4155,
            TransactionType::AggregateComplete => 0x4141,
            TransactionType::AggregateBonded => 0x4241,
            TransactionType::AccountMetadata => 0x4144,
            TransactionType::MosaicMetadata => 0x4244,
            TransactionType::NamespaceMetadata => 0x4344,
            TransactionType::AccountAddressRestriction => 0x4150,
            TransactionType::AccountMosaicRestriction => 0x4250,
            TransactionType::AccountOperationRestriction => 0x4350,
            TransactionType::MosaicAddressRestriction => 0x4251,
            TransactionType::MosaicGlobalRestriction => 0x4151,
            TransactionType::AccountKeyLink => 0x414C,
            TransactionType::NodeKeyLink => 0x424C,
            TransactionType::VotingKeyLink => 0x4143,
            TransactionType::VrfKeyLink => 0x4243,
            TransactionType::FundLock => 0x4148,
            TransactionType::SecretLock => 0x4152,
            TransactionType::SecretProof => 0x4252,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransactionType::Transfer => "TRANSFER",
            TransactionType::RegisterNamespace => "REGISTER_NAMESPACE",
            TransactionType::AddressAlias => "ADDRESS_ALIAS",
            TransactionType::MosaicAlias => "MOSAIC_ALIAS",
            TransactionType::MosaicDefinition => "MOSAIC_DEFINITION",
            TransactionType::MosaicSupplyChange => "MOSAIC_SUPPLY_CHANGE",
            TransactionType::ModifyMultisigAccount => "MODIFY_MULTISIG_ACCOUNT",
            TransactionType::AggregateComplete => "AGGREGATE_COMPLETE",
            TransactionType::AggregateBonded => "AGGREGATE_BONDED",
            TransactionType::AccountMetadata => "ACCOUNT_METADATA",
            TransactionType::MosaicMetadata => "MOSAIC_METADATA",
            TransactionType::NamespaceMetadata => "NAMESPACE_METADATA",
            TransactionType::AccountAddressRestriction => "ACCOUNT_ADDRESS_RESTRICTION",
            TransactionType::AccountMosaicRestriction => "ACCOUNT_MOSAIC_RESTRICTION",
            TransactionType::AccountOperationRestriction => "ACCOUNT_OPERATION_RESTRICTION",
            TransactionType::MosaicAddressRestriction => "MOSAIC_ADDRESS_RESTRICTION",
            TransactionType::MosaicGlobalRestriction => "MOSAIC_GLOBAL_RESTRICTION",
            TransactionType::AccountKeyLink => "ACCOUNT_KEY_LINK",
            TransactionType::NodeKeyLink => "NODE_KEY_LINK",
            TransactionType::VotingKeyLink => "VOTING_KEY_LINK",
            TransactionType::VrfKeyLink => "VRF_KEY_LINK",
            TransactionType::FundLock => "FUND_LOCK",
            TransactionType::SecretLock => "SECRET_LOCK",
            TransactionType::SecretProof => "SECRET_PROOF",
        }
    }

    pub fn from_wire_code(code: u16) -> Result<Self, CodecError> {
        Self::ALL
            .iter()
            .copied()
            .find(|tt| tt.wire_code() == code)
            .ok_or(CodecError::UnknownTypeCode(code))
    }

    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        Self::ALL
            .iter()
            .copied()
            .find(|tt| tt.name() == name)
            .ok_or_else(|| CodecError::UnknownTypeName(name.into()))
    }

    /// True for the two aggregate container types.
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            TransactionType::AggregateComplete | TransactionType::AggregateBonded
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
