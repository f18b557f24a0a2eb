//! Error type for the transaction codec.
//!
//! Every error is fatal to the encode or decode call that raised it. The
//! codec never substitutes defaults for malformed input: the byte layout it
//! produces or accepts is what the signing device shows the user.

use alloc::string::String;
use core::fmt;

use crate::registry::TransactionType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A transaction-type name that is not in the registry.
    UnknownTypeName(String),
    /// A 2-byte wire code that is not in the registry.
    UnknownTypeCode(u16),
    /// Dispatch reached a registry entry that has no body codec.
    UnsupportedTransactionType(TransactionType),
    /// A read past the end of the input buffer.
    BufferUnderrun {
        field: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// Unconsumed bytes after a top-level decode.
    TrailingData { remaining: usize },
    /// Aggregate payload length or padding bookkeeping did not reconcile.
    CorruptAggregatePayload { reason: &'static str },
    /// A field failed a local precondition.
    InvalidFieldEncoding {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnknownTypeName(name) => {
                write!(f, "unknown transaction type name {:?}", name)
            }
            CodecError::UnknownTypeCode(code) => {
                write!(f, "unknown transaction type code {:#06x}", code)
            }
            CodecError::UnsupportedTransactionType(tt) => {
                write!(f, "no codec for transaction type {}", tt.name())
            }
            CodecError::BufferUnderrun {
                field,
                offset,
                needed,
                remaining,
            } => write!(
                f,
                "buffer underrun reading {} at offset {}: need {} bytes, {} remain",
                field, offset, needed, remaining
            ),
            CodecError::TrailingData { remaining } => {
                write!(f, "{} trailing bytes after transaction", remaining)
            }
            CodecError::CorruptAggregatePayload { reason } => {
                write!(f, "corrupt aggregate payload: {}", reason)
            }
            CodecError::InvalidFieldEncoding { field, reason } => {
                write!(f, "invalid encoding for {}: {}", field, reason)
            }
        }
    }
}
