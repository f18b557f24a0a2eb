pub mod description;
pub mod errors;

pub use description::{
    decode_description, encode_description, CommonHeaderDescription, InnerHeaderDescription,
    InnerTransactionDescription, TransactionDescription,
};
pub use errors::ClientError;
