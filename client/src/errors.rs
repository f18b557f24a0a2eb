//! Client-side error type.

use common::errors::CodecError;

#[derive(Debug)]
pub enum ClientError {
    /// The codec rejected the transaction or its wire bytes.
    Codec(CodecError),
    /// The description document is not valid JSON for its shape.
    Json(serde_json::Error),
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// The description is well-formed JSON but inconsistent.
    InvalidDescription(String),
}

impl From<CodecError> for ClientError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Codec(e) => write!(f, "codec error: {}", e),
            ClientError::Json(e) => write!(f, "description error: {}", e),
            ClientError::Io(e) => write!(f, "io error: {}", e),
            ClientError::InvalidDescription(e) => write!(f, "invalid description: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Json(e) => Some(e),
            ClientError::Io(e) => Some(e),
            ClientError::Codec(_) | ClientError::InvalidDescription(_) => None,
        }
    }
}
