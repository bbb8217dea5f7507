//! Binary decoder boundary.
//!
//! `decode(bytes) -> FileStub` is a pure function of the bytes: no side
//! effects, no retries. Callers that want caching layer it on top.

use thiserror::Error;

use crate::persist::decode_file_stub;
use crate::tree::FileStub;

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// The compiled-file encoding could not be interpreted.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("stub payload is truncated")]
    Truncated,
    #[error("invalid stub format magic")]
    BadMagic,
    #[error("unsupported stub format version: {0}")]
    UnsupportedVersion(u32),
    #[error("malformed stub payload: {0}")]
    Payload(#[from] Box<bincode::ErrorKind>),
}

/// Decodes compiled-file bytes into a metadata tree.
///
/// Implementations must be deterministic and pure; the caching layer relies
/// on rebuild-after-eviction producing a structurally equal tree.
pub trait StubDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<FileStub>;
}

/// Decoder for this crate's own persisted stub encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct PersistedStubDecoder;

impl StubDecoder for PersistedStubDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<FileStub> {
        decode_file_stub(bytes)
    }
}
