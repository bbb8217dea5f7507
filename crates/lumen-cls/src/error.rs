use std::path::PathBuf;

use lumen_stubs::DecodeError;
use thiserror::Error;

pub type Result<T, E = ClsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ClsError {
    /// The compiled-file encoding could not be interpreted. Not retried; the
    /// next fresh access attempts a new decode.
    #[error("malformed compiled file: {0}")]
    Malformed(#[from] DecodeError),

    /// Backing content was unreadable or absent when the mirror was built.
    #[error("backing content unavailable for {path}: {source}")]
    MissingContent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decoder and the parser disagree on the declared-class count.
    /// An internal-consistency fault: continuing would corrupt the graft.
    #[error(
        "stub tree declares {stub_classes} classes but the parsed mirror has {mirror_classes}"
    )]
    StructuralMismatch {
        stub_classes: usize,
        mirror_classes: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
