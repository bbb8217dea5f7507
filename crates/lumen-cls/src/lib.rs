#![forbid(unsafe_code)]

//! Compiled-file facade: lazy metadata, cached and releasable, with a
//! single-materialization text mirror grafted onto it.
//!
//! The layer is responsible for:
//! - Decoding a compiled file's metadata tree on demand through a releasable
//!   [`StubCache`]; the tree may be evicted under memory pressure and is
//!   transparently rebuilt on the next access.
//! - Materializing a text [`MirrorTree`] exactly once per facade, grafting
//!   each declared class onto its parsed counterpart by ordinal position.
//! - Best-effort resolution from a compiled file back to its original source
//!   file across ordered search roots.
//!
//! Collaborators (byte decoder, source parser, content source, search path)
//! are consumed through narrow traits; this crate defines no file format and
//! no parser of its own.
//!
//! Reload asymmetry: a content-reload notification invalidates the cached
//! metadata tree but never a materialized mirror. Compiled artifacts are
//! immutable in practice, so the mirror remains the authoritative text view
//! for the facade's lifetime; later metadata rebuilds are not re-grafted.

mod cache;
mod content;
mod error;
mod file;
mod mirror;
mod navigate;

pub use crate::cache::{EvictableCache, StubCache};
pub use crate::content::{ContentSource, LocalContent};
pub use crate::error::{ClsError, Result};
pub use crate::file::{ClsContext, ClsFile};
pub use crate::mirror::{
    MirrorClass, MirrorPackage, MirrorTree, ParsedClass, ParsedFile, ParsedPackage, SourceParser,
};
pub use crate::navigate::{
    FsSourceLoader, NavigationTarget, SearchPath, SourceFile, SourceLoader,
};
