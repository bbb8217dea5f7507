#![forbid(unsafe_code)]

//! Metadata tree model for compiled Java class files.
//!
//! A [`FileStub`] is the structural representation of one compiled file: its
//! language level, package, and declared classes in declaration order. Stub
//! trees are immutable after construction and deterministic to rebuild from
//! their persisted binary encoding, so higher layers are free to drop and
//! re-decode them at will.
//!
//! Caching, the text mirror, and navigation live in `lumen-cls`; this crate
//! is data model plus codec only.

mod decode;
mod language_level;
mod persist;
mod text;
mod tree;

pub use crate::decode::{DecodeError, PersistedStubDecoder, Result, StubDecoder};
pub use crate::language_level::JavaLanguageLevel;
pub use crate::persist::{decode_file_stub, encode_file_stub, STUB_FORMAT_VERSION};
pub use crate::text::is_java_identifier;
pub use crate::tree::{ClassKind, ClassStub, FileStub, MemberStub};
