//! Persisted binary encoding of stub trees.
//!
//! Layout: 4-byte magic, little-endian `u32` format version, then a
//! `bincode` payload. The persisted shape is kept separate from the runtime
//! tree so the runtime types can evolve (and hold `Arc` children) without
//! breaking stored archives.
//!
//! Version history:
//! - 1: initial format.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::decode::{DecodeError, Result};
use crate::language_level::JavaLanguageLevel;
use crate::tree::{ClassKind, ClassStub, FileStub, MemberStub};

const STUB_FORMAT_MAGIC: [u8; 4] = *b"LMST";
pub const STUB_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedFile {
    language_major: u16,
    language_preview: bool,
    package: Option<String>,
    classes: Vec<PersistedClass>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedClass {
    kind: PersistedClassKind,
    name: String,
    access_flags: u16,
    source_file: Option<String>,
    members: Vec<PersistedMember>,
    classes: Vec<PersistedClass>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum PersistedClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum PersistedMember {
    Field {
        access_flags: u16,
        name: String,
        type_text: String,
    },
    Method {
        access_flags: u16,
        name: String,
        return_type: String,
        params: Vec<String>,
    },
}

/// Encodes a stub tree into its persisted binary form.
pub fn encode_file_stub(stub: &FileStub) -> Result<Vec<u8>> {
    let persisted = PersistedFile::from_stub(stub);
    let payload = bincode::serialize(&persisted)?;
    let mut out = Vec::with_capacity(8 + payload.len());
    out.extend_from_slice(&STUB_FORMAT_MAGIC);
    out.extend_from_slice(&STUB_FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decodes a persisted stub tree. Pure and deterministic: equal bytes yield
/// structurally equal trees.
pub fn decode_file_stub(bytes: &[u8]) -> Result<FileStub> {
    if bytes.len() < 8 {
        return Err(DecodeError::Truncated);
    }
    if bytes[..4] != STUB_FORMAT_MAGIC {
        return Err(DecodeError::BadMagic);
    }
    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != STUB_FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }
    let persisted: PersistedFile = bincode::deserialize(&bytes[8..])?;
    Ok(persisted.into_stub())
}

impl PersistedFile {
    fn from_stub(stub: &FileStub) -> Self {
        Self {
            language_major: stub.language_level.major,
            language_preview: stub.language_level.preview,
            package: stub.package.clone(),
            classes: stub
                .classes
                .iter()
                .map(|class| PersistedClass::from_stub(class))
                .collect(),
        }
    }

    fn into_stub(self) -> FileStub {
        FileStub {
            language_level: JavaLanguageLevel {
                major: self.language_major,
                preview: self.language_preview,
            },
            package: self.package,
            classes: self
                .classes
                .into_iter()
                .map(|class| Arc::new(class.into_stub()))
                .collect(),
        }
    }
}

impl PersistedClass {
    fn from_stub(stub: &ClassStub) -> Self {
        Self {
            kind: match stub.kind {
                ClassKind::Class => PersistedClassKind::Class,
                ClassKind::Interface => PersistedClassKind::Interface,
                ClassKind::Enum => PersistedClassKind::Enum,
                ClassKind::Annotation => PersistedClassKind::Annotation,
            },
            name: stub.name.clone(),
            access_flags: stub.access_flags,
            source_file: stub.source_file.clone(),
            members: stub.members.iter().map(PersistedMember::from_stub).collect(),
            classes: stub
                .classes
                .iter()
                .map(|nested| PersistedClass::from_stub(nested))
                .collect(),
        }
    }

    fn into_stub(self) -> ClassStub {
        ClassStub {
            kind: match self.kind {
                PersistedClassKind::Class => ClassKind::Class,
                PersistedClassKind::Interface => ClassKind::Interface,
                PersistedClassKind::Enum => ClassKind::Enum,
                PersistedClassKind::Annotation => ClassKind::Annotation,
            },
            name: self.name,
            access_flags: self.access_flags,
            source_file: self.source_file,
            members: self.members.into_iter().map(PersistedMember::into_stub).collect(),
            classes: self
                .classes
                .into_iter()
                .map(|nested| Arc::new(nested.into_stub()))
                .collect(),
        }
    }
}

impl PersistedMember {
    fn from_stub(member: &MemberStub) -> Self {
        match member {
            MemberStub::Field {
                access_flags,
                name,
                type_text,
            } => PersistedMember::Field {
                access_flags: *access_flags,
                name: name.clone(),
                type_text: type_text.clone(),
            },
            MemberStub::Method {
                access_flags,
                name,
                return_type,
                params,
            } => PersistedMember::Method {
                access_flags: *access_flags,
                name: name.clone(),
                return_type: return_type.clone(),
                params: params.clone(),
            },
        }
    }

    fn into_stub(self) -> MemberStub {
        match self {
            PersistedMember::Field {
                access_flags,
                name,
                type_text,
            } => MemberStub::Field {
                access_flags,
                name,
                type_text,
            },
            PersistedMember::Method {
                access_flags,
                name,
                return_type,
                params,
            } => MemberStub::Method {
                access_flags,
                name,
                return_type,
                params,
            },
        }
    }
}
