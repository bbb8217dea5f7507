use std::sync::Arc;

use crate::language_level::JavaLanguageLevel;

/// Root of a metadata tree decoded from one compiled file.
///
/// The tree is never mutated after construction. Re-decoding the same bytes
/// produces a new, structurally equal tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStub {
    pub language_level: JavaLanguageLevel,
    /// Dotted package name; `None` for the default package.
    pub package: Option<String>,
    /// Top-level declared classes, in declaration order.
    pub classes: Vec<Arc<ClassStub>>,
}

impl FileStub {
    /// Dotted package name, `""` for the default package.
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "@interface",
        }
    }
}

/// One declared class (top-level or nested).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStub {
    pub kind: ClassKind,
    pub name: String,
    pub access_flags: u16,
    /// Value of the compiled `SourceFile` attribute, when recorded.
    pub source_file: Option<String>,
    pub members: Vec<MemberStub>,
    /// Nested classes, in declaration order.
    pub classes: Vec<Arc<ClassStub>>,
}

impl ClassStub {
    /// The original source file name for this class: the recorded `SourceFile`
    /// attribute, defaulting to `<name>.java`.
    pub fn source_file_name(&self) -> String {
        match &self.source_file {
            Some(name) => name.clone(),
            None => format!("{}.java", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberStub {
    Field {
        access_flags: u16,
        name: String,
        /// Source-level type text, e.g. `int` or `java.util.List<String>`.
        type_text: String,
    },
    Method {
        access_flags: u16,
        name: String,
        return_type: String,
        /// Source-level parameter type texts, in order.
        params: Vec<String>,
    },
}

impl MemberStub {
    pub fn name(&self) -> &str {
        match self {
            MemberStub::Field { name, .. } | MemberStub::Method { name, .. } => name,
        }
    }
}
