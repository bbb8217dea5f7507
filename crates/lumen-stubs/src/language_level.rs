//! Java language level recorded on a compiled file's root stub.

use std::fmt;

/// The effective Java language mode a compiled file was produced for.
///
/// - `major`: the Java feature release number (8, 11, 17, 21, …)
/// - `preview`: whether preview features were enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JavaLanguageLevel {
    pub major: u16,
    pub preview: bool,
}

/// Class-file major version of Java 1.0 (`45`); each feature release adds one.
const CLASS_FILE_MAJOR_BASE: u16 = 44;

impl JavaLanguageLevel {
    pub const JAVA_8: Self = Self {
        major: 8,
        preview: false,
    };
    pub const JAVA_11: Self = Self {
        major: 11,
        preview: false,
    };
    pub const JAVA_17: Self = Self {
        major: 17,
        preview: false,
    };
    pub const JAVA_21: Self = Self {
        major: 21,
        preview: false,
    };

    #[inline]
    pub const fn with_preview(self, preview: bool) -> Self {
        Self { preview, ..self }
    }

    /// Maps a class-file major version (e.g. `52`) to a language level
    /// (e.g. Java 8). Versions below Java 8 are clamped to Java 8, which is
    /// the oldest level the reconstruction layer distinguishes.
    pub fn from_class_file_major(major_version: u16) -> Self {
        let major = major_version.saturating_sub(CLASS_FILE_MAJOR_BASE).max(8);
        Self {
            major,
            preview: false,
        }
    }
}

impl fmt::Display for JavaLanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.preview {
            write!(f, "Java {} (preview)", self.major)
        } else {
            write!(f, "Java {}", self.major)
        }
    }
}
