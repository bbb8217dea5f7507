//! Textual reconstruction of stub trees.
//!
//! Every stub variant can render itself as source-like text. The file-level
//! rendering is the mirror initialization string: a header comment, the
//! package clause when one exists, and the first top-level declaration.
//! Compiled files carry exactly one top-level class in the common case;
//! synthetic entities (e.g. `package-info`) render as header + package only
//! as far as the text parser is concerned, and the graft layer tolerates
//! them.

use crate::tree::{ClassKind, ClassStub, FileStub, MemberStub};

/// Header comment prepended to every reconstructed file.
pub(crate) const DECOMPILED_HEADER: &str =
    "// Stub source reconstructed from a compiled class file\n// Method bodies are not available\n";

const INDENT: &str = "    ";

const ACC_PUBLIC: u16 = 0x0001;
const ACC_PRIVATE: u16 = 0x0002;
const ACC_PROTECTED: u16 = 0x0004;
const ACC_STATIC: u16 = 0x0008;
const ACC_FINAL: u16 = 0x0010;
const ACC_ABSTRACT: u16 = 0x0400;

impl FileStub {
    /// Renders the mirror initialization string for this file.
    pub fn reconstruct_text(&self) -> String {
        let mut out = String::new();
        out.push_str(DECOMPILED_HEADER);
        out.push('\n');
        if let Some(package) = &self.package {
            out.push_str("package ");
            out.push_str(package);
            out.push_str(";\n\n");
        }
        if let Some(class) = self.classes.first() {
            class.reconstruct_text(0, &mut out);
        }
        out
    }
}

impl ClassStub {
    /// Appends this class declaration (members and nested classes included)
    /// at the given indent level.
    pub fn reconstruct_text(&self, indent: usize, out: &mut String) {
        push_indent(indent, out);
        push_modifiers(self.access_flags, self.kind, out);
        out.push_str(self.kind.keyword());
        out.push(' ');
        out.push_str(&self.name);
        out.push_str(" {\n");
        for member in &self.members {
            member.reconstruct_text(indent + 1, out);
        }
        for nested in &self.classes {
            nested.reconstruct_text(indent + 1, out);
        }
        push_indent(indent, out);
        out.push_str("}\n");
    }
}

impl MemberStub {
    pub fn reconstruct_text(&self, indent: usize, out: &mut String) {
        push_indent(indent, out);
        match self {
            MemberStub::Field {
                access_flags,
                name,
                type_text,
            } => {
                push_member_modifiers(*access_flags, out);
                out.push_str(type_text);
                out.push(' ');
                out.push_str(name);
                out.push_str(";\n");
            }
            MemberStub::Method {
                access_flags,
                name,
                return_type,
                params,
            } => {
                push_member_modifiers(*access_flags, out);
                if !return_type.is_empty() {
                    out.push_str(return_type);
                    out.push(' ');
                }
                out.push_str(name);
                out.push('(');
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(param);
                }
                out.push_str(");\n");
            }
        }
    }
}

fn push_indent(indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
}

fn push_modifiers(access_flags: u16, kind: ClassKind, out: &mut String) {
    push_visibility(access_flags, out);
    if access_flags & ACC_STATIC != 0 {
        out.push_str("static ");
    }
    if access_flags & ACC_FINAL != 0 {
        out.push_str("final ");
    }
    // `abstract` is implied for interfaces and annotations.
    if access_flags & ACC_ABSTRACT != 0 && matches!(kind, ClassKind::Class | ClassKind::Enum) {
        out.push_str("abstract ");
    }
}

fn push_member_modifiers(access_flags: u16, out: &mut String) {
    push_visibility(access_flags, out);
    if access_flags & ACC_STATIC != 0 {
        out.push_str("static ");
    }
    if access_flags & ACC_FINAL != 0 {
        out.push_str("final ");
    }
    if access_flags & ACC_ABSTRACT != 0 {
        out.push_str("abstract ");
    }
}

fn push_visibility(access_flags: u16, out: &mut String) {
    if access_flags & ACC_PUBLIC != 0 {
        out.push_str("public ");
    } else if access_flags & ACC_PROTECTED != 0 {
        out.push_str("protected ");
    } else if access_flags & ACC_PRIVATE != 0 {
        out.push_str("private ");
    }
}

/// Whether `s` is a plain Java identifier.
///
/// Compiled entities can carry names that are not (e.g. `package-info`, or
/// classes produced by compilers with different naming schemes); such names
/// never parse as a class declaration.
pub fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !is_ident_start(first) {
        return false;
    }
    chars.all(is_ident_continue)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JavaLanguageLevel;
    use std::sync::Arc;

    fn class(name: &str) -> ClassStub {
        ClassStub {
            kind: ClassKind::Class,
            name: name.to_string(),
            access_flags: ACC_PUBLIC,
            source_file: None,
            members: Vec::new(),
            classes: Vec::new(),
        }
    }

    #[test]
    fn renders_single_class_without_package() {
        let file = FileStub {
            language_level: JavaLanguageLevel::JAVA_17,
            package: None,
            classes: vec![Arc::new(class("Foo"))],
        };
        let text = file.reconstruct_text();
        assert!(text.starts_with(DECOMPILED_HEADER));
        assert!(!text.contains("package "));
        assert!(text.contains("public class Foo {"));
    }

    #[test]
    fn package_clause_precedes_class_text() {
        let file = FileStub {
            language_level: JavaLanguageLevel::JAVA_17,
            package: Some("com.acme".to_string()),
            classes: vec![Arc::new(class("Foo"))],
        };
        let text = file.reconstruct_text();
        let package_at = text.find("package com.acme;").expect("package clause");
        let class_at = text.find("class Foo").expect("class declaration");
        assert!(package_at < class_at);
    }

    #[test]
    fn renders_members_and_nested_classes() {
        let mut outer = class("Outer");
        outer.members.push(MemberStub::Field {
            access_flags: ACC_PRIVATE | ACC_FINAL,
            name: "count".to_string(),
            type_text: "int".to_string(),
        });
        outer.members.push(MemberStub::Method {
            access_flags: ACC_PUBLIC,
            name: "count".to_string(),
            return_type: "int".to_string(),
            params: vec![],
        });
        outer.members.push(MemberStub::Method {
            access_flags: ACC_PUBLIC | ACC_STATIC,
            name: "of".to_string(),
            return_type: "Outer".to_string(),
            params: vec!["int".to_string(), "java.lang.String".to_string()],
        });
        outer.classes.push(Arc::new(class("Inner")));

        let mut out = String::new();
        outer.reconstruct_text(0, &mut out);
        assert!(out.contains("    private final int count;\n"));
        assert!(out.contains("    public int count();\n"));
        assert!(out.contains("    public static Outer of(int, java.lang.String);\n"));
        assert!(out.contains("    public class Inner {\n"));
    }

    #[test]
    fn interface_omits_abstract() {
        let mut iface = class("Api");
        iface.kind = ClassKind::Interface;
        iface.access_flags = ACC_PUBLIC | ACC_ABSTRACT;
        let mut out = String::new();
        iface.reconstruct_text(0, &mut out);
        assert!(out.starts_with("public interface Api {"));
    }

    #[test]
    fn identifier_validity() {
        assert!(is_java_identifier("Foo"));
        assert!(is_java_identifier("_x$1"));
        assert!(!is_java_identifier(""));
        assert!(!is_java_identifier("package-info"));
        assert!(!is_java_identifier("1Bad"));
    }
}
