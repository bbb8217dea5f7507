//! Text mirror of a compiled file, grafted onto its stub tree.
//!
//! The mirror is built once per facade: the stub tree renders an
//! initialization string, an external parser turns it into a declaration
//! tree, and the graft walks both trees in parallel attaching each declared
//! class stub to the parsed class at the same ordinal position. The two
//! trees come from independent collaborators, so an arity mismatch is an
//! internal-consistency fault rather than an input error — with one
//! tolerated exception for top-level entities whose name is not a plain
//! identifier (synthetic package-level metadata, foreign naming schemes).

use std::sync::Arc;

use lumen_stubs::{is_java_identifier, ClassStub, FileStub};
use text_size::TextRange;

use crate::error::{ClsError, Result};

/// Declaration tree produced by the external source parser.
///
/// Parsers are error-tolerant and always produce a tree; declaration order
/// matches the metadata tree's contract.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub package: Option<ParsedPackage>,
    pub classes: Vec<ParsedClass>,
}

#[derive(Debug, Clone)]
pub struct ParsedPackage {
    pub name: String,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct ParsedClass {
    pub name: String,
    pub range: TextRange,
    pub classes: Vec<ParsedClass>,
}

/// Parses source-like text into a declaration tree.
pub trait SourceParser: Send + Sync {
    fn parse(&self, file_name: &str, text: &str) -> ParsedFile;
}

/// The materialized text view of a compiled file.
///
/// Built at most once per facade and immutable afterwards; node ranges index
/// into [`MirrorTree::text`].
#[derive(Debug)]
pub struct MirrorTree {
    text: String,
    package: Option<MirrorPackage>,
    classes: Vec<MirrorClass>,
}

#[derive(Debug)]
pub struct MirrorPackage {
    name: String,
    range: TextRange,
}

#[derive(Debug)]
pub struct MirrorClass {
    name: String,
    range: TextRange,
    /// Graft handle into the metadata tree. `None` only when grafting was
    /// skipped under the identifier-validity tolerance.
    stub: Option<Arc<ClassStub>>,
    classes: Vec<MirrorClass>,
}

impl MirrorTree {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn package(&self) -> Option<&MirrorPackage> {
        self.package.as_ref()
    }

    pub fn classes(&self) -> &[MirrorClass] {
        &self.classes
    }

    /// The text slice covered by `range`.
    pub fn node_text(&self, range: TextRange) -> &str {
        &self.text[usize::from(range.start())..usize::from(range.end())]
    }
}

impl MirrorPackage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> TextRange {
        self.range
    }
}

impl MirrorClass {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn stub(&self) -> Option<&Arc<ClassStub>> {
        self.stub.as_ref()
    }

    /// Nested classes, in declaration order.
    pub fn classes(&self) -> &[MirrorClass] {
        &self.classes
    }
}

/// Grafts the stub tree onto the parsed tree, consuming the parsed tree and
/// the text it was parsed from.
pub(crate) fn graft(stub: &FileStub, parsed: ParsedFile, text: String) -> Result<MirrorTree> {
    let package = parsed.package.map(|p| MirrorPackage {
        name: p.name,
        range: p.range,
    });

    // A single compiled entity whose name is not a plain identifier never
    // parses as a class declaration; skip grafting instead of faulting.
    if let [only] = stub.classes.as_slice() {
        if !is_java_identifier(&only.name) {
            tracing::debug!(
                target = "lumen.mirror",
                name = %only.name,
                "top-level entity is not a plain identifier; mirror left ungrafted"
            );
            let classes = parsed.classes.into_iter().map(ungrafted).collect();
            return Ok(MirrorTree {
                text,
                package,
                classes,
            });
        }
    }

    let classes = graft_classes(&stub.classes, parsed.classes)?;
    Ok(MirrorTree {
        text,
        package,
        classes,
    })
}

fn graft_classes(stubs: &[Arc<ClassStub>], parsed: Vec<ParsedClass>) -> Result<Vec<MirrorClass>> {
    if stubs.len() != parsed.len() {
        tracing::error!(
            target = "lumen.mirror",
            stub_classes = stubs.len(),
            mirror_classes = parsed.len(),
            "declared-class count mismatch between stub tree and parsed mirror"
        );
        return Err(ClsError::StructuralMismatch {
            stub_classes: stubs.len(),
            mirror_classes: parsed.len(),
        });
    }

    stubs
        .iter()
        .zip(parsed)
        .map(|(stub, class)| {
            let nested = graft_classes(&stub.classes, class.classes)?;
            Ok(MirrorClass {
                name: class.name,
                range: class.range,
                stub: Some(stub.clone()),
                classes: nested,
            })
        })
        .collect()
}

fn ungrafted(class: ParsedClass) -> MirrorClass {
    MirrorClass {
        name: class.name,
        range: class.range,
        stub: None,
        classes: class.classes.into_iter().map(ungrafted).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_stubs::{ClassKind, JavaLanguageLevel};
    use text_size::TextSize;

    fn class_stub(name: &str, nested: Vec<Arc<ClassStub>>) -> Arc<ClassStub> {
        Arc::new(ClassStub {
            kind: ClassKind::Class,
            name: name.to_string(),
            access_flags: 0x0001,
            source_file: None,
            members: Vec::new(),
            classes: nested,
        })
    }

    fn file_stub(classes: Vec<Arc<ClassStub>>) -> FileStub {
        FileStub {
            language_level: JavaLanguageLevel::JAVA_17,
            package: None,
            classes,
        }
    }

    fn parsed_class(name: &str, nested: Vec<ParsedClass>) -> ParsedClass {
        ParsedClass {
            name: name.to_string(),
            range: TextRange::new(TextSize::from(0), TextSize::from(10)),
            classes: nested,
        }
    }

    #[test]
    fn grafts_classes_by_ordinal_position() {
        let stub = file_stub(vec![
            class_stub("A", Vec::new()),
            class_stub("B", Vec::new()),
            class_stub("C", Vec::new()),
        ]);
        let parsed = ParsedFile {
            package: None,
            classes: vec![
                parsed_class("A", Vec::new()),
                parsed_class("B", Vec::new()),
                parsed_class("C", Vec::new()),
            ],
        };

        let mirror = graft(&stub, parsed, "text".to_string()).unwrap();
        assert_eq!(mirror.classes().len(), 3);
        for (mirror_class, stub_class) in mirror.classes().iter().zip(&stub.classes) {
            let grafted = mirror_class.stub().expect("grafted");
            assert!(Arc::ptr_eq(grafted, stub_class));
        }
    }

    #[test]
    fn grafts_nested_classes_recursively() {
        let inner = class_stub("Inner", Vec::new());
        let outer = class_stub("Outer", vec![inner.clone()]);
        let stub = file_stub(vec![outer]);
        let parsed = ParsedFile {
            package: None,
            classes: vec![parsed_class(
                "Outer",
                vec![parsed_class("Inner", Vec::new())],
            )],
        };

        let mirror = graft(&stub, parsed, String::new()).unwrap();
        let nested = &mirror.classes()[0].classes()[0];
        assert!(Arc::ptr_eq(nested.stub().unwrap(), &inner));
    }

    #[test]
    fn arity_mismatch_is_a_fault() {
        let stub = file_stub(vec![
            class_stub("A", Vec::new()),
            class_stub("B", Vec::new()),
        ]);
        let parsed = ParsedFile {
            package: None,
            classes: vec![parsed_class("A", Vec::new())],
        };

        let err = graft(&stub, parsed, String::new()).unwrap_err();
        assert!(matches!(
            err,
            ClsError::StructuralMismatch {
                stub_classes: 2,
                mirror_classes: 1
            }
        ));
    }

    #[test]
    fn nested_arity_mismatch_is_a_fault() {
        let outer = class_stub("Outer", vec![class_stub("Inner", Vec::new())]);
        let stub = file_stub(vec![outer]);
        let parsed = ParsedFile {
            package: None,
            classes: vec![parsed_class("Outer", Vec::new())],
        };

        assert!(graft(&stub, parsed, String::new()).is_err());
    }

    #[test]
    fn non_identifier_single_entity_skips_graft() {
        let stub = file_stub(vec![class_stub("package-info", Vec::new())]);
        // The synthetic name never parses as a class declaration, so the
        // parsed side has no classes at all.
        let parsed = ParsedFile {
            package: None,
            classes: Vec::new(),
        };

        let mirror = graft(&stub, parsed, "// header\n".to_string()).unwrap();
        assert!(mirror.classes().is_empty());
        assert!(!mirror.text().is_empty());
    }

    #[test]
    fn tolerance_applies_only_to_single_entity_files() {
        let stub = file_stub(vec![
            class_stub("package-info", Vec::new()),
            class_stub("Other", Vec::new()),
        ]);
        let parsed = ParsedFile {
            package: None,
            classes: vec![parsed_class("Other", Vec::new())],
        };

        assert!(graft(&stub, parsed, String::new()).is_err());
    }
}
