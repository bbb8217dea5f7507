//! Best-effort resolution from a compiled file to its original source.
//!
//! Resolution computes a package-derived relative path (package segments plus
//! the first declared class's recorded source file name) and probes the
//! ordered source roots attached to the compiled file's location. Absence of
//! a match is a normal outcome, not an error: the caller navigates to the
//! compiled file itself.

use std::path::{Path, PathBuf};

use lumen_stubs::FileStub;

/// Ordered source-root provider for a compiled file's location.
pub trait SearchPath: Send + Sync {
    fn source_roots_for(&self, class_path: &Path) -> Vec<PathBuf>;
}

/// Loads a source-kind entity at `root`/`relative`, if one exists there.
pub trait SourceLoader: Send + Sync {
    fn load_source(&self, root: &Path, relative: &Path) -> Option<SourceFile>;
}

/// A resolved original-source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub root: PathBuf,
    pub path: PathBuf,
}

/// Where navigation on a compiled file should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// No original source was found; navigate to the compiled file itself.
    SelfFile,
    Source(SourceFile),
}

/// Loader that accepts any regular on-disk file at the probed location.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceLoader;

impl SourceLoader for FsSourceLoader {
    fn load_source(&self, root: &Path, relative: &Path) -> Option<SourceFile> {
        let path = root.join(relative);
        path.is_file().then(|| SourceFile {
            root: root.to_path_buf(),
            path,
        })
    }
}

pub(crate) fn resolve_origin(
    stub: &FileStub,
    class_path: &Path,
    search: &dyn SearchPath,
    loader: &dyn SourceLoader,
) -> NavigationTarget {
    let Some(first) = stub.classes.first() else {
        return NavigationTarget::SelfFile;
    };

    let source_name = first.source_file_name();
    let relative = match &stub.package {
        Some(package) => Path::new(&package.replace('.', "/")).join(&source_name),
        None => PathBuf::from(&source_name),
    };

    for root in search.source_roots_for(class_path) {
        if let Some(found) = loader.load_source(&root, &relative) {
            tracing::debug!(
                target = "lumen.navigate",
                class_path = %class_path.display(),
                source = %found.path.display(),
                "resolved compiled file to original source"
            );
            return NavigationTarget::Source(found);
        }
    }

    NavigationTarget::SelfFile
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_stubs::{ClassKind, ClassStub, JavaLanguageLevel};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct FixedRoots(Vec<PathBuf>);

    impl SearchPath for FixedRoots {
        fn source_roots_for(&self, _class_path: &Path) -> Vec<PathBuf> {
            self.0.clone()
        }
    }

    fn stub(package: Option<&str>, class: &str, source_file: Option<&str>) -> FileStub {
        FileStub {
            language_level: JavaLanguageLevel::JAVA_17,
            package: package.map(str::to_string),
            classes: vec![Arc::new(ClassStub {
                kind: ClassKind::Class,
                name: class.to_string(),
                access_flags: 0,
                source_file: source_file.map(str::to_string),
                members: Vec::new(),
                classes: Vec::new(),
            })],
        }
    }

    #[test]
    fn falls_back_to_self_when_nothing_matches() {
        let empty = TempDir::new().unwrap();
        let target = resolve_origin(
            &stub(Some("com.acme"), "Foo", None),
            Path::new("out/Foo.class"),
            &FixedRoots(vec![empty.path().to_path_buf()]),
            &FsSourceLoader,
        );
        assert_eq!(target, NavigationTarget::SelfFile);
    }

    #[test]
    fn falls_back_to_self_without_declared_classes() {
        let file = FileStub {
            language_level: JavaLanguageLevel::JAVA_17,
            package: None,
            classes: Vec::new(),
        };
        let target = resolve_origin(
            &file,
            Path::new("out/empty.class"),
            &FixedRoots(Vec::new()),
            &FsSourceLoader,
        );
        assert_eq!(target, NavigationTarget::SelfFile);
    }

    #[test]
    fn package_segments_map_to_directories() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("com/acme");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Foo.java"), "class Foo {}").unwrap();

        let target = resolve_origin(
            &stub(Some("com.acme"), "Foo", None),
            Path::new("out/com/acme/Foo.class"),
            &FixedRoots(vec![root.path().to_path_buf()]),
            &FsSourceLoader,
        );
        assert_eq!(
            target,
            NavigationTarget::Source(SourceFile {
                root: root.path().to_path_buf(),
                path: root.path().join("com/acme/Foo.java"),
            })
        );
    }

    #[test]
    fn first_matching_root_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for tmp in [&first, &second] {
            std::fs::write(tmp.path().join("Foo.java"), "class Foo {}").unwrap();
        }

        let target = resolve_origin(
            &stub(None, "Foo", None),
            Path::new("out/Foo.class"),
            &FixedRoots(vec![first.path().to_path_buf(), second.path().to_path_buf()]),
            &FsSourceLoader,
        );
        match target {
            NavigationTarget::Source(found) => assert_eq!(found.root, first.path()),
            other => panic!("expected source target, got {other:?}"),
        }
    }

    #[test]
    fn recorded_source_file_name_overrides_default() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("Origin.java"), "class Foo {}").unwrap();

        let target = resolve_origin(
            &stub(None, "Foo", Some("Origin.java")),
            Path::new("out/Foo.class"),
            &FixedRoots(vec![root.path().to_path_buf()]),
            &FsSourceLoader,
        );
        assert!(matches!(target, NavigationTarget::Source(_)));
    }
}
