//! The compiled-file facade.
//!
//! A [`ClsFile`] is the long-lived identity object for one compiled file.
//! Metadata access goes through the releasable [`StubCache`]; text access
//! materializes the mirror at most once. A content reload resets the cache
//! but keeps the facade (and a previously built mirror) alive: compiled
//! artifacts are immutable in practice, and the mirror stays the
//! authoritative text view until the facade itself is discarded.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use lumen_stubs::{ClassStub, FileStub, JavaLanguageLevel, StubDecoder};

use crate::cache::{estimated_stub_bytes, EvictableCache, StubCache};
use crate::content::ContentSource;
use crate::error::{ClsError, Result};
use crate::mirror::{self, MirrorTree, SourceParser};
use crate::navigate::{self, NavigationTarget, SearchPath, SourceLoader};

/// Collaborators shared by every compiled-file facade in a project.
pub struct ClsContext {
    pub content: Arc<dyn ContentSource>,
    pub decoder: Arc<dyn StubDecoder>,
    pub parser: Arc<dyn SourceParser>,
    pub search: Arc<dyn SearchPath>,
    pub loader: Arc<dyn SourceLoader>,
}

pub struct ClsFile {
    path: PathBuf,
    context: Arc<ClsContext>,
    stubs: StubCache,
    mirror: Mutex<Option<Arc<MirrorTree>>>,
}

impl ClsFile {
    pub fn new(context: Arc<ClsContext>, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            context,
            stubs: StubCache::new(),
            mirror: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the backing location.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The metadata tree, decoding it on demand.
    ///
    /// Decode failures are logged once per attempt and surfaced; they are
    /// never retried within the same access.
    pub fn stub_tree(&self) -> Result<Arc<FileStub>> {
        self.stubs.get_or_build(|| {
            tracing::debug!(
                target = "lumen.cls",
                path = %self.path.display(),
                "stub cache miss; decoding compiled file"
            );
            let bytes = self.context.content.read_bytes(&self.path)?;
            self.context.decoder.decode(&bytes).map_err(|err| {
                tracing::warn!(
                    target = "lumen.cls",
                    path = %self.path.display(),
                    error = %err,
                    "failed to decode compiled file"
                );
                err.into()
            })
        })
    }

    /// Top-level declared classes, in declaration order.
    ///
    /// Tolerant of decode failure: returns an empty list (the failure has
    /// already been reported on the metadata path).
    pub fn declared_classes(&self) -> Vec<Arc<ClassStub>> {
        match self.stub_tree() {
            Ok(stub) => stub.classes.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Dotted package name, `""` for the default package.
    pub fn package_name(&self) -> Result<String> {
        Ok(self.stub_tree()?.package_name().to_string())
    }

    pub fn language_level(&self) -> Result<JavaLanguageLevel> {
        Ok(self.stub_tree()?.language_level)
    }

    /// Whether the metadata tree is currently materialized. Never builds.
    pub fn is_metadata_resident(&self) -> bool {
        self.stubs.is_loaded()
    }

    /// External content-reload notification: the next metadata access decodes
    /// the current backing bytes. A previously built mirror is deliberately
    /// left untouched (see the crate docs on the reload asymmetry).
    pub fn on_content_reload(&self) {
        if self.mirror.lock().unwrap().is_some() {
            tracing::debug!(
                target = "lumen.cls",
                path = %self.path.display(),
                "content reloaded after mirror materialization; mirror is kept"
            );
        }
        self.stubs.invalidate();
    }

    /// The text mirror, building and grafting it on first access.
    ///
    /// Stub access and parsing run before the mirror lock is taken: both can
    /// be lengthy (decode, external parser) and must not serialize unrelated
    /// metadata traffic. The graft and publish run inside the lock as one
    /// uninterrupted step, re-checking for a concurrent winner first.
    pub fn mirror(&self) -> Result<Arc<MirrorTree>> {
        if let Some(mirror) = self.mirror.lock().unwrap().clone() {
            return Ok(mirror);
        }

        let stub = self.stub_tree().map_err(|err| match err {
            ClsError::Io(source) => ClsError::MissingContent {
                path: self.path.clone(),
                source,
            },
            other => other,
        })?;
        let init_text = stub.reconstruct_text();
        let parsed = self
            .context
            .parser
            .parse(&self.mirror_file_name(&stub), &init_text);

        let mut slot = self.mirror.lock().unwrap();
        if let Some(mirror) = slot.clone() {
            return Ok(mirror);
        }
        let mirror = Arc::new(mirror::graft(&stub, parsed, init_text)?);
        *slot = Some(mirror.clone());
        tracing::debug!(
            target = "lumen.cls",
            path = %self.path.display(),
            classes = mirror.classes().len(),
            "mirror materialized"
        );
        Ok(mirror)
    }

    /// Full source-like text of the compiled file. Triggers the mirror build.
    pub fn text(&self) -> Result<String> {
        Ok(self.mirror()?.text().to_owned())
    }

    /// Renders the reconstructed text without materializing a mirror.
    ///
    /// Equal to the mirror initialization string; useful for one-shot
    /// decompiled views where no grafted tree is needed.
    pub fn decompile_text(&self) -> Result<String> {
        Ok(self.stub_tree()?.reconstruct_text())
    }

    /// Where navigation on this file should land: the original source when
    /// the search path yields one, this file otherwise. Never fails; decode
    /// failure degrades to self.
    pub fn navigation_target(&self) -> NavigationTarget {
        match self.stub_tree() {
            Ok(stub) => navigate::resolve_origin(
                &stub,
                &self.path,
                self.context.search.as_ref(),
                self.context.loader.as_ref(),
            ),
            Err(_) => NavigationTarget::SelfFile,
        }
    }

    /// Memory-pressure eviction entry point: drops the cached metadata tree.
    /// The next metadata access rebuilds it from the backing bytes.
    pub fn release_metadata(&self) {
        tracing::debug!(
            target = "lumen.cls",
            path = %self.path.display(),
            "releasing cached stub tree"
        );
        self.stubs.invalidate();
    }

    fn mirror_file_name(&self, stub: &FileStub) -> String {
        match stub.classes.first() {
            Some(class) => format!("{}.java", class.name),
            None => self.name(),
        }
    }
}

impl EvictableCache for ClsFile {
    fn resident_bytes(&self) -> u64 {
        self.stubs
            .peek()
            .map(|stub| estimated_stub_bytes(&stub))
            .unwrap_or(0)
    }

    fn evict(&self) {
        self.release_metadata();
    }
}

impl std::fmt::Debug for ClsFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClsFile")
            .field("path", &self.path)
            .field("metadata_resident", &self.is_metadata_resident())
            .finish()
    }
}
