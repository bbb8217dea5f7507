//! Releasable holder for a facade's decoded metadata tree.
//!
//! The holder either contains exactly one fully built tree or nothing; it
//! never exposes a partially constructed tree. An external memory manager
//! may release the tree at any point between accesses, and the next access
//! rebuilds it. Rebuilds are deterministic, so churn is a throughput concern
//! only, never a correctness one.

use std::sync::{Arc, RwLock};

use lumen_stubs::{ClassStub, FileStub, MemberStub};

use crate::error::Result;

#[derive(Debug, Default)]
pub struct StubCache {
    slot: RwLock<Option<Arc<FileStub>>>,
}

impl StubCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached tree, building it with `build` on a miss.
    ///
    /// Check, lock, re-check, build, publish: the write lock is held across
    /// the build, so at most one decode runs per facade and concurrent
    /// readers observe either the previous tree or the fully built new one.
    pub fn get_or_build<F>(&self, build: F) -> Result<Arc<FileStub>>
    where
        F: FnOnce() -> Result<FileStub>,
    {
        if let Some(tree) = self.slot.read().unwrap().clone() {
            return Ok(tree);
        }

        let mut slot = self.slot.write().unwrap();
        if let Some(tree) = slot.clone() {
            return Ok(tree);
        }

        let tree = Arc::new(build()?);
        *slot = Some(tree.clone());
        Ok(tree)
    }

    /// Drops the held tree; the next access performs a fresh build.
    pub fn invalidate(&self) {
        *self.slot.write().unwrap() = None;
    }

    /// Whether a tree is currently materialized. Never triggers a build.
    pub fn is_loaded(&self) -> bool {
        self.slot.read().unwrap().is_some()
    }

    /// The currently materialized tree, if any. Never triggers a build.
    pub fn peek(&self) -> Option<Arc<FileStub>> {
        self.slot.read().unwrap().clone()
    }
}

/// Eviction hook for an external memory manager.
///
/// Implementors drop releasable state on request and report an estimate of
/// the bytes currently held, so a manager can pick eviction candidates.
pub trait EvictableCache: Send + Sync {
    fn resident_bytes(&self) -> u64;
    fn evict(&self);
}

/// Rough self-reported size of a stub tree, for eviction accounting.
pub(crate) fn estimated_stub_bytes(stub: &FileStub) -> u64 {
    let mut bytes = std::mem::size_of::<FileStub>() as u64;
    bytes += stub.package.as_ref().map_or(0, |p| p.len() as u64);
    for class in &stub.classes {
        bytes += estimated_class_bytes(class);
    }
    bytes
}

fn estimated_class_bytes(class: &ClassStub) -> u64 {
    let mut bytes = std::mem::size_of::<ClassStub>() as u64;
    bytes += class.name.len() as u64;
    bytes += class.source_file.as_ref().map_or(0, |s| s.len() as u64);
    for member in &class.members {
        bytes += std::mem::size_of::<MemberStub>() as u64;
        bytes += match member {
            MemberStub::Field {
                name, type_text, ..
            } => (name.len() + type_text.len()) as u64,
            MemberStub::Method {
                name,
                return_type,
                params,
                ..
            } => {
                (name.len() + return_type.len()) as u64
                    + params.iter().map(|p| p.len() as u64).sum::<u64>()
            }
        };
    }
    for nested in &class.classes {
        bytes += estimated_class_bytes(nested);
    }
    bytes
}
