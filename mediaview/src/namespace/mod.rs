//! The virtual namespace: which virtual paths exist, which of them are
//! grouping directories, and which real directory each title maps to.

mod builder;
mod resolve;
mod tree;

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::vpath::VirtualPath;

pub use builder::{NamespaceBuilder, build};
pub use resolve::{Classification, Leaf};

/// Leaf virtual path -> real base directory of the title.
pub type PathIndex = HashMap<VirtualPath, PathBuf>;

/// Internal virtual path -> names of its immediate children.
pub type ChildIndex = HashMap<VirtualPath, BTreeSet<String>>;

/// Immutable result of a namespace build. Shared read-only between request
/// handlers once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    paths: PathIndex,
    children: ChildIndex,
    records: usize,
    collisions: usize,
}

impl Namespace {
    pub fn paths(&self) -> &PathIndex {
        &self.paths
    }

    pub fn children(&self) -> &ChildIndex {
        &self.children
    }

    /// Number of records consumed by the build.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Number of leaf entries overwritten by a later record pointing at a
    /// different base directory.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn is_internal(&self, path: &VirtualPath) -> bool {
        self.children.contains_key(path)
    }

    /// Children of an internal node, without `.` and `..`.
    pub fn list_children(&self, path: &VirtualPath) -> Option<&BTreeSet<String>> {
        self.children.get(path)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        NamespaceBuilder::new().finish()
    }
}
