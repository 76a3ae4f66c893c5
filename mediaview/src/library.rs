use std::collections::BTreeSet;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::namespace::{self, Classification, Namespace};
use crate::scan::{MetadataScanner, NoopObserver, ScanObserver};
use crate::vpath::VirtualPath;

/// Mode reported for every synthetic directory: a directory, readable and
/// searchable by everyone, writable by no one.
pub const VIRTUAL_DIR_MODE: u32 = 0o040_555;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("library root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("library root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read library root {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LibraryError>;

/// Attributes shared by all synthetic directories, captured from the real
/// root when the library is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RootAttributes {
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub nlink: u64,
    pub size: u64,
    pub accessed: SystemTime,
    pub modified: SystemTime,
    pub changed: SystemTime,
}

impl RootAttributes {
    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        Self {
            mode: VIRTUAL_DIR_MODE,
            uid: metadata.uid(),
            gid: metadata.gid(),
            nlink: metadata.nlink(),
            size: metadata.size(),
            accessed: unix_time(metadata.atime(), metadata.atime_nsec()),
            modified: unix_time(metadata.mtime(), metadata.mtime_nsec()),
            changed: unix_time(metadata.ctime(), metadata.ctime_nsec()),
        }
    }
}

/// Converts a `stat` timestamp into a [`SystemTime`], clamping anything
/// before the epoch to the epoch.
pub(crate) fn unix_time(secs: i64, nsecs: i64) -> SystemTime {
    if secs < 0 {
        return UNIX_EPOCH;
    }
    UNIX_EPOCH + Duration::new(secs as u64, nsecs.clamp(0, 999_999_999) as u32)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub parsed: usize,
    pub skipped: usize,
}

/// A scanned media library: the real root, its virtual namespace, and the
/// attributes served for synthetic directories.
#[derive(Debug)]
pub struct MediaLibrary {
    root: PathBuf,
    namespace: Arc<Namespace>,
    root_attributes: RootAttributes,
    report: ScanReport,
}

impl MediaLibrary {
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::load_with_observer(root, Arc::new(NoopObserver))
    }

    /// Scans `root` and builds its namespace. Fails only when the root itself
    /// is unusable; individual documents never abort the load.
    pub fn load_with_observer<P: AsRef<Path>>(
        root: P,
        observer: Arc<dyn ScanObserver>,
    ) -> Result<Self> {
        let (root, root_attributes) = stat_root(root.as_ref())?;

        info!(root = %root.display(), "scanning media library");
        let mut scanner = MetadataScanner::new(&root).with_observer(observer);
        let namespace = namespace::build(scanner.by_ref());
        let report = ScanReport {
            parsed: scanner.parsed(),
            skipped: scanner.skipped(),
        };
        info!(
            titles = namespace.records(),
            leaves = namespace.paths().len(),
            skipped = report.skipped,
            collisions = namespace.collisions(),
            "virtual namespace built"
        );

        Ok(Self {
            root,
            namespace: Arc::new(namespace),
            root_attributes,
            report,
        })
    }

    /// Wraps an already built namespace.
    pub fn with_namespace<P: AsRef<Path>>(root: P, namespace: Namespace) -> Result<Self> {
        let (root, root_attributes) = stat_root(root.as_ref())?;
        Ok(Self {
            root,
            report: ScanReport {
                parsed: namespace.records(),
                skipped: 0,
            },
            namespace: Arc::new(namespace),
            root_attributes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn namespace(&self) -> &Arc<Namespace> {
        &self.namespace
    }

    pub fn root_attributes(&self) -> RootAttributes {
        self.root_attributes
    }

    pub fn report(&self) -> ScanReport {
        self.report
    }

    pub fn classify(&self, path: &VirtualPath) -> Classification {
        self.namespace.classify(path)
    }

    pub fn list_children(&self, path: &VirtualPath) -> Option<&BTreeSet<String>> {
        self.namespace.list_children(path)
    }
}

/// Checks that `root` is a readable directory and returns its canonical path
/// with the attributes synthetic directories inherit from it.
fn stat_root(root: &Path) -> Result<(PathBuf, RootAttributes)> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LibraryError::RootNotFound(root.to_path_buf()),
        _ => LibraryError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(LibraryError::NotADirectory(root.to_path_buf()));
    }
    let io_error = |source: std::io::Error| LibraryError::Io {
        path: root.to_path_buf(),
        source,
    };
    fs::read_dir(root).map_err(io_error)?;
    let canonical = fs::canonicalize(root).map_err(io_error)?;
    Ok((canonical, RootAttributes::from_metadata(&metadata)))
}
