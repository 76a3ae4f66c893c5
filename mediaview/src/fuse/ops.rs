//! Request handling in terms of virtual paths.
//!
//! The [`fuser::Filesystem`] callbacks translate inodes to paths and replies
//! to errnos; everything else lives here so it can be exercised without a
//! mounted filesystem.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileExt;
use std::path::{Component, Path, PathBuf};

use fuser::{FileAttr, FileType};
use tracing::debug;

use super::attr::{file_type, real_attr, virtual_dir_attr};
use super::error::{FsError, FsResult};
use super::MediaviewFs;
use crate::namespace::{Classification, Leaf};
use crate::vpath::VirtualPath;

/// What `stat` found for a virtual path.
#[derive(Debug)]
pub enum Node {
    Virtual,
    Real(fs::Metadata),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: FileType,
}

impl DirEntry {
    fn new<S: Into<String>>(name: S, kind: FileType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Filesystem statistics reported for the mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    pub blocks: u64,
    pub bfree: u64,
    pub bavail: u64,
    pub files: u64,
    pub ffree: u64,
    pub bsize: u32,
    pub namelen: u32,
    pub frsize: u32,
    pub read_only: bool,
    pub no_atime: bool,
    pub no_diratime: bool,
}

impl MediaviewFs {
    fn leaf(&self, path: &VirtualPath) -> FsResult<Option<Leaf>> {
        match self.library.classify(path) {
            Classification::Internal => Ok(None),
            Classification::Leaf(leaf) => Ok(Some(leaf)),
            Classification::NotFound => Err(FsError::NotFound),
        }
    }

    pub fn stat(&self, path: &VirtualPath) -> FsResult<Node> {
        match self.leaf(path)? {
            None => Ok(Node::Virtual),
            Some(leaf) => Ok(Node::Real(fs::symlink_metadata(leaf.real_path())?)),
        }
    }

    pub fn file_attr(&self, ino: u64, node: &Node) -> FileAttr {
        match node {
            Node::Virtual => virtual_dir_attr(ino, &self.library.root_attributes()),
            Node::Real(metadata) => real_attr(ino, metadata),
        }
    }

    /// Directory listing of `path`, starting with `.` and `..`.
    pub fn entries_of(&self, path: &VirtualPath) -> FsResult<Vec<DirEntry>> {
        let mut entries = vec![
            DirEntry::new(".", FileType::Directory),
            DirEntry::new("..", FileType::Directory),
        ];

        let Some(leaf) = self.leaf(path)? else {
            let children = self.library.list_children(path).into_iter().flatten();
            for name in children {
                let kind = match self.stat(&path.join(name)) {
                    Ok(Node::Real(metadata)) => file_type(metadata.file_type()),
                    _ => FileType::Directory,
                };
                entries.push(DirEntry::new(name.as_str(), kind));
            }
            return Ok(entries);
        };

        let real = leaf.real_path();
        if !fs::symlink_metadata(&real)?.is_dir() {
            return Ok(entries);
        }

        let mut real_entries = Vec::new();
        for entry in fs::read_dir(&real)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                debug!(dir = %real.display(), "skipping entry with a non UTF-8 name");
                continue;
            };
            let kind = entry
                .file_type()
                .map(file_type)
                .unwrap_or(FileType::RegularFile);
            real_entries.push(DirEntry::new(name, kind));
        }
        real_entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.extend(real_entries);
        Ok(entries)
    }

    /// Opens the real file behind `path` for reading and returns its handle.
    pub fn open_path(&mut self, path: &VirtualPath, flags: i32) -> FsResult<u64> {
        if requests_write(flags) {
            return Err(FsError::ReadOnly);
        }
        let leaf = self.leaf(path)?.ok_or(FsError::IsDirectory)?;
        let file = File::open(leaf.real_path())?;

        let fh = self.next_fh;
        self.next_fh += 1;
        self.handles.insert(fh, file);
        debug!(path = %path, fh, "opened");
        Ok(fh)
    }

    pub fn read_handle(&self, fh: u64, offset: u64, size: u32) -> FsResult<Vec<u8>> {
        let file = self.handles.get(&fh).ok_or(FsError::BadHandle(fh))?;
        let mut buf = vec![0u8; size as usize];
        let mut filled = 0;
        while filled < buf.len() {
            match file.read_at(&mut buf[filled..], offset + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        buf.truncate(filled);
        Ok(buf)
    }

    pub fn release_handle(&mut self, fh: u64) -> FsResult<()> {
        self.handles
            .remove(&fh)
            .map(drop)
            .ok_or(FsError::BadHandle(fh))
    }

    pub fn open_handles(&self) -> usize {
        self.handles.len()
    }

    /// Target of the symlink behind `path`. Absolute targets are rewritten
    /// relative to the link's own directory.
    pub fn link_target(&self, path: &VirtualPath) -> FsResult<PathBuf> {
        let leaf = self
            .leaf(path)?
            .ok_or_else(|| FsError::Io(io::Error::from_raw_os_error(libc::EINVAL)))?;
        let real = leaf.real_path();
        let target = fs::read_link(&real)?;
        if !target.is_absolute() {
            return Ok(target);
        }
        let link_dir = real.parent().unwrap_or(self.library.root());
        Ok(relative_path(&target, link_dir))
    }

    pub fn xattr_value(&self, path: &VirtualPath, name: &OsStr) -> FsResult<Vec<u8>> {
        let leaf = self.leaf(path)?.ok_or(FsError::NoAttribute)?;
        xattr::get(leaf.real_path(), name)?.ok_or(FsError::NoAttribute)
    }

    /// NUL-separated attribute names, as `listxattr(2)` returns them.
    pub fn xattr_names(&self, path: &VirtualPath) -> FsResult<Vec<u8>> {
        let Some(leaf) = self.leaf(path)? else {
            return Ok(Vec::new());
        };
        let mut names = Vec::new();
        for name in xattr::list(leaf.real_path())? {
            names.extend_from_slice(name.as_bytes());
            names.push(0);
        }
        Ok(names)
    }

    pub fn check_access(&self, path: &VirtualPath, mask: i32) -> FsResult<()> {
        if mask & libc::W_OK != 0 {
            return Err(FsError::AccessDenied);
        }
        self.stat(path).map(drop)
    }

    pub fn fs_stats(&self) -> FsResult<FsStats> {
        let stat = rustix::fs::statvfs(self.library.root()).map_err(io::Error::from)?;
        Ok(FsStats {
            blocks: stat.f_blocks,
            bfree: stat.f_bfree,
            bavail: stat.f_bavail,
            files: stat.f_files,
            ffree: stat.f_ffree,
            bsize: stat.f_bsize as u32,
            namelen: stat.f_namemax as u32,
            frsize: stat.f_frsize as u32,
            read_only: true,
            no_atime: true,
            no_diratime: true,
        })
    }
}

fn requests_write(flags: i32) -> bool {
    flags & libc::O_ACCMODE != libc::O_RDONLY
        || flags & (libc::O_TRUNC | libc::O_APPEND | libc::O_CREAT) != 0
}

/// `target` expressed relative to the directory `from`. Both must be
/// absolute.
fn relative_path(target: &Path, from: &Path) -> PathBuf {
    let target: Vec<Component> = target.components().collect();
    let from: Vec<Component> = from.components().collect();
    let common = target
        .iter()
        .zip(&from)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
