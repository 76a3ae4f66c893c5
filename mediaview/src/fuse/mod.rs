//! Read-only FUSE adapter serving a [`MediaLibrary`]'s virtual namespace.

mod attr;
mod error;
mod inode;
mod mount;
mod ops;

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use fuser::{
    FUSE_ROOT_ID, Filesystem, KernelConfig, ReplyAttr, ReplyCreate, ReplyData, ReplyDirectory,
    ReplyEmpty, ReplyEntry, ReplyOpen, ReplyStatfs, ReplyWrite, ReplyXattr, Request, TimeOrNow,
};
use tracing::{debug, info, warn};

use crate::library::MediaLibrary;
use crate::vpath::VirtualPath;

pub use attr::WRITE_BITS;
pub use fuser::FileType;
pub use error::{FsError, FsResult};
pub use inode::InodeTable;
pub use mount::{MountError, MountOptions, build_mount_options, mount};
pub use ops::{DirEntry, FsStats, Node};

/// How long the kernel may cache entries and attributes.
const ATTR_TTL: Duration = Duration::from_secs(1);

pub struct MediaviewFs {
    library: Arc<MediaLibrary>,
    inodes: InodeTable,
    handles: HashMap<u64, File>,
    next_fh: u64,
}

impl MediaviewFs {
    pub fn new(library: Arc<MediaLibrary>) -> Self {
        Self {
            library,
            inodes: InodeTable::new(),
            handles: HashMap::new(),
            next_fh: 1,
        }
    }

    pub fn library(&self) -> &MediaLibrary {
        &self.library
    }

    fn path_of(&self, ino: u64) -> FsResult<VirtualPath> {
        self.inodes
            .path(ino)
            .cloned()
            .ok_or(FsError::UnknownInode(ino))
    }

    fn child_path(&self, parent: u64, name: &OsStr) -> FsResult<VirtualPath> {
        let parent = self.path_of(parent)?;
        let name = name.to_str().ok_or(FsError::NotFound)?;
        Ok(parent.join(name))
    }

    fn parent_inode(&mut self, path: &VirtualPath) -> u64 {
        match path.parent() {
            Some(parent) => self.inodes.get_or_assign(&parent),
            None => FUSE_ROOT_ID,
        }
    }
}

fn reply_xattr(reply: ReplyXattr, size: u32, data: &[u8]) {
    if size == 0 {
        reply.size(data.len() as u32);
    } else if data.len() <= size as usize {
        reply.data(data);
    } else {
        reply.error(libc::ERANGE);
    }
}

impl Filesystem for MediaviewFs {
    fn init(
        &mut self,
        _req: &Request<'_>,
        _config: &mut KernelConfig,
    ) -> std::result::Result<(), libc::c_int> {
        info!(root = %self.library.root().display(), "mediaview filesystem initialized");
        Ok(())
    }

    fn destroy(&mut self) {
        info!(open_handles = self.handles.len(), "mediaview filesystem destroyed");
    }

    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        debug!(parent, ?name, "lookup");
        let result = self.child_path(parent, name).and_then(|path| {
            let node = self.stat(&path)?;
            let ino = self.inodes.get_or_assign(&path);
            Ok(self.file_attr(ino, &node))
        });
        match result {
            Ok(attr) => reply.entry(&ATTR_TTL, &attr, 0),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, _fh: Option<u64>, reply: ReplyAttr) {
        debug!(ino, "getattr");
        let result = self
            .path_of(ino)
            .and_then(|path| self.stat(&path))
            .map(|node| self.file_attr(ino, &node));
        match result {
            Ok(attr) => reply.attr(&ATTR_TTL, &attr),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn readlink(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyData) {
        debug!(ino, "readlink");
        match self.path_of(ino).and_then(|path| self.link_target(&path)) {
            Ok(target) => reply.data(target.as_os_str().as_bytes()),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn open(&mut self, _req: &Request<'_>, ino: u64, flags: i32, reply: ReplyOpen) {
        debug!(ino, flags, "open");
        match self.path_of(ino).and_then(|path| self.open_path(&path, flags)) {
            Ok(fh) => reply.opened(fh, 0),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        debug!(ino, fh, offset, size, "read");
        let Ok(offset) = u64::try_from(offset) else {
            reply.error(libc::EINVAL);
            return;
        };
        match self.read_handle(fh, offset, size) {
            Ok(data) => reply.data(&data),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn release(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        fh: u64,
        _flags: i32,
        _lock_owner: Option<u64>,
        _flush: bool,
        reply: ReplyEmpty,
    ) {
        debug!(ino, fh, "release");
        match self.release_handle(fh) {
            Ok(()) => reply.ok(),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn opendir(&mut self, _req: &Request<'_>, ino: u64, _flags: i32, reply: ReplyOpen) {
        match self.path_of(ino).and_then(|path| self.stat(&path)) {
            Ok(_) => reply.opened(0, 0),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        debug!(ino, offset, "readdir");
        let listing = self
            .path_of(ino)
            .and_then(|path| self.entries_of(&path).map(|entries| (path, entries)));
        let (path, entries) = match listing {
            Ok(listing) => listing,
            Err(e) => {
                reply.error(e.to_errno());
                return;
            }
        };

        let skip = usize::try_from(offset).unwrap_or(0);
        for (index, entry) in entries.iter().enumerate().skip(skip) {
            let entry_ino = match entry.name.as_str() {
                "." => ino,
                ".." => self.parent_inode(&path),
                name => self.inodes.get_or_assign(&path.join(name)),
            };
            if reply.add(entry_ino, (index + 1) as i64, entry.kind, &entry.name) {
                break;
            }
        }
        reply.ok();
    }

    fn releasedir(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _fh: u64,
        _flags: i32,
        reply: ReplyEmpty,
    ) {
        reply.ok();
    }

    fn statfs(&mut self, _req: &Request<'_>, _ino: u64, reply: ReplyStatfs) {
        match self.fs_stats() {
            Ok(stats) => reply.statfs(
                stats.blocks,
                stats.bfree,
                stats.bavail,
                stats.files,
                stats.ffree,
                stats.bsize,
                stats.namelen,
                stats.frsize,
            ),
            Err(e) => {
                warn!(error = %e, "statfs failed");
                reply.error(e.to_errno());
            }
        }
    }

    fn getxattr(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        name: &OsStr,
        size: u32,
        reply: ReplyXattr,
    ) {
        match self.path_of(ino).and_then(|path| self.xattr_value(&path, name)) {
            Ok(value) => reply_xattr(reply, size, &value),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn listxattr(&mut self, _req: &Request<'_>, ino: u64, size: u32, reply: ReplyXattr) {
        match self.path_of(ino).and_then(|path| self.xattr_names(&path)) {
            Ok(names) => reply_xattr(reply, size, &names),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn access(&mut self, _req: &Request<'_>, ino: u64, mask: i32, reply: ReplyEmpty) {
        match self.path_of(ino).and_then(|path| self.check_access(&path, mask)) {
            Ok(()) => reply.ok(),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    // Everything below would modify the tree.

    fn setattr(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _mode: Option<u32>,
        _uid: Option<u32>,
        _gid: Option<u32>,
        _size: Option<u64>,
        _atime: Option<TimeOrNow>,
        _mtime: Option<TimeOrNow>,
        _ctime: Option<SystemTime>,
        _fh: Option<u64>,
        _crtime: Option<SystemTime>,
        _chgtime: Option<SystemTime>,
        _bkuptime: Option<SystemTime>,
        _flags: Option<u32>,
        reply: ReplyAttr,
    ) {
        reply.error(libc::EROFS);
    }

    fn mknod(
        &mut self,
        _req: &Request<'_>,
        _parent: u64,
        _name: &OsStr,
        _mode: u32,
        _umask: u32,
        _rdev: u32,
        reply: ReplyEntry,
    ) {
        reply.error(libc::EROFS);
    }

    fn mkdir(
        &mut self,
        _req: &Request<'_>,
        _parent: u64,
        _name: &OsStr,
        _mode: u32,
        _umask: u32,
        reply: ReplyEntry,
    ) {
        reply.error(libc::EROFS);
    }

    fn unlink(&mut self, _req: &Request<'_>, _parent: u64, _name: &OsStr, reply: ReplyEmpty) {
        reply.error(libc::EROFS);
    }

    fn rmdir(&mut self, _req: &Request<'_>, _parent: u64, _name: &OsStr, reply: ReplyEmpty) {
        reply.error(libc::EROFS);
    }

    fn symlink(
        &mut self,
        _req: &Request<'_>,
        _parent: u64,
        _link_name: &OsStr,
        _target: &Path,
        reply: ReplyEntry,
    ) {
        reply.error(libc::EROFS);
    }

    fn rename(
        &mut self,
        _req: &Request<'_>,
        _parent: u64,
        _name: &OsStr,
        _newparent: u64,
        _newname: &OsStr,
        _flags: u32,
        reply: ReplyEmpty,
    ) {
        reply.error(libc::EROFS);
    }

    fn link(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _newparent: u64,
        _newname: &OsStr,
        reply: ReplyEntry,
    ) {
        reply.error(libc::EROFS);
    }

    fn write(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _fh: u64,
        _offset: i64,
        _data: &[u8],
        _write_flags: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyWrite,
    ) {
        reply.error(libc::EROFS);
    }

    fn create(
        &mut self,
        _req: &Request<'_>,
        _parent: u64,
        _name: &OsStr,
        _mode: u32,
        _umask: u32,
        _flags: i32,
        reply: ReplyCreate,
    ) {
        reply.error(libc::EROFS);
    }

    fn setxattr(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _name: &OsStr,
        _value: &[u8],
        _flags: i32,
        _position: u32,
        reply: ReplyEmpty,
    ) {
        reply.error(libc::EROFS);
    }

    fn removexattr(&mut self, _req: &Request<'_>, _ino: u64, _name: &OsStr, reply: ReplyEmpty) {
        reply.error(libc::EROFS);
    }
}
